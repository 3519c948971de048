//! ADB-direct command lines executed on the host

use crate::config::{AdbConfig, ADB_CONFIG};
use crate::error::{Result, SystemError};
use std::process::Output;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

/// Run `adb -s <device> <command>` through the host shell
///
/// The line is handed to the shell verbatim, so `command` may contain host
/// redirections (`> out_file`). Nothing is quoted or escaped.
pub async fn adb_command(device: &str, command: &str) -> Result<String> {
    adb_command_with_config(&ADB_CONFIG, device, command).await
}

/// [`adb_command`] with an explicit configuration
pub async fn adb_command_with_config(
    config: &AdbConfig,
    device: &str,
    command: &str,
) -> Result<String> {
    let line = format!("{} -s {} {}", config.adb_path, device, command);
    run_host_shell(&config.host_shell, &line, config.timeout()).await
}

/// Run a single line with `<shell> -c` and return its stdout
pub async fn run_host_shell(shell: &str, line: &str, timeout: Duration) -> Result<String> {
    debug!("Running host command: {}", line);

    let mut cmd = Command::new(shell);
    cmd.arg("-c").arg(line).kill_on_drop(true);

    let output = tokio::time::timeout(timeout, cmd.output())
        .await
        .map_err(|_| {
            SystemError::Timeout(format!(
                "`{}` did not finish after {:.1}s",
                line,
                timeout.as_secs_f64()
            ))
        })?
        .map_err(SystemError::Io)?;

    collect_output(line, output)
}

/// Turn a finished process into its stdout, or an error carrying its diagnostics
pub(crate) fn collect_output(what: &str, output: Output) -> Result<String> {
    if !output.status.success() {
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        let combined = format!("{}{}", stdout, stderr);
        warn!("`{}` failed with {}", what, output.status);
        return Err(SystemError::CommandFailed(format!(
            "`{}` exited with {}: {}",
            what,
            output.status,
            combined.trim()
        )));
    }

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    debug!("`{}` returned {} bytes", what, stdout.len());
    Ok(stdout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_host_shell_redirects_locally() {
        let temp_dir = tempdir().unwrap();
        let out_file = temp_dir.path().join("frames.txt");
        let line = format!("echo 'Total frames rendered: 42' > {}", out_file.display());

        let stdout = run_host_shell("sh", &line, Duration::from_secs(10))
            .await
            .unwrap();

        assert!(stdout.is_empty());
        let written = std::fs::read_to_string(&out_file).unwrap();
        assert_eq!(written.trim(), "Total frames rendered: 42");
    }

    #[tokio::test]
    async fn test_host_shell_failure() {
        let err = run_host_shell("sh", "echo broken >&2; exit 3", Duration::from_secs(10))
            .await
            .unwrap_err();

        match err {
            SystemError::CommandFailed(message) => assert!(message.contains("broken")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_non_utf8_output_is_not_an_error() {
        let stdout = run_host_shell("sh", r"printf 'ok\377\n'", Duration::from_secs(10))
            .await
            .unwrap();
        assert_eq!(stdout, "ok\u{FFFD}\n");
    }

    #[tokio::test]
    async fn test_host_shell_timeout() {
        let err = run_host_shell("sh", "sleep 5", Duration::from_millis(200))
            .await
            .unwrap_err();
        assert!(matches!(err, SystemError::Timeout(_)));
    }

    #[tokio::test]
    async fn test_adb_command_line_layout() {
        // `echo` stands in for adb so the assembled line can be observed
        let temp_dir = tempdir().unwrap();
        let out_file = temp_dir.path().join("gfx.txt");
        let config = AdbConfig::new("echo").with_host_shell("sh");
        let command = format!("shell dumpsys gfxinfo com.example > {}", out_file.display());

        adb_command_with_config(&config, "emulator-5554", &command)
            .await
            .unwrap();

        let written = std::fs::read_to_string(&out_file).unwrap();
        assert_eq!(
            written.trim(),
            "-s emulator-5554 shell dumpsys gfxinfo com.example"
        );
    }
}
