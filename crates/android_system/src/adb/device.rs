//! `Target` implementation backed by the `adb` executable

use super::command::collect_output;
use crate::config::{AdbConfig, ADB_CONFIG};
use crate::error::{Result, SystemError};
use crate::target::{ScreenResolution, Target};
use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use tokio::process::Command;
use tracing::debug;

lazy_static! {
    static ref WM_SIZE_RE: Regex =
        Regex::new(r"(Physical|Override) size:\s*(\d+)x(\d+)").expect("valid wm size pattern");
}

/// An Android device reachable through the ADB server
#[derive(Debug, Clone)]
pub struct AdbTarget {
    device_id: String,
    config: AdbConfig,
}

impl AdbTarget {
    /// Target the device with the given serial using the global configuration
    pub fn new(device_id: impl Into<String>) -> Self {
        Self::with_config(device_id, ADB_CONFIG.clone())
    }

    pub fn with_config(device_id: impl Into<String>, config: AdbConfig) -> Self {
        Self {
            device_id: device_id.into(),
            config,
        }
    }

    pub fn config(&self) -> &AdbConfig {
        &self.config
    }
}

#[async_trait]
impl Target for AdbTarget {
    async fn execute(&self, command: &str) -> Result<String> {
        debug!("[{}] shell: {}", self.device_id, command);

        let mut cmd = Command::new(&self.config.adb_path);
        cmd.arg("-s")
            .arg(&self.device_id)
            .arg("shell")
            .arg(command)
            .kill_on_drop(true);

        let timeout = self.config.timeout();
        let output = tokio::time::timeout(timeout, cmd.output())
            .await
            .map_err(|_| {
                SystemError::Timeout(format!(
                    "`{}` on {} did not finish after {:.1}s",
                    command,
                    self.device_id,
                    timeout.as_secs_f64()
                ))
            })?
            .map_err(SystemError::Io)?;

        collect_output(command, output)
    }

    async fn screen_resolution(&self) -> Result<ScreenResolution> {
        let output = self.execute("wm size").await?;
        parse_wm_size(&output)
    }

    fn adb_name(&self) -> &str {
        &self.device_id
    }

    async fn adb_command(&self, command: &str) -> Result<String> {
        super::adb_command_with_config(&self.config, &self.device_id, command).await
    }
}

/// Parse `wm size` output, preferring the override size when one is set
pub fn parse_wm_size(output: &str) -> Result<ScreenResolution> {
    let mut physical = None;
    let mut overridden = None;

    for caps in WM_SIZE_RE.captures_iter(output) {
        let (Ok(width), Ok(height)) = (caps[2].parse::<u32>(), caps[3].parse::<u32>()) else {
            continue;
        };
        let resolution = ScreenResolution::new(width, height);
        if &caps[1] == "Override" {
            overridden = Some(resolution);
        } else {
            physical = Some(resolution);
        }
    }

    overridden.or(physical).ok_or_else(|| {
        SystemError::ParseError(format!(
            "No screen size in wm size output: {}",
            output.trim()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_physical_size() {
        let res = parse_wm_size("Physical size: 1080x1920\n").unwrap();
        assert_eq!(res, ScreenResolution::new(1080, 1920));
    }

    #[test]
    fn test_parse_prefers_override() {
        let res = parse_wm_size("Physical size: 1440x3040\nOverride size: 1080x2280\n").unwrap();
        assert_eq!(res, ScreenResolution::new(1080, 2280));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = parse_wm_size("error: no devices/emulators found").unwrap_err();
        assert!(matches!(err, SystemError::ParseError(_)));
    }

    #[test]
    fn test_adb_name_is_serial() {
        let target = AdbTarget::with_config("192.168.1.100:5555", AdbConfig::new("adb"));
        assert_eq!(target.adb_name(), "192.168.1.100:5555");
        assert_eq!(target.config().adb_path, "adb");
    }

    #[tokio::test]
    async fn test_execute_passes_serial_and_shell() {
        // `echo` stands in for adb and prints the argument vector it was given
        let target = AdbTarget::with_config("emulator-5554", AdbConfig::new("echo"));
        let output = target.execute("input tap 540 960").await.unwrap();
        assert_eq!(output.trim(), "-s emulator-5554 shell input tap 540 960");
    }

    #[tokio::test]
    async fn test_execute_missing_binary_is_io_error() {
        let target = AdbTarget::with_config(
            "emulator-5554",
            AdbConfig::new("/nonexistent/android-system/adb"),
        );
        let err = target.execute("wm size").await.unwrap_err();
        assert!(matches!(err, SystemError::Io(_)));
    }
}
