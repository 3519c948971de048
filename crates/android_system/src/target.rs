//! Device-control abstraction the system operations are issued through

use crate::adb;
use crate::error::{Result, SystemError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Mutex, MutexGuard};
use tracing::warn;

/// Screen size of a device in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenResolution {
    pub width: u32,
    pub height: u32,
}

impl ScreenResolution {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Horizontal pixel at `pct` percent of the width
    pub fn x_at(&self, pct: u32) -> u32 {
        scale(self.width, pct)
    }

    /// Vertical pixel at `pct` percent of the height
    pub fn y_at(&self, pct: u32) -> u32 {
        scale(self.height, pct)
    }

    /// Screen midpoint, rounded down
    pub fn center(&self) -> (u32, u32) {
        (self.width / 2, self.height / 2)
    }
}

impl fmt::Display for ScreenResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// `extent * pct / 100` without intermediate overflow. Percentages above 100
/// are not rejected and yield off-screen pixels.
fn scale(extent: u32, pct: u32) -> u32 {
    if pct > 100 {
        warn!("Percentage {} is outside [0, 100]", pct);
    }
    let pixel = u64::from(extent) * u64::from(pct) / 100;
    u32::try_from(pixel).unwrap_or(u32::MAX)
}

/// An already-connected Android device commands can be issued to
#[async_trait]
pub trait Target: Send + Sync {
    /// Run `command` in the device shell and return its output
    async fn execute(&self, command: &str) -> Result<String>;

    /// Current screen resolution of the device
    async fn screen_resolution(&self) -> Result<ScreenResolution>;

    /// Serial the ADB server knows this device by
    fn adb_name(&self) -> &str;

    /// Run a full ADB command line (everything after `adb -s <name>`) on the host.
    ///
    /// Unlike [`Target::execute`], redirections in `command` are resolved by the
    /// host shell, so output can be written to a local path.
    async fn adb_command(&self, command: &str) -> Result<String> {
        adb::adb_command(self.adb_name(), command).await
    }
}

/// A command captured by [`RecordingTarget`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCommand {
    /// Issued through [`Target::execute`]
    Shell(String),
    /// Issued through [`Target::adb_command`]
    AdbDirect { device: String, command: String },
}

impl RecordedCommand {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Shell(command) => command,
            Self::AdbDirect { command, .. } => command,
        }
    }
}

impl fmt::Display for RecordedCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shell(command) => write!(f, "{}", command),
            Self::AdbDirect { device, command } => write!(f, "adb -s {} {}", device, command),
        }
    }
}

/// In-memory target that records commands instead of running them
///
/// Every command returns an empty output unless it starts with the prefix set
/// through [`RecordingTarget::failing_on`], in which case it is still recorded
/// and then reported as failed.
#[derive(Debug)]
pub struct RecordingTarget {
    name: String,
    resolution: ScreenResolution,
    fail_prefix: Option<String>,
    commands: Mutex<Vec<RecordedCommand>>,
}

impl RecordingTarget {
    pub fn new(name: impl Into<String>, resolution: ScreenResolution) -> Self {
        Self {
            name: name.into(),
            resolution,
            fail_prefix: None,
            commands: Mutex::new(Vec::new()),
        }
    }

    /// Make every command starting with `prefix` fail
    pub fn failing_on(mut self, prefix: impl Into<String>) -> Self {
        self.fail_prefix = Some(prefix.into());
        self
    }

    /// All recorded commands in issue order
    pub fn commands(&self) -> Vec<RecordedCommand> {
        self.lock().clone()
    }

    /// Only the commands issued through `execute`
    pub fn shell_commands(&self) -> Vec<String> {
        self.lock()
            .iter()
            .filter_map(|c| match c {
                RecordedCommand::Shell(command) => Some(command.clone()),
                RecordedCommand::AdbDirect { .. } => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<RecordedCommand>> {
        self.commands.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn record(&self, entry: RecordedCommand) -> Result<String> {
        let fails = self
            .fail_prefix
            .as_deref()
            .is_some_and(|prefix| entry.as_str().starts_with(prefix));
        let description = entry.to_string();
        self.lock().push(entry);

        if fails {
            Err(SystemError::CommandFailed(description))
        } else {
            Ok(String::new())
        }
    }
}

#[async_trait]
impl Target for RecordingTarget {
    async fn execute(&self, command: &str) -> Result<String> {
        self.record(RecordedCommand::Shell(command.to_string()))
    }

    async fn screen_resolution(&self) -> Result<ScreenResolution> {
        Ok(self.resolution)
    }

    fn adb_name(&self) -> &str {
        &self.name
    }

    async fn adb_command(&self, command: &str) -> Result<String> {
        self.record(RecordedCommand::AdbDirect {
            device: self.name.clone(),
            command: command.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_scaling() {
        let res = ScreenResolution::new(1080, 1920);
        assert_eq!(res.x_at(50), 540);
        assert_eq!(res.y_at(50), 960);
        assert_eq!(res.x_at(0), 0);
        assert_eq!(res.y_at(100), 1920);
        // truncates like integer division
        assert_eq!(res.x_at(33), 356);
        assert_eq!(res.center(), (540, 960));
    }

    #[test]
    fn test_out_of_range_percent_is_not_clamped() {
        let res = ScreenResolution::new(1080, 1920);
        assert_eq!(res.x_at(150), 1620);
        assert_eq!(scale(u32::MAX, u32::MAX), u32::MAX);
    }

    #[test]
    fn test_resolution_serde() {
        let res = ScreenResolution::new(720, 1280);
        let json = serde_json::to_string(&res).unwrap();
        assert_eq!(json, r#"{"width":720,"height":1280}"#);
        assert_eq!(res.to_string(), "720x1280");
    }

    #[tokio::test]
    async fn test_recording_target_records_in_order() {
        let target = RecordingTarget::new("emulator-5554", ScreenResolution::new(1080, 1920));
        target.execute("input keyevent KEYCODE_HOME").await.unwrap();
        target.adb_command("shell echo hi").await.unwrap();

        assert_eq!(
            target.commands(),
            vec![
                RecordedCommand::Shell("input keyevent KEYCODE_HOME".to_string()),
                RecordedCommand::AdbDirect {
                    device: "emulator-5554".to_string(),
                    command: "shell echo hi".to_string(),
                },
            ]
        );
        assert_eq!(target.shell_commands(), vec!["input keyevent KEYCODE_HOME"]);
        assert_eq!(
            target.commands()[1].to_string(),
            "adb -s emulator-5554 shell echo hi"
        );

        target.clear();
        assert!(target.commands().is_empty());
    }

    /// Implements only the required members
    struct BareTarget;

    #[async_trait]
    impl Target for BareTarget {
        async fn execute(&self, command: &str) -> Result<String> {
            Ok(command.to_string())
        }

        async fn screen_resolution(&self) -> Result<ScreenResolution> {
            Ok(ScreenResolution::new(1080, 1920))
        }

        fn adb_name(&self) -> &str {
            "bare-device"
        }
    }

    #[tokio::test]
    async fn test_default_adb_command_runs_on_host() {
        // The adb invocation itself may fail without a device or without adb
        // installed; the trailing `echo` shows the line went through the host shell.
        let output = BareTarget
            .adb_command("version >/dev/null 2>&1; echo routed")
            .await
            .unwrap();
        assert_eq!(output.trim(), "routed");
    }

    #[tokio::test]
    async fn test_recording_target_failure_is_recorded() {
        let target =
            RecordingTarget::new("dev", ScreenResolution::new(1, 1)).failing_on("pm clear");
        assert!(target.execute("am force-stop a.b").await.is_ok());
        let err = target.execute("pm clear a.b").await.unwrap_err();
        assert!(matches!(err, SystemError::CommandFailed(ref c) if c == "pm clear a.b"));
        assert_eq!(target.shell_commands().len(), 2);
    }
}
