//! ADB configuration read from the environment

use lazy_static::lazy_static;
use std::env;
use std::time::Duration;
use tracing::warn;

const DEFAULT_COMMAND_TIMEOUT: f64 = 30.0;

/// A timeout must be positive and representable as a `Duration`
fn is_valid_timeout(seconds: f64) -> bool {
    seconds > 0.0 && Duration::try_from_secs_f64(seconds).is_ok()
}

/// Settings shared by every ADB invocation
#[derive(Debug, Clone, PartialEq)]
pub struct AdbConfig {
    /// Path to the `adb` executable
    pub adb_path: String,
    /// Host shell used for ADB-direct command lines
    pub host_shell: String,
    /// Upper bound for a single command, in seconds
    pub command_timeout: f64,
}

impl AdbConfig {
    pub fn new(adb_path: impl Into<String>) -> Self {
        Self {
            adb_path: adb_path.into(),
            ..Self::default()
        }
    }

    pub fn with_host_shell(mut self, host_shell: impl Into<String>) -> Self {
        self.host_shell = host_shell.into();
        self
    }

    /// Override the command timeout. Values that are not positive or do not
    /// fit in a `Duration` are ignored.
    pub fn with_command_timeout(mut self, seconds: f64) -> Self {
        if is_valid_timeout(seconds) {
            self.command_timeout = seconds;
        } else {
            warn!("Ignoring invalid command timeout: {}", seconds);
        }
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::try_from_secs_f64(self.command_timeout)
            .ok()
            .filter(|d| !d.is_zero())
            .unwrap_or_else(|| Duration::from_secs_f64(DEFAULT_COMMAND_TIMEOUT))
    }
}

impl Default for AdbConfig {
    fn default() -> Self {
        Self {
            adb_path: env::var("ANDROID_SYSTEM_ADB_PATH").unwrap_or_else(|_| "adb".to_string()),
            host_shell: env::var("ANDROID_SYSTEM_HOST_SHELL").unwrap_or_else(|_| "sh".to_string()),
            command_timeout: env::var("ANDROID_SYSTEM_COMMAND_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|v: &f64| is_valid_timeout(*v))
                .unwrap_or(DEFAULT_COMMAND_TIMEOUT),
        }
    }
}

lazy_static! {
    /// Global ADB configuration instance
    pub static ref ADB_CONFIG: AdbConfig = AdbConfig::default();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides() {
        let config = AdbConfig::new("/opt/platform-tools/adb")
            .with_host_shell("bash")
            .with_command_timeout(2.5);

        assert_eq!(config.adb_path, "/opt/platform-tools/adb");
        assert_eq!(config.host_shell, "bash");
        assert_eq!(config.timeout(), Duration::from_millis(2500));
    }

    #[test]
    fn test_invalid_timeouts_are_ignored() {
        let base = AdbConfig::new("adb").with_command_timeout(5.0);
        for bad in [-1.0, 0.0, f64::NAN, f64::INFINITY, 1e30] {
            let config = base.clone().with_command_timeout(bad);
            assert_eq!(config.command_timeout, 5.0);
            assert_eq!(config.timeout(), Duration::from_secs(5));
        }
    }

    #[test]
    fn test_out_of_range_field_falls_back_to_default() {
        let mut config = AdbConfig::new("adb");
        for bad in [-1.0, 0.0, f64::NAN, 1e30] {
            config.command_timeout = bad;
            assert_eq!(config.timeout(), Duration::from_secs(30));
        }
    }

    #[test]
    fn test_global_config_has_positive_timeout() {
        assert!(ADB_CONFIG.command_timeout > 0.0);
        assert!(!ADB_CONFIG.adb_path.is_empty());
    }
}
