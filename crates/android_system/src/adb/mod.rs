//! ADB (Android Debug Bridge) backend
//!
//! This module provides:
//! - `command`: ADB-direct invocation of full command lines through the host shell
//! - `device`: `AdbTarget`, the `Target` implementation for a real device

mod command;
mod device;

pub use command::{adb_command, adb_command_with_config, run_host_shell};
pub use device::{parse_wm_size, AdbTarget};
