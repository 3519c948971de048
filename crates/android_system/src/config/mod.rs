//! Configuration module for android_system
//!
//! This module contains:
//! - `adb`: ADB binary location, host shell and command timeout

mod adb;

pub use adb::{AdbConfig, ADB_CONFIG};
