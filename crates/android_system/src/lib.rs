//! android_system: named Android system operations over ADB
//!
//! This library turns device actions into single shell commands and issues
//! them through a [`Target`]:
//! - airplane mode, activity and action launching, force-stopping apps
//! - taps and swipes, with percentage-to-pixel conversion
//! - MENU / HOME / BACK key events
//! - resetting and collecting per-app frame statistics (`dumpsys gfxinfo`)
//!
//! # Example
//!
//! ```no_run
//! use android_system::{system, AdbTarget};
//!
//! #[tokio::main]
//! async fn main() -> android_system::Result<()> {
//!     let target = AdbTarget::new("emulator-5554");
//!
//!     system::home(&target).await?;
//!     system::start_activity(&target, "com.android.settings", ".Settings").await?;
//!     system::vswipe(&target, 20, 80, Some(300), true).await?;
//!     Ok(())
//! }
//! ```

// Core modules
pub mod error;

// Configuration module
pub mod config;

// Device abstraction and backends
pub mod adb;
pub mod target;

// Operations
pub mod system;

// Re-export commonly used types and functions
pub use error::{Result, SystemError};

pub use config::{AdbConfig, ADB_CONFIG};

pub use adb::{adb_command, parse_wm_size, AdbTarget};

pub use target::{RecordedCommand, RecordingTarget, ScreenResolution, Target};

pub use system::KeyCode;
