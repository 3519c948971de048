//! Named Android system operations
//!
//! This module provides:
//! - `commands`: the exact shell command strings, as pure functions
//! - `actions`: the operations that issue those commands through a `Target`

mod actions;
pub mod commands;

pub use actions::{
    back, force_stop, gfxinfo_get, gfxinfo_reset, home, hswipe, menu, press_key,
    set_airplane_mode, start_action, start_activity, tap, vswipe,
};
pub use commands::KeyCode;
