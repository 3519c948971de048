//! Shell command strings for each system operation
//!
//! Every function here is pure: it only formats. Arguments are inserted
//! verbatim, so callers are responsible for any quoting the device shell needs.

use std::fmt;

/// Hardware buttons that can be pressed with `input keyevent`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    Menu,
    Home,
    Back,
}

impl KeyCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Menu => "KEYCODE_MENU",
            Self::Home => "KEYCODE_HOME",
            Self::Back => "KEYCODE_BACK",
        }
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn airplane_mode_setting(on: bool) -> String {
    format!(
        "settings put global airplane_mode_on {}",
        if on { 1 } else { 0 }
    )
}

pub fn airplane_mode_broadcast(on: bool) -> String {
    format!(
        "am broadcast -a android.intent.action.AIRPLANE_MODE --ez state {}",
        on
    )
}

pub fn start_activity(apk_name: &str, activity_name: &str) -> String {
    format!("am start -n {}/{}", apk_name, activity_name)
}

pub fn start_action(action: &str, action_args: &str) -> String {
    join_optional(format!("am start -a {}", action), action_args)
}

pub fn force_stop(apk_name: &str) -> String {
    format!("am force-stop {}", apk_name)
}

pub fn clear_data(apk_name: &str) -> String {
    format!("pm clear {}", apk_name)
}

pub fn tap(x: u32, y: u32) -> String {
    format!("input tap {} {}", x, y)
}

pub fn swipe(x1: u32, y1: u32, x2: u32, y2: u32, duration_ms: Option<u32>) -> String {
    let base = format!("input swipe {} {} {} {}", x1, y1, x2, y2);
    match duration_ms {
        Some(duration) => format!("{} {}", base, duration),
        None => base,
    }
}

pub fn key_event(key: KeyCode) -> String {
    format!("input keyevent {}", key)
}

pub fn gfxinfo_reset(apk_name: &str) -> String {
    format!("dumpsys gfxinfo {} reset", apk_name)
}

/// ADB command line (not a device shell command) dumping frame statistics
/// into a file on the host
pub fn gfxinfo_get(apk_name: &str, out_file: &str) -> String {
    format!("shell dumpsys gfxinfo {} > {}", apk_name, out_file)
}

/// Append `tail` after a space unless it is blank
fn join_optional(head: String, tail: &str) -> String {
    if tail.trim().is_empty() {
        head
    } else {
        format!("{} {}", head, tail)
    }
}
