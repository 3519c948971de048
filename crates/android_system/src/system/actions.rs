//! Android system operations issued through a [`Target`]

use super::commands::{self, KeyCode};
use crate::error::Result;
use crate::target::Target;
use tracing::debug;

async fn run<T: Target + ?Sized>(target: &T, command: String) -> Result<String> {
    debug!("[{}] {}", target.adb_name(), command);
    target.execute(&command).await
}

/// Turn airplane mode on or off
///
/// Writes the global setting, then broadcasts the state change. The two
/// commands are not atomic: if the first fails the broadcast is not sent.
pub async fn set_airplane_mode<T: Target + ?Sized>(target: &T, on: bool) -> Result<Vec<String>> {
    let setting = run(target, commands::airplane_mode_setting(on)).await?;
    let broadcast = run(target, commands::airplane_mode_broadcast(on)).await?;
    Ok(vec![setting, broadcast])
}

/// Start an application by package and activity name
pub async fn start_activity<T: Target + ?Sized>(
    target: &T,
    apk_name: &str,
    activity_name: &str,
) -> Result<String> {
    run(target, commands::start_activity(apk_name, activity_name)).await
}

/// Start an activity by action. `action_args` is passed through unescaped.
pub async fn start_action<T: Target + ?Sized>(
    target: &T,
    action: &str,
    action_args: &str,
) -> Result<String> {
    run(target, commands::start_action(action, action_args)).await
}

/// Stop an application, optionally clearing its data afterwards
pub async fn force_stop<T: Target + ?Sized>(
    target: &T,
    apk_name: &str,
    clear: bool,
) -> Result<Vec<String>> {
    let mut outputs = vec![run(target, commands::force_stop(apk_name)).await?];
    if clear {
        outputs.push(run(target, commands::clear_data(apk_name)).await?);
    }
    Ok(outputs)
}

/// Tap a point on the screen
///
/// Unless `absolute` is set, `x` and `y` are percentages of the screen width
/// and height.
pub async fn tap<T: Target + ?Sized>(target: &T, x: u32, y: u32, absolute: bool) -> Result<String> {
    let (x, y) = if absolute {
        (x, y)
    } else {
        let resolution = target.screen_resolution().await?;
        (resolution.x_at(x), resolution.y_at(y))
    };

    run(target, commands::tap(x, y)).await
}

/// Swipe vertically along the horizontal middle of the screen
///
/// `y_low_pct` and `y_top_pct` bound the swipe as percentages of the screen
/// height. An upward swipe starts at `y_top_pct` and ends at `y_low_pct`; a
/// downward one runs the other way.
pub async fn vswipe<T: Target + ?Sized>(
    target: &T,
    y_low_pct: u32,
    y_top_pct: u32,
    duration_ms: Option<u32>,
    swipe_up: bool,
) -> Result<String> {
    let resolution = target.screen_resolution().await?;
    let (x, _) = resolution.center();
    let (y1, y2) = if swipe_up {
        (resolution.y_at(y_top_pct), resolution.y_at(y_low_pct))
    } else {
        (resolution.y_at(y_low_pct), resolution.y_at(y_top_pct))
    };

    run(target, commands::swipe(x, y1, x, y2, duration_ms)).await
}

/// Swipe horizontally along the vertical middle of the screen
///
/// A rightward swipe starts at `x_left_pct` and ends at `x_right_pct`; a
/// leftward one runs the other way.
pub async fn hswipe<T: Target + ?Sized>(
    target: &T,
    x_left_pct: u32,
    x_right_pct: u32,
    duration_ms: Option<u32>,
    swipe_right: bool,
) -> Result<String> {
    let resolution = target.screen_resolution().await?;
    let (_, y) = resolution.center();
    let (x1, x2) = if swipe_right {
        (resolution.x_at(x_left_pct), resolution.x_at(x_right_pct))
    } else {
        (resolution.x_at(x_right_pct), resolution.x_at(x_left_pct))
    };

    run(target, commands::swipe(x1, y, x2, y, duration_ms)).await
}

/// Press a hardware button
pub async fn press_key<T: Target + ?Sized>(target: &T, key: KeyCode) -> Result<String> {
    run(target, commands::key_event(key)).await
}

/// Press the MENU button
pub async fn menu<T: Target + ?Sized>(target: &T) -> Result<String> {
    press_key(target, KeyCode::Menu).await
}

/// Press the HOME button
pub async fn home<T: Target + ?Sized>(target: &T) -> Result<String> {
    press_key(target, KeyCode::Home).await
}

/// Press the BACK button
pub async fn back<T: Target + ?Sized>(target: &T) -> Result<String> {
    press_key(target, KeyCode::Back).await
}

/// Reset the frame statistics collected for an app
pub async fn gfxinfo_reset<T: Target + ?Sized>(target: &T, apk_name: &str) -> Result<String> {
    run(target, commands::gfxinfo_reset(apk_name)).await
}

/// Dump the frame statistics of an app into `out_file` on the host
///
/// Goes through [`Target::adb_command`] rather than `execute`, because the
/// redirection has to happen on the host side.
pub async fn gfxinfo_get<T: Target + ?Sized>(
    target: &T,
    apk_name: &str,
    out_file: &str,
) -> Result<String> {
    let command = commands::gfxinfo_get(apk_name, out_file);
    debug!("[{}] adb {}", target.adb_name(), command);
    target.adb_command(&command).await
}
