//! android-system CLI - issue Android system operations over ADB
//!
//! Usage:
//!     android-system [OPTIONS] <COMMAND>
//!
//! Environment Variables:
//!     ANDROID_SYSTEM_DEVICE_ID: ADB serial of the target device
//!     ANDROID_SYSTEM_ADB_PATH: Path to the adb executable (default: adb)
//!     ANDROID_SYSTEM_HOST_SHELL: Shell used for ADB-direct commands (default: sh)
//!     ANDROID_SYSTEM_COMMAND_TIMEOUT: Per-command timeout in seconds (default: 30)
//!     RUST_LOG: Log filter (default: warn)

use android_system::{system, AdbTarget, RecordingTarget, ScreenResolution, Target, ADB_CONFIG};
use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Android system operations over ADB
#[derive(Parser, Debug)]
#[command(name = "android-system")]
#[command(about = "Issue Android system operations over ADB")]
#[command(after_help = r#"Examples:
    # Tap the middle of the screen
    android-system -d emulator-5554 tap 50 50

    # Tap an absolute pixel
    android-system tap 540 960 --absolute

    # Scroll a list down (swipe up from 80% to 20% of the height)
    android-system vswipe 20 80 --duration 300

    # Stop an app and wipe its data
    android-system force-stop com.example.app --clear

    # Collect frame statistics to a local file
    android-system gfxinfo-get com.example.app ./gfxinfo.txt

    # Print the commands instead of running them
    android-system --dry-run airplane on
"#)]
struct Cli {
    /// ADB device serial
    #[arg(short = 'd', long, env = "ANDROID_SYSTEM_DEVICE_ID")]
    device_id: Option<String>,

    /// Print the commands that would be issued instead of running them
    #[arg(long)]
    dry_run: bool,

    /// Screen width assumed in dry-run mode
    #[arg(long, default_value = "1080")]
    width: u32,

    /// Screen height assumed in dry-run mode
    #[arg(long, default_value = "1920")]
    height: u32,

    /// Suppress command output
    #[arg(short = 'q', long)]
    quiet: bool,

    #[command(subcommand)]
    command: Op,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Switch {
    On,
    Off,
}

#[derive(Subcommand, Debug)]
enum Op {
    /// Turn airplane mode on or off
    Airplane {
        #[arg(value_enum)]
        state: Switch,
    },

    /// Start an activity by package and activity name
    StartActivity {
        apk_name: String,
        activity_name: String,
    },

    /// Start an activity by action, with free-form arguments
    StartAction {
        action: String,
        /// Arguments passed to `am start` verbatim
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Stop an application
    ForceStop {
        apk_name: String,
        /// Also clear the application data
        #[arg(long)]
        clear: bool,
    },

    /// Tap a point, in percent of the screen unless --absolute
    Tap {
        x: u32,
        y: u32,
        #[arg(long)]
        absolute: bool,
    },

    /// Vertical swipe between two height percentages
    Vswipe {
        low: u32,
        top: u32,
        /// Swipe duration in milliseconds
        #[arg(long)]
        duration: Option<u32>,
        /// Swipe downwards instead of upwards
        #[arg(long)]
        down: bool,
    },

    /// Horizontal swipe between two width percentages
    Hswipe {
        left: u32,
        right: u32,
        /// Swipe duration in milliseconds
        #[arg(long)]
        duration: Option<u32>,
        /// Swipe leftwards instead of rightwards
        #[arg(long)]
        leftward: bool,
    },

    /// Press the MENU button
    Menu,

    /// Press the HOME button
    Home,

    /// Press the BACK button
    Back,

    /// Reset the frame statistics of an app
    GfxinfoReset { apk_name: String },

    /// Dump the frame statistics of an app into a local file
    GfxinfoGet {
        apk_name: String,
        out_file: String,
    },

    /// Print the screen resolution as JSON
    Resolution,
}

/// Dispatch one operation, returning the outputs of the issued commands
async fn run_op<T: Target + ?Sized>(target: &T, op: &Op) -> Result<Vec<String>> {
    let outputs = match op {
        Op::Airplane { state } => system::set_airplane_mode(target, *state == Switch::On).await?,
        Op::StartActivity {
            apk_name,
            activity_name,
        } => vec![system::start_activity(target, apk_name, activity_name).await?],
        Op::StartAction { action, args } => {
            vec![system::start_action(target, action, &args.join(" ")).await?]
        }
        Op::ForceStop { apk_name, clear } => system::force_stop(target, apk_name, *clear).await?,
        Op::Tap { x, y, absolute } => vec![system::tap(target, *x, *y, *absolute).await?],
        Op::Vswipe {
            low,
            top,
            duration,
            down,
        } => vec![system::vswipe(target, *low, *top, *duration, !*down).await?],
        Op::Hswipe {
            left,
            right,
            duration,
            leftward,
        } => vec![system::hswipe(target, *left, *right, *duration, !*leftward).await?],
        Op::Menu => vec![system::menu(target).await?],
        Op::Home => vec![system::home(target).await?],
        Op::Back => vec![system::back(target).await?],
        Op::GfxinfoReset { apk_name } => vec![system::gfxinfo_reset(target, apk_name).await?],
        Op::GfxinfoGet { apk_name, out_file } => {
            vec![system::gfxinfo_get(target, apk_name, out_file).await?]
        }
        Op::Resolution => {
            let resolution = target.screen_resolution().await?;
            vec![serde_json::to_string(&resolution)?]
        }
    };
    Ok(outputs)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.dry_run {
        let target = RecordingTarget::new(
            cli.device_id.as_deref().unwrap_or("dry-run"),
            ScreenResolution::new(cli.width, cli.height),
        );
        let outputs = run_op(&target, &cli.command).await?;
        if matches!(cli.command, Op::Resolution) {
            outputs.iter().for_each(|o| println!("{}", o));
        }
        for command in target.commands() {
            println!("{}", command);
        }
        return Ok(());
    }

    if which::which(&ADB_CONFIG.adb_path).is_err() {
        return Err(anyhow!(
            "{} is not installed or not in PATH (set ANDROID_SYSTEM_ADB_PATH)",
            ADB_CONFIG.adb_path
        ));
    }

    let device_id = cli.device_id.ok_or_else(|| {
        anyhow!("No device given; pass --device-id or set ANDROID_SYSTEM_DEVICE_ID")
    })?;
    debug!("Running {:?} on {}", cli.command, device_id);
    let target = AdbTarget::new(device_id);

    let outputs = run_op(&target, &cli.command).await?;
    if !cli.quiet {
        for output in outputs {
            let output = output.trim_end();
            if !output.is_empty() {
                println!("{}", output);
            }
        }
    }

    Ok(())
}
