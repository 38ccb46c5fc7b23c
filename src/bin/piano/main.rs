//! piano - play the computer keyboard like a piano
//!
//! Run with: cargo run --bin piano

mod app;
mod audio;
mod keys;
mod ui;

use std::{
    fs::File,
    io::stdout,
    path::{Path, PathBuf},
    sync::Mutex,
    time::Duration,
};

use clap::Parser;
use color_eyre::eyre::{Result as EyreResult, WrapErr};
use crossterm::{
    event::{
        DisableFocusChange, EnableFocusChange, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal::supports_keyboard_enhancement,
    ExecutableCommand,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use saavy_piano::{Piano, PianoConfig};

use app::{App, ReleaseMode};

#[derive(Debug, Parser)]
#[command(name = "piano", version, about = "Computer-keyboard piano")]
struct Cli {
    /// TOML settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Initial master volume, 0.0 to 1.0
    #[arg(short, long)]
    volume: Option<f32>,

    /// Initial octave shift
    #[arg(short, long, allow_hyphen_values = true)]
    octave_shift: Option<i8>,

    /// Write logs here. The terminal belongs to the UI, so nothing is logged without it.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Hold time per key press when the terminal cannot report key releases
    #[arg(long, default_value_t = 300)]
    hold_ms: u64,
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config = load_config(&cli)?;
    info!(?config, "starting piano");

    let (piano, output, scope) = match audio::open(&config) {
        Ok(connection) => (
            Piano::new(config, connection.sink),
            Some(connection.output),
            Some(connection.scope),
        ),
        Err(err) => {
            warn!(%err, "audio output unavailable");
            (Piano::silent(config), None, None)
        }
    };

    let mut terminal = ratatui::init();
    let release_mode = enable_key_reporting(cli.hold_ms);
    info!(?release_mode, "keyboard mode");

    let result = App::new(piano, output, scope, release_mode).run(&mut terminal);

    disable_key_reporting(release_mode);
    ratatui::restore();
    result
}

fn init_logging(path: &Path) -> EyreResult<()> {
    let file = File::create(path)
        .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn load_config(cli: &Cli) -> EyreResult<PianoConfig> {
    let mut config = match &cli.config {
        Some(path) => PianoConfig::load(path)
            .wrap_err_with(|| format!("failed to load config {}", path.display()))?,
        None => PianoConfig::default(),
    };

    if let Some(volume) = cli.volume {
        config.master_volume = volume;
    }
    if let Some(shift) = cli.octave_shift {
        config.octave_shift = shift;
    }

    config.validate().wrap_err("invalid settings")
}

/// Ask the terminal for key release events. Without them, presses are
/// released after a fixed hold.
fn enable_key_reporting(hold_ms: u64) -> ReleaseMode {
    if let Err(err) = stdout().execute(EnableFocusChange) {
        warn!(%err, "focus reporting unavailable");
    }

    let supported = supports_keyboard_enhancement().unwrap_or(false);
    if supported
        && stdout()
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok()
    {
        ReleaseMode::Reported
    } else {
        ReleaseMode::Timed(Duration::from_millis(hold_ms))
    }
}

fn disable_key_reporting(mode: ReleaseMode) {
    if mode == ReleaseMode::Reported {
        let _ = stdout().execute(PopKeyboardEnhancementFlags);
    }
    let _ = stdout().execute(DisableFocusChange);
}
