//! Binary entrypoint for the Lotería display.
//!
//! Delegates all logic to the library crate; no local modules here.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use loteria_display::catalog::Catalog;
use loteria_display::config::Configuration;
use loteria_display::events::DisplayMode;
use loteria_display::session::Session;
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

const CARDS_HINT: &str = "Make sure you have a 'cards' folder with images next to the executable.";

#[derive(Debug, Parser)]
#[command(
    name = "loteria-display",
    version,
    about = "Draw Lotería cards from a folder of images"
)]
struct Cli {
    /// Optional YAML config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Cards directory (overrides the config file)
    #[arg(long, value_name = "DIR")]
    cards: Option<PathBuf>,

    /// Deterministic shuffle seed
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Start in fullscreen mode
    #[arg(long)]
    fullscreen: bool,

    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbosity: u8) {
    // map -v to log level; RUST_LOG still wins when set
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("loteria_display={level},wgpu=warn,winit=warn"))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            eprintln!("{CARDS_HINT}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut cfg = match cli.config.as_deref() {
        Some(path) => Configuration::from_yaml_file(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => Configuration::default(),
    };
    if cli.seed.is_some() {
        cfg.shuffle_seed = cli.seed;
    }
    if cli.fullscreen {
        cfg.window.start_fullscreen = true;
    }
    let cfg = cfg.validated().context("invalid configuration values")?;

    let cards_dir = match cli.cards {
        Some(dir) => dir,
        None => cfg.resolve_cards_dir(&executable_dir()?),
    };
    let catalog = Catalog::load(&cards_dir)?;
    info!(count = catalog.len(), dir = %cards_dir.display(), "cards ready");

    let mode = if cfg.window.start_fullscreen {
        DisplayMode::Fullscreen
    } else {
        DisplayMode::Windowed
    };
    let session = Session::new(catalog, cfg.shuffle_seed, mode);
    loteria_display::viewer::run(session, &cfg)
}

fn executable_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("failed to locate the running executable")?;
    Ok(exe
        .parent()
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf))
}
