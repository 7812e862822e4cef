//! Sheet Demo
//!
//! Drive a bottom sheet through a scripted session without a window: open it,
//! drag it, dismiss it, and log what the host would render at each step.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use bottom_sheet::SheetConfig;

mod session;

use session::{Dismissal, SessionOptions};

#[derive(Parser)]
#[command(name = "sheet-demo")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Scripted bottom sheet sessions", long_about = None)]
struct Cli {
    /// Enable verbose output (state transitions, back handler registrations)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open a sheet, drag it, then dismiss it
    Run {
        /// Sheet config file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Sheet height when no config file is given
        #[arg(long, default_value = "320")]
        height: f32,

        /// Use overlay presentation instead of the modal layer
        #[arg(long)]
        non_modal: bool,

        /// Downward drag distance in logical pixels
        #[arg(short, long, default_value = "60")]
        drag: f32,

        /// How the sheet is dismissed if the drag leaves it open
        #[arg(long, value_enum, default_value = "close")]
        dismiss: Dismissal,

        /// Frame interval in milliseconds
        #[arg(long, default_value = "16")]
        frame_ms: f32,
    },

    /// Write a config file with every option set to its default
    InitConfig {
        /// Output path
        #[arg(default_value = "sheet.toml")]
        path: PathBuf,

        /// Sheet height
        #[arg(long, default_value = "320")]
        height: f32,
    },

    /// Validate a config file and print the resolved settings
    Check {
        /// Config file to validate
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG wins over --verbose
    let level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match cli.command {
        Commands::Run {
            config,
            height,
            non_modal,
            drag,
            dismiss,
            frame_ms,
        } => {
            let mut sheet_config = match config {
                Some(path) => load_config(&path)?,
                None => SheetConfig::new(height),
            };
            if non_modal {
                sheet_config.use_modal = false;
            }

            let summary = session::run(
                sheet_config,
                SessionOptions {
                    drag,
                    dismissal: dismiss,
                    frame_ms,
                },
            )?;
            info!(
                "Session finished: {} frames, closed {} time(s), final state {:?}",
                summary.frames, summary.closes, summary.final_state
            );
        }

        Commands::InitConfig { path, height } => {
            let text = toml::to_string_pretty(&SheetConfig::new(height))
                .context("Failed to serialize sheet config")?;
            fs::write(&path, text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {}", path.display());
        }

        Commands::Check { path } => {
            let config = load_config(&path)?;
            info!("{} is valid", path.display());
            info!("  height:            {}", config.height);
            info!("  presentation:      {:?}", config.presentation());
            info!("  draggable:         {}", config.draggable);
            info!("  dismiss threshold: {:.1}", config.dismiss_threshold());
            info!("  backdrop:          {}", config.backdrop_color().to_hex_string());
            info!(
                "  durations:         open {}ms, close {}ms",
                config.open_duration_ms, config.close_duration_ms
            );
        }
    }

    Ok(())
}

fn load_config(path: &Path) -> Result<SheetConfig> {
    SheetConfig::load(path).with_context(|| format!("Failed to load {}", path.display()))
}
