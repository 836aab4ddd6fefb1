// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::LogLevel;

#[derive(Parser, Debug, Clone)]
#[command(name = "highlight-overlay")]
#[command(about = "Punch-hole highlight overlay renderer", long_about = None)]
pub struct Cli {
    /// Minimum severity to log; overrides loggingLevel from the options file
    #[arg(long = "log-level", global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Render one overlay and write it as PNG or print its data URI
    Render(RenderArgs),
    /// Show the overlay, replay a resize burst and report what ran
    Simulate(SimulateArgs),
}

impl Command {
    pub fn overlay(&self) -> &OverlayArgs {
        match self {
            Command::Render(args) => &args.overlay,
            Command::Simulate(args) => &args.overlay,
        }
    }
}

/// Inputs shared by every command
#[derive(Args, Debug, Clone)]
pub struct OverlayArgs {
    /// JSON array of target bounds ({left, top, width, height} or {left, top, right, bottom})
    #[arg(long)]
    pub targets: PathBuf,

    /// Viewport width in pixels
    #[arg(long, default_value_t = 800)]
    pub width: u32,

    /// Viewport height in pixels
    #[arg(long, default_value_t = 600)]
    pub height: u32,

    /// JSON options block (backgroundRed, fillAlpha, radiusMultiplier, ...)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    #[command(flatten)]
    pub overlay: OverlayArgs,

    /// Write PNG bytes here instead of printing the data URI
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub overlay: OverlayArgs,

    /// Number of resize events to fire
    #[arg(long, default_value_t = 5)]
    pub resizes: usize,

    /// Seconds between resize events
    #[arg(long, default_value_t = 0.05)]
    pub interval: f32,

    /// Pixels the viewport grows by on each resize
    #[arg(long, default_value_t = 10)]
    pub grow: u32,
}
