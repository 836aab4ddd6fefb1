pub mod cli;
pub mod config;
pub mod core;
pub mod highlighter;
pub mod math;

pub use config::{LogLevel, OverlayConfig, OverlayOptions};
pub use highlighter::{Highlighter, HighlighterBuilder, HighlighterStats, OverlayState};
pub use math::{Bounds, Rect, Rgba};
