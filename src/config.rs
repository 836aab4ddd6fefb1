// config.rs - Overlay options as supplied by callers, and their validated form
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;
use log::{Level, LevelFilter};
use serde::Deserialize;
use serde_json::Value;

use crate::math::Rgba;

pub const DEFAULT_BACKGROUND: Rgba = Rgba::new(0, 0, 0, 155);
pub const DEFAULT_FILL: Rgba = Rgba::new(0, 0, 0, 10);
pub const DEFAULT_RADIUS_MULTIPLIER: f64 = 1.75;
pub const DEFAULT_RESIZE_DELAY_MS: u64 = 200;

/// Minimum severity an overlay instance reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    #[default]
    Error,
}

impl LogLevel {
    /// Numeric levels 0..=3, debug through error
    pub fn from_index(index: i64) -> Option<Self> {
        match index {
            0 => Some(LogLevel::Debug),
            1 => Some(LogLevel::Info),
            2 => Some(LogLevel::Warn),
            3 => Some(LogLevel::Error),
            _ => None,
        }
    }

    pub fn filter(self) -> LevelFilter {
        match self {
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Error => LevelFilter::Error,
        }
    }

    pub fn allows(self, level: Level) -> bool {
        level <= self.filter()
    }

    /// Forward to the `log` facade if this instance's level lets `level` through
    pub fn emit(self, level: Level, args: fmt::Arguments<'_>) {
        if self.allows(level) {
            log::log!(level, "{}", args);
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            other => Err(format!("unknown logging level '{other}'")),
        }
    }
}

/// Options exactly as a caller supplied them.
///
/// Every field is kept as raw JSON so a bad value only loses that one
/// option instead of failing the whole block.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OverlayOptions {
    pub background_red: Option<Value>,
    pub background_green: Option<Value>,
    pub background_blue: Option<Value>,
    pub background_alpha: Option<Value>,
    pub fill_red: Option<Value>,
    pub fill_green: Option<Value>,
    pub fill_blue: Option<Value>,
    pub fill_alpha: Option<Value>,
    pub radius_multiplier: Option<Value>,
    pub logging_level: Option<Value>,
    pub resize_delay_ms: Option<Value>,
}

impl OverlayOptions {
    /// Parse a JSON options block. Anything that is not an object counts as no options.
    pub fn from_json_str(text: &str) -> anyhow::Result<Self> {
        let value: Value = serde_json::from_str(text).context("options are not valid JSON")?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> anyhow::Result<Self> {
        if !value.is_object() {
            return Ok(Self::default());
        }
        serde_json::from_value(value).context("options block could not be read")
    }
}

/// Validated, immutable overlay configuration
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayConfig {
    pub background: Rgba,
    pub fill: Rgba,
    pub radius_multiplier: f64,
    pub log_level: LogLevel,
    pub resize_delay: Duration,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            background: DEFAULT_BACKGROUND,
            fill: DEFAULT_FILL,
            radius_multiplier: DEFAULT_RADIUS_MULTIPLIER,
            log_level: LogLevel::default(),
            resize_delay: Duration::from_millis(DEFAULT_RESIZE_DELAY_MS),
        }
    }
}

impl OverlayConfig {
    /// Validate each option on its own; out-of-range or mistyped values fall back to the default
    pub fn from_options(options: &OverlayOptions) -> Self {
        let log_level = verify_log_level(options.logging_level.as_ref(), LogLevel::default());
        let checker = Checker { log_level };

        let background = Rgba::new(
            checker.color("backgroundRed", options.background_red.as_ref(), DEFAULT_BACKGROUND.r),
            checker.color("backgroundGreen", options.background_green.as_ref(), DEFAULT_BACKGROUND.g),
            checker.color("backgroundBlue", options.background_blue.as_ref(), DEFAULT_BACKGROUND.b),
            checker.color("backgroundAlpha", options.background_alpha.as_ref(), DEFAULT_BACKGROUND.a),
        );
        let fill = Rgba::new(
            checker.color("fillRed", options.fill_red.as_ref(), DEFAULT_FILL.r),
            checker.color("fillGreen", options.fill_green.as_ref(), DEFAULT_FILL.g),
            checker.color("fillBlue", options.fill_blue.as_ref(), DEFAULT_FILL.b),
            checker.color("fillAlpha", options.fill_alpha.as_ref(), DEFAULT_FILL.a),
        );
        let radius_multiplier = checker.radius_multiplier(options.radius_multiplier.as_ref());
        let resize_delay = checker.resize_delay(options.resize_delay_ms.as_ref());

        Self {
            background,
            fill,
            radius_multiplier,
            log_level,
            resize_delay,
        }
    }

    /// Debounce delay in seconds, as fed to the overlay's countdowns
    pub fn resize_delay_secs(&self) -> f32 {
        self.resize_delay.as_secs_f32()
    }
}

impl From<&OverlayOptions> for OverlayConfig {
    fn from(options: &OverlayOptions) -> Self {
        Self::from_options(options)
    }
}

fn verify_log_level(value: Option<&Value>, default: LogLevel) -> LogLevel {
    match value {
        Some(Value::String(s)) => s.parse().unwrap_or(default),
        Some(Value::Number(n)) => n
            .as_f64()
            .and_then(|v| LogLevel::from_index(v.floor() as i64))
            .unwrap_or(default),
        _ => default,
    }
}

struct Checker {
    log_level: LogLevel,
}

impl Checker {
    fn rejected(&self, name: &str, value: &Value) {
        self.log_level.emit(
            Level::Debug,
            format_args!("(OverlayConfig) ignoring invalid {name}: {value}"),
        );
    }

    fn color(&self, name: &str, value: Option<&Value>, default: u8) -> u8 {
        let Some(value) = value else { return default };
        match value.as_f64() {
            Some(v) if (0.0..=255.0).contains(&v) => v as u8,
            _ => {
                self.rejected(name, value);
                default
            }
        }
    }

    fn radius_multiplier(&self, value: Option<&Value>) -> f64 {
        let Some(value) = value else { return DEFAULT_RADIUS_MULTIPLIER };
        match value.as_f64() {
            Some(v) if v.is_finite() && v >= 0.0 => v,
            _ => {
                self.rejected("radiusMultiplier", value);
                DEFAULT_RADIUS_MULTIPLIER
            }
        }
    }

    fn resize_delay(&self, value: Option<&Value>) -> Duration {
        let Some(value) = value else {
            return Duration::from_millis(DEFAULT_RESIZE_DELAY_MS);
        };
        match value.as_u64() {
            Some(ms) => Duration::from_millis(ms),
            None => {
                self.rejected("resizeDelayMs", value);
                Duration::from_millis(DEFAULT_RESIZE_DELAY_MS)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config_from(value: Value) -> OverlayConfig {
        OverlayConfig::from_options(&OverlayOptions::from_value(value).unwrap())
    }

    #[test]
    fn test_empty_options_use_defaults() {
        assert_eq!(config_from(json!({})), OverlayConfig::default());
    }

    #[test]
    fn test_non_object_counts_as_empty() {
        assert_eq!(config_from(json!([1, 2, 3])), OverlayConfig::default());
        assert_eq!(config_from(Value::Null), OverlayConfig::default());
    }

    #[test]
    fn test_fill_alpha_upper_bound_kept() {
        let config = config_from(json!({ "fillAlpha": 255 }));
        assert_eq!(config.fill.a, 255);
    }

    #[test]
    fn test_fill_alpha_out_of_range_falls_back() {
        let config = config_from(json!({ "fillAlpha": 300 }));
        assert_eq!(config.fill.a, 10);
    }

    #[test]
    fn test_color_wrong_type_falls_back() {
        let config = config_from(json!({ "backgroundRed": "12", "backgroundBlue": -1 }));
        assert_eq!(config.background, DEFAULT_BACKGROUND);
    }

    #[test]
    fn test_each_channel_independent() {
        let config = config_from(json!({
            "backgroundRed": 10,
            "backgroundGreen": 999,
            "fillBlue": 200,
        }));
        assert_eq!(config.background, Rgba::new(10, 0, 0, 155));
        assert_eq!(config.fill, Rgba::new(0, 0, 200, 10));
    }

    #[test]
    fn test_radius_multiplier_validation() {
        assert_eq!(config_from(json!({ "radiusMultiplier": 2.5 })).radius_multiplier, 2.5);
        assert_eq!(config_from(json!({ "radiusMultiplier": 0 })).radius_multiplier, 0.0);
        assert_eq!(config_from(json!({ "radiusMultiplier": -1 })).radius_multiplier, 1.75);
        assert_eq!(config_from(json!({ "radiusMultiplier": "big" })).radius_multiplier, 1.75);
    }

    #[test]
    fn test_logging_level_strings() {
        assert_eq!(config_from(json!({ "loggingLevel": " DEBUG " })).log_level, LogLevel::Debug);
        assert_eq!(config_from(json!({ "loggingLevel": "warn" })).log_level, LogLevel::Warn);
        assert_eq!(config_from(json!({ "loggingLevel": "loud" })).log_level, LogLevel::Error);
    }

    #[test]
    fn test_logging_level_numbers() {
        assert_eq!(config_from(json!({ "loggingLevel": 1 })).log_level, LogLevel::Info);
        assert_eq!(config_from(json!({ "loggingLevel": 2.9 })).log_level, LogLevel::Warn);
        assert_eq!(config_from(json!({ "loggingLevel": 7 })).log_level, LogLevel::Error);
    }

    #[test]
    fn test_resize_delay() {
        assert_eq!(
            config_from(json!({ "resizeDelayMs": 50 })).resize_delay,
            Duration::from_millis(50)
        );
        assert_eq!(
            config_from(json!({ "resizeDelayMs": -5 })).resize_delay,
            Duration::from_millis(200)
        );
    }

    #[test]
    fn test_level_gate() {
        assert!(LogLevel::Warn.allows(Level::Error));
        assert!(LogLevel::Warn.allows(Level::Warn));
        assert!(!LogLevel::Warn.allows(Level::Info));
        assert!(LogLevel::Debug.allows(Level::Debug));
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(OverlayOptions::from_json_str("{ not json").is_err());
    }
}
