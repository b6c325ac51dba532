//! Configuration - timer cadence and button colors.
//!
//! Every field has a default, so an empty document is a valid config:
//!
//! ```toml
//! [timer]
//! cadence_ms = 1000
//!
//! [style]
//! base_background = "#D2D2D2"
//! active_background = "#76B3FA"
//! text_color = "#fff"
//! ```

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::timer::MIN_PERIOD;

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct StopwatchConfig {
    pub timer: TimerConfig,
    pub style: StyleConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TimerConfig {
    /// Milliseconds between ticks.
    pub cadence_ms: u64,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self { cadence_ms: 1000 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub base_background: String,
    /// Background of the duration button while running.
    pub active_background: String,
    pub text_color: String,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            base_background: "#D2D2D2".to_string(),
            active_background: "#76B3FA".to_string(),
            text_color: "#fff".to_string(),
        }
    }
}

impl StopwatchConfig {
    pub fn from_toml_str(input: &str) -> Result<Self> {
        toml::from_str(input).map_err(|source| Error::Config { source })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Tick cadence, never shorter than [`MIN_PERIOD`].
    pub fn cadence(&self) -> Duration {
        Duration::from_millis(self.timer.cadence_ms).max(MIN_PERIOD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        let config = StopwatchConfig::from_toml_str("").expect("parse");
        assert_eq!(config, StopwatchConfig::default());
        assert_eq!(config.cadence(), Duration::from_secs(1));
    }

    #[test]
    fn test_partial_override() {
        let config = StopwatchConfig::from_toml_str(
            r##"
            [timer]
            cadence_ms = 250

            [style]
            active_background = "#00FF00"
            "##,
        )
        .expect("parse");

        assert_eq!(config.cadence(), Duration::from_millis(250));
        assert_eq!(config.style.active_background, "#00FF00");
        assert_eq!(config.style.base_background, "#D2D2D2");
    }

    #[test]
    fn test_zero_cadence_clamped() {
        let config = StopwatchConfig::from_toml_str("[timer]\ncadence_ms = 0").expect("parse");
        assert_eq!(config.cadence(), MIN_PERIOD);
    }

    #[test]
    fn test_invalid_document() {
        let result = StopwatchConfig::from_toml_str("[timer]\ncadence_ms = \"fast\"");
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_missing_file() {
        let result = StopwatchConfig::load(Path::new("/nonexistent/spark-stopwatch.toml"));
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
