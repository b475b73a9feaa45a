use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ReadAlongError;

/// Pause costs, in spoken-time units, charged per punctuation kind.
///
/// The table is a model rather than measured data; every field can be
/// overridden from JSON and missing fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PauseUnits {
    pub comma: f64,
    pub semicolon: f64,
    pub colon: f64,
    /// `.`, `!` or `?` that is not part of an ellipsis.
    pub end_stop: f64,
    pub ellipsis: f64,
    pub quote: f64,
    pub dash: f64,
    pub newline: f64,
    /// Two or more consecutive newlines.
    pub paragraph_break: f64,
    /// Characters per unit of length nudge.
    pub length_nudge_chars: f64,
    pub length_nudge_cap: f64,
    /// Lower bound for any span weight.
    pub min_weight: f64,
}

impl PauseUnits {
    pub const DEFAULT_MIN_WEIGHT: f64 = 0.05;

    pub fn load(path: &Path) -> Result<Self, ReadAlongError> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| ReadAlongError::io("read pause unit table", e))?;
        let units: Self = serde_json::from_str(&data)
            .map_err(|e| ReadAlongError::json("parse pause unit table", e))?;
        units.validate()?;
        Ok(units)
    }

    pub fn validate(&self) -> Result<(), ReadAlongError> {
        let costs = [
            ("comma", self.comma),
            ("semicolon", self.semicolon),
            ("colon", self.colon),
            ("end_stop", self.end_stop),
            ("ellipsis", self.ellipsis),
            ("quote", self.quote),
            ("dash", self.dash),
            ("newline", self.newline),
            ("paragraph_break", self.paragraph_break),
            ("length_nudge_cap", self.length_nudge_cap),
        ];
        for (name, value) in costs {
            if !value.is_finite() || value < 0.0 {
                return Err(ReadAlongError::invalid_config(format!(
                    "{name} must be a finite, non-negative unit (got {value})"
                )));
            }
        }
        if !self.length_nudge_chars.is_finite() || self.length_nudge_chars <= 0.0 {
            return Err(ReadAlongError::invalid_config(format!(
                "length_nudge_chars must be positive (got {})",
                self.length_nudge_chars
            )));
        }
        if !self.min_weight.is_finite() || self.min_weight <= 0.0 {
            return Err(ReadAlongError::invalid_config(format!(
                "min_weight must be positive (got {})",
                self.min_weight
            )));
        }
        Ok(())
    }
}

impl Default for PauseUnits {
    fn default() -> Self {
        Self {
            comma: 0.35,
            semicolon: 0.45,
            colon: 0.45,
            end_stop: 0.90,
            ellipsis: 1.10,
            quote: 0.10,
            dash: 0.18,
            newline: 1.20,
            paragraph_break: 1.60,
            length_nudge_chars: 220.0,
            length_nudge_cap: 0.35,
            min_weight: Self::DEFAULT_MIN_WEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Fraction of the remaining distance covered per frame.
    pub ease_fraction: f64,
    /// Distance below which the controller snaps to the target.
    pub snap_epsilon: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            ease_fraction: 0.10,
            snap_epsilon: 0.75,
        }
    }
}

impl ScrollConfig {
    pub fn validate(&self) -> Result<(), ReadAlongError> {
        if !(self.ease_fraction > 0.0 && self.ease_fraction <= 1.0) {
            return Err(ReadAlongError::invalid_config(format!(
                "ease_fraction must be in (0, 1] (got {})",
                self.ease_fraction
            )));
        }
        if !self.snap_epsilon.is_finite() || self.snap_epsilon <= 0.0 {
            return Err(ReadAlongError::invalid_config(format!(
                "snap_epsilon must be positive (got {})",
                self.snap_epsilon
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Fraction of the visible area kept above the active span.
    pub reading_band: f64,
    /// Step used by the skip back / skip forward controls.
    pub skip_seconds: f64,
    /// Highest playback rate the current plan allows.
    pub max_speed: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            reading_band: 0.35,
            skip_seconds: 10.0,
            max_speed: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadAlongConfig {
    #[serde(default)]
    pub pauses: PauseUnits,
    #[serde(default = "default_min_span_words")]
    pub min_span_words: usize,
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

impl ReadAlongConfig {
    pub const DEFAULT_MIN_SPAN_WORDS: usize = 10;

    pub fn load(path: &Path) -> Result<Self, ReadAlongError> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| ReadAlongError::io("read read-along config", e))?;
        let config: Self = serde_json::from_str(&data)
            .map_err(|e| ReadAlongError::json("parse read-along config", e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ReadAlongError> {
        self.pauses.validate()?;
        self.scroll.validate()?;
        if !(0.0..=1.0).contains(&self.session.reading_band) {
            return Err(ReadAlongError::invalid_config(format!(
                "reading_band must be in [0, 1] (got {})",
                self.session.reading_band
            )));
        }
        Ok(())
    }
}

impl Default for ReadAlongConfig {
    fn default() -> Self {
        Self {
            pauses: PauseUnits::default(),
            min_span_words: Self::DEFAULT_MIN_SPAN_WORDS,
            scroll: ScrollConfig::default(),
            session: SessionConfig::default(),
        }
    }
}

fn default_min_span_words() -> usize {
    ReadAlongConfig::DEFAULT_MIN_SPAN_WORDS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_along_config_default() {
        let config = ReadAlongConfig::default();
        assert_eq!(config.min_span_words, 10);
        assert_eq!(config.pauses.comma, 0.35);
        assert_eq!(config.pauses.paragraph_break, 1.60);
        assert_eq!(config.scroll.ease_fraction, 0.10);
        assert_eq!(config.scroll.snap_epsilon, 0.75);
        assert_eq!(config.session.reading_band, 0.35);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let json = r#"{ "pauses": { "comma": 0.5 }, "min_span_words": 4 }"#;
        let config: ReadAlongConfig = serde_json::from_str(json).expect("valid config json");
        assert_eq!(config.pauses.comma, 0.5);
        assert_eq!(config.pauses.colon, 0.45);
        assert_eq!(config.min_span_words, 4);
        assert_eq!(config.scroll, ScrollConfig::default());
    }

    #[test]
    fn negative_unit_is_rejected() {
        let units = PauseUnits {
            dash: -0.1,
            ..PauseUnits::default()
        };
        let err = units.validate().unwrap_err();
        assert!(err.to_string().contains("dash"));
    }

    #[test]
    fn zero_min_weight_is_rejected() {
        let units = PauseUnits {
            min_weight: 0.0,
            ..PauseUnits::default()
        };
        assert!(units.validate().is_err());
    }

    #[test]
    fn ease_fraction_out_of_range_is_rejected() {
        let scroll = ScrollConfig {
            ease_fraction: 1.5,
            ..ScrollConfig::default()
        };
        assert!(scroll.validate().is_err());
    }

    #[test]
    fn load_from_temp_file() {
        let path = std::env::temp_dir().join("readalong_rs_config_load.json");
        std::fs::write(&path, r#"{ "session": { "max_speed": 2.5 } }"#).expect("write config");
        let config = ReadAlongConfig::load(&path).expect("config should load");
        assert_eq!(config.session.max_speed, 2.5);
        assert_eq!(config.session.skip_seconds, 10.0);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let result = PauseUnits::load(Path::new("/nonexistent/pauses.json"));
        assert!(matches!(result, Err(ReadAlongError::Io { .. })));
    }
}
