//! Configuration management

pub mod constants;
pub mod loader;

pub use constants::*;
pub use loader::{ConfigError, ConfigLoader};

use crate::ingest::parser::HeaderDetection;
use crate::simulation::SignalMode;
use crate::utils::validation::{
    validate_min_count, validate_non_negative, validate_positive, validate_range,
    ValidationError, ValidationResult,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Complete monitor configuration
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct MonitorConfig {
    #[serde(default)]
    pub stream: StreamSettings,

    #[serde(default)]
    pub estimator: EstimatorSettings,

    #[serde(default)]
    pub ingest: IngestSettings,
}

/// Streaming buffer controller settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StreamSettings {
    #[serde(default = "defaults::capacity")]
    pub capacity: usize,

    #[serde(default = "defaults::sample_interval_s")]
    pub sample_interval_s: f64,

    /// Wall-clock period of one tick when driven by the runtime
    #[serde(default = "defaults::tick_period_ms")]
    pub tick_period_ms: u64,

    #[serde(default = "defaults::initial_heart_rate_bpm")]
    pub initial_heart_rate_bpm: f64,

    #[serde(default)]
    pub initial_mode: SignalMode,

    #[serde(default = "defaults::battery_initial_percent")]
    pub battery_initial_percent: f64,

    #[serde(default = "defaults::battery_drain_per_tick")]
    pub battery_drain_per_tick: f64,
}

/// Heart-rate estimator settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EstimatorSettings {
    #[serde(default = "defaults::refresh_period_ms")]
    pub refresh_period_ms: u64,
}

/// Text ingestion settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct IngestSettings {
    /// Spacing used for rows whose time field cannot be read
    #[serde(default = "defaults::ingest_sample_interval_s")]
    pub default_sample_interval_s: f64,

    #[serde(default)]
    pub header_detection: HeaderDetection,
}

/// Default value providers using constants
mod defaults {
    use crate::config::constants::*;

    pub fn capacity() -> usize { stream::DEFAULT_WINDOW_CAPACITY }
    pub fn sample_interval_s() -> f64 { stream::DEFAULT_SAMPLE_INTERVAL_S }
    pub fn tick_period_ms() -> u64 { stream::DEFAULT_TICK_PERIOD_MS }
    pub fn initial_heart_rate_bpm() -> f64 { stream::DEFAULT_HEART_RATE_BPM }
    pub fn battery_initial_percent() -> f64 { battery::DEFAULT_INITIAL_PERCENT }
    pub fn battery_drain_per_tick() -> f64 { battery::DEFAULT_DRAIN_PER_TICK }
    pub fn refresh_period_ms() -> u64 { heart_rate::DEFAULT_REFRESH_PERIOD_MS }
    pub fn ingest_sample_interval_s() -> f64 { ingest::DEFAULT_SAMPLE_INTERVAL_S }
}

impl Default for StreamSettings {
    fn default() -> Self {
        Self {
            capacity: defaults::capacity(),
            sample_interval_s: defaults::sample_interval_s(),
            tick_period_ms: defaults::tick_period_ms(),
            initial_heart_rate_bpm: defaults::initial_heart_rate_bpm(),
            initial_mode: SignalMode::default(),
            battery_initial_percent: defaults::battery_initial_percent(),
            battery_drain_per_tick: defaults::battery_drain_per_tick(),
        }
    }
}

impl Default for EstimatorSettings {
    fn default() -> Self {
        Self {
            refresh_period_ms: defaults::refresh_period_ms(),
        }
    }
}

impl Default for IngestSettings {
    fn default() -> Self {
        Self {
            default_sample_interval_s: defaults::ingest_sample_interval_s(),
            header_detection: HeaderDetection::default(),
        }
    }
}

impl StreamSettings {
    pub fn validate(&self) -> ValidationResult<()> {
        validate_min_count("stream.capacity", self.capacity, stream::MIN_WINDOW_CAPACITY)?;
        validate_positive("stream.sample_interval_s", self.sample_interval_s)?;
        validate_period("stream.tick_period_ms", self.tick_period_ms)?;
        validate_heart_rate("stream.initial_heart_rate_bpm", self.initial_heart_rate_bpm)?;
        validate_range(
            "stream.battery_initial_percent",
            self.battery_initial_percent,
            battery::MIN_PERCENT,
            battery::MAX_PERCENT,
        )?;
        validate_non_negative("stream.battery_drain_per_tick", self.battery_drain_per_tick)
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }

    /// Seconds of signal covered by a full window
    pub fn window_span_s(&self) -> f64 {
        self.capacity as f64 * self.sample_interval_s
    }
}

impl EstimatorSettings {
    pub fn validate(&self) -> ValidationResult<()> {
        validate_period("estimator.refresh_period_ms", self.refresh_period_ms)
    }

    pub fn refresh_period(&self) -> Duration {
        Duration::from_millis(self.refresh_period_ms)
    }
}

impl IngestSettings {
    pub fn validate(&self) -> ValidationResult<()> {
        validate_positive("ingest.default_sample_interval_s", self.default_sample_interval_s)
    }
}

impl MonitorConfig {
    /// Validate every section
    pub fn validate(&self) -> ValidationResult<()> {
        self.stream.validate()?;
        self.estimator.validate()?;
        self.ingest.validate()
    }
}

/// Heart-rate parameter accepted by the synthesizer: `(0, 300]` BPM
pub fn validate_heart_rate(field: &str, bpm: f64) -> ValidationResult<()> {
    validate_positive(field, bpm)?;
    validate_range(field, bpm, 0.0, stream::MAX_HEART_RATE_BPM)
}

fn validate_period(field: &str, period_ms: u64) -> ValidationResult<()> {
    if period_ms == 0 {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            value: period_ms.to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = MonitorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.stream.capacity, 100);
        assert_eq!(config.stream.initial_mode, SignalMode::Normal);
        assert!((config.stream.window_span_s() - 4.0).abs() < 1e-9);
        assert_eq!(config.stream.tick_period(), Duration::from_millis(40));
        assert_eq!(config.estimator.refresh_period(), Duration::from_secs(1));
    }

    #[test]
    fn test_invalid_sections_rejected() {
        let mut config = MonitorConfig::default();
        config.stream.capacity = 0;
        assert!(config.validate().is_err());

        let mut config = MonitorConfig::default();
        config.stream.initial_heart_rate_bpm = 0.0;
        assert!(config.validate().is_err());

        let mut config = MonitorConfig::default();
        config.stream.initial_heart_rate_bpm = 320.0;
        assert!(config.validate().is_err());

        let mut config = MonitorConfig::default();
        config.stream.battery_initial_percent = 120.0;
        assert!(config.validate().is_err());

        let mut config = MonitorConfig::default();
        config.estimator.refresh_period_ms = 0;
        assert!(config.validate().is_err());

        let mut config = MonitorConfig::default();
        config.ingest.default_sample_interval_s = -0.004;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: MonitorConfig = toml::from_str(
            r#"
[stream]
capacity = 50
initial_mode = "heavy_noise"
        "#,
        )
        .unwrap();

        assert_eq!(config.stream.capacity, 50);
        assert_eq!(config.stream.initial_mode, SignalMode::HeavyNoise);
        assert_eq!(config.stream.sample_interval_s, 0.04);
        assert_eq!(config.ingest.header_detection, HeaderDetection::Legacy);
    }
}
