// src/monitor.rs
//! Monitor facade
//!
//! Composes the streaming buffer controller, the heart-rate estimator and the
//! remote feed cell behind the operations a display host drives. Hosts that
//! tick from several tasks wrap the monitor in a mutex; see `runtime`.

use crate::acquisition::{StreamController, StreamState, TickOutcome};
use crate::config::MonitorConfig;
use crate::error::Result;
use crate::feed::{FeedUpdate, SharedFeed};
use crate::processing::{HeartRateEstimator, HeartRateReading};
use crate::simulation::SignalMode;
use crate::types::Sample;
use crate::utils::validation::ValidationResult;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::debug;

/// Everything a display needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonitorSnapshot {
    pub samples: Vec<Sample>,
    pub heart_rate: HeartRateReading,
    pub battery_percent: f64,
    pub paused: bool,
    pub connected: bool,
    pub mode: SignalMode,
    pub global_time: f64,
}

pub struct EcgMonitor {
    controller: StreamController,
    estimator: HeartRateEstimator,
    feed: SharedFeed,
}

impl EcgMonitor {
    /// Build a monitor with entropy-seeded noise
    pub fn from_config(config: &MonitorConfig) -> Result<Self> {
        Self::build(config, StdRng::from_entropy(), StdRng::from_entropy())
    }

    /// Build a monitor whose noise is reproducible for a given seed
    pub fn with_seed(config: &MonitorConfig, seed: u64) -> Result<Self> {
        Self::build(
            config,
            StdRng::seed_from_u64(seed),
            StdRng::seed_from_u64(seed.wrapping_add(1)),
        )
    }

    fn build(config: &MonitorConfig, stream_rng: StdRng, estimator_rng: StdRng) -> Result<Self> {
        config.validate()?;

        let feed = SharedFeed::default();
        feed.set_mode(config.stream.initial_mode);

        let mut controller = StreamController::with_rng(config.stream.clone(), stream_rng)?;
        controller.attach_feed(feed.clone());

        let mut estimator = HeartRateEstimator::with_rng(estimator_rng);
        estimator.refresh(&controller.synthesis_state());

        Ok(Self {
            controller,
            estimator,
            feed,
        })
    }

    /// Buffer tick
    pub fn tick(&mut self) -> TickOutcome {
        self.controller.advance()
    }

    /// Estimator refresh
    pub fn refresh_heart_rate(&mut self) -> HeartRateReading {
        self.estimator.refresh(&self.controller.synthesis_state())
    }

    pub fn pause(&mut self) {
        self.controller.pause();
    }

    pub fn resume(&mut self) {
        self.controller.resume();
    }

    pub fn toggle_pause(&mut self) -> StreamState {
        self.controller.toggle_pause()
    }

    pub fn set_heart_rate(&mut self, bpm: f64) -> ValidationResult<bool> {
        let reset = self.controller.set_heart_rate(bpm)?;
        if reset {
            self.refresh_heart_rate();
        }
        Ok(reset)
    }

    pub fn set_mode(&mut self, mode: SignalMode) -> bool {
        let reset = self.controller.set_mode(mode);
        if reset {
            self.refresh_heart_rate();
        }
        reset
    }

    /// Record a remote feed push; a new mode takes effect on the next tick
    pub fn apply_feed_update(&self, update: &FeedUpdate) {
        debug!(?update, "feed update");
        self.feed.apply(update);
    }

    /// Decode and apply a JSON feed payload
    pub fn apply_feed_json(&self, payload: &str) -> std::result::Result<(), serde_json::Error> {
        let update = FeedUpdate::from_json_str(payload)?;
        self.apply_feed_update(&update);
        Ok(())
    }

    pub fn snapshot(&self) -> MonitorSnapshot {
        MonitorSnapshot {
            samples: self.controller.samples(),
            heart_rate: self.estimator.latest(),
            battery_percent: self.controller.battery_percent(),
            paused: self.controller.is_paused(),
            connected: self.feed.connected(),
            mode: self.controller.mode(),
            global_time: self.controller.global_time(),
        }
    }

    pub fn heart_rate(&self) -> HeartRateReading {
        self.estimator.latest()
    }

    pub fn feed(&self) -> &SharedFeed {
        &self.feed
    }

    pub fn controller(&self) -> &StreamController {
        &self.controller
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monitor() -> EcgMonitor {
        EcgMonitor::with_seed(&MonitorConfig::default(), 3).unwrap()
    }

    #[test]
    fn test_initial_snapshot() {
        let snapshot = monitor().snapshot();

        assert_eq!(snapshot.samples.len(), 100);
        assert_eq!(snapshot.battery_percent, 85.0);
        assert!(!snapshot.paused);
        assert!(snapshot.connected);
        assert_eq!(snapshot.mode, SignalMode::Normal);
        assert!((snapshot.global_time - 4.0).abs() < 1e-9);
        let bpm = snapshot.heart_rate.bpm().unwrap();
        assert!((70.0..=74.0).contains(&bpm));
    }

    #[test]
    fn test_feed_mode_applies_on_next_tick() {
        let mut monitor = monitor();
        monitor.apply_feed_json(r#"{"mode": 4, "status": "lead off"}"#).unwrap();

        assert_eq!(monitor.snapshot().mode, SignalMode::Normal);
        assert!(!monitor.snapshot().connected);

        monitor.tick();
        assert_eq!(monitor.snapshot().mode, SignalMode::HeavyNoise);
    }

    #[test]
    fn test_baseline_reading_unmeasurable() {
        let mut monitor = monitor();
        assert!(monitor.set_mode(SignalMode::Baseline));
        assert_eq!(monitor.heart_rate(), HeartRateReading::Unmeasurable);
        assert_eq!(monitor.refresh_heart_rate(), HeartRateReading::Unmeasurable);
    }

    #[test]
    fn test_pause_freezes_snapshot() {
        let mut monitor = monitor();
        monitor.tick();
        monitor.pause();
        let frozen = monitor.snapshot();

        monitor.tick();
        monitor.tick();
        let after = monitor.snapshot();
        assert_eq!(frozen.samples, after.samples);
        assert_eq!(frozen.global_time, after.global_time);
        assert!(after.paused);

        assert_eq!(monitor.toggle_pause(), StreamState::Running);
    }

    #[test]
    fn test_set_heart_rate_rejects_invalid() {
        let mut monitor = monitor();
        assert!(monitor.set_heart_rate(-5.0).is_err());
        assert!(monitor.set_heart_rate(60.0).unwrap());
        assert_eq!(monitor.controller().heart_rate_bpm(), 60.0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = MonitorConfig::default();
        config.stream.sample_interval_s = 0.0;
        assert!(EcgMonitor::from_config(&config).is_err());
    }
}
