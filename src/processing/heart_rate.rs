// src/processing/heart_rate.rs
//! Displayed heart-rate estimate
//!
//! Not a measurement: a per-mode policy that jitters the synthesis heart-rate
//! parameter and, for noisy modes, randomly reports the reading as
//! unmeasurable. Refreshed on its own cadence, independent of the buffer tick.

use crate::acquisition::SynthesisState;
use crate::config::constants::heart_rate;
use crate::simulation::noise_models::uniform;
use crate::simulation::SignalMode;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::fmt;
use tracing::trace;

/// Displayed heart rate, or the sentinel for "no reliable reading"
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "bpm", rename_all = "snake_case")]
pub enum HeartRateReading {
    Bpm(f64),
    Unmeasurable,
}

impl HeartRateReading {
    pub fn bpm(&self) -> Option<f64> {
        match self {
            HeartRateReading::Bpm(bpm) => Some(*bpm),
            HeartRateReading::Unmeasurable => None,
        }
    }

    pub fn is_measurable(&self) -> bool {
        matches!(self, HeartRateReading::Bpm(_))
    }
}

impl fmt::Display for HeartRateReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeartRateReading::Bpm(bpm) => write!(f, "{:.0}", bpm),
            HeartRateReading::Unmeasurable => write!(f, "--"),
        }
    }
}

/// Jitter, dropout probability and clamp range for one mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimatorPolicy {
    pub jitter_bpm: f64,
    pub unmeasurable_probability: f64,
    pub min_bpm: f64,
    pub max_bpm: f64,
}

impl EstimatorPolicy {
    /// `None` means the mode never yields a reading
    pub fn for_mode(mode: SignalMode) -> Option<Self> {
        let (jitter_bpm, unmeasurable_probability, (min_bpm, max_bpm)) = match mode {
            SignalMode::Baseline => return None,
            SignalMode::Normal | SignalMode::Variant => {
                (heart_rate::CLEAN_JITTER_BPM, 0.0, heart_rate::CLEAN_RANGE_BPM)
            }
            SignalMode::LightNoise => (
                heart_rate::LIGHT_NOISE_JITTER_BPM,
                heart_rate::LIGHT_NOISE_UNMEASURABLE_PROBABILITY,
                heart_rate::LIGHT_NOISE_RANGE_BPM,
            ),
            SignalMode::HeavyNoise => (
                heart_rate::HEAVY_NOISE_JITTER_BPM,
                heart_rate::HEAVY_NOISE_UNMEASURABLE_PROBABILITY,
                heart_rate::HEAVY_NOISE_RANGE_BPM,
            ),
        };
        Some(Self {
            jitter_bpm,
            unmeasurable_probability,
            min_bpm,
            max_bpm,
        })
    }

    pub fn contains(&self, bpm: f64) -> bool {
        (self.min_bpm..=self.max_bpm).contains(&bpm)
    }

    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R, heart_rate_bpm: f64) -> HeartRateReading {
        if self.unmeasurable_probability > 0.0 && rng.gen_bool(self.unmeasurable_probability) {
            return HeartRateReading::Unmeasurable;
        }
        let bpm = heart_rate_bpm + uniform(rng, self.jitter_bpm);
        if !bpm.is_finite() {
            return HeartRateReading::Unmeasurable;
        }
        HeartRateReading::Bpm(bpm.clamp(self.min_bpm, self.max_bpm))
    }
}

/// Stateful estimator holding the latest displayed reading
pub struct HeartRateEstimator<R = StdRng> {
    rng: R,
    latest: HeartRateReading,
}

impl HeartRateEstimator<StdRng> {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl Default for HeartRateEstimator<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> HeartRateEstimator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            latest: HeartRateReading::Unmeasurable,
        }
    }

    /// One draw for `mode` around `heart_rate_bpm`, without storing it
    pub fn estimate(&mut self, mode: SignalMode, heart_rate_bpm: f64) -> HeartRateReading {
        match EstimatorPolicy::for_mode(mode) {
            Some(policy) => policy.draw(&mut self.rng, heart_rate_bpm),
            None => HeartRateReading::Unmeasurable,
        }
    }

    /// Recompute the displayed reading from the current synthesis parameters
    pub fn refresh(&mut self, state: &SynthesisState) -> HeartRateReading {
        self.latest = self.estimate(state.mode, state.heart_rate_bpm);
        trace!(mode = %state.mode, reading = %self.latest, "heart rate refreshed");
        self.latest
    }

    pub fn latest(&self) -> HeartRateReading {
        self.latest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn estimator() -> HeartRateEstimator {
        HeartRateEstimator::with_rng(StdRng::seed_from_u64(7))
    }

    #[test]
    fn test_baseline_always_unmeasurable() {
        let mut estimator = estimator();
        for _ in 0..200 {
            assert_eq!(
                estimator.estimate(SignalMode::Baseline, 72.0),
                HeartRateReading::Unmeasurable
            );
        }
    }

    #[test]
    fn test_clean_modes_always_measurable() {
        let mut estimator = estimator();
        for mode in [SignalMode::Normal, SignalMode::Variant] {
            for _ in 0..500 {
                let bpm = estimator.estimate(mode, 72.0).bpm().unwrap();
                assert!((70.0..=74.0).contains(&bpm), "{}", bpm);
            }
        }
    }

    #[test]
    fn test_clamping() {
        let mut estimator = estimator();
        for _ in 0..200 {
            let low = estimator.estimate(SignalMode::Normal, 20.0).bpm().unwrap();
            assert_eq!(low, 45.0);
            let high = estimator.estimate(SignalMode::Normal, 250.0).bpm().unwrap();
            assert_eq!(high, 150.0);
        }
    }

    #[test]
    fn test_noise_dropout_rates() {
        let mut estimator = estimator();
        let trials = 10_000;

        let light = (0..trials)
            .filter(|_| !estimator.estimate(SignalMode::LightNoise, 72.0).is_measurable())
            .count() as f64
            / trials as f64;
        let heavy = (0..trials)
            .filter(|_| !estimator.estimate(SignalMode::HeavyNoise, 72.0).is_measurable())
            .count() as f64
            / trials as f64;

        assert!((0.07..0.13).contains(&light), "light dropout {}", light);
        assert!((0.66..0.74).contains(&heavy), "heavy dropout {}", heavy);
    }

    #[test]
    fn test_heavy_noise_range() {
        let mut estimator = estimator();
        for _ in 0..2000 {
            if let HeartRateReading::Bpm(bpm) = estimator.estimate(SignalMode::HeavyNoise, 200.0) {
                assert!((30.0..=180.0).contains(&bpm));
            }
        }
    }

    #[test]
    fn test_refresh_updates_latest() {
        let mut estimator = estimator();
        assert_eq!(estimator.latest(), HeartRateReading::Unmeasurable);

        let state = SynthesisState {
            global_time: 4.0,
            heart_rate_bpm: 72.0,
            mode: SignalMode::Normal,
            paused: false,
        };
        let reading = estimator.refresh(&state);
        assert!(reading.is_measurable());
        assert_eq!(estimator.latest(), reading);
    }

    #[test]
    fn test_display() {
        assert_eq!(HeartRateReading::Bpm(72.4).to_string(), "72");
        assert_eq!(HeartRateReading::Unmeasurable.to_string(), "--");
    }
}
