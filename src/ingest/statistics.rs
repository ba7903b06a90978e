//! Summary statistics of an ingested trace

use crate::types::Sample;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Derived purely from the samples; recomputed whenever they change
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Statistics {
    /// Time of the last sample
    pub duration_seconds: f64,
    pub sample_count: usize,
    /// `round(sample_count / duration_seconds)`, 0 for a zero-length trace.
    /// A trace ending at negative time yields a negative rate.
    pub implied_sample_rate_hz: f64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl Statistics {
    /// `None` for an empty slice
    pub fn compute(samples: &[Sample]) -> Option<Self> {
        let last = samples.last()?;
        let sample_count = samples.len();
        let duration_seconds = last.time;

        let implied_sample_rate_hz = if duration_seconds != 0.0 {
            (sample_count as f64 / duration_seconds).round()
        } else {
            0.0
        };

        let (min, max, sum) = samples.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY, 0.0),
            |(min, max, sum), s| (min.min(s.value), max.max(s.value), sum + s.value),
        );

        Some(Self {
            duration_seconds,
            sample_count,
            implied_sample_rate_hz,
            min,
            max,
            mean: sum / sample_count as f64,
        })
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.1} s, {} samples @ {} Hz, min {:.3} mV, max {:.3} mV, mean {:.3} mV",
            self.duration_seconds,
            self.sample_count,
            self.implied_sample_rate_hz,
            self.min,
            self.max,
            self.mean
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trace(values: &[f64], interval: f64) -> Vec<Sample> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| Sample::new(i as f64 * interval, v))
            .collect()
    }

    #[test]
    fn test_min_max_mean() {
        let stats = Statistics::compute(&trace(&[1.0, 2.0, 3.0], 0.5)).unwrap();
        assert_eq!(stats.mean, 2.0);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 3.0);
        assert_eq!(stats.sample_count, 3);
        assert_eq!(stats.duration_seconds, 1.0);
        assert_eq!(stats.implied_sample_rate_hz, 3.0);
    }

    #[test]
    fn test_zero_duration_rate_is_zero() {
        let stats = Statistics::compute(&[Sample::new(0.0, 0.4)]).unwrap();
        assert_eq!(stats.duration_seconds, 0.0);
        assert_eq!(stats.implied_sample_rate_hz, 0.0);
        assert!(stats.implied_sample_rate_hz.is_finite());
    }

    #[test]
    fn test_negative_duration_keeps_sign() {
        let samples = [Sample::new(-2.0, 0.1), Sample::new(-1.0, 0.2)];
        let stats = Statistics::compute(&samples).unwrap();
        assert_eq!(stats.duration_seconds, -1.0);
        assert_eq!(stats.implied_sample_rate_hz, -2.0);
    }

    #[test]
    fn test_empty_has_no_statistics() {
        assert!(Statistics::compute(&[]).is_none());
    }

    #[test]
    fn test_rate_rounds() {
        // 1000 samples ending at 3.996 s
        let stats = Statistics::compute(&trace(&vec![0.0; 1000], 0.004)).unwrap();
        assert_eq!(stats.implied_sample_rate_hz, 250.0);
    }

    #[test]
    fn test_display_summary() {
        let stats = Statistics::compute(&trace(&[1.0, 2.0, 3.0], 0.5)).unwrap();
        assert_eq!(
            stats.to_string(),
            "1.0 s, 3 samples @ 3 Hz, min 1.000 mV, max 3.000 mV, mean 2.000 mV"
        );
    }
}
