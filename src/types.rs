//! Core types shared by streaming and ingestion

use serde::{Deserialize, Serialize};

/// Single `(time, value)` point of an ECG trace
///
/// `time` is in seconds and non-decreasing within a sequence, `value` is the
/// amplitude in millivolts.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
pub struct Sample {
    pub time: f64,
    pub value: f64,
}

impl Sample {
    pub fn new(time: f64, value: f64) -> Self {
        Self { time, value }
    }
}

impl From<(f64, f64)> for Sample {
    fn from((time, value): (f64, f64)) -> Self {
        Self { time, value }
    }
}
