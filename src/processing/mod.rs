// src/processing/mod.rs
//! Derived displays computed from the synthesis state

pub mod heart_rate;

pub use heart_rate::{EstimatorPolicy, HeartRateEstimator, HeartRateReading};
