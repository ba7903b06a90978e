//! Common utility functions for the ECG core
//!
//! This module provides reusable utilities across the crate:
//! - Configuration validation helpers
//! - Decimal rounding used by ingestion and the demo dataset
//!
//! Limits come from the constants in the config module.

pub mod validation;
pub mod rounding;

// Re-export commonly used functions for convenience
pub use validation::{
    ValidationError,
    ValidationResult,
    validate_range,
    validate_positive,
    validate_non_negative,
    validate_min_count,
};

pub use rounding::{round_to_decimals, round_millis};
