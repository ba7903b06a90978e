//! Validation utilities for ECG-Core
//!
//! Range checks shared by the configuration types. Every helper reports the
//! offending field by its dotted configuration path.

use thiserror::Error;

/// Validation result type
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validation error types
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Value out of valid range
    #[error("Field '{field}' value '{value}' is out of range [{min}, {max}]")]
    OutOfRange {
        field: String,
        value: String,
        min: String,
        max: String,
    },

    /// NaN or infinite where a finite number is required
    #[error("Field '{field}' must be a finite number, got '{value}'")]
    NotFinite { field: String, value: String },

    /// Value violates a non-range constraint
    #[error("Field '{field}' value '{value}' is invalid: {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

fn ensure_finite(field: &str, value: f64) -> ValidationResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NotFinite {
            field: field.to_string(),
            value: value.to_string(),
        })
    }
}

/// Validate that `value` lies in the closed range `[min, max]`
pub fn validate_range(field: &str, value: f64, min: f64, max: f64) -> ValidationResult<()> {
    ensure_finite(field, value)?;
    if value < min || value > max {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            value: value.to_string(),
            min: min.to_string(),
            max: max.to_string(),
        });
    }
    Ok(())
}

/// Validate that `value` is strictly greater than zero
pub fn validate_positive(field: &str, value: f64) -> ValidationResult<()> {
    ensure_finite(field, value)?;
    if value <= 0.0 {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(())
}

/// Validate that `value` is zero or greater
pub fn validate_non_negative(field: &str, value: f64) -> ValidationResult<()> {
    ensure_finite(field, value)?;
    if value < 0.0 {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            reason: "must not be negative".to_string(),
        });
    }
    Ok(())
}

/// Validate an element count against a lower bound
pub fn validate_min_count(field: &str, count: usize, min: usize) -> ValidationResult<()> {
    if count < min {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            value: count.to_string(),
            reason: format!("must be at least {}", min),
        });
    }
    Ok(())
}
