//! Decimal rounding helpers

/// Round `value` to `decimals` places after the point.
///
/// Rounds the exact binary value, the way fixed-point text formatting does:
/// `0.1235` is stored just below the midpoint and becomes `0.123`. Magnitudes
/// too large to carry fractional digits come back unchanged, never infinite.
/// Non-finite input is returned unchanged.
pub fn round_to_decimals(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{:.*}", decimals as usize, value)
        .parse::<f64>()
        .ok()
        .filter(|rounded| rounded.is_finite())
        .unwrap_or(value)
}

/// Round to three decimals (millisecond / microvolt resolution).
pub fn round_millis(value: f64) -> f64 {
    round_to_decimals(value, 3)
}
