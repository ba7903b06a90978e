//! Selectable synthetic signal modes

use serde::{Deserialize, Serialize};
use std::fmt;

/// Synthetic signal profile governing waveform shape and heart-rate reliability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalMode {
    /// Flat line, no cardiac activity
    Baseline,
    /// Canonical PQRST morphology
    #[default]
    Normal,
    /// Alternate morphology with baseline wander
    Variant,
    /// Uniform noise only, +-0.075 mV
    LightNoise,
    /// Uniform noise only, +-0.4 mV
    HeavyNoise,
}

impl SignalMode {
    /// All modes in ordinal order
    pub const ALL: [SignalMode; 5] = [
        SignalMode::Baseline,
        SignalMode::Normal,
        SignalMode::Variant,
        SignalMode::LightNoise,
        SignalMode::HeavyNoise,
    ];

    /// Map the remote feed's numeric code to a mode
    pub fn from_ordinal(ordinal: i64) -> Option<Self> {
        usize::try_from(ordinal)
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
    }

    /// Numeric code used by the remote feed
    pub fn ordinal(self) -> i64 {
        match self {
            SignalMode::Baseline => 0,
            SignalMode::Normal => 1,
            SignalMode::Variant => 2,
            SignalMode::LightNoise => 3,
            SignalMode::HeavyNoise => 4,
        }
    }

    /// Whether the mode follows the cardiac cycle at all
    pub fn is_cardiac(self) -> bool {
        matches!(self, SignalMode::Normal | SignalMode::Variant)
    }

    /// Whether the mode replaces the waveform with noise
    pub fn is_noise_only(self) -> bool {
        matches!(self, SignalMode::LightNoise | SignalMode::HeavyNoise)
    }
}

impl fmt::Display for SignalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SignalMode::Baseline => "baseline",
            SignalMode::Normal => "normal",
            SignalMode::Variant => "variant",
            SignalMode::LightNoise => "light_noise",
            SignalMode::HeavyNoise => "heavy_noise",
        };
        f.write_str(name)
    }
}
