//! ECG waveform synthesis
//! Location: src/simulation/signal_generator.rs

use super::mode::SignalMode;
use super::morphology::MorphologyProfile;
use super::noise_models::{uniform, NoiseModel};
use crate::config::constants::{demo, synthesis};
use crate::types::Sample;
use crate::utils::rounding::round_millis;
use rand::Rng;

/// Seconds per cardiac cycle, `None` unless `heart_rate_bpm` is a positive finite number
pub fn rr_interval(heart_rate_bpm: f64) -> Option<f64> {
    if heart_rate_bpm.is_finite() && heart_rate_bpm > 0.0 {
        Some(60.0 / heart_rate_bpm)
    } else {
        None
    }
}

/// Synthesize one sample using the thread-local RNG.
///
/// The noise term makes repeated calls with identical arguments differ.
pub fn synthesize(time_s: f64, heart_rate_bpm: f64, mode: SignalMode) -> f64 {
    synthesize_with(&mut rand::thread_rng(), time_s, heart_rate_bpm, mode)
}

/// Synthesize one sample drawing noise from `rng`
pub fn synthesize_with<R: Rng + ?Sized>(
    rng: &mut R,
    time_s: f64,
    heart_rate_bpm: f64,
    mode: SignalMode,
) -> f64 {
    EcgSignalGenerator::STANDARD.sample(rng, time_s, heart_rate_bpm, mode)
}

/// Mode-dispatching waveform generator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EcgSignalGenerator {
    normal: MorphologyProfile,
    variant: MorphologyProfile,
    noise: NoiseModel,
}

impl EcgSignalGenerator {
    pub const STANDARD: EcgSignalGenerator = EcgSignalGenerator {
        normal: MorphologyProfile::NORMAL,
        variant: MorphologyProfile::VARIANT,
        noise: NoiseModel::STANDARD,
    };

    pub fn new(normal: MorphologyProfile, variant: MorphologyProfile, noise: NoiseModel) -> Self {
        Self { normal, variant, noise }
    }

    /// Morphology used by a cardiac mode
    pub fn profile(&self, mode: SignalMode) -> Option<&MorphologyProfile> {
        match mode {
            SignalMode::Normal => Some(&self.normal),
            SignalMode::Variant => Some(&self.variant),
            _ => None,
        }
    }

    pub fn noise_model(&self) -> &NoiseModel {
        &self.noise
    }

    /// Noise-free cycle shape; noise-only modes have no shape and yield 0
    pub fn shaped_value(&self, time_s: f64, heart_rate_bpm: f64, mode: SignalMode) -> f64 {
        let Some(profile) = self.profile(mode) else {
            return synthesis::BASELINE_LEVEL_MV;
        };
        match rr_interval(heart_rate_bpm) {
            Some(rr) => profile.shape(time_s.rem_euclid(rr)),
            None => profile.baseline_mv,
        }
    }

    /// Full sample: shape plus the mode's stochastic terms
    pub fn sample<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        time_s: f64,
        heart_rate_bpm: f64,
        mode: SignalMode,
    ) -> f64 {
        match mode {
            SignalMode::LightNoise | SignalMode::HeavyNoise => {
                let amplitude = self.noise.noise_only_amplitude(mode).unwrap_or_default();
                uniform(rng, amplitude)
            }
            SignalMode::Baseline => synthesis::BASELINE_LEVEL_MV + self.noise.additive(rng),
            SignalMode::Normal | SignalMode::Variant => {
                let mut value = self.shaped_value(time_s, heart_rate_bpm, mode);
                if self.profile(mode).is_some_and(|p| p.irregular) {
                    value += self.noise.irregular_terms(rng, time_s);
                }
                value + self.noise.additive(rng)
            }
        }
    }
}

impl Default for EcgSignalGenerator {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Demo recording offered by the data page: 4 s at 250 Hz of the variant
/// morphology without wander, rounded to millisecond / microvolt resolution.
pub fn generate_demo_samples<R: Rng + ?Sized>(rng: &mut R) -> Vec<Sample> {
    let profile = MorphologyProfile::VARIANT;
    let rr = 60.0 / demo::HEART_RATE_BPM;
    (0..demo::SAMPLE_COUNT)
        .map(|i| {
            let time = i as f64 * demo::SAMPLE_INTERVAL_S;
            let value = profile.shape(time % rr) + uniform(rng, demo::NOISE_MV);
            Sample::new(round_millis(time), round_millis(value))
        })
        .collect()
}
