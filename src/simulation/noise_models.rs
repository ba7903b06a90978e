//! Noise modeling for ECG synthesis
//! Location: src/simulation/noise_models.rs

use super::mode::SignalMode;
use crate::config::constants::synthesis;
use rand::Rng;
use std::f64::consts::PI;

/// Amplitude bounds for every stochastic term of the synthesizer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseModel {
    /// Jitter added to every shaped sample
    pub additive_mv: f64,
    pub light_noise_mv: f64,
    pub heavy_noise_mv: f64,
    pub wander: BaselineWander,
    pub irregularity: Irregularity,
}

/// Slow respiratory-like drift of the isoelectric line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaselineWander {
    pub amplitude_mv: f64,
    pub frequency_hz: f64,
}

/// Muscle-tremor-like high frequency ripple with random strength
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Irregularity {
    pub amplitude_mv: f64,
    pub frequency_hz: f64,
}

impl NoiseModel {
    pub const STANDARD: NoiseModel = NoiseModel {
        additive_mv: synthesis::ADDITIVE_NOISE_MV,
        light_noise_mv: synthesis::LIGHT_NOISE_MV,
        heavy_noise_mv: synthesis::HEAVY_NOISE_MV,
        wander: BaselineWander {
            amplitude_mv: synthesis::WANDER_AMPLITUDE_MV,
            frequency_hz: synthesis::WANDER_FREQUENCY_HZ,
        },
        irregularity: Irregularity {
            amplitude_mv: synthesis::IRREGULARITY_AMPLITUDE_MV,
            frequency_hz: synthesis::IRREGULARITY_FREQUENCY_HZ,
        },
    };

    /// Small independent jitter on top of a shaped value
    pub fn additive<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        uniform(rng, self.additive_mv)
    }

    /// Amplitude bound of a noise-only mode, `None` for shaped modes
    pub fn noise_only_amplitude(&self, mode: SignalMode) -> Option<f64> {
        match mode {
            SignalMode::LightNoise => Some(self.light_noise_mv),
            SignalMode::HeavyNoise => Some(self.heavy_noise_mv),
            _ => None,
        }
    }

    /// Wander plus irregularity at an absolute time
    pub fn irregular_terms<R: Rng + ?Sized>(&self, rng: &mut R, time_s: f64) -> f64 {
        self.wander.at(time_s) + self.irregularity.sample(rng, time_s)
    }
}

impl Default for NoiseModel {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl BaselineWander {
    pub fn at(&self, time_s: f64) -> f64 {
        self.amplitude_mv * (2.0 * PI * self.frequency_hz * time_s).sin()
    }
}

impl Irregularity {
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R, time_s: f64) -> f64 {
        let strength: f64 = rng.gen_range(0.5..=1.0);
        strength * self.amplitude_mv * (2.0 * PI * self.frequency_hz * time_s).sin()
    }
}

/// Uniform draw from `[-amplitude, amplitude]`
pub fn uniform<R: Rng + ?Sized>(rng: &mut R, amplitude: f64) -> f64 {
    if amplitude > 0.0 {
        rng.gen_range(-amplitude..=amplitude)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_uniform_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10_000 {
            let v = uniform(&mut rng, 0.4);
            assert!((-0.4..=0.4).contains(&v));
        }
        assert_eq!(uniform(&mut rng, 0.0), 0.0);
    }

    #[test]
    fn test_noise_only_amplitudes() {
        let model = NoiseModel::STANDARD;
        assert_eq!(model.noise_only_amplitude(SignalMode::LightNoise), Some(0.075));
        assert_eq!(model.noise_only_amplitude(SignalMode::HeavyNoise), Some(0.4));
        assert_eq!(model.noise_only_amplitude(SignalMode::Normal), None);
        assert_eq!(model.noise_only_amplitude(SignalMode::Baseline), None);
    }

    #[test]
    fn test_irregular_terms_bounded() {
        let model = NoiseModel::STANDARD;
        let bound = model.wander.amplitude_mv + model.irregularity.amplitude_mv;
        let mut rng = StdRng::seed_from_u64(11);
        for i in 0..5_000 {
            let v = model.irregular_terms(&mut rng, i as f64 * 0.004);
            assert!(v.abs() <= bound + 1e-12);
        }
    }
}
