// tests/synthesis_properties.rs
//! Property tests for the waveform synthesizer

use ecg_core::simulation::{rr_interval, synthesize_with, EcgSignalGenerator, MorphologyProfile};
use ecg_core::SignalMode;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn any_mode() -> impl Strategy<Value = SignalMode> {
    prop::sample::select(SignalMode::ALL.to_vec())
}

proptest! {
    #[test]
    fn synthesis_is_finite(
        time in 0.0f64..10_000.0,
        bpm in 0.001f64..=300.0,
        mode in any_mode(),
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let value = synthesize_with(&mut rng, time, bpm, mode);
        prop_assert!(value.is_finite());
    }

    #[test]
    fn noise_only_modes_stay_in_bounds(
        time in 0.0f64..100.0,
        bpm in 30.0f64..200.0,
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let light = synthesize_with(&mut rng, time, bpm, SignalMode::LightNoise);
        let heavy = synthesize_with(&mut rng, time, bpm, SignalMode::HeavyNoise);
        prop_assert!(light.abs() <= 0.075);
        prop_assert!(heavy.abs() <= 0.4);
    }

    #[test]
    fn baseline_ignores_cardiac_phase(time in 0.0f64..100.0, seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let value = synthesize_with(&mut rng, time, 72.0, SignalMode::Baseline);
        prop_assert!(value.abs() <= 0.025);
    }

    #[test]
    fn shape_is_periodic_in_rr(cycles in 0u32..50, phase in 0.0f64..0.8) {
        let generator = EcgSignalGenerator::STANDARD;
        let rr = rr_interval(75.0).unwrap();
        let a = generator.shaped_value(phase, 75.0, SignalMode::Normal);
        let b = generator.shaped_value(phase + cycles as f64 * rr, 75.0, SignalMode::Normal);
        prop_assert!((a - b).abs() < 1e-6);
    }
}

#[test]
fn r_peak_dominates_cycle() {
    let profile = MorphologyProfile::NORMAL;
    let peak = (0..800)
        .map(|i| profile.shape(i as f64 * 0.001))
        .fold(f64::MIN, f64::max);
    assert!((1.2..=1.5).contains(&peak));
}
