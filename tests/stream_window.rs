// tests/stream_window.rs
//! Window invariants of the streaming buffer controller

use ecg_core::config::StreamSettings;
use ecg_core::{SignalMode, StreamController, TickOutcome};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Debug, Clone)]
enum Op {
    Tick,
    Pause,
    Resume,
    SetMode(SignalMode),
    SetHeartRate(f64),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => Just(Op::Tick),
        1 => Just(Op::Pause),
        1 => Just(Op::Resume),
        1 => prop::sample::select(SignalMode::ALL.to_vec()).prop_map(Op::SetMode),
        1 => (30.0f64..200.0).prop_map(Op::SetHeartRate),
    ]
}

fn controller(capacity: usize, interval: f64) -> StreamController {
    let settings = StreamSettings {
        capacity,
        sample_interval_s: interval,
        ..Default::default()
    };
    StreamController::with_rng(settings, StdRng::seed_from_u64(5)).unwrap()
}

fn assert_close(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-6, "{} != {}", a, b);
}

proptest! {
    #[test]
    fn window_length_is_invariant(
        capacity in 1usize..200,
        ops in prop::collection::vec(op(), 0..300),
    ) {
        let mut controller = controller(capacity, 0.04);
        for op in ops {
            match op {
                Op::Tick => { controller.advance(); }
                Op::Pause => controller.pause(),
                Op::Resume => controller.resume(),
                Op::SetMode(mode) => { controller.set_mode(mode); }
                Op::SetHeartRate(bpm) => { controller.set_heart_rate(bpm).unwrap(); }
            }
            prop_assert_eq!(controller.window().len(), capacity);

            let last = controller.window().last().unwrap().time;
            prop_assert!((controller.global_time() - last - 0.04).abs() < 1e-6);
        }
    }

    #[test]
    fn reset_spans_from_zero(capacity in 1usize..300, interval in 0.001f64..0.1) {
        let mut controller = controller(capacity, interval);
        for _ in 0..7 {
            controller.advance();
        }
        controller.set_mode(SignalMode::Variant);

        let window = controller.window();
        prop_assert!(window.first().unwrap().time.abs() < 1e-12);
        prop_assert!((window.last().unwrap().time - (capacity - 1) as f64 * interval).abs() < 1e-9);
        prop_assert!((controller.global_time() - capacity as f64 * interval).abs() < 1e-9);
    }
}

#[test]
fn pause_then_resume_advances_exactly() {
    let mut controller = controller(100, 0.04);
    let start = controller.global_time();
    let frozen = controller.samples();

    controller.pause();
    for _ in 0..40 {
        assert_eq!(controller.advance(), TickOutcome::Skipped);
    }
    assert_eq!(controller.samples(), frozen);
    assert_close(controller.global_time(), start);

    controller.resume();
    for _ in 0..40 {
        controller.advance();
    }
    assert_close(controller.global_time(), start + 40.0 * 0.04);
}

#[test]
fn sample_times_stay_uniform() {
    let mut controller = controller(50, 0.04);
    for _ in 0..75 {
        controller.advance();
    }
    let samples = controller.samples();
    for pair in samples.windows(2) {
        assert_close(pair[1].time - pair[0].time, 0.04);
    }
}
