//! ECG waveform simulation
//! Location: src/simulation/mod.rs

pub mod mode;
pub mod morphology;
pub mod noise_models;
pub mod signal_generator;

pub use mode::SignalMode;
pub use morphology::{CardiacSegment, MorphologyProfile};
pub use noise_models::NoiseModel;
pub use signal_generator::{
    generate_demo_samples, rr_interval, synthesize, synthesize_with, EcgSignalGenerator,
};
