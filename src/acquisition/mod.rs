// src/acquisition/mod.rs
//! Sliding window and the streaming buffer controller

pub mod sliding_window;
pub mod stream_controller;

pub use sliding_window::{SlidingWindow, WindowError};
pub use stream_controller::{StreamController, StreamState, SynthesisState, TickOutcome};
