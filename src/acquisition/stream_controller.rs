// src/acquisition/stream_controller.rs
//! Streaming buffer controller
//!
//! Owns synthesis time, the sliding display window and the simulated battery.
//! Every `advance` call is one tick: while running it appends exactly one
//! synthesized sample and evicts the oldest, so the window always holds
//! `capacity` samples spaced `sample_interval_s` apart. A change of mode or
//! heart-rate parameter hard-resets the window to a fresh trace starting at
//! time zero.
//!
//! `global_time` is the end of the covered span: the window holds samples at
//! `global_time - capacity * interval ..= global_time - interval`, and the
//! next tick emits the sample at `global_time`.

use crate::acquisition::sliding_window::SlidingWindow;
use crate::config::{validate_heart_rate, StreamSettings};
use crate::error::EcgError;
use crate::feed::SharedFeed;
use crate::simulation::{EcgSignalGenerator, SignalMode};
use crate::types::Sample;
use crate::utils::validation::ValidationResult;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info};

/// Running / paused state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StreamState {
    Running,
    Paused,
}

/// Parameters the synthesizer is currently driven with
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SynthesisState {
    pub global_time: f64,
    pub heart_rate_bpm: f64,
    pub mode: SignalMode,
    pub paused: bool,
}

/// Result of one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// A sample was appended (and the oldest evicted)
    Advanced(Sample),
    /// Paused: nothing changed
    Skipped,
}

/// Streaming buffer controller
pub struct StreamController<R = StdRng> {
    settings: StreamSettings,
    generator: EcgSignalGenerator,
    window: SlidingWindow<Sample>,
    state: StreamState,
    mode: SignalMode,
    heart_rate_bpm: f64,
    /// Index of the next sample; `global_time == next_index * interval`
    next_index: u64,
    battery_percent: f64,
    feed: Option<SharedFeed>,
    rng: R,
}

impl StreamController<StdRng> {
    /// Create a controller seeded from OS entropy
    pub fn new(settings: StreamSettings) -> Result<Self, EcgError> {
        Self::with_rng(settings, StdRng::from_entropy())
    }
}

impl<R: Rng> StreamController<R> {
    /// Create a controller drawing noise from `rng`
    pub fn with_rng(settings: StreamSettings, rng: R) -> Result<Self, EcgError> {
        settings.validate()?;
        let window = SlidingWindow::new(settings.capacity)?;

        let mut controller = Self {
            generator: EcgSignalGenerator::STANDARD,
            window,
            state: StreamState::Running,
            mode: settings.initial_mode,
            heart_rate_bpm: settings.initial_heart_rate_bpm,
            next_index: 0,
            battery_percent: settings.battery_initial_percent,
            feed: None,
            rng,
            settings,
        };
        controller.hard_reset();
        Ok(controller)
    }

    /// Regenerate the window from time zero and move `global_time` to its end
    pub fn hard_reset(&mut self) {
        let interval = self.settings.sample_interval_s;
        let (mode, bpm) = (self.mode, self.heart_rate_bpm);
        let generator = self.generator;
        let rng = &mut self.rng;

        self.window.refill_with(|i| {
            let time = i as f64 * interval;
            Sample::new(time, generator.sample(&mut *rng, time, bpm, mode))
        });
        self.next_index = self.window.capacity() as u64;

        info!(
            %mode,
            heart_rate_bpm = bpm,
            samples = self.window.len(),
            "stream window reset"
        );
    }

    /// One tick: append one sample and drain the battery unless paused
    pub fn advance(&mut self) -> TickOutcome {
        if self.state == StreamState::Paused {
            return TickOutcome::Skipped;
        }
        self.sync_feed();

        let time = self.global_time();
        let value = self
            .generator
            .sample(&mut self.rng, time, self.heart_rate_bpm, self.mode);
        let sample = Sample::new(time, value);

        self.window.push_evict(sample);
        self.next_index += 1;
        self.battery_percent = (self.battery_percent - self.settings.battery_drain_per_tick).max(0.0);

        TickOutcome::Advanced(sample)
    }

    /// Pick up a mode pushed through the feed; runs between ticks only
    fn sync_feed(&mut self) {
        let Some(feed_mode) = self.feed.as_ref().map(SharedFeed::mode) else {
            return;
        };
        if feed_mode != self.mode {
            debug!(from = %self.mode, to = %feed_mode, "applying feed mode");
            self.mode = feed_mode;
            self.hard_reset();
        }
    }

    pub fn pause(&mut self) {
        if self.state != StreamState::Paused {
            debug!("stream paused");
            self.state = StreamState::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.state != StreamState::Running {
            debug!("stream resumed");
            self.state = StreamState::Running;
        }
    }

    pub fn toggle_pause(&mut self) -> StreamState {
        match self.state {
            StreamState::Running => self.pause(),
            StreamState::Paused => self.resume(),
        }
        self.state
    }

    /// Switch mode; returns whether the window was reset
    pub fn set_mode(&mut self, mode: SignalMode) -> bool {
        if let Some(feed) = &self.feed {
            feed.set_mode(mode);
        }
        if mode == self.mode {
            return false;
        }
        self.mode = mode;
        self.hard_reset();
        true
    }

    /// Change the heart-rate parameter; returns whether the window was reset
    pub fn set_heart_rate(&mut self, bpm: f64) -> ValidationResult<bool> {
        validate_heart_rate("heart_rate_bpm", bpm)?;
        if bpm == self.heart_rate_bpm {
            return Ok(false);
        }
        self.heart_rate_bpm = bpm;
        self.hard_reset();
        Ok(true)
    }

    /// Follow the mode of a shared feed cell from the next tick on
    pub fn attach_feed(&mut self, feed: SharedFeed) {
        self.feed = Some(feed);
    }

    pub fn detach_feed(&mut self) -> Option<SharedFeed> {
        self.feed.take()
    }

    pub fn state(&self) -> StreamState {
        self.state
    }

    pub fn is_paused(&self) -> bool {
        self.state == StreamState::Paused
    }

    pub fn mode(&self) -> SignalMode {
        self.mode
    }

    pub fn heart_rate_bpm(&self) -> f64 {
        self.heart_rate_bpm
    }

    pub fn global_time(&self) -> f64 {
        self.next_index as f64 * self.settings.sample_interval_s
    }

    pub fn battery_percent(&self) -> f64 {
        self.battery_percent
    }

    pub fn settings(&self) -> &StreamSettings {
        &self.settings
    }

    pub fn window(&self) -> &SlidingWindow<Sample> {
        &self.window
    }

    pub fn samples(&self) -> Vec<Sample> {
        self.window.to_vec()
    }

    pub fn synthesis_state(&self) -> SynthesisState {
        SynthesisState {
            global_time: self.global_time(),
            heart_rate_bpm: self.heart_rate_bpm,
            mode: self.mode,
            paused: self.is_paused(),
        }
    }
}
