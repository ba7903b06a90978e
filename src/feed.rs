//! Remote status feed state cell
//!
//! The host subscribes to a push-based feed and forwards each update here.
//! Updates are last-writer-wins and null tolerant: a missing or `null` field
//! keeps the last known value. Raw ECG values are recorded and counted but
//! are not merged into the streaming window.

use crate::simulation::SignalMode;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Last known state pushed by the remote feed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedState {
    pub mode: SignalMode,
    pub lead_status: Option<String>,
    /// Display flag derived from `lead_status`
    pub connected: bool,
    pub last_raw_value: Option<f64>,
    pub raw_values_observed: u64,
}

impl Default for FeedState {
    fn default() -> Self {
        Self {
            mode: SignalMode::default(),
            lead_status: None,
            connected: true,
            last_raw_value: None,
            raw_values_observed: 0,
        }
    }
}

/// One inbound feed message; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FeedUpdate {
    /// Mode ordinal, see [`SignalMode::from_ordinal`]
    #[serde(default)]
    pub mode: Option<i64>,
    #[serde(default, alias = "lead_status")]
    pub status: Option<String>,
    #[serde(default, alias = "raw_value")]
    pub ecg: Option<f64>,
}

impl FeedUpdate {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn from_json_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    pub fn mode(ordinal: i64) -> Self {
        Self { mode: Some(ordinal), ..Default::default() }
    }

    pub fn status(status: impl Into<String>) -> Self {
        Self { status: Some(status.into()), ..Default::default() }
    }

    pub fn raw_value(value: f64) -> Self {
        Self { ecg: Some(value), ..Default::default() }
    }
}

impl FeedState {
    /// Fold one update into the state
    pub fn apply(&mut self, update: &FeedUpdate) {
        if let Some(ordinal) = update.mode {
            match SignalMode::from_ordinal(ordinal) {
                Some(mode) => {
                    debug!(%mode, "feed mode update");
                    self.mode = mode;
                }
                None => warn!(ordinal, "ignoring unknown feed mode"),
            }
        }

        if let Some(status) = &update.status {
            self.connected = status.trim().eq_ignore_ascii_case("ok");
            debug!(status = %status, connected = self.connected, "feed lead status");
            self.lead_status = Some(status.clone());
        }

        if let Some(value) = update.ecg.filter(|v| v.is_finite()) {
            debug!(value, "feed raw sample observed");
            self.last_raw_value = Some(value);
            self.raw_values_observed += 1;
        }
    }
}

/// Process-wide feed cell shared between the host and the monitor
#[derive(Debug, Clone, Default)]
pub struct SharedFeed {
    inner: Arc<RwLock<FeedState>>,
}

impl SharedFeed {
    pub fn new(initial: FeedState) -> Self {
        Self {
            inner: Arc::new(RwLock::new(initial)),
        }
    }

    pub fn apply(&self, update: &FeedUpdate) {
        self.inner.write().apply(update);
    }

    pub fn snapshot(&self) -> FeedState {
        self.inner.read().clone()
    }

    pub fn mode(&self) -> SignalMode {
        self.inner.read().mode
    }

    pub fn connected(&self) -> bool {
        self.inner.read().connected
    }

    /// Set the mode locally, as if the feed had pushed it
    pub fn set_mode(&self, mode: SignalMode) {
        self.inner.write().mode = mode;
    }
}
