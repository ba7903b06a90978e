//! ECG-Core: synthetic ECG streaming and sample ingestion
//!
//! This library drives a simulated cardiac monitor display. It features:
//!
//! - A waveform synthesizer with two cardiac morphologies and noise-only modes
//! - A fixed-length sliding window advanced by a periodic tick
//! - A mode-keyed heart-rate display estimate
//! - CSV / TSV ingestion with summary statistics and export
//! - Layered TOML configuration with environment overrides
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use ecg_core::{EcgMonitor, MonitorConfig, SignalMode};
//!
//! fn main() -> ecg_core::Result<()> {
//!     let mut monitor = EcgMonitor::from_config(&MonitorConfig::default())?;
//!
//!     monitor.set_mode(SignalMode::Variant);
//!     for _ in 0..25 {
//!         monitor.tick();
//!     }
//!     monitor.refresh_heart_rate();
//!
//!     let snapshot = monitor.snapshot();
//!     println!("{} samples, HR {}", snapshot.samples.len(), snapshot.heart_rate);
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]

pub mod acquisition;
pub mod config;
pub mod error;
pub mod feed;
pub mod ingest;
pub mod monitor;
pub mod processing;
#[cfg(feature = "runtime")]
pub mod runtime;
pub mod simulation;
pub mod types;
pub mod utils;

// Re-export commonly used types for convenience
pub use acquisition::{SlidingWindow, StreamController, StreamState, SynthesisState, TickOutcome};
pub use config::{ConfigLoader, MonitorConfig};
pub use error::{EcgError, Result};
pub use feed::{FeedState, FeedUpdate, SharedFeed};
pub use ingest::{parse, serialize, DataSession, IngestError, IngestedDataset, Statistics};
pub use monitor::{EcgMonitor, MonitorSnapshot};
pub use processing::{HeartRateEstimator, HeartRateReading};
#[cfg(feature = "runtime")]
pub use runtime::MonitorRuntime;
pub use simulation::{synthesize, SignalMode};
pub use types::Sample;
pub use utils::validation::{ValidationError, ValidationResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn version_info() -> VersionInfo {
    VersionInfo {
        name: NAME.to_string(),
        version: VERSION.to_string(),
        description: "Synthetic ECG streaming, heart-rate estimation and sample ingestion core"
            .to_string(),
        features: vec![
            "Waveform synthesis".to_string(),
            "Sliding window streaming".to_string(),
            "Heart-rate display estimate".to_string(),
            "CSV ingestion and export".to_string(),
            #[cfg(feature = "runtime")]
            "Tokio schedulers".to_string(),
        ],
    }
}

/// Library version information
#[derive(Debug, Clone)]
pub struct VersionInfo {
    /// Library name
    pub name: String,
    /// Version string
    pub version: String,
    /// Description
    pub description: String,
    /// List of features
    pub features: Vec<String>,
}
