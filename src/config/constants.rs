//! System-wide configuration constants

/// Streaming window and tick cadence
pub mod stream {
    pub const DEFAULT_WINDOW_CAPACITY: usize = 100;
    pub const MIN_WINDOW_CAPACITY: usize = 1;
    /// 25 Hz display cadence, 100 samples cover 4 s
    pub const DEFAULT_SAMPLE_INTERVAL_S: f64 = 0.04;
    pub const DEFAULT_TICK_PERIOD_MS: u64 = 40;
    pub const DEFAULT_HEART_RATE_BPM: f64 = 72.0;
    pub const MAX_HEART_RATE_BPM: f64 = 300.0;
}

/// Simulated device battery
pub mod battery {
    pub const DEFAULT_INITIAL_PERCENT: f64 = 85.0;
    pub const DEFAULT_DRAIN_PER_TICK: f64 = 0.1;
    pub const MIN_PERCENT: f64 = 0.0;
    pub const MAX_PERCENT: f64 = 100.0;
}

/// Waveform synthesis amplitudes, all in millivolts
pub mod synthesis {
    /// Jitter added on top of every shaped (non noise-only) value
    pub const ADDITIVE_NOISE_MV: f64 = 0.025;
    pub const LIGHT_NOISE_MV: f64 = 0.075;
    pub const HEAVY_NOISE_MV: f64 = 0.4;
    pub const BASELINE_LEVEL_MV: f64 = 0.0;

    pub const WANDER_AMPLITUDE_MV: f64 = 0.04;
    pub const WANDER_FREQUENCY_HZ: f64 = 0.3;
    pub const IRREGULARITY_AMPLITUDE_MV: f64 = 0.012;
    pub const IRREGULARITY_FREQUENCY_HZ: f64 = 35.0;
}

/// Heart-rate estimator policy
pub mod heart_rate {
    pub const DEFAULT_REFRESH_PERIOD_MS: u64 = 1000;

    pub const CLEAN_JITTER_BPM: f64 = 2.0;
    pub const CLEAN_RANGE_BPM: (f64, f64) = (45.0, 150.0);

    pub const LIGHT_NOISE_JITTER_BPM: f64 = 4.0;
    pub const LIGHT_NOISE_UNMEASURABLE_PROBABILITY: f64 = 0.10;
    pub const LIGHT_NOISE_RANGE_BPM: (f64, f64) = (45.0, 150.0);

    pub const HEAVY_NOISE_JITTER_BPM: f64 = 7.5;
    pub const HEAVY_NOISE_UNMEASURABLE_PROBABILITY: f64 = 0.70;
    pub const HEAVY_NOISE_RANGE_BPM: (f64, f64) = (30.0, 180.0);
}

/// Text ingestion
pub mod ingest {
    /// 250 Hz fallback when a row carries no usable time
    pub const DEFAULT_SAMPLE_INTERVAL_S: f64 = 0.004;
    pub const VALUE_DECIMALS: u32 = 3;
    pub const HEADER_MARKERS: &[&str] = &["time", "Time", "t"];
    pub const EXPORT_HEADER: &str = "time,value";
    pub const EXPORT_SUFFIX: &str = "_processed.csv";
}

/// Demo dataset offered by the data page
pub mod demo {
    pub const SAMPLE_COUNT: usize = 1000;
    pub const SAMPLE_INTERVAL_S: f64 = 0.004;
    pub const HEART_RATE_BPM: f64 = 78.0;
    pub const NOISE_MV: f64 = 0.01;
    pub const FILE_NAME: &str = "sample_ecg_data.csv";
}

/// Configuration file discovery
pub mod paths {
    pub const DEFAULT_CONFIG_FILE: &str = "ecg-monitor.toml";
    pub const CONFIG_DIR_FILE: &str = "config/ecg-monitor.toml";
    pub const ENV_PREFIX: &str = "ECG_MONITOR__";
    pub const ENV_PATH_SEPARATOR: &str = "__";
}
