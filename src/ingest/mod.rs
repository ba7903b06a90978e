//! Ingestion & statistics pipeline for uploaded ECG text

pub mod export;
pub mod parser;
pub mod session;
pub mod statistics;

pub use export::{export_file_name, serialize};
pub use parser::{parse, parse_with, HeaderDetection, IngestedDataset};
pub use session::{DataSession, ExportedCsv, LoadedDataset};
pub use statistics::Statistics;

use thiserror::Error;

/// Ingestion failures; malformed fields are substituted, never reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IngestError {
    #[error("No valid data found; expected rows of time,value")]
    NoValidSamples,
}
