// src/error.rs
//! Unified error type for ECG Core
//!
//! Every module owns a focused error enum; `EcgError` wraps them so callers
//! composing several components can propagate with `?`.

use crate::acquisition::WindowError;
use crate::config::loader::ConfigError;
use crate::ingest::IngestError;
use crate::utils::validation::ValidationError;
use thiserror::Error;

/// Unified error type for the entire crate
#[derive(Debug, Error)]
pub enum EcgError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("ingest error: {0}")]
    Ingest(#[from] IngestError),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("window error: {0}")]
    Window(#[from] WindowError),
}

impl EcgError {
    /// Component the error originated from, for log fields
    pub fn component(&self) -> &'static str {
        match self {
            EcgError::Config(_) => "config",
            EcgError::Ingest(_) => "ingest",
            EcgError::Validation(_) => "validation",
            EcgError::Window(_) => "acquisition",
        }
    }

    /// Whether the caller can keep running with its previous state
    pub fn is_recoverable(&self) -> bool {
        match self {
            EcgError::Ingest(_) | EcgError::Validation(_) => true,
            EcgError::Config(_) | EcgError::Window(_) => false,
        }
    }
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, EcgError>;
