//! Error types for the achat-core library.
//!
//! Field extraction and journal generation are total functions and never
//! return these errors. They only surface from I/O-facing helpers: loading
//! configuration, reading purchase records and writing exports.

use thiserror::Error;

/// Main error type for the achat library.
#[derive(Error, Debug)]
pub enum AchatError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV writing error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type for the achat library.
pub type Result<T> = std::result::Result<T, AchatError>;
