//! Unified error types for the dla ecosystem
//!
//! This module provides a common error type [`DlaError`] that can represent
//! errors from any part of the system. Domain-specific error types can be
//! converted to `DlaError` for uniform error handling at API boundaries.
//!
//! # Example
//!
//! ```ignore
//! use dla_core::{DlaError, DlaResult};
//!
//! fn load_and_report(path: &str) -> DlaResult<()> {
//!     let dataset = load_dataset(path)?;
//!     write_report(&dataset)?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Unified error type for all dla operations.
///
/// This enum provides a common error representation across ingestion,
/// aggregation, and export, allowing errors from I/O, parsing, and
/// configuration to be handled uniformly.
#[derive(Error, Debug)]
pub enum DlaError {
    /// I/O errors (file access, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Parsing/deserialization errors
    #[error("Parse error: {0}")]
    Parse(String),

    /// Unrecognized or unsupported source format
    #[error("Format error: {0}")]
    Format(String),

    /// Export/serialization errors
    #[error("Export error: {0}")]
    Export(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic errors (for wrapping external errors)
    #[error("{0}")]
    Other(String),
}

/// Convenience type alias for Results using DlaError.
pub type DlaResult<T> = Result<T, DlaError>;

// Conversion from anyhow::Error
impl From<anyhow::Error> for DlaError {
    fn from(err: anyhow::Error) -> Self {
        DlaError::Other(err.to_string())
    }
}

// Conversion from string-like types for convenience
impl From<String> for DlaError {
    fn from(s: String) -> Self {
        DlaError::Other(s)
    }
}

impl From<&str> for DlaError {
    fn from(s: &str) -> Self {
        DlaError::Other(s.to_string())
    }
}

// JSON parsing errors
impl From<serde_json::Error> for DlaError {
    fn from(err: serde_json::Error) -> Self {
        DlaError::Parse(err.to_string())
    }
}
