//! Error types for the run digest.
//!
//! Projection, schema inference, merging and classification are total and
//! never produce errors. Fallibility lives only at the edges: reading the
//! envelope stream and persisting artifacts. Configuration problems have
//! their own type in `rd-config`.
//!
//! Errors carry a stable numeric code and a category so the CLI can map them
//! to exit codes and structured output:
//! ```json
//! { "code": 30, "category": "io", "message": "I/O error: permission denied" }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for digest operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Malformed envelopes in the input stream.
    Source,
    /// File I/O and serialization errors.
    Io,
}

/// Unified error type for the digest edges.
#[derive(Error, Debug)]
pub enum Error {
    // Source errors (20-29)
    #[error("malformed envelope at line {line}: {message}")]
    MalformedEnvelope { line: usize, message: String },

    // I/O errors (30-39)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write {path}: {source}")]
    Persist {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Returns the error code for this error type.
    ///
    /// - 20-29: Source errors
    /// - 30-39: I/O errors
    pub fn code(&self) -> u32 {
        match self {
            Error::MalformedEnvelope { .. } => 20,
            Error::Io(_) => 30,
            Error::Json(_) => 31,
            Error::Persist { .. } => 32,
        }
    }

    /// Returns the category for this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::MalformedEnvelope { .. } => ErrorCategory::Source,
            Error::Io(_) | Error::Json(_) | Error::Persist { .. } => ErrorCategory::Io,
        }
    }

    /// Whether processing can continue past this error.
    ///
    /// A malformed envelope only costs that one envelope.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::MalformedEnvelope { .. })
    }

    /// Structured form, attached to the CLI's JSON error report.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "code": self.code(),
            "category": self.category(),
            "message": self.to_string(),
            "recoverable": self.is_recoverable(),
        })
    }
}
