//! Error types for the asdscreen library.
//!
//! All errors are represented by the [`ScreenError`] enum, which provides
//! detailed information about what went wrong.
//!
//! # Examples
//!
//! ```
//! use asdscreen::error::{Result, ScreenError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(ScreenError::encoding("unrecognized label"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {e}"),
//! }
//! ```

use std::io;

use anyhow;
use thiserror::Error;

/// The main error type for asdscreen operations.
///
/// Artifact-load failures are fatal: they halt the process before any
/// request is served. Encoding and prediction failures are per-request and
/// are caught at the request boundary so the hosting loop keeps serving.
#[derive(Error, Debug)]
pub enum ScreenError {
    /// I/O errors (file operations, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A model, scaler or schema artifact is missing, unreadable or malformed.
    #[error("Artifact error: {0}")]
    ArtifactLoad(String),

    /// A collected answer is not a recognized key in its categorical map.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Scaling or classification failed for this request.
    #[error("Prediction error: {0}")]
    Prediction(String),

    /// A collection-time answer validation failure.
    #[error("Answer error: {0}")]
    Answer(String),

    /// Invalid operation
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with ScreenError.
pub type Result<T> = std::result::Result<T, ScreenError>;

impl ScreenError {
    /// Create a new artifact-load error.
    pub fn artifact<S: Into<String>>(msg: S) -> Self {
        ScreenError::ArtifactLoad(msg.into())
    }

    /// Create a new encoding error.
    pub fn encoding<S: Into<String>>(msg: S) -> Self {
        ScreenError::Encoding(msg.into())
    }

    /// Create a new prediction error.
    pub fn prediction<S: Into<String>>(msg: S) -> Self {
        ScreenError::Prediction(msg.into())
    }

    /// Create a new answer validation error.
    pub fn answer<S: Into<String>>(msg: S) -> Self {
        ScreenError::Answer(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        ScreenError::Other(msg.into())
    }
}
