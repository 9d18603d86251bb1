//! Error types for the Extractor

use std::path::PathBuf;
use thiserror::Error;

/// Errors that end an extraction run
///
/// Per-unit failures (API errors, replies without JSON) never surface here;
/// they are recorded as error markers on the unit's record instead.
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Reading or writing a file failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing or serialization error
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A worker task failed or panicked
    #[error("Worker {worker} failed: {reason}")]
    Worker {
        /// Worker id (1 or 2)
        worker: u8,
        /// What went wrong
        reason: String,
    },
}

impl ExtractorError {
    /// Wrap an I/O error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ExtractorError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<serde_json::Error> for ExtractorError {
    fn from(e: serde_json::Error) -> Self {
        ExtractorError::JsonParse(e.to_string())
    }
}
