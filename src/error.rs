//! Error types for the front end (file output, JSON, interactive commands).
//!
//! The geometry itself is total over the input domain and never fails.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpacingError {
    #[error("failed to write diagram to {path}: {source}")]
    WriteDiagram {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize geometry: {0}")]
    Json(#[from] serde_json::Error),

    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid command '{line}': {reason}")]
    InvalidCommand { line: String, reason: String },
}
