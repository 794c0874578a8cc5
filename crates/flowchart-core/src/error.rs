//! Errors raised at the boundaries of the core.
//!
//! Transition functions never fail; these cover decoding external input.

use thiserror::Error;

/// Boundary errors.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Invalid drop payload: {0}")]
    InvalidDropPayload(String),
    #[error("Port key {key} does not match port id {id}")]
    PortKeyMismatch { key: String, id: String },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for boundary operations.
pub type ChartResult<T> = Result<T, ChartError>;
