//! Error types shared across Pinchpoint crates.

use std::path::PathBuf;

/// Top-level error type for Pinchpoint operations.
#[derive(Debug, thiserror::Error)]
pub enum PinchpointError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Intent sink error: {message}")]
    Sink { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using PinchpointError.
pub type PinchpointResult<T> = Result<T, PinchpointError>;

impl PinchpointError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn sink(msg: impl Into<String>) -> Self {
        Self::Sink {
            message: msg.into(),
        }
    }

    /// Whether this error came from configuration validation.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config { .. })
    }
}
