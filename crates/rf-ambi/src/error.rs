//! Error types for Ambisonics processing

use thiserror::Error;

/// Ambisonics error types
#[derive(Error, Debug)]
pub enum AmbiError {
    /// Order outside the supported 1-7 range
    #[error("Invalid Ambisonic order: {0} (supported: 1-7)")]
    InvalidOrder(usize),

    /// Raw bounds mode that is neither NORMALIZED nor RADIANS
    #[error("Invalid bounds mode: {0} (expected 0 = normalized or 1 = radians)")]
    InvalidBoundsMode(i64),

    /// Buffer too short for the requested frame count
    #[error("Buffer size mismatch: expected {expected}, got {got}")]
    BufferSizeMismatch { expected: usize, got: usize },

    /// Invalid configuration document
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for AmbiError {
    fn from(err: serde_json::Error) -> Self {
        AmbiError::Config(err.to_string())
    }
}

/// Result type for Ambisonics operations
pub type AmbiResult<T> = Result<T, AmbiError>;
