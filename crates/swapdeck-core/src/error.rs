//! Error types for swapdeck-core.

use thiserror::Error;

/// Core error types.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Missing required parameter: {0}")]
    MissingParam(&'static str),

    #[error("Invalid chain id: {0}")]
    InvalidChainId(u64),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
