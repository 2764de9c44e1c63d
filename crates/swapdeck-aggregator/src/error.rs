//! Error types for the upstream aggregator client.

use thiserror::Error;

/// Failures surfaced by the upstream client.
///
/// Raw transport exceptions never cross this boundary; everything the
/// handlers see is one of these variants.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// No API credential configured. Checked before any network
    /// attempt; maps to a server misconfiguration, not an upstream
    /// fault.
    #[error("aggregator credential not configured")]
    MissingCredential,

    /// Upstream answered with a non-2xx status.
    #[error("aggregator error: {message}")]
    Status { status: u16, message: String },

    /// The request never got an HTTP response (DNS, connection
    /// refused, body decode, ...).
    #[error("aggregator unreachable: {0}")]
    Transport(String),
}

impl UpstreamError {
    /// Upstream HTTP status, with 0 standing in for transport-level
    /// failures that never produced a response.
    pub fn status(&self) -> u16 {
        match self {
            Self::Status { status, .. } => *status,
            Self::MissingCredential | Self::Transport(_) => 0,
        }
    }

    pub fn is_config(&self) -> bool {
        matches!(self, Self::MissingCredential)
    }
}

/// Result type alias for upstream operations.
pub type UpstreamResult<T> = Result<T, UpstreamError>;
