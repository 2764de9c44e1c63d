//! Client-facing error contract.
//!
//! Every failure renders as `{"error": <user message>, "details":
//! <diagnostic>}` with a matching status code. Raw upstream errors and
//! stacks never reach the client; the diagnostic is a single message
//! string, also logged server-side.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use swapdeck_aggregator::UpstreamError;
use swapdeck_core::CoreError;
use thiserror::Error;
use tracing::error;

/// Gateway failure taxonomy.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Caller input incomplete or malformed. Detected before any I/O.
    #[error("{0}")]
    Validation(String),

    /// Server misconfigured (e.g., no upstream credential).
    #[error("{0}")]
    Config(String),

    /// The aggregator failed or was unreachable.
    #[error("{message}")]
    Upstream { message: String, detail: String },

    /// Anything unexpected, caught at the handler boundary.
    #[error("{0}")]
    Internal(String),
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Config(_) | Self::Upstream { .. } | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Wrap an upstream failure with the operation's user message.
    /// Missing-credential is a config fault, not an upstream one.
    pub fn from_upstream(message: impl Into<String>, err: UpstreamError) -> Self {
        match err {
            UpstreamError::MissingCredential => Self::Config(err.to_string()),
            other => Self::Upstream {
                message: message.into(),
                detail: other.to_string(),
            },
        }
    }
}

impl From<CoreError> for GatewayError {
    fn from(err: CoreError) -> Self {
        Self::Validation(err.to_string())
    }
}

// Extractor rejections (malformed JSON body, bad query string,
// non-numeric path segment) must render through the same JSON error
// contract as everything else, not axum's plain-text default.

impl From<JsonRejection> for GatewayError {
    fn from(rej: JsonRejection) -> Self {
        Self::Validation(rej.body_text())
    }
}

impl From<QueryRejection> for GatewayError {
    fn from(rej: QueryRejection) -> Self {
        Self::Validation(rej.body_text())
    }
}

impl From<PathRejection> for GatewayError {
    fn from(rej: PathRejection) -> Self {
        Self::Validation(rej.body_text())
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        error!(status = status.as_u16(), error = %self, "Request failed");

        let body = match &self {
            Self::Upstream { message, detail } => json!({
                "error": message,
                "details": detail,
            }),
            other => json!({ "error": other.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for gateway handlers.
pub type GatewayResult<T> = Result<T, GatewayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            GatewayError::Validation("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            GatewayError::Config("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            GatewayError::Upstream {
                message: "x".into(),
                detail: "y".into()
            }
            .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_missing_credential_becomes_config_error() {
        let err = GatewayError::from_upstream("Failed", UpstreamError::MissingCredential);
        assert!(matches!(err, GatewayError::Config(_)));
        assert_eq!(err.to_string(), "aggregator credential not configured");
    }

    #[test]
    fn test_upstream_status_keeps_user_message_and_detail() {
        let err = GatewayError::from_upstream(
            "Failed to fetch swap quote",
            UpstreamError::Status {
                status: 503,
                message: "HTTP 503".into(),
            },
        );
        match err {
            GatewayError::Upstream { message, detail } => {
                assert_eq!(message, "Failed to fetch swap quote");
                assert!(detail.contains("HTTP 503"));
            }
            other => panic!("Expected Upstream, got {other:?}"),
        }
    }
}
