//! HTTP client for the liquidity aggregator REST API.
//!
//! One authenticated call per invocation, no retries. Non-2xx bodies
//! are mined for a human-readable `description` before falling back to
//! the bare status code.

use crate::error::{UpstreamError, UpstreamResult};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use swapdeck_core::QuoteRequest;
use tracing::{debug, info, warn};

/// Default timeout for aggregator requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Upstream aggregator operations, one method per endpoint.
///
/// Handlers depend on this trait so tests can substitute a mock and
/// assert that validation rejects bad input before any call is made.
#[async_trait]
pub trait AggregatorApi: Send + Sync {
    /// Fetch a swap quote.
    async fn swap_quote(&self, req: &QuoteRequest) -> UpstreamResult<Value>;

    /// Price a limit order (how much the maker gives for `taking_amount`).
    async fn limit_order_quote(
        &self,
        chain_id: u64,
        maker_asset: &str,
        taker_asset: &str,
        taking_amount: &str,
    ) -> UpstreamResult<Value>;

    /// Validate a signed limit order payload.
    async fn validate_order(&self, chain_id: u64, order: &Value) -> UpstreamResult<Value>;

    /// Cancel a resting limit order.
    async fn cancel_order(&self, chain_id: u64, order_id: &str) -> UpstreamResult<Value>;
}

/// Live client for the aggregator REST API.
pub struct HttpAggregator {
    /// HTTP client.
    client: Client,
    /// API base URL (e.g., "https://api.1inch.dev").
    base_url: String,
    /// Bearer credential. May be absent at startup; surfaced as a
    /// config error at first use, not at construction.
    api_key: Option<String>,
}

impl HttpAggregator {
    /// Create a new aggregator client.
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> UpstreamResult<Self> {
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| UpstreamError::Transport(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key,
        })
    }

    /// Authenticate and send one request, mapping every failure into
    /// `UpstreamError`.
    async fn send(&self, request: reqwest::RequestBuilder) -> UpstreamResult<Value> {
        // Credential check comes first: zero outbound calls when the
        // server is misconfigured.
        let key = self
            .api_key
            .as_deref()
            .ok_or(UpstreamError::MissingCredential)?;

        let response = request
            .bearer_auth(key)
            .send()
            .await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            // Best effort: upstream error bodies usually carry a
            // human-readable `description`.
            let message = response
                .json::<Value>()
                .await
                .ok()
                .and_then(|body| {
                    body.get("description")
                        .and_then(|d| d.as_str())
                        .map(String::from)
                })
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));

            warn!(status = status.as_u16(), %message, "Aggregator returned error");
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| UpstreamError::Transport(format!("Failed to parse response: {e}")))
    }
}

#[async_trait]
impl AggregatorApi for HttpAggregator {
    async fn swap_quote(&self, req: &QuoteRequest) -> UpstreamResult<Value> {
        info!(chain_id = req.chain_id, src = %req.src_token, dst = %req.dst_token, "Fetching swap quote");

        let url = format!("{}/fusion/quote/v1.0/{}", self.base_url, req.chain_id);
        let request = self.client.get(&url).query(&[
            ("src", req.src_token.as_str()),
            ("dst", req.dst_token.as_str()),
            ("amount", req.amount.as_str()),
            ("from", req.taker.as_str()),
        ]);

        self.send(request).await
    }

    async fn limit_order_quote(
        &self,
        chain_id: u64,
        maker_asset: &str,
        taker_asset: &str,
        taking_amount: &str,
    ) -> UpstreamResult<Value> {
        debug!(chain_id, maker_asset, taker_asset, "Fetching limit order quote");

        let url = format!("{}/orderbook/v4.0/{}/quote", self.base_url, chain_id);
        let request = self.client.get(&url).query(&[
            ("makerAsset", maker_asset),
            ("takerAsset", taker_asset),
            ("takingAmount", taking_amount),
        ]);

        self.send(request).await
    }

    async fn validate_order(&self, chain_id: u64, order: &Value) -> UpstreamResult<Value> {
        debug!(chain_id, "Validating limit order");

        let url = format!("{}/orderbook/v4.0/{}/validate", self.base_url, chain_id);
        let request = self.client.post(&url).json(order);

        self.send(request).await
    }

    async fn cancel_order(&self, chain_id: u64, order_id: &str) -> UpstreamResult<Value> {
        info!(chain_id, order_id, "Cancelling limit order");

        let url = format!(
            "{}/orderbook/v4.0/{}/order/{}",
            self.base_url, chain_id, order_id
        );
        let request = self.client.delete(&url);

        self.send(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    fn quote_request() -> QuoteRequest {
        QuoteRequest::new(1, "0xsrc", "0xdst", "1000", "0xme").unwrap()
    }

    /// One-shot upstream double: accepts a single connection and
    /// answers with a canned HTTP response.
    async fn spawn_upstream(status_line: &str, body: &str) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 2048];
            let _ = socket.read(&mut buf).await;
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        });

        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_non_2xx_description_is_surfaced() {
        let base = spawn_upstream(
            "400 Bad Request",
            r#"{"description":"insufficient liquidity"}"#,
        )
        .await;
        let client = HttpAggregator::new(base, Some("key".into())).unwrap();

        let err = client.swap_quote(&quote_request()).await.unwrap_err();
        match err {
            UpstreamError::Status { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "insufficient liquidity");
            }
            other => panic!("Expected Status, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_2xx_unparseable_body_falls_back_to_http_status() {
        let base = spawn_upstream("503 Service Unavailable", "upstream melted").await;
        let client = HttpAggregator::new(base, Some("key".into())).unwrap();

        let err = client.cancel_order(1, "abc").await.unwrap_err();
        match err {
            UpstreamError::Status { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "HTTP 503");
            }
            other => panic!("Expected Status, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_success_body_returned_as_json() {
        let base = spawn_upstream("200 OK", r#"{"success":true}"#).await;
        let client = HttpAggregator::new(base, Some("key".into())).unwrap();

        let raw = client.cancel_order(1, "abc").await.unwrap();
        assert_eq!(raw["success"], true);
    }

    #[tokio::test]
    async fn test_missing_credential_fails_before_network() {
        // Unroutable base URL: if the client ever tried the network
        // this test would hang or fail with a transport error instead.
        let client = HttpAggregator::new("http://192.0.2.1", None).unwrap();

        let err = client.swap_quote(&quote_request()).await.unwrap_err();
        assert!(matches!(err, UpstreamError::MissingCredential));
        assert!(err.is_config());
        assert_eq!(err.status(), 0);
    }

    #[tokio::test]
    async fn test_missing_credential_on_every_operation() {
        let client = HttpAggregator::new("http://192.0.2.1", None).unwrap();

        assert!(matches!(
            client.limit_order_quote(1, "0xa", "0xb", "10").await,
            Err(UpstreamError::MissingCredential)
        ));
        assert!(matches!(
            client.validate_order(1, &serde_json::json!({})).await,
            Err(UpstreamError::MissingCredential)
        ));
        assert!(matches!(
            client.cancel_order(1, "abc").await,
            Err(UpstreamError::MissingCredential)
        ));
    }

    #[test]
    fn test_credential_error_message() {
        assert_eq!(
            UpstreamError::MissingCredential.to_string(),
            "aggregator credential not configured"
        );
    }

    #[test]
    fn test_status_error_carries_code() {
        let err = UpstreamError::Status {
            status: 429,
            message: "HTTP 429".into(),
        };
        assert_eq!(err.status(), 429);
        assert!(!err.is_config());
    }
}
