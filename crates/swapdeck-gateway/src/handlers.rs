//! Per-operation request handlers.
//!
//! Each handler runs the same sequence: validate → select mode →
//! simulate or call upstream → normalize → respond. Validation
//! failures return 400 before any simulation or network work; upstream
//! and config failures surface as 500 with the operation's user
//! message.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use swapdeck_aggregator::normalize;
use swapdeck_core::{
    CancellationResult, LimitOrderQuote, Quote, QuoteRequest, RequestMode, ValidationResult,
};
use tracing::warn;

use crate::error::{GatewayError, GatewayResult};
use crate::state::AppState;

fn ensure_chain_id(chain_id: u64) -> GatewayResult<()> {
    if chain_id == 0 {
        return Err(GatewayError::Validation(format!(
            "Invalid chain id: {chain_id}"
        )));
    }
    Ok(())
}

/// Liveness probe.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[derive(Debug, Deserialize)]
pub struct SwapQuoteParams {
    src: Option<String>,
    dst: Option<String>,
    amount: Option<String>,
    from: Option<String>,
    demo: Option<bool>,
}

/// GET /swap/quote/{chain_id}
pub async fn swap_quote(
    State(state): State<AppState>,
    chain_id: Result<Path<u64>, PathRejection>,
    params: Result<Query<SwapQuoteParams>, QueryRejection>,
) -> GatewayResult<Json<Quote>> {
    let Path(chain_id) = chain_id?;
    let Query(params) = params?;

    let (Some(src), Some(dst), Some(amount), Some(from)) =
        (params.src, params.dst, params.amount, params.from)
    else {
        return Err(GatewayError::Validation(
            "Missing required parameters: src, dst, amount, from".to_string(),
        ));
    };

    let req = QuoteRequest::new(chain_id, src, dst, amount, from)?;

    match RequestMode::select(state.mode, params.demo) {
        RequestMode::Demo => Ok(Json(state.demo.swap_quote(&req))),
        RequestMode::Live => live_swap_quote(&state, &req).await.map(Json),
    }
}

/// Live swap-quote path. Unlike the other operations, a failed live
/// call falls back to simulated data when the deployment is
/// non-production, so a broken upstream never blanks the dev UI.
async fn live_swap_quote(state: &AppState, req: &QuoteRequest) -> GatewayResult<Quote> {
    match state.upstream.swap_quote(req).await {
        Ok(raw) => Ok(normalize::quote(&raw)),
        Err(err) if state.mode.is_development() => {
            warn!(error = %err, "Live swap quote failed, serving demo data");
            Ok(state.demo.swap_quote(req))
        }
        Err(err) => Err(GatewayError::from_upstream(
            "Failed to fetch swap quote",
            err,
        )),
    }
}

#[derive(Debug, Deserialize)]
pub struct LimitOrderQuoteParams {
    #[serde(rename = "makerAsset")]
    maker_asset: Option<String>,
    #[serde(rename = "takerAsset")]
    taker_asset: Option<String>,
    #[serde(rename = "takingAmount")]
    taking_amount: Option<String>,
    demo: Option<bool>,
}

/// GET /limit-orders/{chain_id}/quote
pub async fn limit_order_quote(
    State(state): State<AppState>,
    chain_id: Result<Path<u64>, PathRejection>,
    params: Result<Query<LimitOrderQuoteParams>, QueryRejection>,
) -> GatewayResult<Json<LimitOrderQuote>> {
    let Path(chain_id) = chain_id?;
    let Query(params) = params?;
    ensure_chain_id(chain_id)?;

    let (Some(maker), Some(taker), Some(taking)) = (
        params.maker_asset.filter(|s| !s.is_empty()),
        params.taker_asset.filter(|s| !s.is_empty()),
        params.taking_amount.filter(|s| !s.is_empty()),
    ) else {
        return Err(GatewayError::Validation(
            "makerAsset, takerAsset, and takingAmount are required".to_string(),
        ));
    };

    match RequestMode::select(state.mode, params.demo) {
        RequestMode::Demo => Ok(Json(state.demo.limit_order_quote(&maker, &taker, &taking))),
        RequestMode::Live => {
            let raw = state
                .upstream
                .limit_order_quote(chain_id, &maker, &taker, &taking)
                .await
                .map_err(|e| {
                    GatewayError::from_upstream("Failed to calculate making amount", e)
                })?;
            Ok(Json(normalize::limit_order_quote(
                &raw, &maker, &taker, &taking,
            )))
        }
    }
}

/// POST /limit-orders/{chain_id}/validate
///
/// The demo opt-in rides inside the JSON body (`"demo": true`) because
/// the frontend submits the full order payload in one document.
pub async fn validate_order(
    State(state): State<AppState>,
    chain_id: Result<Path<u64>, PathRejection>,
    order: Result<Json<Value>, JsonRejection>,
) -> GatewayResult<Json<ValidationResult>> {
    let Path(chain_id) = chain_id?;
    let Json(order) = order?;
    ensure_chain_id(chain_id)?;

    let explicit_demo = order.get("demo").and_then(|v| v.as_bool());

    match RequestMode::select(state.mode, explicit_demo) {
        RequestMode::Demo => Ok(Json(state.demo.validate_order(&order))),
        RequestMode::Live => {
            let raw = state
                .upstream
                .validate_order(chain_id, &order)
                .await
                .map_err(|e| GatewayError::from_upstream("Failed to validate signature", e))?;
            Ok(Json(normalize::validation(&raw)))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CancelParams {
    #[serde(rename = "orderId")]
    order_id: Option<String>,
    demo: Option<bool>,
}

/// DELETE /limit-orders/{chain_id}/cancel
pub async fn cancel_order(
    State(state): State<AppState>,
    chain_id: Result<Path<u64>, PathRejection>,
    params: Result<Query<CancelParams>, QueryRejection>,
) -> GatewayResult<Json<CancellationResult>> {
    let Path(chain_id) = chain_id?;
    let Query(params) = params?;
    ensure_chain_id(chain_id)?;

    let Some(order_id) = params.order_id.filter(|s| !s.is_empty()) else {
        return Err(GatewayError::Validation("Order ID is required".to_string()));
    };

    match RequestMode::select(state.mode, params.demo) {
        RequestMode::Demo => Ok(Json(state.demo.cancel_order(&order_id))),
        RequestMode::Live => {
            let raw = state
                .upstream
                .cancel_order(chain_id, &order_id)
                .await
                .map_err(|e| GatewayError::from_upstream("Failed to cancel limit order", e))?;
            Ok(Json(normalize::cancellation(&raw, &order_id)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mockall::mock;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;
    use swapdeck_aggregator::{AggregatorApi, UpstreamError, UpstreamResult};
    use swapdeck_core::RuntimeMode;
    use swapdeck_demo::DemoSimulator;

    mock! {
        pub Upstream {}

        #[async_trait]
        impl AggregatorApi for Upstream {
            async fn swap_quote(&self, req: &QuoteRequest) -> UpstreamResult<Value>;
            async fn limit_order_quote(
                &self,
                chain_id: u64,
                maker_asset: &str,
                taker_asset: &str,
                taking_amount: &str,
            ) -> UpstreamResult<Value>;
            async fn validate_order(&self, chain_id: u64, order: &Value) -> UpstreamResult<Value>;
            async fn cancel_order(&self, chain_id: u64, order_id: &str) -> UpstreamResult<Value>;
        }
    }

    fn state_with(mode: RuntimeMode, upstream: MockUpstream) -> AppState {
        AppState::new(
            mode,
            Arc::new(upstream),
            Arc::new(DemoSimulator::with_rng(StdRng::seed_from_u64(0))),
        )
    }

    /// Upstream mock with zero expectations: any call panics, which is
    /// the spy for "no network work happened".
    fn untouchable_upstream() -> MockUpstream {
        MockUpstream::new()
    }

    fn request() -> QuoteRequest {
        QuoteRequest::new(1, "0xEEE", "0xA0b", "1000000000000000000", "0xUser").unwrap()
    }

    #[tokio::test]
    async fn test_live_fallback_serves_demo_in_development() {
        let mut upstream = MockUpstream::new();
        upstream
            .expect_swap_quote()
            .times(1)
            .returning(|_| Err(UpstreamError::Transport("connection refused".into())));

        let state = state_with(RuntimeMode::Development, upstream);
        let quote = live_swap_quote(&state, &request()).await.unwrap();

        assert_eq!(quote.to_amount, "1800000000000000000000");
        assert_eq!(quote.from_token.symbol, "ETH");
    }

    #[tokio::test]
    async fn test_live_failure_propagates_in_production() {
        let mut upstream = MockUpstream::new();
        upstream
            .expect_swap_quote()
            .times(1)
            .returning(|_| {
                Err(UpstreamError::Status {
                    status: 503,
                    message: "HTTP 503".into(),
                })
            });

        let state = state_with(RuntimeMode::Production, upstream);
        let err = live_swap_quote(&state, &request()).await.unwrap_err();

        assert!(matches!(err, GatewayError::Upstream { .. }));
        assert_eq!(err.status(), axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_missing_credential_maps_to_config_error() {
        let mut upstream = MockUpstream::new();
        upstream
            .expect_cancel_order()
            .times(1)
            .returning(|_, _| Err(UpstreamError::MissingCredential));

        let state = state_with(RuntimeMode::Production, upstream);
        let result = cancel_order(
            State(state),
            Ok(Path(1)),
            Ok(Query(CancelParams {
                order_id: Some("abc".into()),
                demo: None,
            })),
        )
        .await;

        let err = result.unwrap_err();
        assert!(matches!(err, GatewayError::Config(_)));
        assert_eq!(err.to_string(), "aggregator credential not configured");
    }

    #[tokio::test]
    async fn test_missing_order_id_rejected_before_any_work() {
        let state = state_with(RuntimeMode::Production, untouchable_upstream());
        let result = cancel_order(
            State(state),
            Ok(Path(1)),
            Ok(Query(CancelParams {
                order_id: None,
                demo: Some(true),
            })),
        )
        .await;

        let err = result.unwrap_err();
        assert!(matches!(err, GatewayError::Validation(_)));
        assert_eq!(err.to_string(), "Order ID is required");
    }

    #[tokio::test]
    async fn test_zero_chain_id_rejected() {
        let state = state_with(RuntimeMode::Development, untouchable_upstream());
        let result = limit_order_quote(
            State(state),
            Ok(Path(0)),
            Ok(Query(LimitOrderQuoteParams {
                maker_asset: Some("0xa".into()),
                taker_asset: Some("0xb".into()),
                taking_amount: Some("10".into()),
                demo: None,
            })),
        )
        .await;

        assert!(matches!(result, Err(GatewayError::Validation(_))));
    }

    #[tokio::test]
    async fn test_live_limit_order_quote_normalizes_response() {
        let mut upstream = MockUpstream::new();
        upstream
            .expect_limit_order_quote()
            .times(1)
            .returning(|_, _, _, _| Ok(json!({"makingAmount": "5", "price": "3200"})));

        let state = state_with(RuntimeMode::Production, upstream);
        let Json(quote) = limit_order_quote(
            State(state),
            Ok(Path(1)),
            Ok(Query(LimitOrderQuoteParams {
                maker_asset: Some("0xmaker".into()),
                taker_asset: Some("0xtaker".into()),
                taking_amount: Some("16000".into()),
                demo: None,
            })),
        )
        .await
        .unwrap();

        assert_eq!(quote.making_amount, "5");
        assert_eq!(quote.maker_asset, "0xmaker");
        assert_eq!(quote.taking_amount, "16000");
    }

    #[tokio::test]
    async fn test_validate_demo_flag_in_body() {
        let state = state_with(RuntimeMode::Production, untouchable_upstream());
        let Json(result) = validate_order(
            State(state),
            Ok(Path(1)),
            Ok(Json(json!({"demo": true, "signature": "0xsig"}))),
        )
        .await
        .unwrap();

        assert!(result.valid);
        assert_eq!(result.signature, "0xsig");
        assert!(result.checks.signature && result.checks.allowance);
    }

    #[tokio::test]
    async fn test_live_validation_normalizes_upstream_payload() {
        let mut upstream = MockUpstream::new();
        upstream.expect_validate_order().times(1).returning(|_, _| {
            Ok(json!({
                "valid": true,
                "signature": "0xsig",
                "hash": "0xhash",
                "validationDetails": {
                    "signatureValid": true,
                    "nonceValid": true,
                    "expiredValid": true,
                    "amountValid": true,
                    "allowanceValid": true
                }
            }))
        });

        let state = state_with(RuntimeMode::Production, upstream);
        let Json(result) =
            validate_order(State(state), Ok(Path(1)), Ok(Json(json!({"salt": "1"}))))
                .await
                .unwrap();

        assert!(result.valid);
        assert_eq!(result.order_hash, "0xhash");
    }
}
