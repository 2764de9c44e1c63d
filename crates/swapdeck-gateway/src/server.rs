//! Router assembly and HTTP server loop.

use std::any::Any as StdAny;
use std::net::SocketAddr;

use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

use crate::error::GatewayError;
use crate::handlers;
use crate::state::AppState;

/// Last-resort boundary: a panic anywhere below still produces the
/// JSON error contract instead of a dropped connection. The panic
/// payload is logged, never sent to the client.
pub(crate) fn handle_panic(payload: Box<dyn StdAny + Send + 'static>) -> Response {
    let detail = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!(%detail, "Handler panicked");

    GatewayError::Internal("Internal server error".to_string()).into_response()
}

/// Create the axum router.
///
/// CORS is wide open: this API fronts a browser dashboard and carries
/// no cookies or client credentials.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/swap/quote/{chain_id}", get(handlers::swap_quote))
        .route(
            "/limit-orders/{chain_id}/quote",
            get(handlers::limit_order_quote),
        )
        .route(
            "/limit-orders/{chain_id}/validate",
            post(handlers::validate_order),
        )
        .route(
            "/limit-orders/{chain_id}/cancel",
            delete(handlers::cancel_order),
        )
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors)
        .with_state(state)
}

/// Run the gateway HTTP server.
pub async fn run_server(
    state: AppState,
    port: u16,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(port, "Starting gateway server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
