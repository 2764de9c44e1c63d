//! HTTP gateway for the quote/order proxy.
//!
//! One axum handler per operation. Each handler follows the same
//! sequence: validate input, select demo/live mode, simulate or call
//! the upstream aggregator, normalize, respond. Every exit path
//! produces a well-formed JSON body with a matching status code.

pub mod config;
pub mod error;
pub mod handlers;
pub mod server;
pub mod state;

pub use config::GatewayConfig;
pub use error::{GatewayError, GatewayResult};
pub use server::{create_router, run_server};
pub use state::AppState;
