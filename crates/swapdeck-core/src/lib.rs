//! Core domain types for the swapdeck quote/order proxy.
//!
//! This crate provides the types shared across the proxy layers:
//! - `Quote`, `LimitOrderQuote`: priced exchange estimates
//! - `ValidationResult`, `CancellationResult`: limit-order operations
//! - `RuntimeMode`, `RequestMode`: deployment mode and per-request mode
//! - `QuoteRequest`: validated inbound swap-quote parameters

pub mod error;
pub mod mode;
pub mod types;

pub use error::{CoreError, Result};
pub use mode::{RequestMode, RuntimeMode};
pub use types::{
    CancelStatus, CancellationResult, LimitOrderQuote, ProtocolHop, Quote, QuoteRequest,
    TokenInfo, ValidationChecks, ValidationResult,
};
