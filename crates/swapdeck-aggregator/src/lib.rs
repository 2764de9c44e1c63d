//! Upstream aggregator client and response normalization.
//!
//! `AggregatorApi` is the seam between the request handlers and the
//! third-party liquidity aggregator: one async method per upstream
//! endpoint, all returning raw JSON. `normalize` reshapes that JSON
//! into the stable schema the frontend consumes, absorbing upstream
//! schema drift with explicit defaults.

pub mod client;
pub mod error;
pub mod normalize;

pub use client::{AggregatorApi, HttpAggregator};
pub use error::{UpstreamError, UpstreamResult};
