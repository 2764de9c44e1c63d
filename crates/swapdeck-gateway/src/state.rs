//! Shared application state for axum handlers.

use std::sync::Arc;
use swapdeck_aggregator::AggregatorApi;
use swapdeck_core::RuntimeMode;
use swapdeck_demo::DemoSimulator;

/// Read-only per-process state injected into every handler.
///
/// The deployment mode is a value, not ambient environment state, so
/// demo gating is explicit and testable. The upstream client sits
/// behind a trait object so tests can substitute a mock.
#[derive(Clone)]
pub struct AppState {
    pub mode: RuntimeMode,
    pub upstream: Arc<dyn AggregatorApi>,
    pub demo: Arc<DemoSimulator>,
}

impl AppState {
    pub fn new(
        mode: RuntimeMode,
        upstream: Arc<dyn AggregatorApi>,
        demo: Arc<DemoSimulator>,
    ) -> Self {
        Self {
            mode,
            upstream,
            demo,
        }
    }
}
