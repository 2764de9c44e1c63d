//! Deployment and per-request operating modes.

use serde::{Deserialize, Serialize};

/// Deployment mode, fixed at process start.
///
/// Injected into handlers at composition time instead of read from
/// ambient environment state, so the demo gating is explicit and
/// testable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeMode {
    /// Non-production deployment: demo data served implicitly and live
    /// failures may fall back to simulated responses.
    #[default]
    Development,
    /// Production deployment: live upstream calls unless a request
    /// opts into demo explicitly.
    Production,
}

impl RuntimeMode {
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// How a single request should be served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMode {
    /// Synthetic response, no upstream contact.
    Demo,
    /// Authenticated call to the upstream aggregator.
    Live,
}

impl RequestMode {
    /// Select the mode for one request.
    ///
    /// Demo wins if the deployment is non-production or the caller
    /// asked for it explicitly; the two paths are independent because
    /// the UI offers a "try demo" flow regardless of deployment.
    pub fn select(runtime: RuntimeMode, explicit_demo: Option<bool>) -> Self {
        if runtime.is_development() || explicit_demo == Some(true) {
            Self::Demo
        } else {
            Self::Live
        }
    }

    pub fn is_demo(&self) -> bool {
        matches!(self, Self::Demo)
    }
}
