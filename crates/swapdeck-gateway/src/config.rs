//! Gateway configuration.

use serde::{Deserialize, Serialize};
use swapdeck_core::RuntimeMode;

/// Gateway server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Deployment mode; gates implicit demo responses.
    #[serde(default)]
    pub mode: RuntimeMode,
    /// Base URL of the upstream aggregator API.
    #[serde(default = "default_base_url")]
    pub aggregator_url: String,
    /// Upstream API credential. May be absent; live requests then fail
    /// with a configuration error at first use.
    #[serde(default)]
    pub api_key: Option<String>,
}

fn default_port() -> u16 {
    3000
}

fn default_base_url() -> String {
    "https://api.1inch.dev".to_string()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            mode: RuntimeMode::default(),
            aggregator_url: default_base_url(),
            api_key: None,
        }
    }
}
