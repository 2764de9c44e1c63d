//! Application configuration.

use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use swapdeck_gateway::GatewayConfig;

/// Environment variable carrying the upstream credential. Overrides
/// anything in the config file so the key stays out of committed TOML.
pub const API_KEY_ENV: &str = "AGGREGATOR_API_KEY";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub gateway: GatewayConfig,
}

impl AppConfig {
    /// Load from a file if it exists, otherwise fall back to defaults.
    pub fn load(config_path: &str) -> AppResult<Self> {
        if Path::new(config_path).exists() {
            Self::from_file(config_path)
        } else {
            tracing::warn!(path = %config_path, "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load from a specific file.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config: {e}")))?;
        Self::parse(&content)
    }

    fn parse(content: &str) -> AppResult<Self> {
        toml::from_str(content).map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))
    }

    /// Fill the credential from the environment when present. Absence
    /// is not an error here; live requests surface it at first use.
    pub fn resolve_credential(&mut self) {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.is_empty() {
                self.gateway.api_key = Some(key);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swapdeck_core::RuntimeMode;

    #[test]
    fn test_parse_full_config() {
        let config = AppConfig::parse(
            r#"
            [gateway]
            port = 8080
            mode = "production"
            aggregator_url = "https://example.test"
            "#,
        )
        .unwrap();

        assert_eq!(config.gateway.port, 8080);
        assert_eq!(config.gateway.mode, RuntimeMode::Production);
        assert_eq!(config.gateway.aggregator_url, "https://example.test");
        assert!(config.gateway.api_key.is_none());
    }

    #[test]
    fn test_parse_empty_config_uses_defaults() {
        let config = AppConfig::parse("").unwrap();
        assert_eq!(config.gateway.port, 3000);
        assert_eq!(config.gateway.mode, RuntimeMode::Development);
    }

    #[test]
    fn test_parse_rejects_bad_toml() {
        assert!(matches!(
            AppConfig::parse("gateway = \"nope\""),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn test_env_credential_overrides_file() {
        let mut config = AppConfig::parse("[gateway]\napi_key = \"from-file\"").unwrap();
        std::env::set_var(API_KEY_ENV, "from-env");
        config.resolve_credential();
        std::env::remove_var(API_KEY_ENV);

        assert_eq!(config.gateway.api_key.as_deref(), Some("from-env"));
    }
}
