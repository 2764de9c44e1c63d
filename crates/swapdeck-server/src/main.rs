//! swapdeck quote/order proxy - entry point.

mod config;
mod error;
mod logging;

use anyhow::Result;
use clap::Parser;
use config::AppConfig;
use std::sync::Arc;
use swapdeck_aggregator::HttpAggregator;
use swapdeck_demo::DemoSimulator;
use swapdeck_gateway::{run_server, AppState};
use tracing::info;

/// DEX-aggregator quote/order proxy server
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via SWAPDECK_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_logging()?;

    info!("Starting swapdeck v{}", env!("CARGO_PKG_VERSION"));

    // Config path: CLI arg > SWAPDECK_CONFIG env var > default
    let config_path = args
        .config
        .or_else(|| std::env::var("SWAPDECK_CONFIG").ok())
        .unwrap_or_else(|| "config/default.toml".to_string());

    info!(config_path = %config_path, "Loading configuration");

    let mut config = AppConfig::load(&config_path)?;
    config.resolve_credential();

    info!(
        mode = ?config.gateway.mode,
        port = config.gateway.port,
        aggregator_url = %config.gateway.aggregator_url,
        credential_configured = config.gateway.api_key.is_some(),
        "Configuration loaded"
    );

    let upstream = HttpAggregator::new(
        config.gateway.aggregator_url.clone(),
        config.gateway.api_key.clone(),
    )?;

    let state = AppState::new(
        config.gateway.mode,
        Arc::new(upstream),
        Arc::new(DemoSimulator::new()),
    );

    run_server(state, config.gateway.port)
        .await
        .map_err(|e| anyhow::anyhow!(e))?;

    Ok(())
}
