//! Macro Dashboard - macroeconomic indicator adapter
//!
//! Fetches GDP growth, inflation, unemployment, current account and
//! government debt for six economies from the OECD Economic Outlook or the
//! World Bank, and serves them to the dashboard as one JSON document keyed
//! by World Bank indicator ID and two-letter country code.

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod services;
pub mod sources;
pub mod state;

#[cfg(test)]
mod test_support;

use anyhow::Context;
use api::ApiServer;
use config::ServerConfig;
use state::AppState;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing/logging
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "macro_dashboard=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Load configuration, start the API server and run until Ctrl-C
pub async fn run() -> anyhow::Result<()> {
    let config = ServerConfig::load().context("Failed to load configuration")?;

    init_logging();
    tracing::info!("Starting Macro Dashboard...");

    let app_state = AppState::new(config).context("Failed to initialize data sources")?;
    let mut server = ApiServer::new(Arc::new(app_state));
    server.start().await.context("Failed to start API server")?;

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;

    tracing::info!("Shutdown signal received");
    server.stop();
    Ok(())
}
