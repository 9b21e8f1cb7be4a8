//! Presentation-side entry point.
//!
//! Serves the live dashboard, re-reading the activity log on every
//! request. Shares nothing with the sniffer but the log file.

use std::borrow::Cow;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use lurebox::Config;
use lurebox::dashboard::{self, DashboardState};

async fn run() -> Result<()> {
    let config_path = std::env::var("CONFIG_PATH")
        .map(Cow::Owned)
        .unwrap_or(Cow::Borrowed("config.toml"));
    let config = Config::load(config_path.as_ref()).context("Failed to load configuration")?;

    info!("Starting honeypot portal...");
    info!("Reading activity log from {}", config.log_path.display());

    let state = DashboardState {
        log_path: config.log_path.clone(),
        filter: Arc::new(config.noise_filter()),
        window_size: config.window_size,
        refresh_secs: config.dashboard.refresh_secs,
    };

    dashboard::serve(state, config.dashboard.listen)
        .await
        .context("Dashboard server failed")?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    run().await
}
