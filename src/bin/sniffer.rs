//! Capture-side entry point.
//!
//! Pulls decoded DNS/DHCP packets from the honeypot interface and appends
//! one event per routed packet to the activity log. Runs until externally
//! terminated.

use std::borrow::Cow;
use std::sync::atomic::AtomicBool;

use anyhow::{Context, Result};
use tracing::info;

use lurebox::Config;
use lurebox::capture::{Dispatcher, PnetSource, find_interface, run_capture};
use lurebox::journal::JournalWriter;

fn run() -> Result<()> {
    let config_path = std::env::var("CONFIG_PATH")
        .map(Cow::Owned)
        .unwrap_or(Cow::Borrowed("config.toml"));
    let config = Config::load(config_path.as_ref()).context("Failed to load configuration")?;

    info!("Starting honeypot sniffer...");
    info!("Logging to {}", config.log_path.display());
    info!("Capturing DNS (udp port 53) and DHCP (udp port 67 or 68) traffic");

    let interface =
        find_interface(config.interface.as_deref()).context("Failed to find network interface")?;
    info!("Sniffing on interface: {}", interface.name);

    let source = PnetSource::new(&interface).context("Failed to open capture channel")?;
    let dispatcher = Dispatcher::new(config.classifier());
    let mut writer =
        JournalWriter::create(&config.log_path).context("Failed to prepare activity log")?;

    let running = AtomicBool::new(true);
    run_capture(source, &dispatcher, &mut writer, &running);

    info!("Capture source ended, shutting down.");
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    run()
}
