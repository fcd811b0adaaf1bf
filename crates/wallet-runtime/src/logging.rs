//! # Logging Setup
//!
//! Installs the global `tracing` subscriber: an `EnvFilter` built from the
//! configured directive, with pretty or JSON output.

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::RuntimeConfig;

/// Build the filter for `directive`.
pub fn env_filter(directive: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directive).with_context(|| format!("Invalid log filter {directive:?}"))
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(config: &RuntimeConfig) -> Result<()> {
    let filter = env_filter(&config.log_level)?;

    if config.json_logs {
        // JSON output for containers/production
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .with_current_span(true);

        tracing_subscriber::registry()
            .with(filter)
            .with(json_layer)
            .try_init()
            .context("Failed to install JSON log subscriber")?;
    } else {
        // Pretty output for development
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .try_init()
            .context("Failed to install log subscriber")?;
    }

    Ok(())
}
