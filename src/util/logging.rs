//! Log initialisation
//!
//! Logs go to stderr through `tracing-subscriber`. The filter comes from the
//! `--log_level` flag only; the environment is not consulted.

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Install the global subscriber at `level` (e.g. "info", "debug", "tracegen=trace")
pub fn init_logging(level: &str) -> Result<()> {
    let filter = build_filter(level)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
        .context("Failed to initialise logging")
}

fn build_filter(level: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(level).with_context(|| format!("Invalid log level: {}", level))
}
