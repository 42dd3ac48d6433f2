//! Tracing setup for the system error channel
//!
//! Recorder failures are emitted as `tracing` events with target `logrecorder`.
//! The binary routes them to stderr; library users install their own subscriber.

use anyhow::{Context, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or invalid
pub const DEFAULT_FILTER: &str = "logrecorder=warn";

/// Build the env filter, falling back to [`DEFAULT_FILTER`]
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into())
}

/// Install a stderr subscriber for the system error channel
pub fn init_stderr_logging() -> Result<()> {
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(stderr_layer)
        .try_init()
        .context("Failed to install tracing subscriber")
}
