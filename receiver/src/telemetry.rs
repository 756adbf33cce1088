//! Tracing subscriber setup
//!
//! The converter only emits debug diagnostics; hosts that embed the receiver
//! usually install their own subscriber. These helpers cover standalone use.

use crate::config::{Config, LogFormat};
use crate::error::{ReceiverError, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Build the filter: `RUST_LOG` wins over the configured level
fn env_filter(config: &Config) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| config.log_level.clone().into())
}

/// Install the global tracing subscriber described by `config`
///
/// Fails if a global subscriber is already installed.
pub fn try_init_tracing(config: &Config) -> Result<()> {
    let registry = tracing_subscriber::registry().with(env_filter(config));

    let result = match config.log_format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).try_init(),
    };

    result.map_err(|e| ReceiverError::Config(format!("tracing already initialized: {e}")))
}

/// Install the global tracing subscriber, logging instead of failing if one exists
pub fn init_tracing(config: &Config) {
    if let Err(e) = try_init_tracing(config) {
        tracing::warn!(error = %e, "Keeping existing tracing subscriber");
    }
}
