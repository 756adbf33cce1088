//! Receiver configuration
//!
//! Loaded from environment variables:
//!
//! | Variable            | Default  | Meaning                          |
//! |---------------------|----------|----------------------------------|
//! | `SFXLOG_LOG_LEVEL`  | `info`   | tracing filter when `RUST_LOG` is unset |
//! | `SFXLOG_LOG_FORMAT` | `pretty` | `json` or `pretty`               |

use crate::error::{ReceiverError, Result};
use std::fmt;
use std::str::FromStr;

/// Environment variable holding the default log filter
pub const LOG_LEVEL_VAR: &str = "SFXLOG_LOG_LEVEL";

/// Environment variable selecting the log output format
pub const LOG_FORMAT_VAR: &str = "SFXLOG_LOG_FORMAT";

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per line
    Json,
    /// Human-readable text
    #[default]
    Pretty,
}

impl FromStr for LogFormat {
    type Err = ReceiverError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            other => Err(ReceiverError::Config(format!("unknown log format: {other}"))),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("json"),
            Self::Pretty => f.write_str("pretty"),
        }
    }
}

/// Receiver configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Default tracing filter directive (e.g. `info`, `sfxlog_receiver=debug`)
    pub log_level: String,

    /// Log output format
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl Config {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// Missing or blank variables fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let log_level = non_blank(LOG_LEVEL_VAR)
            .map(|v| v.trim().to_string())
            .unwrap_or(defaults.log_level);

        let log_format = match non_blank(LOG_FORMAT_VAR) {
            Some(v) => v.parse()?,
            None => defaults.log_format,
        };

        Ok(Self {
            log_level,
            log_format,
        })
    }
}
