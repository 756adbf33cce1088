//! sfxlog-receiver - Legacy event to structured log record conversion
//!
//! Turns events from the legacy metrics system into the vendor-neutral log
//! records the telemetry pipeline forwards to its exporters.
//!
//! ```text
//! Raw bytes ──► Ingestor ──► SourceEvent ──► EventConverter ──► Logs
//! ```
//!
//! Conversion is synchronous, stateless and infallible. The only side effect
//! is a debug diagnostic for each nil property that gets dropped.

#![deny(unsafe_code)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::panic)]

pub mod config;
pub mod converter;
pub mod error;
pub mod ingest;
pub mod telemetry;

pub use config::{Config, LogFormat};
pub use converter::{event_to_logs, EventConverter};
pub use error::{IngestError, ReceiverError, Result};
pub use ingest::{IngestContext, Ingestor, JsonEventIngestor};
pub use telemetry::{init_tracing, try_init_tracing};

pub use sfxlog_core::{
    attribute_keys, AnyValue, AttributeMap, Category, LogRecord, Logs, PropertyValue, SourceEvent,
};
