//! sfxlog-core - Data models for legacy event to log record conversion
//!
//! This crate holds the types on both sides of the conversion, kept apart
//! from the receiver so that exporters and test harnesses can build and
//! inspect them without pulling in conversion or ingestion code:
//!
//! - [`SourceEvent`] - the legacy metrics-system event (input side)
//! - [`PropertyValue`] - closed set of property value kinds
//! - [`Logs`] / [`LogRecord`] - the structured log container (output side)
//! - [`AttributeMap`] / [`AnyValue`] - typed record attributes
//! - [`attribute_keys`] - reserved marker keys on converted records
//! - [`IngestError`] - errors raised while reading events off the wire

#![deny(unsafe_code)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::panic)]
#![warn(missing_docs)]

/// Reserved attribute key constants for converted records
pub mod attribute_keys;
mod error;
/// The legacy source event model
pub mod event;
/// The structured log record model
pub mod logs;

pub use error::IngestError;
pub use event::{Category, Dimensions, Properties, PropertyValue, SourceEvent};
pub use logs::{AnyValue, AttributeMap, LogRecord, Logs, ResourceLogs, ScopeLogs};
