//! Ingestor system for the receiver
//!
//! Ingestors read raw bytes from a legacy event source and produce typed
//! [`SourceEvent`]s. This is where dynamically typed property values are
//! narrowed to [`PropertyValue`](sfxlog_core::PropertyValue), so everything
//! after ingestion works on a closed set of value kinds.
//!
//! # Architecture
//!
//! ```text
//! Raw bytes ──► Ingestor ──► Vec<SourceEvent> ──► EventConverter ──► Logs
//! ```
//!
//! # Built-in Ingestors
//!
//! - `JsonEventIngestor` - the legacy JSON event API format

mod json;

pub use json::JsonEventIngestor;

use sfxlog_core::{IngestError, SourceEvent};

/// Context for ingestion
#[derive(Debug, Clone)]
pub struct IngestContext<'a> {
    /// Source identifier (e.g., "signalfx-events", "collectd")
    pub source: &'a str,
    /// Format hint (e.g., "json", "ndjson")
    pub format: &'a str,
}

/// Ingestor trait - transforms raw bytes into source events
///
/// # Implementing an Ingestor
///
/// ```ignore
/// use sfxlog_core::{IngestError, SourceEvent};
/// use sfxlog_receiver::ingest::{IngestContext, Ingestor};
///
/// struct MyIngestor;
///
/// impl Ingestor for MyIngestor {
///     fn name(&self) -> &'static str {
///         "my-ingestor"
///     }
///
///     fn ingest(
///         &self,
///         ctx: &IngestContext,
///         data: &[u8],
///     ) -> Result<Vec<SourceEvent>, IngestError> {
///         todo!()
///     }
/// }
/// ```
pub trait Ingestor: Send + Sync {
    /// Unique name for this ingestor (for logging)
    fn name(&self) -> &'static str;

    /// Transform raw bytes into source events
    ///
    /// # Errors
    /// - `IngestError::Decode` - if data cannot be parsed
    /// - `IngestError::InvalidCategory` - unknown category name
    /// - `IngestError::InvalidTimestamp` - timestamp out of range
    /// - `IngestError::AtLine` - one of the above, on a line of line-delimited input
    fn ingest(
        &self,
        ctx: &IngestContext,
        data: &[u8],
    ) -> Result<Vec<SourceEvent>, IngestError>;
}
