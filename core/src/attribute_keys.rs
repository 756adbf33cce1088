//! Reserved attribute key constants for event-derived log records
//!
//! Exporters downstream of the receiver look for these keys to recognize a
//! log record as a converted legacy event and to rebuild the original event
//! shape. Dimensions share the same attribute namespace, so upstream
//! producers must not use these keys as dimension names.

/// Event category (null when uncategorized, integer otherwise).
///
/// Always present on a converted record.
pub const EVENT_CATEGORY: &str = "com.splunk.signalfx.event_category";

/// Event type string, present only when the source event had one
pub const EVENT_TYPE: &str = "com.splunk.signalfx.event_type";

/// Nested map of the source event's non-nil properties
pub const EVENT_PROPERTIES: &str = "com.splunk.signalfx.event_properties";
