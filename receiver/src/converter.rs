//! Event-to-log conversion
//!
//! Turns one [`SourceEvent`] into one [`LogRecord`] wrapped in a [`Logs`]
//! container ready for the log pipeline.
//!
//! # Attribute layout
//!
//! | Source field | Attribute |
//! |--------------|-----------|
//! | `category` == 0 | `com.splunk.signalfx.event_category` = null |
//! | `category` != 0 | `com.splunk.signalfx.event_category` = int |
//! | non-empty `event_type` | `com.splunk.signalfx.event_type` = string |
//! | each dimension | `<key>` = string |
//! | non-empty `properties` | `com.splunk.signalfx.event_properties` = map |
//!
//! The category attribute is always written: exporters use it to tell
//! event-derived records apart from ordinary logs.
//!
//! # Properties
//!
//! Nil properties are dropped (with a debug diagnostic naming the key).
//! Every other property lands in the nested map:
//!
//! ```text
//! String      ──► string
//! Bool        ──► bool
//! Int         ──► int
//! Double      ──► double
//! Unsupported ──► string (already rendered)
//! ```
//!
//! Dimension keys share the record's attribute namespace with the marker
//! keys. A dimension named like a marker key overwrites it depending on map
//! iteration order, so producers must avoid such names.

use sfxlog_core::attribute_keys;
use sfxlog_core::{AnyValue, AttributeMap, LogRecord, Logs, Properties, PropertyValue, SourceEvent};
use tracing::Dispatch;

/// Converts legacy events into structured log records
///
/// The converter holds no per-conversion state and never mutates its input,
/// so one instance can be shared freely across threads.
///
/// # Diagnostics
///
/// Skipped nil properties are reported at debug level. By default the
/// report goes to whatever tracing dispatcher is current when `convert`
/// runs; [`EventConverter::with_dispatch`] pins it to a specific one.
///
/// # Example
///
/// ```
/// use sfxlog_core::{attribute_keys, Category, SourceEvent};
/// use sfxlog_receiver::EventConverter;
///
/// let event = SourceEvent::new("deployment", Category::USER_DEFINED)
///     .with_dimension("host", "web-1");
///
/// let logs = EventConverter::new().convert(&event);
/// let record = logs.records().next().unwrap();
/// assert_eq!(
///     record.attributes.get(attribute_keys::EVENT_TYPE).unwrap().as_str(),
///     Some("deployment")
/// );
/// ```
#[derive(Clone, Default)]
pub struct EventConverter {
    dispatch: Option<Dispatch>,
}

impl std::fmt::Debug for EventConverter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventConverter")
            .field("pinned_dispatch", &self.dispatch.is_some())
            .finish()
    }
}

impl EventConverter {
    /// Create a converter reporting to the current default dispatcher
    pub fn new() -> Self {
        Self { dispatch: None }
    }

    /// Create a converter reporting diagnostics to `dispatch`
    pub fn with_dispatch(dispatch: Dispatch) -> Self {
        Self {
            dispatch: Some(dispatch),
        }
    }

    /// Convert one event into a log container holding exactly one record
    pub fn convert(&self, event: &SourceEvent) -> Logs {
        Logs::with_single_record(self.convert_record(event))
    }

    /// Convert many events into one container, one record per event
    ///
    /// Records keep the order of `events`. Each one is built exactly as
    /// [`EventConverter::convert`] would build it.
    pub fn convert_batch(&self, events: &[SourceEvent]) -> Logs {
        let mut records = Vec::with_capacity(events.len());
        records.extend(events.iter().map(|event| self.convert_record(event)));
        Logs::from_records(records)
    }

    /// Convert one event into a bare log record
    pub fn convert_record(&self, event: &SourceEvent) -> LogRecord {
        let has_properties = !event.properties.is_empty();

        // Upper bound: category + type + dimensions (+ properties)
        let capacity = 2 + event.dimensions.len() + usize::from(has_properties);
        let mut attributes = AttributeMap::with_capacity(capacity);

        if event.category.is_uncategorized() {
            attributes.insert_null(attribute_keys::EVENT_CATEGORY);
        } else {
            attributes.insert_int(
                attribute_keys::EVENT_CATEGORY,
                i64::from(event.category.value()),
            );
        }

        if !event.event_type.is_empty() {
            attributes.insert_string(attribute_keys::EVENT_TYPE, event.event_type.as_str());
        }

        for (key, value) in &event.dimensions {
            attributes.insert_string(key.as_str(), value.as_str());
        }

        if has_properties {
            attributes.insert(
                attribute_keys::EVENT_PROPERTIES,
                AnyValue::Map(self.properties_to_map(&event.properties)),
            );
        }

        LogRecord {
            timestamp_unix_ns: event.timestamp_unix_ns(),
            attributes,
        }
    }

    fn properties_to_map(&self, properties: &Properties) -> AttributeMap {
        let mut map = AttributeMap::with_capacity(properties.len());

        for (property, value) in properties {
            match value {
                Some(value) => map.insert(property.as_str(), property_attribute(value)),
                None => self.report_nil_property(property),
            }
        }

        map
    }

    fn report_nil_property(&self, property: &str) {
        let report = || tracing::debug!(property, "property with nil value will not be reported");

        match &self.dispatch {
            Some(dispatch) => tracing::dispatcher::with_default(dispatch, report),
            None => report(),
        }
    }
}

/// Map a property value to its attribute kind
fn property_attribute(value: &PropertyValue) -> AnyValue {
    match value {
        PropertyValue::String(v) => AnyValue::String(v.clone()),
        PropertyValue::Bool(v) => AnyValue::Bool(*v),
        PropertyValue::Int(v) => AnyValue::Int(*v),
        PropertyValue::Double(v) => AnyValue::Double(*v),
        PropertyValue::Unsupported(rendered) => AnyValue::String(rendered.clone()),
    }
}

/// Convert one event with a default [`EventConverter`]
pub fn event_to_logs(event: &SourceEvent) -> Logs {
    EventConverter::new().convert(event)
}
