//! JSON ingestor - for events in the legacy JSON event API format
//!
//! Supports:
//! - Single JSON object
//! - JSON array of objects
//! - Newline-delimited JSON (NDJSON/JSON Lines)

use super::{IngestContext, Ingestor};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use sfxlog_core::{Category, IngestError, Properties, PropertyValue, SourceEvent};
use std::collections::HashMap;

/// JSON ingestor for legacy events
///
/// # JSON Schema
///
/// ```json
/// {
///   "category": "USER_DEFINED",   // Name or integer, 0 if missing
///   "eventType": "deployment",    // Empty if missing
///   "dimensions": {"host": "a"},  // String values only
///   "properties": {"v": 1.5},     // Any JSON, null means nil
///   "timestamp": 1556793030000    // Unix milliseconds, unset if missing or 0
/// }
/// ```
pub struct JsonEventIngestor;

impl JsonEventIngestor {
    /// Create a new JSON event ingestor
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonEventIngestor {
    fn default() -> Self {
        Self::new()
    }
}

/// Category as sent on the wire: numeric code or legacy name
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonCategory {
    Code(i32),
    Name(String),
}

/// Intermediate JSON representation for flexible parsing
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonEvent {
    #[serde(default)]
    category: Option<JsonCategory>,

    #[serde(default)]
    event_type: Option<String>,

    #[serde(default)]
    dimensions: Option<HashMap<String, String>>,

    #[serde(default)]
    properties: Option<HashMap<String, serde_json::Value>>,

    /// Unix milliseconds
    #[serde(default)]
    timestamp: Option<i64>,
}

impl JsonEvent {
    fn into_event(self) -> Result<SourceEvent, IngestError> {
        let category = match self.category {
            None => Category::default(),
            Some(JsonCategory::Code(code)) => Category(code),
            Some(JsonCategory::Name(name)) => Category::from_name(&name)?,
        };

        let timestamp = match self.timestamp {
            None | Some(0) => None,
            Some(ms) => Some(timestamp_from_millis(ms)?),
        };

        let properties: Properties = self
            .properties
            .unwrap_or_default()
            .into_iter()
            .map(|(key, value)| (key, PropertyValue::from_json(value)))
            .collect();

        Ok(SourceEvent {
            timestamp,
            category,
            event_type: self.event_type.unwrap_or_default(),
            dimensions: self.dimensions.unwrap_or_default(),
            properties,
        })
    }
}

fn timestamp_from_millis(ms: i64) -> Result<DateTime<Utc>, IngestError> {
    DateTime::<Utc>::from_timestamp_millis(ms)
        .filter(|ts| ts.timestamp_nanos_opt().is_some())
        .ok_or(IngestError::InvalidTimestamp(ms))
}

impl Ingestor for JsonEventIngestor {
    fn name(&self) -> &'static str {
        "json-events"
    }

    fn ingest(
        &self,
        ctx: &IngestContext,
        data: &[u8],
    ) -> Result<Vec<SourceEvent>, IngestError> {
        let text = std::str::from_utf8(data)
            .map_err(|e| IngestError::Decode(format!("Invalid UTF-8: {}", e)))?;

        let trimmed = text.trim();

        // Detect format and parse accordingly
        let events = if ctx.format == "json-lines" || ctx.format == "ndjson" {
            self.parse_ndjson(trimmed)?
        } else if trimmed.starts_with('[') {
            self.parse_array(trimmed)?
        } else if trimmed.starts_with('{') {
            self.parse_single(trimmed)?
        } else {
            self.parse_ndjson(trimmed)?
        };

        tracing::trace!(
            source = ctx.source,
            count = events.len(),
            "Ingested events"
        );

        Ok(events)
    }
}

impl JsonEventIngestor {
    fn parse_single(&self, text: &str) -> Result<Vec<SourceEvent>, IngestError> {
        let json_event: JsonEvent = serde_json::from_str(text)
            .map_err(|e| IngestError::Decode(format!("Invalid JSON: {}", e)))?;

        Ok(vec![json_event.into_event()?])
    }

    fn parse_array(&self, text: &str) -> Result<Vec<SourceEvent>, IngestError> {
        let json_events: Vec<JsonEvent> = serde_json::from_str(text)
            .map_err(|e| IngestError::Decode(format!("Invalid JSON array: {}", e)))?;

        json_events.into_iter().map(JsonEvent::into_event).collect()
    }

    fn parse_ndjson(&self, text: &str) -> Result<Vec<SourceEvent>, IngestError> {
        let mut events = Vec::new();

        for (line_num, line) in text.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let json_event: JsonEvent = serde_json::from_str(trimmed).map_err(|e| {
                IngestError::Decode(format!("Invalid JSON on line {}: {}", line_num + 1, e))
            })?;

            let event = json_event
                .into_event()
                .map_err(|e| IngestError::AtLine {
                    line: line_num + 1,
                    source: Box::new(e),
                })?;
            events.push(event);
        }

        Ok(events)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    fn ctx(format: &'static str) -> IngestContext<'static> {
        IngestContext {
            source: "signalfx-events",
            format,
        }
    }

    #[test]
    fn test_single_event_maps_fields() {
        let ingestor = JsonEventIngestor::new();
        let json = r#"{
            "category": "USER_DEFINED",
            "eventType": "deployment",
            "dimensions": {"host": "web-1", "env": "prod"},
            "properties": {"version": "1.2.0", "replicas": 3, "canary": true, "ratio": 0.25},
            "timestamp": 1556793030000
        }"#;

        let events = ingestor.ingest(&ctx("json"), json.as_bytes()).unwrap();
        assert_eq!(events.len(), 1);

        let event = &events[0];
        assert_eq!(event.category, Category::USER_DEFINED);
        assert_eq!(event.event_type, "deployment");
        assert_eq!(event.dimensions.get("host"), Some(&"web-1".to_string()));
        assert_eq!(event.dimensions.len(), 2);
        assert_eq!(
            event.properties.get("version"),
            Some(&Some(PropertyValue::String("1.2.0".to_string())))
        );
        assert_eq!(event.properties.get("replicas"), Some(&Some(PropertyValue::Int(3))));
        assert_eq!(event.properties.get("canary"), Some(&Some(PropertyValue::Bool(true))));
        assert_eq!(event.properties.get("ratio"), Some(&Some(PropertyValue::Double(0.25))));
        assert_eq!(event.timestamp_unix_ns(), 1_556_793_030_000_000_000);
    }

    #[test]
    fn test_numeric_category() {
        let ingestor = JsonEventIngestor::new();
        let events = ingestor
            .ingest(&ctx("json"), br#"{"category": 5, "eventType": "alert"}"#)
            .unwrap();
        assert_eq!(events[0].category, Category(5));
    }

    #[test]
    fn test_missing_fields_use_zero_values() {
        let ingestor = JsonEventIngestor::new();
        let events = ingestor.ingest(&ctx("json"), b"{}").unwrap();

        assert_eq!(events[0], SourceEvent::default());
    }

    #[test]
    fn test_null_fields_use_zero_values() {
        let ingestor = JsonEventIngestor::new();
        let json = r#"{
            "category": null,
            "eventType": null,
            "dimensions": null,
            "properties": null,
            "timestamp": null
        }"#;

        let events = ingestor.ingest(&ctx("json"), json.as_bytes()).unwrap();
        assert_eq!(events[0], SourceEvent::default());
    }

    #[test]
    fn test_zero_timestamp_is_unset() {
        let ingestor = JsonEventIngestor::new();
        let events = ingestor
            .ingest(&ctx("json"), br#"{"timestamp": 0}"#)
            .unwrap();
        assert!(events[0].timestamp.is_none());
    }

    #[test]
    fn test_null_property_is_nil() {
        let ingestor = JsonEventIngestor::new();
        let json = r#"{"properties": {"p1": 3.5, "p2": null}}"#;

        let events = ingestor.ingest(&ctx("json"), json.as_bytes()).unwrap();
        let props = &events[0].properties;
        assert_eq!(props.len(), 2);
        assert_eq!(props.get("p1"), Some(&Some(PropertyValue::Double(3.5))));
        assert_eq!(props.get("p2"), Some(&None));
    }

    #[test]
    fn test_nested_property_is_rendered() {
        let ingestor = JsonEventIngestor::new();
        let json = r#"{"properties": {"detail": {"core": 3}}}"#;

        let events = ingestor.ingest(&ctx("json"), json.as_bytes()).unwrap();
        assert_eq!(
            events[0].properties.get("detail"),
            Some(&Some(PropertyValue::Unsupported(r#"{"core":3}"#.to_string())))
        );
    }

    #[test]
    fn test_array_of_events() {
        let ingestor = JsonEventIngestor::new();
        let json = r#"[
            {"category": "ALERT", "eventType": "cpu.high"},
            {"category": "AUDIT", "eventType": "chart.updated"}
        ]"#;

        let events = ingestor.ingest(&ctx("json"), json.as_bytes()).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].category, Category::ALERT);
        assert_eq!(events[1].event_type, "chart.updated");
    }

    #[test]
    fn test_newline_delimited() {
        let ingestor = JsonEventIngestor::new();
        let ndjson = r#"{"eventType": "a"}

{"eventType": "b"}
{"eventType": "c"}"#;

        let events = ingestor.ingest(&ctx("ndjson"), ndjson.as_bytes()).unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(events[2].event_type, "c");
    }

    #[test]
    fn test_invalid_json() {
        let ingestor = JsonEventIngestor::new();
        let result = ingestor.ingest(&ctx("json"), b"not valid json");
        assert!(matches!(result, Err(IngestError::Decode(_))));
    }

    #[test]
    fn test_ndjson_error_names_line() {
        let ingestor = JsonEventIngestor::new();
        let ndjson = "{\"eventType\": \"a\"}\n{broken";

        match ingestor.ingest(&ctx("ndjson"), ndjson.as_bytes()) {
            Err(IngestError::Decode(msg)) => assert!(msg.contains("line 2"), "{msg}"),
            other => panic!("Expected Decode error, got: {other:?}"),
        }
    }

    #[test]
    fn test_ndjson_unknown_category_names_line() {
        let ingestor = JsonEventIngestor::new();
        let ndjson = "{\"category\": \"ALERT\"}\n{\"category\": \"SOMETIMES\"}";

        let err = ingestor.ingest(&ctx("ndjson"), ndjson.as_bytes()).unwrap_err();
        assert_eq!(
            err,
            IngestError::AtLine {
                line: 2,
                source: Box::new(IngestError::InvalidCategory("SOMETIMES".to_string())),
            }
        );
        assert_eq!(err.to_string(), "line 2: unknown event category: SOMETIMES");
    }

    #[test]
    fn test_ndjson_bad_timestamp_names_line() {
        let ingestor = JsonEventIngestor::new();
        let ndjson = "{\"eventType\": \"a\"}\n\n{\"timestamp\": 9223372036854775807}";

        match ingestor.ingest(&ctx("ndjson"), ndjson.as_bytes()) {
            Err(IngestError::AtLine { line, source }) => {
                assert_eq!(line, 3);
                assert_eq!(*source, IngestError::InvalidTimestamp(i64::MAX));
            }
            other => panic!("Expected AtLine error, got: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_utf8() {
        let ingestor = JsonEventIngestor::new();
        let result = ingestor.ingest(&ctx("json"), &[0xFF, 0xFE]);
        assert!(matches!(result, Err(IngestError::Decode(_))));
    }

    #[test]
    fn test_unknown_category_name() {
        let ingestor = JsonEventIngestor::new();
        let result = ingestor.ingest(&ctx("json"), br#"{"category": "SOMETIMES"}"#);
        assert_eq!(
            result.unwrap_err(),
            IngestError::InvalidCategory("SOMETIMES".to_string())
        );
    }

    #[test]
    fn test_out_of_range_timestamp() {
        let ingestor = JsonEventIngestor::new();
        let result = ingestor.ingest(&ctx("json"), br#"{"timestamp": 9223372036854775807}"#);
        assert_eq!(result.unwrap_err(), IngestError::InvalidTimestamp(i64::MAX));
    }

    #[test]
    fn test_non_string_dimension_rejected() {
        let ingestor = JsonEventIngestor::new();
        let result = ingestor.ingest(&ctx("json"), br#"{"dimensions": {"port": 8080}}"#);
        assert!(matches!(result, Err(IngestError::Decode(_))));
    }
}
