//! End-to-end tests: raw legacy event JSON through ingestion and conversion
//!
//! Validates the record contract as downstream exporters see it:
//! - Category marker always present (null or int)
//! - Type and properties markers only when the source had them
//! - Nil properties never reach the record

#![allow(clippy::unwrap_used, clippy::expect_used)]

use sfxlog_receiver::{
    attribute_keys, AnyValue, Category, EventConverter, IngestContext, Ingestor, JsonEventIngestor,
    Logs,
};

fn ingest_and_convert(format: &str, data: &str) -> Logs {
    let ctx = IngestContext {
        source: "signalfx-events",
        format,
    };
    let events = JsonEventIngestor::new()
        .ingest(&ctx, data.as_bytes())
        .expect("ingest should succeed");
    EventConverter::new().convert_batch(&events)
}

// ============================================================================
// Record contract
// ============================================================================

#[test]
fn every_record_carries_category_marker() {
    let ndjson = r#"{"eventType": "a"}
{"category": "ALERT", "eventType": "b"}
{"category": 0}
{"category": 42, "dimensions": {"host": "x"}}"#;

    let logs = ingest_and_convert("ndjson", ndjson);
    assert_eq!(logs.record_count(), 4);

    let categories: Vec<_> = logs
        .records()
        .map(|r| r.attributes.get(attribute_keys::EVENT_CATEGORY).cloned())
        .collect();

    assert_eq!(
        categories,
        vec![
            Some(AnyValue::Null),
            Some(AnyValue::Int(i64::from(Category::ALERT.value()))),
            Some(AnyValue::Null),
            Some(AnyValue::Int(42)),
        ]
    );
}

#[test]
fn collectd_notification_converts_fully() {
    let json = r#"{
        "category": "COLLECTD",
        "eventType": "solr.core.down",
        "dimensions": {"host": "solr-1", "plugin": "solr"},
        "properties": {
            "severity": "FAILURE",
            "core_count": 2,
            "healthy": false,
            "load": 0.75,
            "detail": {"core": "techproducts"},
            "message": null
        },
        "timestamp": 1556793030000
    }"#;

    let logs = ingest_and_convert("json", json);
    let record = logs.records().next().unwrap();

    assert_eq!(record.timestamp_unix_ns, 1_556_793_030_000_000_000);
    assert_eq!(
        record.attributes.get(attribute_keys::EVENT_CATEGORY),
        Some(&AnyValue::Int(400_000))
    );
    assert_eq!(
        record.attributes.get(attribute_keys::EVENT_TYPE),
        Some(&AnyValue::String("solr.core.down".to_string()))
    );
    assert_eq!(
        record.attributes.get("host"),
        Some(&AnyValue::String("solr-1".to_string()))
    );
    assert_eq!(
        record.attributes.get("plugin"),
        Some(&AnyValue::String("solr".to_string()))
    );

    let props = record
        .attributes
        .get(attribute_keys::EVENT_PROPERTIES)
        .and_then(AnyValue::as_map)
        .unwrap();
    assert_eq!(props.len(), 5);
    assert_eq!(props.get("severity").and_then(AnyValue::as_str), Some("FAILURE"));
    assert_eq!(props.get("core_count").and_then(AnyValue::as_int), Some(2));
    assert_eq!(props.get("healthy").and_then(AnyValue::as_bool), Some(false));
    assert_eq!(props.get("load").and_then(AnyValue::as_double), Some(0.75));
    assert_eq!(
        props.get("detail").and_then(AnyValue::as_str),
        Some(r#"{"core":"techproducts"}"#)
    );
    assert!(!props.contains_key("message"));

    // category + type + 2 dimensions + properties
    assert_eq!(record.attributes.len(), 5);
}

#[test]
fn bare_event_has_only_category() {
    let logs = ingest_and_convert("json", "{}");
    let record = logs.records().next().unwrap();

    assert_eq!(record.timestamp_unix_ns, 0);
    assert_eq!(record.attributes.len(), 1);
    assert!(record
        .attributes
        .get(attribute_keys::EVENT_CATEGORY)
        .unwrap()
        .is_null());
}

// ============================================================================
// Downstream rendering
// ============================================================================

#[test]
fn converted_logs_render_as_json() {
    let json = r#"{"category": 5, "eventType": "alert", "properties": {"p1": 3.5, "p2": null}}"#;
    let logs = ingest_and_convert("json", json);

    let rendered = serde_json::to_value(&logs).unwrap();
    let attributes = &rendered["resource_logs"][0]["scope_logs"][0]["log_records"][0]["attributes"];

    assert_eq!(attributes[attribute_keys::EVENT_CATEGORY], 5);
    assert_eq!(attributes[attribute_keys::EVENT_TYPE], "alert");
    assert_eq!(attributes[attribute_keys::EVENT_PROPERTIES]["p1"], 3.5);
    assert!(attributes[attribute_keys::EVENT_PROPERTIES]
        .as_object()
        .unwrap()
        .get("p2")
        .is_none());
}
