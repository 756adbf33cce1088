//! Structured log record model
//!
//! Logs are grouped the way the pipeline's log exporters expect them:
//!
//! ```text
//! Logs
//!  └─ ResourceLogs      (one per emitting resource)
//!      └─ ScopeLogs     (one per instrumentation scope)
//!          └─ LogRecord (timestamp + typed attributes)
//! ```
//!
//! A converted event always lands in a single record of a single scope of a
//! single resource; see [`Logs::with_single_record`].
//!
//! # Attributes
//!
//! [`AttributeMap`] is an unordered key/value collection. Inserting an
//! existing key replaces the previous value (last write wins). Values are
//! [`AnyValue`]s, which may nest further maps.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::hash_map::{self, HashMap};

/// A typed attribute value
#[derive(Debug, Clone, PartialEq)]
pub enum AnyValue {
    /// Explicit null, distinct from a missing attribute
    Null,
    /// 64-bit signed integer
    Int(i64),
    /// UTF-8 string
    String(String),
    /// Boolean
    Bool(bool),
    /// 64-bit float
    Double(f64),
    /// Nested attributes
    Map(AttributeMap),
}

impl AnyValue {
    /// True for [`AnyValue::Null`]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Integer payload, if this is an `Int`
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// String payload, if this is a `String`
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    /// Boolean payload, if this is a `Bool`
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Float payload, if this is a `Double`
    pub fn as_double(&self) -> Option<f64> {
        match self {
            Self::Double(v) => Some(*v),
            _ => None,
        }
    }

    /// Nested map, if this is a `Map`
    pub fn as_map(&self) -> Option<&AttributeMap> {
        match self {
            Self::Map(v) => Some(v),
            _ => None,
        }
    }
}

impl Serialize for AnyValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Int(v) => serializer.serialize_i64(*v),
            Self::String(v) => serializer.serialize_str(v),
            Self::Bool(v) => serializer.serialize_bool(*v),
            Self::Double(v) => serializer.serialize_f64(*v),
            Self::Map(v) => v.serialize(serializer),
        }
    }
}

/// Unordered attribute collection with last-write-wins inserts
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeMap {
    entries: HashMap<String, AnyValue>,
}

impl AttributeMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty map that holds `capacity` entries without rehashing
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
        }
    }

    /// Number of entries the map can hold without reallocating
    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    /// Insert a value, replacing any previous value under `key`
    pub fn insert(&mut self, key: impl Into<String>, value: AnyValue) {
        self.entries.insert(key.into(), value);
    }

    /// Insert an explicit null
    pub fn insert_null(&mut self, key: impl Into<String>) {
        self.insert(key, AnyValue::Null);
    }

    /// Insert an integer
    pub fn insert_int(&mut self, key: impl Into<String>, value: i64) {
        self.insert(key, AnyValue::Int(value));
    }

    /// Insert a string
    pub fn insert_string(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.insert(key, AnyValue::String(value.into()));
    }

    /// Insert a boolean
    pub fn insert_bool(&mut self, key: impl Into<String>, value: bool) {
        self.insert(key, AnyValue::Bool(value));
    }

    /// Insert a double
    pub fn insert_double(&mut self, key: impl Into<String>, value: f64) {
        self.insert(key, AnyValue::Double(value));
    }

    /// Look up a value
    pub fn get(&self, key: &str) -> Option<&AnyValue> {
        self.entries.get(key)
    }

    /// True if `key` is present (including with a null value)
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the map has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in unspecified order
    pub fn iter(&self) -> hash_map::Iter<'_, String, AnyValue> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a AttributeMap {
    type Item = (&'a String, &'a AnyValue);
    type IntoIter = hash_map::Iter<'a, String, AnyValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Serialize for AttributeMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// A single structured log entry
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LogRecord {
    /// Unix timestamp in nanoseconds, 0 when unknown
    pub timestamp_unix_ns: i64,

    /// Typed attributes
    pub attributes: AttributeMap,
}

impl LogRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }
}

/// Records produced under one instrumentation scope
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScopeLogs {
    /// Log records in emission order
    pub log_records: Vec<LogRecord>,
}

/// Scopes produced by one resource
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResourceLogs {
    /// Resource-level attributes shared by every record below
    pub resource: AttributeMap,

    /// Scopes in emission order
    pub scope_logs: Vec<ScopeLogs>,
}

/// Top-level log container handed to downstream consumers
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Logs {
    /// Resources in emission order
    pub resource_logs: Vec<ResourceLogs>,
}

impl Logs {
    /// Create an empty container
    pub fn new() -> Self {
        Self::default()
    }

    /// Build one resource holding one scope holding `record`
    pub fn with_single_record(record: LogRecord) -> Self {
        Self::from_records(vec![record])
    }

    /// Build one resource holding one scope holding `records`
    pub fn from_records(records: Vec<LogRecord>) -> Self {
        Self {
            resource_logs: vec![ResourceLogs {
                resource: AttributeMap::new(),
                scope_logs: vec![ScopeLogs {
                    log_records: records,
                }],
            }],
        }
    }

    /// Total number of records across every resource and scope
    pub fn record_count(&self) -> usize {
        self.records().count()
    }

    /// Iterate every record across every resource and scope
    pub fn records(&self) -> impl Iterator<Item = &LogRecord> {
        self.resource_logs
            .iter()
            .flat_map(|rl| rl.scope_logs.iter())
            .flat_map(|sl| sl.log_records.iter())
    }
}
