//! Source event model
//!
//! A [`SourceEvent`] is the legacy metrics-system event: a category, an
//! optional type, string dimensions and loosely typed properties.
//!
//! # Property typing
//!
//! The legacy wire formats carry property values in a single dynamically
//! typed slot. They are narrowed to [`PropertyValue`] when the event is
//! first read, so the converter only ever matches on a closed set of tags:
//!
//! ```text
//! i8 / i16 / i32 / i64 / isize ──► Int(i64)
//! f32 / f64                    ──► Double(f64)
//! &str / String                ──► String
//! bool                         ──► Bool
//! anything else                ──► Unsupported(rendered)
//! ```
//!
//! A nil property is `None` in [`Properties`], which is distinct from a
//! present empty string.

use crate::error::IngestError;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::fmt;

/// Dimension storage: string tags describing where the event came from
pub type Dimensions = HashMap<String, String>;

/// Property storage: `None` marks a nil value
pub type Properties = HashMap<String, Option<PropertyValue>>;

/// Event category
///
/// Zero is a valid value meaning "uncategorized". The well-known constants
/// match the categories of the legacy event API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Category(pub i32);

impl Category {
    /// No category was set
    pub const UNCATEGORIZED: Category = Category(0);
    /// Created by a user through the event API
    pub const USER_DEFINED: Category = Category(1_000_000);
    /// Raised by a detector
    pub const ALERT: Category = Category(100_000);
    /// Change to the organization, a chart or a detector
    pub const AUDIT: Category = Category(200_000);
    /// Background job event
    pub const JOB: Category = Category(300_000);
    /// Forwarded from a collectd notification
    pub const COLLECTD: Category = Category(400_000);
    /// Emitted by service discovery
    pub const SERVICE_DISCOVERY: Category = Category(500_000);
    /// Unexpected error in the system
    pub const EXCEPTION: Category = Category(700_000);
    /// Emitted by the collection agent itself
    pub const AGENT: Category = Category(2_000_000);

    /// Look up a category by its legacy upper-snake name
    ///
    /// ```
    /// use sfxlog_core::Category;
    ///
    /// assert_eq!(Category::from_name("ALERT").unwrap(), Category::ALERT);
    /// assert!(Category::from_name("alarm").is_err());
    /// ```
    pub fn from_name(name: &str) -> Result<Self, IngestError> {
        let category = match name {
            "USER_DEFINED" => Self::USER_DEFINED,
            "ALERT" => Self::ALERT,
            "AUDIT" => Self::AUDIT,
            "JOB" => Self::JOB,
            "COLLECTD" => Self::COLLECTD,
            "SERVICE_DISCOVERY" => Self::SERVICE_DISCOVERY,
            "EXCEPTION" => Self::EXCEPTION,
            "AGENT" => Self::AGENT,
            other => return Err(IngestError::InvalidCategory(other.to_string())),
        };
        Ok(category)
    }

    /// True for the zero category
    #[inline]
    pub fn is_uncategorized(&self) -> bool {
        self.0 == 0
    }

    /// Raw integer value
    #[inline]
    pub fn value(&self) -> i32 {
        self.0
    }
}

/// A property value narrowed to the types log attributes can carry
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// UTF-8 string
    String(String),
    /// Boolean
    Bool(bool),
    /// Any signed integer, widened to 64 bits
    Int(i64),
    /// Any float, widened to 64 bits
    Double(f64),
    /// A value of any other type, kept in its default string rendering
    Unsupported(String),
}

impl PropertyValue {
    /// Wrap a value of a type outside the supported set
    ///
    /// The value is rendered with its `Display` implementation.
    pub fn unsupported(value: impl fmt::Display) -> Self {
        Self::Unsupported(value.to_string())
    }

    /// Narrow a JSON value read off the wire
    ///
    /// Returns `None` for JSON `null`, which is a nil property.
    pub fn from_json(value: serde_json::Value) -> Option<Self> {
        use serde_json::Value;

        let narrowed = match value {
            Value::Null => return None,
            Value::String(s) => Self::String(s),
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Int(i)
                } else if n.is_u64() {
                    // Above i64::MAX: unsigned, so not a supported integer
                    Self::Unsupported(n.to_string())
                } else {
                    n.as_f64()
                        .map(Self::Double)
                        .unwrap_or_else(|| Self::Unsupported(n.to_string()))
                }
            }
            nested @ (Value::Array(_) | Value::Object(_)) => Self::Unsupported(nested.to_string()),
        };
        Some(narrowed)
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

macro_rules! widen_signed {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for PropertyValue {
                fn from(value: $ty) -> Self {
                    Self::Int(value as i64)
                }
            }
        )*
    };
}

macro_rules! render_unsigned {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for PropertyValue {
                fn from(value: $ty) -> Self {
                    Self::Unsupported(value.to_string())
                }
            }
        )*
    };
}

widen_signed!(i8, i16, i32, i64, isize);
render_unsigned!(u8, u16, u32, u64, usize);

impl From<f32> for PropertyValue {
    fn from(value: f32) -> Self {
        Self::Double(f64::from(value))
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

/// A legacy metrics-system event
///
/// # Example
///
/// ```
/// use sfxlog_core::{Category, SourceEvent};
///
/// let event = SourceEvent::new("deployment", Category::USER_DEFINED)
///     .with_dimension("host", "web-1")
///     .with_property("version", "1.4.2")
///     .with_nil_property("rollback");
///
/// assert_eq!(event.dimensions.len(), 1);
/// assert_eq!(event.properties.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceEvent {
    /// When the event happened; `None` is the unset zero value
    pub timestamp: Option<DateTime<Utc>>,

    /// Event category, zero when uncategorized
    pub category: Category,

    /// Event type; empty means absent
    pub event_type: String,

    /// String tags
    pub dimensions: Dimensions,

    /// Typed metadata, `None` for nil values
    pub properties: Properties,
}

impl SourceEvent {
    /// Create an event with no timestamp, dimensions or properties
    pub fn new(event_type: impl Into<String>, category: Category) -> Self {
        Self {
            timestamp: None,
            category,
            event_type: event_type.into(),
            dimensions: HashMap::new(),
            properties: HashMap::new(),
        }
    }

    /// Set the event timestamp
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Add a dimension
    pub fn with_dimension(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.dimensions.insert(key.into(), value.into());
        self
    }

    /// Add a property
    pub fn with_property(
        mut self,
        key: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> Self {
        self.properties.insert(key.into(), Some(value.into()));
        self
    }

    /// Add a property stored with a nil value
    pub fn with_nil_property(mut self, key: impl Into<String>) -> Self {
        self.properties.insert(key.into(), None);
        self
    }

    /// Timestamp as nanoseconds since the Unix epoch
    ///
    /// The unset zero value maps to 0, as does a timestamp outside the range
    /// representable in 64-bit nanoseconds.
    pub fn timestamp_unix_ns(&self) -> i64 {
        self.timestamp
            .and_then(|ts| ts.timestamp_nanos_opt())
            .unwrap_or(0)
    }
}
