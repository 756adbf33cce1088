//! Error types for reading source events

use thiserror::Error;

/// Error raised while decoding raw input into [`SourceEvent`]s
///
/// Conversion from a decoded event to a log record never fails; these errors
/// only exist at the boundary where untyped input is first read.
///
/// # Example
///
/// ```
/// use sfxlog_core::IngestError;
///
/// let err = IngestError::InvalidCategory("NOT_A_CATEGORY".to_string());
/// assert_eq!(err.to_string(), "unknown event category: NOT_A_CATEGORY");
/// ```
///
/// [`SourceEvent`]: crate::SourceEvent
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IngestError {
    /// Decode failed
    ///
    /// The input was not valid UTF-8 or not valid event JSON.
    #[error("decode failed: {0}")]
    Decode(String),

    /// Category name not recognized
    ///
    /// Categories may be sent as integers or as one of the legacy names
    /// (`USER_DEFINED`, `ALERT`, ...). Any other name is rejected.
    #[error("unknown event category: {0}")]
    InvalidCategory(String),

    /// Timestamp outside the representable range
    #[error("timestamp out of range: {0}")]
    InvalidTimestamp(i64),

    /// An event on a specific line of line-delimited input was rejected
    #[error("line {line}: {source}")]
    AtLine {
        /// 1-based line number
        line: usize,
        /// What was wrong with the event on that line
        source: Box<IngestError>,
    },
}
