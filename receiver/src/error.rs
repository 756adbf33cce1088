//! Error types for the receiver

use thiserror::Error;

pub use sfxlog_core::IngestError;

/// Result type alias for receiver operations
pub type Result<T> = std::result::Result<T, ReceiverError>;

/// Main error type for the receiver
///
/// Event conversion itself is infallible; these errors come from the
/// surfaces around it (configuration, ingestion, rendering).
#[derive(Error, Debug)]
pub enum ReceiverError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Raw input could not be read as events
    #[error("ingest error: {0}")]
    Ingest(#[from] IngestError),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
