//! Error types for seatwatch
//!
//! A small closed set of error kinds so callers can tell a retryable
//! transport hiccup apart from a fatal configuration problem, instead of
//! collapsing everything into a printed string.
//!
//! Error variants use `#[source]` to preserve error chains for better
//! observability and debugging.

use thiserror::Error;

/// Simple error type for wrapping string messages while implementing `std::error::Error`
#[derive(Debug, Error)]
#[error("{0}")]
pub struct StringError(pub String);

impl StringError {
    /// Create a new `StringError` from a string message
    pub fn new(msg: impl Into<String>) -> Box<Self> {
        Box::new(Self(msg.into()))
    }
}

/// Main error type for seatwatch
#[derive(Debug, Error)]
pub enum SeatWatchError {
    /// HTTP transport failure or non-2xx response from the course page.
    /// Retryable: the watcher maps it to an inconclusive poll and keeps going.
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Status markers cannot disambiguate open from closed (empty or
    /// identical markers). Fatal at startup; never produced mid-loop.
    #[error("ambiguous status markers: {0}")]
    ParseAmbiguous(String),

    /// Email composition or delivery failure.
    /// Preserves the underlying error source for full error chain transparency
    #[error("delivery error: {0}")]
    Delivery(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Configuration error
    /// Preserves the underlying error source for full error chain transparency
    #[error("configuration error: {0}")]
    Config(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for seatwatch operations
pub type Result<T> = std::result::Result<T, SeatWatchError>;
