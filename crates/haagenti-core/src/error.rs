//! Error types for compression operations.

use thiserror::Error;

/// Result type alias for compression operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Compression error types.
#[derive(Debug, Error)]
pub enum Error {
    /// Input does not start with the container marker.
    #[error(
        "invalid container: missing marker 0b{expected:08b} (found {})",
        describe_marker(.found)
    )]
    InvalidContainer { expected: u8, found: Option<u8> },

    /// Payload bits ran out before the end-of-stream code was reached.
    #[error("truncated payload: bits exhausted after {bits_read} bits and {decoded} decoded bytes")]
    TruncatedPayload { bits_read: usize, decoded: usize },

    /// Encoder was handed a symbol its code table has no code for.
    #[error("symbol {symbol} has no code in the code table")]
    SymbolNotInTable { symbol: u16 },

    /// Input data is corrupted or invalid.
    #[error("corrupted data: {message}")]
    CorruptedData {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Unexpected end of input stream.
    #[error("unexpected EOF after {bytes_read} bytes")]
    UnexpectedEof { bytes_read: usize },

    /// A configured size limit would be exceeded.
    #[error("limit exceeded: {requested} bytes requested, limit is {limit}")]
    LimitExceeded { limit: usize, requested: u64 },

    /// Buffer too small for output.
    #[error("buffer too small: need {required} bytes, got {provided}")]
    BufferTooSmall { required: usize, provided: usize },

    /// I/O error from underlying stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn describe_marker(found: &Option<u8>) -> String {
    match *found {
        Some(byte) => format!("0b{byte:08b}"),
        None => "no data".to_string(),
    }
}

impl Error {
    /// Create an invalid container error.
    pub fn invalid_container(expected: u8, found: Option<u8>) -> Self {
        Error::InvalidContainer { expected, found }
    }

    /// Create a corrupted data error.
    pub fn corrupted(message: impl Into<String>) -> Self {
        Error::CorruptedData {
            message: message.into(),
            source: None,
        }
    }

    /// Create a corrupted data error with offset context.
    pub fn corrupted_at(message: impl Into<String>, offset: usize) -> Self {
        Error::CorruptedData {
            message: format!("{} at offset {}", message.into(), offset),
            source: None,
        }
    }

    /// Create a truncated payload error.
    pub fn truncated(bits_read: usize, decoded: usize) -> Self {
        Error::TruncatedPayload { bits_read, decoded }
    }

    /// Create an unexpected EOF error.
    pub fn unexpected_eof(bytes_read: usize) -> Self {
        Error::UnexpectedEof { bytes_read }
    }

    /// Create a buffer too small error.
    pub fn buffer_too_small(required: usize, provided: usize) -> Self {
        Error::BufferTooSmall { required, provided }
    }

    /// Whether the input was rejected at the container gate.
    pub fn is_invalid_container(&self) -> bool {
        matches!(self, Error::InvalidContainer { .. })
    }

    /// Check if error is recoverable (can retry with different parameters).
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::BufferTooSmall { .. } | Error::LimitExceeded { .. }
        )
    }

    /// Get error category for metrics.
    pub fn category(&self) -> &'static str {
        match self {
            Error::InvalidContainer { .. } => "invalid_container",
            Error::TruncatedPayload { .. } => "truncated_payload",
            Error::SymbolNotInTable { .. } => "symbol_not_in_table",
            Error::CorruptedData { .. } => "corrupted_data",
            Error::UnexpectedEof { .. } => "unexpected_eof",
            Error::LimitExceeded { .. } => "limit_exceeded",
            Error::BufferTooSmall { .. } => "buffer_too_small",
            Error::Io(_) => "io_error",
        }
    }
}
