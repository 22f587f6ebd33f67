//! Error types for the betsy-core library.

use thiserror::Error;

/// Main error type for the betsy library.
#[derive(Error, Debug)]
pub enum BetsyError {
    /// Sales list decoding error.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors that abort decoding of a whole sales list.
///
/// Individual malformed fields never produce an error; they fall back to
/// their defaults.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The body is not a record list at all.
    #[error("failed to parse sales data")]
    Malformed,

    /// The endpoint reported an error instead of data.
    #[error("remote error: {0}")]
    Remote(String),

    /// The JSON envelope could not be read.
    #[error("invalid list envelope: {0}")]
    Envelope(String),
}

/// Result type for the betsy library.
pub type Result<T> = std::result::Result<T, BetsyError>;
