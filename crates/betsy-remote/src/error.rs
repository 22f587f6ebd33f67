//! Error types for the remote layer.

use betsy_core::DecodeError;
use thiserror::Error;

/// Errors that can occur while talking to the sales endpoint.
#[derive(Error, Debug)]
pub enum RemoteError {
    /// No endpoint URL was configured.
    #[error("script URL not configured")]
    NotConfigured,

    /// The request is missing required fields.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Transport failure.
    #[cfg(feature = "http")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("endpoint responded with status {status}: {body}")]
    Status { status: u16, body: String },

    /// The script host answered with an HTML page instead of data.
    #[error("server is busy, please try again")]
    Busy,

    /// The endpoint refused the operation.
    #[error("rejected by endpoint: {0}")]
    Rejected(String),

    /// The list body could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
