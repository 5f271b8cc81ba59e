//! Error types for resource fetching.

use thiserror::Error;

/// Fetch error type.
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request failed at the transport level.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The resource answered with a non-success status.
    #[error("Resource error ({status}): {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, if any.
        message: String,
    },

    /// The body was not JSON, or not the expected shape.
    #[error("Malformed response: {0}")]
    Malformed(#[from] serde_json::Error),

    /// In-process dispatch failed before a response was produced.
    #[error("Dispatch error: {0}")]
    Dispatch(String),
}

/// Result type alias for fetch operations.
pub type Result<T> = std::result::Result<T, FetchError>;
