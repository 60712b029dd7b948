//! Error types surfaced by the resource loader
//!
//! `LoadError` is the flat taxonomy the display layer renders verbatim.
//! `TransportError` is what a transport implementation reports; the loader
//! folds it into `LoadError::Network`.

use thiserror::Error;

/// Why a load attempt ended in `Failed`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The endpoint string is not an absolute http(s) URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// DNS, connect, timeout, body read or non-success status
    #[error("Network error: {0}")]
    Network(String),

    /// The response body was empty
    #[error("No data received")]
    NoData,

    /// The body did not match the expected record shape
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl LoadError {
    /// Whether re-invoking the load can plausibly succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, LoadError::Network(_) | LoadError::NoData)
    }

    /// Short label for panel titles
    pub fn kind(&self) -> &'static str {
        match self {
            LoadError::InvalidUrl(_) => "invalid url",
            LoadError::Network(_) => "network",
            LoadError::NoData => "no data",
            LoadError::Decode(_) => "decode",
        }
    }
}

/// Failure reported by a transport before a response was available
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("Request failed: {0}")]
    Other(String),
}

impl From<TransportError> for LoadError {
    fn from(err: TransportError) -> Self {
        LoadError::Network(err.to_string())
    }
}
