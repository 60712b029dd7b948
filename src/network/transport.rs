//! Transport seam - the HTTP GET collaborator the loader depends on

use async_trait::async_trait;
use reqwest::Url;

use crate::error::TransportError;

/// Raw result of one GET round trip
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        TransportResponse {
            status,
            body: body.into(),
        }
    }

    /// A 200 response carrying `body`
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self::new(200, body)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs `GET <url>` exactly once per call.
///
/// Implementations must not retry. Any status code is a successful round
/// trip; only failures to obtain a response are errors.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &Url) -> Result<TransportResponse, TransportError>;
}
