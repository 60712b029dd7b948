//! HTTP client wrapper - the reqwest-backed transport

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Url;

use crate::error::TransportError;
use crate::network::transport::{Transport, TransportResponse};

/// Transport that performs real HTTP GETs with a shared reqwest client
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// `timeout` of `None` keeps reqwest's default (no overall deadline)
    pub fn new(timeout: Option<Duration>) -> Self {
        ReqwestTransport {
            client: create_client(timeout),
        }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new(None)
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &Url) -> Result<TransportResponse, TransportError> {
        let start = Instant::now();

        let resp = self
            .client
            .get(url.clone())
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = resp.status().as_u16();
        let body = resp
            .bytes()
            .await
            .map_err(|e| TransportError::Other(format!("Error reading body: {}", e)))?;

        tracing::debug!(
            url = %url,
            status,
            bytes = body.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "GET completed"
        );

        Ok(TransportResponse {
            status,
            body: body.to_vec(),
        })
    }
}

fn map_transport_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout(e.to_string())
    } else if e.is_connect() {
        TransportError::Connect(e.to_string())
    } else {
        TransportError::Other(e.to_string())
    }
}

/// Create an HTTP client, optionally with an overall request timeout
pub fn create_client(timeout: Option<Duration>) -> reqwest::Client {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().unwrap_or_else(|_| reqwest::Client::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve exactly one canned HTTP/1.1 response on a local port
    async fn serve_once(status_line: &'static str, body: &'static str) -> Url {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });

        Url::parse(&format!("http://{}/posts", addr)).unwrap()
    }

    #[tokio::test]
    async fn test_get_returns_status_and_body() {
        let url = serve_once("200 OK", r#"[{"id":1}]"#).await;
        let transport = ReqwestTransport::default();

        let resp = transport.get(&url).await.unwrap();
        assert_eq!(resp.status, 200);
        assert_eq!(resp.body, br#"[{"id":1}]"#.to_vec());
    }

    #[tokio::test]
    async fn test_get_does_not_treat_error_status_as_transport_failure() {
        let url = serve_once("404 Not Found", "{}").await;
        let transport = ReqwestTransport::new(Some(Duration::from_secs(5)));

        let resp = transport.get(&url).await.unwrap();
        assert_eq!(resp.status, 404);
        assert!(!resp.is_success());
    }

    #[tokio::test]
    async fn test_refused_connection_is_connect_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let url = Url::parse(&format!("http://{}/users", addr)).unwrap();
        let err = ReqwestTransport::default().get(&url).await.unwrap_err();
        assert!(matches!(err, TransportError::Connect(_)), "got {:?}", err);
    }
}
