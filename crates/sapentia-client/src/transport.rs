//! HTTP transport for the chat endpoint.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::ClientError;

/// Raw response from the backend: status plus body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status.
    pub status: StatusCode,
    /// Body as text, whatever its content type.
    pub body: String,
}

/// Delivers a JSON body to a URL and hands back the raw response.
///
/// Implementors own the network details; [`ChatClient`](crate::ChatClient)
/// owns the payload format and the status handling.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// POST `body` (already serialized JSON) to `url`.
    async fn post_json(&self, url: &str, body: Vec<u8>) -> Result<TransportResponse, ClientError>;
}

/// reqwest-backed transport.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    inner: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport with reqwest defaults (no timeout).
    pub fn new() -> Self {
        Self {
            inner: reqwest::Client::new(),
        }
    }

    /// Create a transport honoring the configured timeout.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            inner: builder.build()?,
        })
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn post_json(&self, url: &str, body: Vec<u8>) -> Result<TransportResponse, ClientError> {
        debug!(url = %url, bytes = body.len(), "POST request");

        let response = self
            .inner
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!(url = %url, status = %status, "Response received");

        Ok(TransportResponse { status, body })
    }
}
