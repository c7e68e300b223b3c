//! Error types for the chat client.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur while talking to the chat backend.
///
/// These never reach [`ChatClient::send_message`](crate::ChatClient::send_message)
/// callers, which only see the fallback reply. They are kept for logging and
/// for callers of `try_send_message`.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request could not be delivered (custom transports).
    #[error("connection failed: {0}")]
    Connection(String),

    /// HTTP transport error (connect, DNS, timeout, body read).
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Backend answered with a non-success status.
    #[error("API error: {status}")]
    Status {
        /// Response status, including its reason phrase when displayed.
        status: StatusCode,
        /// Raw response body.
        body: String,
    },

    /// Request body could not be serialized.
    #[error("failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),

    /// Response body was not the expected JSON.
    #[error("failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),
}
