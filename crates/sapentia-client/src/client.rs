//! Chat client for the `/chat` endpoint.

use sapentia_core::{ChatMessage, ChatRequest, ChatResponse};
use tracing::{debug, error, warn};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::transport::{ChatTransport, HttpTransport};

/// Reply handed to the caller whenever a request fails for any reason.
pub const FALLBACK_REPLY: &str = "Sorry, an unexpected error occurred";

/// Sends user messages to the chat backend and returns the model's reply.
///
/// Calls are independent: the client holds no per-request state, so a clone
/// can be moved into as many concurrent tasks as needed.
#[derive(Debug, Clone)]
pub struct ChatClient<T = HttpTransport> {
    transport: T,
    base_url: String,
}

impl ChatClient<HttpTransport> {
    /// Create a client for `base_url` using the default HTTP transport.
    pub fn new(base_url: &str) -> Self {
        Self::with_transport(HttpTransport::new(), base_url)
    }

    /// Create a client from configuration.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        let transport = HttpTransport::from_config(config)?;
        Ok(Self::with_transport(transport, &config.base_url))
    }
}

impl Default for ChatClient<HttpTransport> {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_BASE_URL)
    }
}

impl<T: ChatTransport> ChatClient<T> {
    /// Create a client over an arbitrary transport.
    pub fn with_transport(transport: T, base_url: &str) -> Self {
        Self {
            transport,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// API base URL, without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of the chat endpoint.
    pub fn chat_url(&self) -> String {
        format!("{}/chat", self.base_url)
    }

    /// Send a message and return the reply, or [`FALLBACK_REPLY`] on any failure.
    ///
    /// `history` is accepted but not transmitted.
    pub async fn send_message(
        &self,
        text: &str,
        model_id: Option<&str>,
        history: &[ChatMessage],
    ) -> String {
        let request = ChatRequest::new(text)
            .with_model(model_id)
            .with_history(history);
        self.send_request(&request).await
    }

    /// Send a prepared request, flattening every failure to [`FALLBACK_REPLY`].
    pub async fn send_request(&self, request: &ChatRequest<'_>) -> String {
        match self.try_send_request(request).await {
            Ok(reply) => reply,
            Err(ClientError::Status { status, body }) => {
                error!(status = %status, body = %body, "API error response");
                FALLBACK_REPLY.to_string()
            }
            Err(e) => {
                error!(error = %e, "Error sending message");
                FALLBACK_REPLY.to_string()
            }
        }
    }

    /// Like [`send_message`](Self::send_message), but reports what went wrong.
    pub async fn try_send_message(
        &self,
        text: &str,
        model_id: Option<&str>,
        history: &[ChatMessage],
    ) -> Result<String, ClientError> {
        let request = ChatRequest::new(text)
            .with_model(model_id)
            .with_history(history);
        self.try_send_request(&request).await
    }

    /// Perform one round trip for `request`.
    ///
    /// A success response without a `reply` field yields an empty string.
    pub async fn try_send_request(&self, request: &ChatRequest<'_>) -> Result<String, ClientError> {
        let url = self.chat_url();
        let body = serde_json::to_vec(request).map_err(ClientError::Encode)?;
        debug!(
            url = %url,
            model = request.selected_model_id.unwrap_or("<default>"),
            assisted = request.assisted_learning,
            "Sending chat message"
        );

        let response = self.transport.post_json(&url, body).await?;

        if !response.status.is_success() {
            return Err(ClientError::Status {
                status: response.status,
                body: response.body,
            });
        }

        let parsed: ChatResponse =
            serde_json::from_str(&response.body).map_err(ClientError::Decode)?;

        Ok(parsed.reply.unwrap_or_else(|| {
            warn!("Response did not contain a reply");
            String::new()
        }))
    }
}
