//! Wire payloads exchanged with the chat backend.

use serde::{Deserialize, Serialize};

use crate::chat::ChatMessage;

/// Body of `POST /chat`.
///
/// `history` is carried for callers that already have it at hand but is
/// never put on the wire: the backend does not accept it.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    /// Outgoing user text.
    pub message: &'a str,

    /// Backend model to route the request to.
    #[serde(rename = "selectedModelId", skip_serializing_if = "Option::is_none")]
    pub selected_model_id: Option<&'a str>,

    /// Ask the backend to wrap the message in its tutoring prompt.
    #[serde(rename = "assistedLearning", skip_serializing_if = "is_false")]
    pub assisted_learning: bool,

    /// Conversation so far.
    #[serde(skip_serializing)]
    pub history: &'a [ChatMessage],
}

impl<'a> ChatRequest<'a> {
    /// Create a request carrying only the message text.
    pub fn new(message: &'a str) -> Self {
        Self {
            message,
            selected_model_id: None,
            assisted_learning: false,
            history: &[],
        }
    }

    /// Builder method to select a model.
    pub fn with_model(mut self, model_id: Option<&'a str>) -> Self {
        self.selected_model_id = model_id;
        self
    }

    /// Builder method to toggle assisted learning.
    pub fn with_assisted_learning(mut self, enabled: bool) -> Self {
        self.assisted_learning = enabled;
        self
    }

    /// Builder method to attach history.
    pub fn with_history(mut self, history: &'a [ChatMessage]) -> Self {
        self.history = history;
        self
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Successful response body of `POST /chat`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ChatResponse {
    /// Model reply. Absent if the backend omitted it.
    #[serde(default)]
    pub reply: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::{ChatRole, NewMessage};
    use crate::ids::MessageId;
    use serde_json::json;

    #[test]
    fn test_minimal_request_body() {
        let body = serde_json::to_value(ChatRequest::new("hi")).unwrap();
        assert_eq!(body, json!({"message": "hi"}));
    }

    #[test]
    fn test_request_with_model() {
        let body = serde_json::to_value(ChatRequest::new("hi").with_model(Some("model-a"))).unwrap();
        assert_eq!(body, json!({"message": "hi", "selectedModelId": "model-a"}));
    }

    #[test]
    fn test_history_is_never_serialized() {
        let history = vec![
            NewMessage::new(ChatRole::User, "earlier").into_message(MessageId::generate()),
            NewMessage::new(ChatRole::Ai, "reply").into_message(MessageId::generate()),
        ];
        let request = ChatRequest::new("hi")
            .with_model(Some("1"))
            .with_history(&history);

        let body = serde_json::to_value(&request).unwrap();
        assert!(body.get("history").is_none());
        assert_eq!(request.history.len(), 2);
    }

    #[test]
    fn test_assisted_learning_only_sent_when_enabled() {
        let off = serde_json::to_value(ChatRequest::new("q").with_assisted_learning(false)).unwrap();
        assert!(off.get("assistedLearning").is_none());

        let on = serde_json::to_value(ChatRequest::new("q").with_assisted_learning(true)).unwrap();
        assert_eq!(on["assistedLearning"], json!(true));
    }

    #[test]
    fn test_response_reply_optional() {
        let resp: ChatResponse = serde_json::from_str(r#"{"reply":"hello"}"#).unwrap();
        assert_eq!(resp.reply.as_deref(), Some("hello"));

        let empty: ChatResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.reply, None);
    }
}
