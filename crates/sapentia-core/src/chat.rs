//! Chat message types for the conversation transcript.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::ids::MessageId;

/// Author of a message in the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// Message typed by the user.
    User,
    /// Reply produced by the model.
    Ai,
}

impl ChatRole {
    /// Wire name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Ai => "ai",
        }
    }
}

impl fmt::Display for ChatRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ChatRole {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(ChatRole::User),
            "ai" => Ok(ChatRole::Ai),
            other => Err(CoreError::UnknownRole(other.to_string())),
        }
    }
}

/// A message stored in the transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of this message.
    pub role: ChatRole,
    /// Message content.
    pub content: String,
    /// Unix timestamp (milliseconds), if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    /// Identifier assigned by the transcript store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<MessageId>,
}

/// A message about to be appended to the transcript.
///
/// This is [`ChatMessage`] without an `id`: identifiers are always assigned
/// by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    /// Role of this message.
    pub role: ChatRole,
    /// Message content.
    pub content: String,
    /// Unix timestamp (milliseconds), if known.
    pub timestamp: Option<i64>,
}

impl NewMessage {
    /// Create a message without a timestamp.
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: None,
        }
    }

    /// Create a user message stamped with the current time.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(ChatRole::User, content).stamped()
    }

    /// Create a model reply stamped with the current time.
    pub fn ai(content: impl Into<String>) -> Self {
        Self::new(ChatRole::Ai, content).stamped()
    }

    /// Builder method to set the timestamp explicitly.
    pub fn with_timestamp(mut self, timestamp_ms: i64) -> Self {
        self.timestamp = Some(timestamp_ms);
        self
    }

    fn stamped(self) -> Self {
        self.with_timestamp(chrono::Utc::now().timestamp_millis())
    }

    /// Attach an identifier, producing the stored form.
    pub(crate) fn into_message(self, id: MessageId) -> ChatMessage {
        ChatMessage {
            role: self.role,
            content: self.content,
            timestamp: self.timestamp,
            id: Some(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_names() {
        assert_eq!(serde_json::to_string(&ChatRole::User).unwrap(), "\"user\"");
        assert_eq!(serde_json::to_string(&ChatRole::Ai).unwrap(), "\"ai\"");
        assert_eq!("ai".parse::<ChatRole>().unwrap(), ChatRole::Ai);
        assert!(matches!(
            "assistant".parse::<ChatRole>(),
            Err(CoreError::UnknownRole(r)) if r == "assistant"
        ));
    }

    #[test]
    fn test_user_message_is_stamped() {
        let before = chrono::Utc::now().timestamp_millis();
        let msg = NewMessage::user("hi");
        assert_eq!(msg.role, ChatRole::User);
        assert_eq!(msg.content, "hi");
        assert!(msg.timestamp.unwrap() >= before);
    }

    #[test]
    fn test_new_message_has_no_timestamp() {
        let msg = NewMessage::new(ChatRole::Ai, "hello");
        assert_eq!(msg.timestamp, None);
        assert_eq!(msg.with_timestamp(42).timestamp, Some(42));
    }

    #[test]
    fn test_message_json_shape() {
        let msg = NewMessage::new(ChatRole::User, "hi").into_message(MessageId::new("m1"));
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"role": "user", "content": "hi", "id": "m1"})
        );

        let parsed: ChatMessage =
            serde_json::from_str(r#"{"role":"ai","content":"yo","timestamp":1700000000000}"#)
                .unwrap();
        assert_eq!(parsed.timestamp, Some(1_700_000_000_000));
        assert_eq!(parsed.id, None);
    }
}
