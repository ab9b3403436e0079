use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ParleyError;

/// Identifier of a conversation. Opaque to the response engine.
pub type ConversationId = Uuid;

/// Identifier of a single stored message.
pub type MessageId = Uuid;

// =============================================================================
// Enums
// =============================================================================

/// Who authored a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    /// Typed by the person chatting.
    User,
    /// Produced by the response engine.
    Bot,
}

impl Sender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Bot => "bot",
        }
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sender {
    type Err = ParleyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Sender::User),
            "bot" => Ok(Sender::Bot),
            other => Err(ParleyError::Serialization(format!(
                "unknown sender: {}",
                other
            ))),
        }
    }
}

// =============================================================================
// Records
// =============================================================================

/// An immutable chat message, created when appended to a conversation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub conversation_id: ConversationId,
    pub content: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Build a new message stamped with the current time.
    pub fn new(conversation_id: ConversationId, content: impl Into<String>, sender: Sender) -> Self {
        Self {
            id: Uuid::new_v4(),
            conversation_id,
            content: content.into(),
            sender,
            timestamp: Utc::now(),
        }
    }
}

/// A named conversation that owns an ordered list of messages.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: ConversationId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Conversation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sender_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Sender::User).unwrap(), "\"user\"");
        assert_eq!(serde_json::to_string(&Sender::Bot).unwrap(), "\"bot\"");
    }

    #[test]
    fn test_sender_from_str() {
        assert_eq!("user".parse::<Sender>().unwrap(), Sender::User);
        assert_eq!("bot".parse::<Sender>().unwrap(), Sender::Bot);
        let err = "robot".parse::<Sender>().unwrap_err();
        assert!(err.to_string().contains("robot"));
    }

    #[test]
    fn test_sender_display_matches_as_str() {
        assert_eq!(Sender::User.to_string(), Sender::User.as_str());
        assert_eq!(Sender::Bot.to_string(), "bot");
    }

    #[test]
    fn test_message_new_assigns_fresh_id() {
        let conversation = Uuid::new_v4();
        let a = Message::new(conversation, "hello", Sender::User);
        let b = Message::new(conversation, "hello", Sender::User);
        assert_ne!(a.id, b.id);
        assert_eq!(a.conversation_id, conversation);
        assert_eq!(a.content, "hello");
    }

    #[test]
    fn test_message_json_shape() {
        let msg = Message::new(Uuid::nil(), "hi", Sender::Bot);
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["sender"], "bot");
        assert_eq!(value["content"], "hi");
        assert_eq!(
            value["conversation_id"],
            "00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn test_conversation_new() {
        let conv = Conversation::new("Rust questions");
        assert_eq!(conv.name, "Rust questions");
        assert_ne!(conv.id, Uuid::nil());
    }
}
