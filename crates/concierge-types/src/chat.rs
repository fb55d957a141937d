//! Chat session and message types.
//!
//! A session is one end-user conversation: an opaque chat id, a creation
//! timestamp, and an append-only ordered message sequence. This module also
//! defines the on-disk record shapes for the flat-file snapshots, which keep
//! the camelCase field names of the historical JSON files.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Role of a message within a conversation.
///
/// The system role is reserved for the knowledge-base prompt injected at
/// completion time; it is never stored in a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
    System,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
            MessageRole::System => write!(f, "system"),
        }
    }
}

impl FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            "system" => Ok(MessageRole::System),
            other => Err(format!("invalid message role: '{other}'")),
        }
    }
}

/// A single message within a chat session.
///
/// Messages are append-only: never reordered, never deleted. Append order,
/// conversation order, and persisted order are the same order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

/// One end-user conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSession {
    pub chat_id: String,
    /// Fixed at creation, immutable afterwards.
    pub created_at: DateTime<Utc>,
    pub messages: Vec<ChatMessage>,
}

impl ChatSession {
    /// A fresh session with an empty message sequence.
    pub fn new(chat_id: String, created_at: DateTime<Utc>) -> Self {
        Self {
            chat_id,
            created_at,
            messages: Vec::new(),
        }
    }
}

/// Record shape of the chat-id index file (`chat_ids.json`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatIdRecord {
    pub chat_id: String,
    pub timestamp: DateTime<Utc>,
}

/// Contact details embedded in a history record.
///
/// Empty strings when the visitor never submitted contact details, matching
/// the historical file shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub name: String,
    pub number: String,
}

/// Record shape of the full-history snapshot file (`chat_histories.json`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub chat_id: String,
    pub timestamp: DateTime<Utc>,
    pub messages: Vec<ChatMessage>,
    pub user_data: ContactInfo,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_role_roundtrip() {
        for role in [MessageRole::User, MessageRole::Assistant, MessageRole::System] {
            let s = role.to_string();
            let parsed: MessageRole = s.parse().unwrap();
            assert_eq!(role, parsed);
        }
    }

    #[test]
    fn test_message_role_serde() {
        let role = MessageRole::Assistant;
        let json = serde_json::to_string(&role).unwrap();
        assert_eq!(json, "\"assistant\"");
        let parsed: MessageRole = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, MessageRole::Assistant);
    }

    #[test]
    fn test_chat_id_record_uses_camel_case_keys() {
        let record = ChatIdRecord {
            chat_id: "abc123".to_string(),
            timestamp: Utc::now(),
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"chatId\""));
        assert!(!json.contains("\"chat_id\""));
    }

    #[test]
    fn test_session_record_shape() {
        let record = SessionRecord {
            chat_id: "abc123".to_string(),
            timestamp: Utc::now(),
            messages: vec![ChatMessage {
                role: MessageRole::User,
                content: "Hi".to_string(),
            }],
            user_data: ContactInfo::default(),
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"chatId\""));
        assert!(json.contains("\"userData\""));
        assert!(json.contains("\"role\":\"user\""));

        let parsed: SessionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_new_session_is_empty() {
        let session = ChatSession::new("abc123".to_string(), Utc::now());
        assert!(session.messages.is_empty());
        assert_eq!(session.chat_id, "abc123");
    }
}
