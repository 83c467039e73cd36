use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Role type for a chat message.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// User role.
    User,

    /// Assistant role.
    Assistant,
}

/// One entry in a conversation transcript.
///
/// Messages are immutable once appended; the transcript is append-only and
/// ids reflect generation order within a controller instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Unique id within the conversation, in generation order.
    pub id: String,

    /// The message text.
    pub content: String,

    /// Who produced the message.
    pub role: ChatRole,

    /// When the message was appended.
    #[serde(with = "crate::utils::time")]
    pub timestamp: OffsetDateTime,
}

impl ChatMessage {
    /// Create a new `ChatMessage` stamped with the current time.
    pub fn new(id: impl Into<String>, content: impl Into<String>, role: ChatRole) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            role,
            timestamp: OffsetDateTime::now_utc(),
        }
    }

    /// Create a new user message.
    pub fn user(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(id, content, ChatRole::User)
    }

    /// Create a new assistant message.
    pub fn assistant(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(id, content, ChatRole::Assistant)
    }
}
