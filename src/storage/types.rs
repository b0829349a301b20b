use crate::chat::Chat;
use serde::{Deserialize, Serialize};

/// Lightweight projection of a stored chat for listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSummary {
    /// Unique identifier for the chat
    pub id: String,
    /// Derived or default title
    pub title: String,
    /// Number of messages in the chat
    pub message_count: usize,
    /// When the chat was created (ms since epoch)
    pub created_at: i64,
    /// When the chat was last updated (ms since epoch)
    pub updated_at: i64,
}

impl From<&Chat> for ChatSummary {
    fn from(chat: &Chat) -> Self {
        Self {
            id: chat.id.clone(),
            title: chat.title.clone(),
            message_count: chat.message_count(),
            created_at: chat.created_at,
            updated_at: chat.updated_at,
        }
    }
}
