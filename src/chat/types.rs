use crate::chat::id::{generate_id, now_millis};
use serde::{Deserialize, Serialize};

/// Title given to chats before their first message
pub const DEFAULT_TITLE: &str = "New Chat";

/// Maximum number of characters kept when deriving a title from a message
pub const TITLE_MAX_CHARS: usize = 30;

const ELLIPSIS: &str = "...";

/// Author of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Lowercase wire name of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// A single message within a chat
///
/// Messages are immutable once created; a chat only ever appends them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Opaque identifier, unique within its chat
    pub id: String,
    /// Raw text of the message
    pub content: String,
    /// Who wrote it
    pub role: Role,
    /// Creation time in milliseconds since the Unix epoch
    pub timestamp: i64,
}

impl Message {
    /// Create a message with a fresh identifier stamped with the current time
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            content: content.into(),
            role,
            timestamp: now_millis(),
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// One conversation thread
///
/// Serialized with camelCase field names so the stored layout is
/// `{id, title, messages, createdAt, updatedAt}`.
///
/// # Examples
///
/// ```
/// use research_chat::chat::{Chat, Message, DEFAULT_TITLE};
///
/// let mut chat = Chat::new("abc123xyz");
/// assert_eq!(chat.title, DEFAULT_TITLE);
///
/// chat.append_user_message(Message::user("What is the capital of France?"));
/// assert_eq!(chat.title, "What is the capital of France?");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chat {
    pub id: String,
    pub title: String,
    pub messages: Vec<Message>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Chat {
    /// Create an empty chat titled "New Chat"
    pub fn new(id: impl Into<String>) -> Self {
        let now = now_millis();
        Self {
            id: id.into(),
            title: DEFAULT_TITLE.to_string(),
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a chat whose only message is `message`, titled from its content
    pub fn from_first_message(id: impl Into<String>, message: Message) -> Self {
        let now = now_millis();
        Self {
            id: id.into(),
            title: title_from_content(&message.content),
            messages: vec![message],
            created_at: now,
            updated_at: now,
        }
    }

    /// Append a message and refresh `updated_at`
    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
        self.touch();
    }

    /// Append a user message, deriving the title if this is the first message
    ///
    /// The title is only ever derived on the zero-to-one transition; later
    /// messages leave it alone.
    pub fn append_user_message(&mut self, message: Message) {
        if self.messages.is_empty() {
            self.title = title_from_content(&message.content);
        }
        self.append(message);
    }

    /// Refresh `updated_at` to now, never moving it backwards
    pub fn touch(&mut self) {
        self.updated_at = now_millis().max(self.updated_at);
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }
}

/// Truncate `text` to `max_chars` characters, appending "..." when shortened
///
/// # Examples
///
/// ```
/// use research_chat::chat::truncate;
///
/// assert_eq!(truncate("short", 10), "short");
/// assert_eq!(truncate("abcdefghij", 4), "abcd...");
/// ```
pub fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
        None => text.to_string(),
    }
}

/// Derive a chat title from the first user message
pub fn title_from_content(content: &str) -> String {
    truncate(content, TITLE_MAX_CHARS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_from_35_char_message_is_truncated() {
        let content = "abcdefghijklmnopqrstuvwxyz012345678";
        assert_eq!(content.chars().count(), 35);
        let title = title_from_content(content);
        assert_eq!(title, "abcdefghijklmnopqrstuvwxyz0123...");
    }

    #[test]
    fn test_title_from_10_char_message_is_unchanged() {
        assert_eq!(title_from_content("0123456789"), "0123456789");
    }

    #[test]
    fn test_title_from_exactly_30_chars_has_no_ellipsis() {
        let content = "a".repeat(30);
        assert_eq!(title_from_content(&content), content);
    }

    #[test]
    fn test_truncate_counts_characters_not_bytes() {
        let content = "é".repeat(31);
        let title = title_from_content(&content);
        assert_eq!(title, format!("{}...", "é".repeat(30)));
    }

    #[test]
    fn test_new_chat_defaults() {
        let chat = Chat::new("id1");
        assert_eq!(chat.title, DEFAULT_TITLE);
        assert!(chat.is_empty());
        assert_eq!(chat.created_at, chat.updated_at);
    }

    #[test]
    fn test_from_first_message_sets_title_and_message() {
        let message = Message::user("Hello there");
        let chat = Chat::from_first_message("id2", message.clone());
        assert_eq!(chat.title, "Hello there");
        assert_eq!(chat.messages, vec![message]);
    }

    #[test]
    fn test_append_user_message_titles_only_once() {
        let mut chat = Chat::new("id3");
        chat.append_user_message(Message::user("first question"));
        chat.append(Message::assistant("answer"));
        chat.append_user_message(Message::user("a different second question"));
        assert_eq!(chat.title, "first question");
        assert_eq!(chat.message_count(), 3);
    }

    #[test]
    fn test_append_refreshes_updated_at() {
        let mut chat = Chat::new("id4");
        chat.updated_at = 0;
        chat.append(Message::assistant("hi"));
        assert!(chat.updated_at > 0);
    }

    #[test]
    fn test_chat_serializes_with_camel_case_fields() {
        let mut chat = Chat::new("id5");
        chat.append(Message::user("q"));
        let json = serde_json::to_value(&chat).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert_eq!(json["messages"][0]["role"], "user");
    }

    #[test]
    fn test_chat_deserializes_stored_layout() {
        let raw = r#"{
            "id": "k3j9x0a1b",
            "title": "Capital of France",
            "messages": [
                {"id": "m1", "content": "Capital of France", "role": "user", "timestamp": 1700000000000},
                {"id": "m2", "content": "Paris", "role": "assistant", "timestamp": 1700000000500}
            ],
            "createdAt": 1700000000000,
            "updatedAt": 1700000000500
        }"#;
        let chat: Chat = serde_json::from_str(raw).unwrap();
        assert_eq!(chat.messages[1].role, Role::Assistant);
        assert_eq!(chat.updated_at, 1_700_000_000_500);
    }
}
