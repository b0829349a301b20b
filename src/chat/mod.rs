//! Conversation data model
//!
//! Chats, messages, identifiers and the title derivation rule shared by
//! the repository, the controller and the terminal renderer.

pub mod id;
pub mod types;

pub use id::{generate_id, now_millis, ID_LENGTH};
pub use types::{
    title_from_content, truncate, Chat, Message, Role, DEFAULT_TITLE, TITLE_MAX_CHARS,
};
