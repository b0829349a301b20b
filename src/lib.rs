//! Research Chat - persistent conversations with a question-answering service
//!
//! This library holds multiple named chats, persists them locally, and runs
//! one question/answer turn at a time against a remote `/ask` endpoint.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `chat`: Chat and message model, identifiers, title derivation
//! - `storage`: Durable key-value persistence of the conversation set
//! - `repository`: In-memory conversation set synchronized with storage
//! - `client`: Question-answering client abstraction and HTTP implementation
//! - `controller`: The send-message turn protocol
//! - `commands`: Terminal front end (interactive session, one-shot, history)
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use research_chat::{ChatRepository, ChatStore, Config, ConversationController};
//! use research_chat::client::HttpAnswerClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     config.validate()?;
//!
//!     let store = Arc::new(ChatStore::open(&config.storage)?);
//!     let repository = ChatRepository::load(store);
//!     let client = HttpAnswerClient::new(config.api.clone())?;
//!     let mut controller = ConversationController::new(repository, Box::new(client));
//!
//!     let turn = controller.send_message("What is the capital of France?").await?;
//!     println!("{:?}", turn.reply());
//!     Ok(())
//! }
//! ```

pub mod chat;
pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod controller;
pub mod error;
pub mod repository;
pub mod storage;

// Re-export commonly used types
pub use chat::{Chat, Message, Role};
pub use config::Config;
pub use controller::{ConversationController, Turn, TurnOutcome};
pub use error::{ChatError, Result};
pub use repository::ChatRepository;
pub use storage::ChatStore;

#[cfg(test)]
pub mod test_utils;
