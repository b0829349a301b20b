/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint:

- `chat`: Interactive chat session
- `ask`: One-shot question
- `history`: Conversation set management

The handlers are thin: they open the store, build the repository and
controller, and render what comes back.
*/

use crate::client::HttpAnswerClient;
use crate::config::Config;
use crate::controller::ConversationController;
use crate::error::Result;
use crate::repository::ChatRepository;
use crate::storage::{ChatStore, ChatSummary};
use std::sync::Arc;

pub mod ask;
pub mod chat;
pub mod history;
pub mod render;
pub mod special_commands;

/// Open the configured store and load the conversation set from it
///
/// A store that cannot be opened (bad path, database locked by another
/// session) is replaced by an in-memory one for this process, so the
/// session still runs; nothing is saved to disk.
pub fn open_repository(config: &Config) -> ChatRepository {
    let store = match ChatStore::open(&config.storage) {
        Ok(store) => store,
        Err(e) => {
            tracing::warn!(
                "Conversation store unavailable, history will not be saved: {}",
                e
            );
            ChatStore::in_memory(&config.storage.namespace)
        }
    };
    ChatRepository::load(Arc::new(store))
}

/// Listing rows for the repository's conversation set, in set order
pub fn chat_summaries(repository: &ChatRepository) -> Vec<ChatSummary> {
    repository.chats().iter().map(ChatSummary::from).collect()
}

/// Build a controller over the configured store and answer service
pub fn build_controller(config: &Config) -> Result<ConversationController> {
    let repository = open_repository(config);
    let client = HttpAnswerClient::new(config.api.clone())?;
    Ok(ConversationController::new(repository, Box::new(client)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageConfig;
    use crate::storage::MemoryStore;
    use tempfile::tempdir;

    fn config_with_store_path(path: String) -> Config {
        Config {
            storage: StorageConfig {
                path: Some(path),
                ..StorageConfig::default()
            },
            ..Config::default()
        }
    }

    #[test]
    fn test_open_repository_falls_back_when_store_cannot_open() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();
        let config =
            config_with_store_path(blocker.join("chats.db").to_string_lossy().into_owned());

        let mut repository = open_repository(&config);
        assert!(repository.is_empty());
        assert_eq!(repository.active_chat_id(), None);

        let chat = repository.create_chat();
        assert_eq!(repository.len(), 1);
        assert_eq!(repository.active_chat_id(), Some(chat.id.as_str()));
    }

    #[test]
    fn test_open_repository_uses_configured_store() {
        let dir = tempdir().unwrap();
        let config =
            config_with_store_path(dir.path().join("chats.db").to_string_lossy().into_owned());

        let mut repository = open_repository(&config);
        let chat = repository.create_chat();

        assert!(dir.path().join("chats.db").exists());
        assert_eq!(repository.store().load_all_chats(), vec![chat]);
    }

    #[test]
    fn test_chat_summaries_follow_in_memory_set() {
        let backend = Arc::new(MemoryStore::new());
        let store = Arc::new(ChatStore::new(backend.clone(), "research-agent"));
        let mut repository = ChatRepository::load(store);

        backend.set_unavailable(true);
        let older = repository.create_chat();
        let newer = repository.create_chat();

        let ids: Vec<String> = chat_summaries(&repository)
            .into_iter()
            .map(|summary| summary.id)
            .collect();
        assert_eq!(ids, vec![newer.id, older.id]);
    }
}
