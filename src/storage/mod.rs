//! Durable storage for the conversation set
//!
//! Two string entries live under a namespace: `<namespace>-chats` holds the
//! JSON array of chats and `<namespace>-active-chat` holds the plain id of
//! the active chat. Every operation here fails soft: reads degrade to
//! empty, writes that cannot complete are dropped and logged.

use crate::chat::Chat;
use crate::config::StorageConfig;
use crate::error::Result;
use std::sync::Arc;

pub mod backend;
pub mod types;

pub use backend::{KeyValueStore, MemoryStore, SledStore};
pub use types::ChatSummary;

/// Conversation persistence over a key-value backend
///
/// Constructed once per process and shared with the repository.
///
/// # Examples
///
/// ```
/// use research_chat::chat::Chat;
/// use research_chat::storage::ChatStore;
///
/// let store = ChatStore::in_memory("research-agent");
/// store.persist_chat(&Chat::new("abc123xyz"));
/// store.store_active_chat("abc123xyz");
///
/// assert_eq!(store.load_all_chats().len(), 1);
/// assert_eq!(store.load_active_chat().as_deref(), Some("abc123xyz"));
/// ```
pub struct ChatStore {
    backend: Arc<dyn KeyValueStore>,
    chats_key: String,
    active_key: String,
}

impl ChatStore {
    /// Wrap a backend, scoping both entries to `namespace`
    pub fn new(backend: Arc<dyn KeyValueStore>, namespace: &str) -> Self {
        Self {
            backend,
            chats_key: format!("{}-chats", namespace),
            active_key: format!("{}-active-chat", namespace),
        }
    }

    /// Open the on-disk store described by `config`
    ///
    /// # Errors
    ///
    /// Returns `ChatError::Storage` if the data directory cannot be
    /// determined or the database cannot be opened.
    pub fn open(config: &StorageConfig) -> Result<Self> {
        let path = config.resolve_path()?;
        let backend = SledStore::open(&path)?;
        tracing::debug!(
            "Conversation store ready: path={}, namespace={}",
            path.display(),
            config.namespace
        );
        Ok(Self::new(Arc::new(backend), &config.namespace))
    }

    /// Create a store over a fresh in-memory backend
    pub fn in_memory(namespace: &str) -> Self {
        Self::new(Arc::new(MemoryStore::new()), namespace)
    }

    /// Return the stored conversation set
    ///
    /// Empty if nothing is stored, the backend is unreadable, or the stored
    /// value does not decode.
    pub fn load_all_chats(&self) -> Vec<Chat> {
        match self.read_chats() {
            Ok(chats) => chats,
            Err(e) => {
                tracing::warn!("Failed to read conversation set: {}", e);
                Vec::new()
            }
        }
    }

    /// Upsert `chat` by id
    ///
    /// An existing entry is replaced in place; a new one is appended. The
    /// whole set is written back in a single value.
    pub fn persist_chat(&self, chat: &Chat) {
        if let Err(e) = self.try_persist_chat(chat) {
            tracing::warn!("Dropped write of chat {}: {}", chat.id, e);
        }
    }

    /// Remove the chat with `id`, clearing the active reference if it pointed at it
    ///
    /// Removing an absent id is a no-op.
    pub fn remove_chat(&self, id: &str) {
        if let Err(e) = self.try_remove_chat(id) {
            tracing::warn!("Dropped removal of chat {}: {}", id, e);
        }
    }

    /// Return the active chat id, `None` if unset or empty
    pub fn load_active_chat(&self) -> Option<String> {
        match self.backend.get(&self.active_key) {
            Ok(value) => value.filter(|id| !id.is_empty()),
            Err(e) => {
                tracing::warn!("Failed to read active chat: {}", e);
                None
            }
        }
    }

    /// Store the active chat id; an empty id clears it
    pub fn store_active_chat(&self, id: &str) {
        let result = if id.is_empty() {
            self.backend.remove(&self.active_key)
        } else {
            self.backend.set(&self.active_key, id)
        };

        if let Err(e) = result {
            tracing::warn!("Dropped write of active chat: {}", e);
        }
    }

    /// Summaries of every stored chat, in stored order
    pub fn list_summaries(&self) -> Vec<ChatSummary> {
        self.load_all_chats().iter().map(ChatSummary::from).collect()
    }

    /// Read the set, distinguishing backend failures from bad data
    ///
    /// Backend errors propagate so writers can refuse to overwrite data
    /// they could not read; undecodable data yields an empty set.
    fn read_chats(&self) -> Result<Vec<Chat>> {
        let Some(raw) = self.backend.get(&self.chats_key)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<Chat>>(&raw) {
            Ok(chats) => Ok(chats),
            Err(e) => {
                tracing::warn!("Stored conversation set is malformed, ignoring it: {}", e);
                Ok(Vec::new())
            }
        }
    }

    fn write_chats(&self, chats: &[Chat]) -> Result<()> {
        let json = serde_json::to_string(chats)?;
        self.backend.set(&self.chats_key, &json)
    }

    fn try_persist_chat(&self, chat: &Chat) -> Result<()> {
        let mut chats = self.read_chats()?;

        match chats.iter_mut().find(|c| c.id == chat.id) {
            Some(existing) => *existing = chat.clone(),
            None => chats.push(chat.clone()),
        }

        self.write_chats(&chats)?;
        tracing::debug!("Persisted chat {} ({} in set)", chat.id, chats.len());
        Ok(())
    }

    fn try_remove_chat(&self, id: &str) -> Result<()> {
        let mut chats = self.read_chats()?;
        let before = chats.len();
        chats.retain(|c| c.id != id);

        if chats.len() != before {
            self.write_chats(&chats)?;
            tracing::debug!("Removed chat {} ({} left)", id, chats.len());
        }

        if self.load_active_chat().as_deref() == Some(id) {
            self.store_active_chat("");
        }

        Ok(())
    }
}
