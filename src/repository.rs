//! In-memory conversation set kept in step with the store
//!
//! Every mutation updates the in-memory set first and then writes the
//! affected chat (and, when it changes, the active reference) through to
//! the `ChatStore` before returning.

use crate::chat::{generate_id, Chat};
use crate::storage::ChatStore;
use std::sync::Arc;

/// Authoritative in-memory view of the conversation set
///
/// New chats go to the front; updates never move a chat.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use research_chat::repository::ChatRepository;
/// use research_chat::storage::ChatStore;
///
/// let store = Arc::new(ChatStore::in_memory("research-agent"));
/// let mut repo = ChatRepository::load(store.clone());
///
/// let first = repo.create_chat();
/// let second = repo.create_chat();
///
/// assert_eq!(repo.chats()[0].id, second.id);
/// assert_eq!(repo.chats()[1].id, first.id);
/// assert_eq!(repo.active_chat_id(), Some(second.id.as_str()));
/// assert_eq!(store.load_active_chat(), Some(second.id));
/// ```
pub struct ChatRepository {
    chats: Vec<Chat>,
    active_chat_id: Option<String>,
    store: Arc<ChatStore>,
}

impl ChatRepository {
    /// Load the conversation set and reconcile the active reference
    ///
    /// A stored active id that names a loaded chat is kept. Otherwise the
    /// first chat, if any, becomes active and is written back.
    pub fn load(store: Arc<ChatStore>) -> Self {
        let chats = store.load_all_chats();
        let stored_active = store.load_active_chat();

        let active_chat_id = match stored_active {
            Some(id) if chats.iter().any(|c| c.id == id) => Some(id),
            _ => match chats.first() {
                Some(first) => {
                    store.store_active_chat(&first.id);
                    Some(first.id.clone())
                }
                None => None,
            },
        };

        tracing::debug!(
            "Loaded {} chats, active={:?}",
            chats.len(),
            active_chat_id.as_deref()
        );

        Self {
            chats,
            active_chat_id,
            store,
        }
    }

    /// The conversation set, front first
    pub fn chats(&self) -> &[Chat] {
        &self.chats
    }

    pub fn len(&self) -> usize {
        self.chats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chats.is_empty()
    }

    /// The active reference as stored, possibly stale
    pub fn active_chat_id(&self) -> Option<&str> {
        self.active_chat_id.as_deref()
    }

    /// The active chat, or `None` if nothing is active or the reference is stale
    pub fn active_chat(&self) -> Option<&Chat> {
        self.active_chat_id.as_deref().and_then(|id| self.get(id))
    }

    pub fn get(&self, id: &str) -> Option<&Chat> {
        self.chats.iter().find(|c| c.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// The store this repository writes through to
    pub fn store(&self) -> &Arc<ChatStore> {
        &self.store
    }

    /// Allocate an id that no chat in the set uses
    pub fn fresh_chat_id(&self) -> String {
        loop {
            let id = generate_id();
            if !self.contains(&id) {
                return id;
            }
        }
    }

    /// Create an empty chat at the front of the set and make it active
    pub fn create_chat(&mut self) -> Chat {
        let chat = Chat::new(self.fresh_chat_id());
        self.chats.insert(0, chat.clone());
        self.store.persist_chat(&chat);
        self.set_active(Some(chat.id.clone()));
        tracing::info!("Created chat {}", chat.id);
        chat
    }

    /// Make `id` the active chat
    ///
    /// Any id is accepted; an empty id clears the reference.
    pub fn select_chat(&mut self, id: &str) {
        let id = (!id.is_empty()).then(|| id.to_string());
        self.set_active(id);
    }

    /// Remove a chat, moving the active reference if it pointed at it
    ///
    /// When the active chat is deleted, the chat now at the front becomes
    /// active, or nothing if the set is empty.
    pub fn delete_chat(&mut self, id: &str) {
        self.chats.retain(|c| c.id != id);
        self.store.remove_chat(id);

        if self.active_chat_id.as_deref() == Some(id) {
            let next = self.chats.first().map(|c| c.id.clone());
            self.set_active(next);
        }

        tracing::info!("Deleted chat {}", id);
    }

    /// Publish a new version of a chat
    ///
    /// A known chat is replaced in place. An unknown one is prepended and
    /// made active. The chat is persisted in either case.
    pub fn apply_update(&mut self, chat: Chat) {
        match self.chats.iter_mut().find(|c| c.id == chat.id) {
            Some(existing) => {
                *existing = chat.clone();
            }
            None => {
                self.chats.insert(0, chat.clone());
                self.set_active(Some(chat.id.clone()));
                tracing::info!("Added chat {}", chat.id);
            }
        }

        self.store.persist_chat(&chat);
    }

    fn set_active(&mut self, id: Option<String>) {
        self.store.store_active_chat(id.as_deref().unwrap_or(""));
        self.active_chat_id = id;
    }
}
