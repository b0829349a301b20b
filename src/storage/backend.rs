//! Key-value persistence primitives
//!
//! The conversation store only needs string values under string keys.
//! `SledStore` keeps them in an embedded database on disk; `MemoryStore`
//! keeps them in process and can be switched to "unavailable" to simulate
//! disabled or full storage.

use crate::error::{ChatError, Result};
use sled::Db;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

/// Host persistence primitive: a flat string key-value space
pub trait KeyValueStore: Send + Sync {
    /// Read the value under `key`, `None` if unset
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value under `key`
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`; removing an unset key is not an error
    fn remove(&self, key: &str) -> Result<()>;
}

/// Embedded `sled` database
pub struct SledStore {
    db: Db,
}

impl SledStore {
    /// Open or create a database at `path`
    ///
    /// # Errors
    ///
    /// Returns `ChatError::Storage` if the database cannot be opened
    ///
    /// # Examples
    ///
    /// ```
    /// use research_chat::storage::{KeyValueStore, SledStore};
    ///
    /// # fn main() -> research_chat::error::Result<()> {
    /// let dir = tempfile::tempdir()?;
    /// let store = SledStore::open(dir.path().join("chats.db"))?;
    /// store.set("greeting", "hello")?;
    /// assert_eq!(store.get("greeting")?.as_deref(), Some("hello"));
    /// # Ok(())
    /// # }
    /// ```
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ChatError::Storage(format!("Failed to create data directory: {}", e))
            })?;
        }

        let db = sled::open(path)
            .map_err(|e| ChatError::Storage(format!("Failed to open database: {}", e)))?;
        tracing::debug!("Opened conversation database at {}", path.display());
        Ok(Self { db })
    }
}

impl KeyValueStore for SledStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .db
            .get(key.as_bytes())
            .map_err(|e| ChatError::Storage(format!("Get failed: {}", e)))?;

        match value {
            Some(bytes) => {
                let text = String::from_utf8(bytes.to_vec())
                    .map_err(|e| ChatError::Storage(format!("Value is not UTF-8: {}", e)))?;
                Ok(Some(text))
            }
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.db
            .insert(key.as_bytes(), value.as_bytes())
            .map_err(|e| ChatError::Storage(format!("Insert failed: {}", e)))?;

        self.db
            .flush()
            .map_err(|e| ChatError::Storage(format!("Flush failed: {}", e)))?;

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.db
            .remove(key.as_bytes())
            .map_err(|e| ChatError::Storage(format!("Remove failed: {}", e)))?;

        self.db
            .flush()
            .map_err(|e| ChatError::Storage(format!("Flush failed: {}", e)))?;

        Ok(())
    }
}

/// In-process key-value space
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent read and write fail (or succeed again)
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(ChatError::Storage("Storage is unavailable".to_string()).into());
        }
        Ok(())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.check_available()?;
        let entries = self
            .entries
            .read()
            .map_err(|_| ChatError::Storage("Memory store lock poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.check_available()?;
        let mut entries = self
            .entries
            .write()
            .map_err(|_| ChatError::Storage("Memory store lock poisoned".to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.check_available()?;
        let mut entries = self
            .entries
            .write()
            .map_err(|_| ChatError::Storage("Memory store lock poisoned".to_string()))?;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_sled_store_set_get_remove() {
        let dir = tempdir().expect("failed to create tempdir");
        let store = SledStore::open(dir.path().join("kv.db")).expect("open failed");

        assert!(store.get("missing").unwrap().is_none());
        store.set("k", "v1").unwrap();
        store.set("k", "v2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v2"));
        store.remove("k").unwrap();
        assert!(store.get("k").unwrap().is_none());
        // Removing again is fine
        store.remove("k").unwrap();
    }

    #[test]
    fn test_sled_store_creates_parent_directories() {
        let dir = tempdir().expect("failed to create tempdir");
        let path = dir.path().join("nested").join("kv.db");
        let store = SledStore::open(&path).expect("open failed");
        store.set("durable", "yes").unwrap();
        assert!(path.exists());
        assert_eq!(store.get("durable").unwrap().as_deref(), Some("yes"));
    }

    #[test]
    fn test_memory_store_unavailable_fails_reads_and_writes() {
        let store = MemoryStore::new();
        store.set("k", "v").unwrap();
        store.set_unavailable(true);
        assert!(store.get("k").is_err());
        assert!(store.set("k", "w").is_err());
        assert!(store.remove("k").is_err());
        store.set_unavailable(false);
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }
}
