//! In-memory implementation of KeyValueStore for local persistence and tests

use crate::core::error::{CatalogError, CatalogResult};
use crate::core::service::KeyValueStore;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// In-memory key-value store
///
/// Plays the role of browser local storage. Uses RwLock for thread-safe access.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    entries: Arc<RwLock<HashMap<String, Value>>>,
}

impl InMemoryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn get(&self, key: &str) -> CatalogResult<Option<Value>> {
        let entries = self
            .entries
            .read()
            .map_err(|e| CatalogError::storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> CatalogResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| CatalogError::storage(format!("Failed to acquire write lock: {}", e)))?;

        entries.insert(key.to_string(), value);

        Ok(())
    }

    async fn delete(&self, key: &str) -> CatalogResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| CatalogError::storage(format!("Failed to acquire write lock: {}", e)))?;

        entries.remove(key);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_set_and_get() {
        let store = InMemoryStore::new();
        store.set("cart", json!([{"id": 1}])).await.unwrap();

        let value = store.get("cart").await.unwrap();
        assert_eq!(value, Some(json!([{"id": 1}])));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_set_replaces() {
        let store = InMemoryStore::new();
        store.set("wishlist", json!([])).await.unwrap();
        store.set("wishlist", json!([3])).await.unwrap();

        assert_eq!(store.get("wishlist").await.unwrap(), Some(json!([3])));
    }

    #[tokio::test]
    async fn test_delete() {
        let store = InMemoryStore::new();
        store.set("orders", json!([])).await.unwrap();
        store.delete("orders").await.unwrap();
        store.delete("never-set").await.unwrap();

        assert!(store.get("orders").await.unwrap().is_none());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = InMemoryStore::new();
        let other = store.clone();
        store.set("k", json!(1)).await.unwrap();
        assert_eq!(other.get("k").await.unwrap(), Some(json!(1)));
    }
}
