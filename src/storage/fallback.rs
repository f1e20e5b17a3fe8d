//! Optimistic local-then-remote persistence

use crate::core::error::CatalogResult;
use crate::core::service::KeyValueStore;
use async_trait::async_trait;
use serde_json::Value;

/// Store that writes locally first and then syncs to a remote backend
///
/// The local store is authoritative: a failed remote write is logged and the
/// local value kept. Reads prefer the local value and fall back to the remote
/// one, caching it locally when found.
pub struct FallbackStore<L, R> {
    local: L,
    remote: R,
}

impl<L: KeyValueStore, R: KeyValueStore> FallbackStore<L, R> {
    pub fn new(local: L, remote: R) -> Self {
        Self { local, remote }
    }

    pub fn local(&self) -> &L {
        &self.local
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }
}

#[async_trait]
impl<L: KeyValueStore, R: KeyValueStore> KeyValueStore for FallbackStore<L, R> {
    async fn get(&self, key: &str) -> CatalogResult<Option<Value>> {
        if let Some(value) = self.local.get(key).await? {
            return Ok(Some(value));
        }

        match self.remote.get(key).await {
            Ok(Some(value)) => {
                self.local.set(key, value.clone()).await?;
                Ok(Some(value))
            }
            Ok(None) => Ok(None),
            Err(e) => {
                tracing::warn!(key, error = %e, "remote read failed, using local state");
                Ok(None)
            }
        }
    }

    async fn set(&self, key: &str, value: Value) -> CatalogResult<()> {
        self.local.set(key, value.clone()).await?;
        if let Err(e) = self.remote.set(key, value).await {
            tracing::warn!(key, error = %e, "remote sync failed, keeping local value");
        }
        Ok(())
    }

    async fn delete(&self, key: &str) -> CatalogResult<()> {
        self.local.delete(key).await?;
        if let Err(e) = self.remote.delete(key).await {
            tracing::warn!(key, error = %e, "remote delete failed");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::CatalogError;
    use crate::storage::InMemoryStore;
    use serde_json::json;

    /// Remote backend that is never reachable
    struct Offline;

    #[async_trait]
    impl KeyValueStore for Offline {
        async fn get(&self, _key: &str) -> CatalogResult<Option<Value>> {
            Err(CatalogError::storage("offline"))
        }

        async fn set(&self, _key: &str, _value: Value) -> CatalogResult<()> {
            Err(CatalogError::storage("offline"))
        }

        async fn delete(&self, _key: &str) -> CatalogResult<()> {
            Err(CatalogError::storage("offline"))
        }
    }

    #[tokio::test]
    async fn test_write_syncs_to_remote() {
        let store = FallbackStore::new(InMemoryStore::new(), InMemoryStore::new());
        store.set("cart", json!([1])).await.unwrap();

        assert_eq!(store.local().get("cart").await.unwrap(), Some(json!([1])));
        assert_eq!(store.remote().get("cart").await.unwrap(), Some(json!([1])));
    }

    #[tokio::test]
    async fn test_remote_failure_keeps_local_value() {
        let store = FallbackStore::new(InMemoryStore::new(), Offline);
        store.set("wishlist", json!([2])).await.unwrap();

        assert_eq!(store.get("wishlist").await.unwrap(), Some(json!([2])));
        assert!(store.get("missing").await.unwrap().is_none());
        store.delete("wishlist").await.unwrap();
        assert!(store.get("wishlist").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_remote_value_is_cached_locally() {
        let remote = InMemoryStore::new();
        remote.set("orders", json!(["o-1"])).await.unwrap();
        let store = FallbackStore::new(InMemoryStore::new(), remote);

        assert_eq!(store.get("orders").await.unwrap(), Some(json!(["o-1"])));
        assert_eq!(store.local().get("orders").await.unwrap(), Some(json!(["o-1"])));
    }
}
