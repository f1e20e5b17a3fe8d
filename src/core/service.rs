//! Service traits for the catalog's external collaborators

use crate::core::entity::Entity;
use crate::core::error::CatalogResult;
use crate::core::field::ItemId;
use async_trait::async_trait;
use serde_json::Value;

/// Supplies the full item collection the engine works on
///
/// Implementations are either bundled fixtures (no I/O) or a remote table
/// fetch mapped into the entity shape.
#[async_trait]
pub trait CatalogSource<T: Entity>: Send + Sync {
    /// Fetch the whole collection
    async fn list(&self) -> CatalogResult<Vec<T>>;

    /// Fetch a single entity by ID
    async fn get(&self, id: &ItemId) -> CatalogResult<Option<T>> {
        Ok(self.list().await?.into_iter().find(|item| &item.id() == id))
    }
}

/// Key-value persistence used by the cart, wishlist and order books
///
/// Backends are swappable: a local in-memory store, a remote table, or a
/// combination of both.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`
    async fn get(&self, key: &str) -> CatalogResult<Option<Value>>;

    /// Store `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: Value) -> CatalogResult<()>;

    /// Remove `key`; removing a missing key is not an error
    async fn delete(&self, key: &str) -> CatalogResult<()>;
}
