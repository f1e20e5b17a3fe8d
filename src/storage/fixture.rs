//! Catalog source backed by a bundled collection

use crate::core::entity::Entity;
use crate::core::error::CatalogResult;
use crate::core::field::ItemId;
use crate::core::service::CatalogSource;
use async_trait::async_trait;
use std::sync::Arc;

/// Static, in-memory catalog source
///
/// No I/O: `list` hands out a copy of the bundled items in insertion order.
#[derive(Clone)]
pub struct FixtureSource<T> {
    items: Arc<Vec<T>>,
}

impl<T: Entity> FixtureSource<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items: Arc::new(items),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[async_trait]
impl<T: Entity> CatalogSource<T> for FixtureSource<T> {
    async fn list(&self) -> CatalogResult<Vec<T>> {
        Ok(self.items.as_ref().clone())
    }

    async fn get(&self, id: &ItemId) -> CatalogResult<Option<T>> {
        Ok(self.items.iter().find(|item| &item.id() == id).cloned())
    }
}
