//! Wishlist

use super::{WISHLIST_KEY, load_book, save_book};
use crate::core::error::CatalogResult;
use crate::core::field::ItemId;
use crate::core::service::KeyValueStore;
use crate::entities::Product;
use serde::{Deserialize, Serialize};

/// Product snapshot kept in the wishlist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishItem {
    pub id: ItemId,
    pub name: String,
    pub image: String,
    pub artisan: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    pub category: String,
}

impl From<&Product> for WishItem {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            image: product.cover_image().to_string(),
            artisan: product.artisan.name.clone(),
            price: product.price,
            original_price: product.original_price,
            category: product.category.clone(),
        }
    }
}

/// Saved products, most recently added first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Wishlist {
    items: Vec<WishItem>,
}

impl Wishlist {
    pub async fn load(store: &dyn KeyValueStore) -> CatalogResult<Self> {
        load_book(store, WISHLIST_KEY).await
    }

    pub async fn save(&self, store: &dyn KeyValueStore) -> CatalogResult<()> {
        save_book(store, WISHLIST_KEY, self).await
    }

    pub fn items(&self) -> &[WishItem] {
        &self.items
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn is_wished(&self, id: &ItemId) -> bool {
        self.items.iter().any(|item| &item.id == id)
    }

    /// Add the item at the front, or remove it if already present.
    ///
    /// Returns whether the item is wished afterwards.
    pub fn toggle(&mut self, item: WishItem) -> bool {
        if self.is_wished(&item.id) {
            self.remove(&item.id);
            false
        } else {
            self.items.insert(0, item);
            true
        }
    }

    pub fn remove(&mut self, id: &ItemId) {
        self.items.retain(|item| &item.id != id);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStore;

    fn wish(id: i64) -> WishItem {
        WishItem {
            id: ItemId::Int(id),
            name: format!("Item {}", id),
            image: "/img.png".into(),
            artisan: "Paul".into(),
            price: 1000.0,
            original_price: None,
            category: "Metalwork".into(),
        }
    }

    #[test]
    fn test_toggle_prepends_and_removes() {
        let mut wishlist = Wishlist::default();
        assert!(wishlist.toggle(wish(1)));
        assert!(wishlist.toggle(wish(2)));
        assert_eq!(wishlist.items()[0].id, ItemId::Int(2));
        assert_eq!(wishlist.count(), 2);

        assert!(!wishlist.toggle(wish(1)));
        assert!(!wishlist.is_wished(&ItemId::Int(1)));
        assert_eq!(wishlist.count(), 1);
    }

    #[tokio::test]
    async fn test_persistence_round_trip() {
        let store = InMemoryStore::new();
        let mut wishlist = Wishlist::load(&store).await.unwrap();
        wishlist.toggle(wish(5));
        wishlist.save(&store).await.unwrap();

        let reloaded = Wishlist::load(&store).await.unwrap();
        assert!(reloaded.is_wished(&ItemId::Int(5)));

        let mut cleared = reloaded.clone();
        cleared.clear();
        assert_eq!(cleared.count(), 0);
    }
}
