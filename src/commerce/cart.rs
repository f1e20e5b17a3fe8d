//! Shopping cart

use super::{CART_KEY, load_book, save_book};
use crate::core::error::CatalogResult;
use crate::core::field::ItemId;
use crate::core::service::KeyValueStore;
use crate::entities::Product;
use serde::{Deserialize, Serialize};

/// Quantity cap for items without a known stock
pub const UNLIMITED_STOCK: u32 = 9999;

/// Product snapshot put in the cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: ItemId,
    pub name: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    pub image: String,
    pub artisan: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock_quantity: Option<u32>,
}

impl From<&Product> for CartItem {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            original_price: product.original_price,
            image: product.cover_image().to_string(),
            artisan: product.artisan.name.clone(),
            stock_quantity: product.stock_quantity,
        }
    }
}

impl CartItem {
    fn clamp_quantity(&self, quantity: u32) -> u32 {
        quantity.clamp(1, self.stock_quantity.unwrap_or(UNLIMITED_STOCK).max(1))
    }
}

/// A cart entry with its quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(flatten)]
    pub item: CartItem,
    pub quantity: u32,
}

impl CartLine {
    pub fn line_total(&self) -> f64 {
        self.item.price * f64::from(self.quantity)
    }
}

/// The shopping cart
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub async fn load(store: &dyn KeyValueStore) -> CatalogResult<Self> {
        load_book(store, CART_KEY).await
    }

    pub async fn save(&self, store: &dyn KeyValueStore) -> CatalogResult<()> {
        save_book(store, CART_KEY, self).await
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Add `quantity` of an item, merging with an existing line.
    ///
    /// The resulting quantity is clamped to `[1, stock]`.
    pub fn add(&mut self, item: CartItem, quantity: u32) {
        match self.lines.iter_mut().find(|line| line.item.id == item.id) {
            Some(line) => {
                line.quantity = item.clamp_quantity(line.quantity.saturating_add(quantity));
                line.item = item;
            }
            None => {
                let quantity = item.clamp_quantity(quantity);
                self.lines.push(CartLine { item, quantity });
            }
        }
    }

    pub fn remove(&mut self, id: &ItemId) {
        self.lines.retain(|line| &line.item.id != id);
    }

    /// Set the quantity of an existing line, clamped to `[1, stock]`
    pub fn update_quantity(&mut self, id: &ItemId, quantity: u32) {
        if let Some(line) = self.lines.iter_mut().find(|line| &line.item.id == id) {
            line.quantity = line.item.clamp_quantity(quantity);
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn total_items(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    pub fn subtotal(&self) -> f64 {
        self.lines.iter().map(CartLine::line_total).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStore;

    fn item(id: i64, price: f64, stock: Option<u32>) -> CartItem {
        CartItem {
            id: ItemId::Int(id),
            name: format!("Item {}", id),
            price,
            original_price: None,
            image: "/img.png".into(),
            artisan: "Marie".into(),
            stock_quantity: stock,
        }
    }

    #[test]
    fn test_add_merges_lines() {
        let mut cart = Cart::default();
        cart.add(item(1, 1000.0, None), 1);
        cart.add(item(1, 1000.0, None), 2);
        cart.add(item(2, 500.0, None), 1);

        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.total_items(), 4);
        assert_eq!(cart.subtotal(), 3500.0);
    }

    #[test]
    fn test_quantity_clamped_to_stock() {
        let mut cart = Cart::default();
        cart.add(item(1, 10.0, Some(3)), 5);
        assert_eq!(cart.lines()[0].quantity, 3);

        cart.add(item(2, 10.0, Some(3)), 0);
        assert_eq!(cart.lines()[1].quantity, 1);

        cart.update_quantity(&ItemId::Int(1), 0);
        assert_eq!(cart.lines()[0].quantity, 1);
        cart.update_quantity(&ItemId::Int(1), 100);
        assert_eq!(cart.lines()[0].quantity, 3);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut cart = Cart::default();
        cart.add(item(1, 10.0, None), 1);
        cart.add(item(2, 10.0, None), 1);
        cart.remove(&ItemId::Int(1));
        assert_eq!(cart.lines().len(), 1);
        cart.clear();
        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn test_persistence_round_trip() {
        let store = InMemoryStore::new();
        let mut cart = Cart::load(&store).await.unwrap();
        assert!(cart.is_empty());

        cart.add(item(7, 2500.0, None), 2);
        cart.save(&store).await.unwrap();

        let reloaded = Cart::load(&store).await.unwrap();
        assert_eq!(reloaded, cart);

        let stored = store.get(CART_KEY).await.unwrap().unwrap();
        assert_eq!(stored[0]["quantity"], 2);
        assert_eq!(stored[0]["id"], 7);
    }

    #[tokio::test]
    async fn test_corrupt_state_loads_empty() {
        let store = InMemoryStore::new();
        store
            .set(CART_KEY, serde_json::json!({"not": "a cart"}))
            .await
            .unwrap();
        assert!(Cart::load(&store).await.unwrap().is_empty());
    }
}
