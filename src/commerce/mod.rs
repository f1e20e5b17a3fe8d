//! Cart, wishlist and order books persisted through a [`KeyValueStore`]
//!
//! Each book is a plain value mutated in memory and written back as JSON under
//! its own key. Stored JSON that no longer parses is logged and replaced by an
//! empty book rather than failing the page.

pub mod cart;
pub mod orders;
pub mod wishlist;

pub use cart::{Cart, CartItem, CartLine};
pub use orders::{Customer, Order, OrderBook, OrderItem, OrderStatus};
pub use wishlist::{WishItem, Wishlist};

use crate::core::error::CatalogResult;
use crate::core::service::KeyValueStore;
use serde::Serialize;
use serde::de::DeserializeOwned;

pub const CART_KEY: &str = "cart";
pub const WISHLIST_KEY: &str = "wishlist";
pub const ORDERS_KEY: &str = "orders";

/// Read a book from the store, falling back to its default
pub(crate) async fn load_book<T>(store: &dyn KeyValueStore, key: &str) -> CatalogResult<T>
where
    T: DeserializeOwned + Default,
{
    let Some(value) = store.get(key).await? else {
        return Ok(T::default());
    };

    match serde_json::from_value(value) {
        Ok(book) => Ok(book),
        Err(e) => {
            tracing::warn!(key, error = %e, "discarding unreadable stored state");
            Ok(T::default())
        }
    }
}

/// Write a book to the store
pub(crate) async fn save_book<T: Serialize>(
    store: &dyn KeyValueStore,
    key: &str,
    book: &T,
) -> CatalogResult<()> {
    store.set(key, serde_json::to_value(book)?).await
}
