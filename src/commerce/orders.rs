//! Order placement and status tracking

use super::{ORDERS_KEY, load_book, save_book};
use crate::commerce::cart::CartLine;
use crate::core::error::{CatalogError, CatalogResult};
use crate::core::field::ItemId;
use crate::core::service::KeyValueStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Subtotal above which shipping is free
pub const FREE_SHIPPING_THRESHOLD: f64 = 100_000.0;

/// Flat shipping fee below the threshold
pub const SHIPPING_FEE: f64 = 10_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Paid,
    Shipped,
    Delivered,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: ItemId,
    pub name: String,
    pub image: String,
    pub price: f64,
    pub quantity: u32,
}

impl From<&CartLine> for OrderItem {
    fn from(line: &CartLine) -> Self {
        Self {
            product_id: line.item.id.clone(),
            name: line.item.name.clone(),
            image: line.item.image.clone(),
            price: line.item.price,
            quantity: line.quantity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl Customer {
    /// Customer recorded when nobody is signed in
    pub fn guest() -> Self {
        Self {
            id: "guest".to_string(),
            name: "Guest".to_string(),
            email: "guest@example.com".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub items: Vec<OrderItem>,
    pub subtotal: f64,
    pub shipping: f64,
    pub total: f64,
    pub status: OrderStatus,
    pub customer: Customer,
    pub created_at: DateTime<Utc>,
}

/// Shipping owed for a subtotal
pub fn shipping_for(subtotal: f64) -> f64 {
    if subtotal > FREE_SHIPPING_THRESHOLD {
        0.0
    } else {
        SHIPPING_FEE
    }
}

/// Placed orders, newest first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderBook {
    orders: Vec<Order>,
}

impl OrderBook {
    pub async fn load(store: &dyn KeyValueStore) -> CatalogResult<Self> {
        load_book(store, ORDERS_KEY).await
    }

    pub async fn save(&self, store: &dyn KeyValueStore) -> CatalogResult<()> {
        save_book(store, ORDERS_KEY, self).await
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Record a new pending order and return it
    pub fn place_order(
        &mut self,
        items: Vec<OrderItem>,
        customer: Option<Customer>,
    ) -> CatalogResult<Order> {
        if items.is_empty() {
            return Err(CatalogError::invalid_input("items", "an order needs at least one item"));
        }

        let subtotal: f64 = items
            .iter()
            .map(|item| item.price * f64::from(item.quantity))
            .sum();
        let shipping = shipping_for(subtotal);
        let order = Order {
            id: Uuid::new_v4().to_string(),
            items,
            subtotal,
            shipping,
            total: subtotal + shipping,
            status: OrderStatus::Pending,
            customer: customer.unwrap_or_else(Customer::guest),
            created_at: Utc::now(),
        };

        tracing::info!(order_id = %order.id, total = order.total, "order placed");
        self.orders.insert(0, order.clone());
        Ok(order)
    }

    pub fn update_status(&mut self, id: &str, status: OrderStatus) -> CatalogResult<()> {
        let order = self
            .orders
            .iter_mut()
            .find(|order| order.id == id)
            .ok_or_else(|| CatalogError::not_found("order", id))?;
        order.status = status;
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Order> {
        self.orders.iter().find(|order| order.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStore;

    fn line(id: i64, price: f64, quantity: u32) -> OrderItem {
        OrderItem {
            product_id: ItemId::Int(id),
            name: format!("Item {}", id),
            image: "/img.png".into(),
            price,
            quantity,
        }
    }

    #[test]
    fn test_shipping_threshold() {
        assert_eq!(shipping_for(100_000.0), SHIPPING_FEE);
        assert_eq!(shipping_for(100_001.0), 0.0);
        assert_eq!(shipping_for(0.0), SHIPPING_FEE);
    }

    #[test]
    fn test_place_order_totals() {
        let mut book = OrderBook::default();
        let order = book
            .place_order(vec![line(1, 30_000.0, 2), line(2, 5_000.0, 1)], None)
            .unwrap();

        assert_eq!(order.subtotal, 65_000.0);
        assert_eq!(order.shipping, SHIPPING_FEE);
        assert_eq!(order.total, 75_000.0);
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.customer, Customer::guest());
    }

    #[test]
    fn test_newest_first_and_status_update() {
        let mut book = OrderBook::default();
        let first = book.place_order(vec![line(1, 150_000.0, 1)], None).unwrap();
        let second = book.place_order(vec![line(2, 10.0, 1)], None).unwrap();

        assert_eq!(book.orders()[0].id, second.id);
        assert_eq!(first.shipping, 0.0);

        book.update_status(&first.id, OrderStatus::Shipped).unwrap();
        assert_eq!(book.get(&first.id).unwrap().status, OrderStatus::Shipped);

        let err = book.update_status("missing", OrderStatus::Paid).unwrap_err();
        assert_eq!(err.error_code(), "NOT_FOUND");
    }

    #[test]
    fn test_empty_order_rejected() {
        let mut book = OrderBook::default();
        assert!(book.place_order(Vec::new(), None).is_err());
        assert!(book.orders().is_empty());
    }

    #[tokio::test]
    async fn test_persistence_round_trip() {
        let store = InMemoryStore::new();
        let mut book = OrderBook::load(&store).await.unwrap();
        let customer = Customer {
            id: "u-1".into(),
            name: "Rasoa Andry".into(),
            email: "rasoa@example.mg".into(),
        };
        book.place_order(vec![line(3, 45_000.0, 1)], Some(customer.clone()))
            .unwrap();
        book.save(&store).await.unwrap();

        let reloaded = OrderBook::load(&store).await.unwrap();
        assert_eq!(reloaded.orders().len(), 1);
        assert_eq!(reloaded.orders()[0].customer, customer);
        let stored = store.get(ORDERS_KEY).await.unwrap().unwrap();
        assert_eq!(stored[0]["status"], "pending");
    }
}
