//! # Catalog
//!
//! Client-side catalog query engine for an artisan marketplace.
//!
//! ## Features
//!
//! - **Query Engine**: Filter, sort and paginate any collection that implements [`CatalogItem`](core::CatalogItem)
//! - **Pure Query State**: Every user interaction is a [`QueryAction`](core::QueryAction) applied to an immutable [`QuerySpec`](core::QuerySpec)
//! - **Stable Sorting**: Ties keep their source order
//! - **Category Navigation**: Category slugs round-trip through the URL query string
//! - **Load States**: Fetch failures are page state, never engine input
//! - **Commerce Books**: Cart, wishlist and orders persisted through a key-value store
//! - **HTTP API**: Read-only REST surface built on axum
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use catalog::prelude::*;
//!
//! let products = fixtures::products();
//! let spec = QuerySpec::default()
//!     .apply(QueryAction::SetCategory(Selection::Only("Textiles".into())))
//!     .apply(QueryAction::SetSort(SortKey::PriceLow));
//!
//! let page = QueryEngine::default().evaluate(&products, &spec);
//! println!("{} of {} products", page.data.len(), page.pagination.total);
//! ```

pub mod commerce;
pub mod config;
pub mod core;
pub mod entities;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        CatalogError, CatalogItem, CatalogResult, CatalogSource, CategoryIndex, DetailView,
        Direction, Entity, FieldValue, ItemId, KeyValueStore, ListingController, ListingView,
        LoadState, NumericRange, PaginatedResponse, PaginationMeta, QueryAction, QueryEngine,
        QuerySpec, Selection, SortKey, UrlUpdate, ViewMode, category_counts, find_detail, slugify,
        tag_universe,
    };

    // === Entities ===
    #[cfg(feature = "fixtures")]
    pub use crate::entities::fixtures;
    pub use crate::entities::{Artisan, ArtisanRef, Product, format_price};

    // === Commerce ===
    pub use crate::commerce::{Cart, CartItem, Order, OrderBook, OrderStatus, WishItem, Wishlist};

    // === Storage ===
    pub use crate::storage::{FallbackStore, FixtureSource, InMemoryStore};
    #[cfg(feature = "remote")]
    pub use crate::storage::{RemoteClient, RemoteTableSource, RemoteTableStore};

    // === Config ===
    pub use crate::config::{CatalogConfig, CategoryConfig, RemoteConfig};

    // === Server ===
    pub use crate::server::ServerBuilder;

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
}
