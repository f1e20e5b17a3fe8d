//! Core module containing the query engine and the traits it runs on

pub mod engine;
pub mod entity;
pub mod error;
pub mod field;
pub mod load;
pub mod navigation;
pub mod pagination;
pub mod query;
pub mod service;

pub use engine::{QueryEngine, category_counts, tag_universe};
pub use entity::{CatalogItem, Entity};
pub use error::{CatalogError, CatalogResult, ErrorResponse};
pub use field::{FieldValue, ItemId};
pub use load::{DetailView, ListingController, ListingView, LoadState, find_detail};
pub use navigation::{CategoryIndex, CategorySlug, UrlUpdate, slugify};
pub use pagination::{PaginatedResponse, PaginationMeta};
pub use query::{Direction, NumericRange, QueryAction, QuerySpec, Selection, SortKey, ViewMode};
pub use service::{CatalogSource, KeyValueStore};
