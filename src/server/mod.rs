//! HTTP server exposing the catalog
//!
//! `ServerBuilder` wires product and artisan sources to a read-only REST API
//! that runs every listing request through the query engine.

pub mod builder;
pub mod handlers;
pub mod router;

pub use builder::ServerBuilder;
pub use handlers::{AppState, CategorySummary, ListingParams, ListingResponse};
