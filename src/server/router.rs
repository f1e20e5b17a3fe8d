//! Route table for the catalog API

use super::handlers::{
    AppState, get_artisan, get_product, health, list_artisans, list_categories, list_products,
};
use axum::{Router, routing::get};

/// Build catalog routes
///
/// - GET /health - Liveness probe
/// - GET /categories - Configured categories with product counts
/// - GET /products - Filtered, sorted and paginated products
/// - GET /products/{id} - A single product
/// - GET /artisans - Filtered, sorted and paginated artisans
/// - GET /artisans/{id} - A single artisan
pub fn build_catalog_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/categories", get(list_categories))
        .route("/products", get(list_products))
        .route("/products/{id}", get(get_product))
        .route("/artisans", get(list_artisans))
        .route("/artisans/{id}", get(get_artisan))
        .with_state(state)
}
