//! HTTP handlers for catalog listings and detail pages

use crate::config::CatalogConfig;
use crate::core::engine::{QueryEngine, category_counts};
use crate::core::entity::CatalogItem;
use crate::core::error::CatalogError;
use crate::core::field::ItemId;
use crate::core::navigation::CategoryIndex;
use crate::core::pagination::PaginationMeta;
use crate::core::query::{NumericRange, QuerySpec, Selection, SortKey};
use crate::core::service::CatalogSource;
use crate::entities::{Artisan, Product};
use axum::Json;
use axum::extract::{Path, Query, State};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;
use std::sync::Arc;

/// Shared state for all catalog handlers
#[derive(Clone)]
pub struct AppState {
    pub products: Arc<dyn CatalogSource<Product>>,
    pub artisans: Arc<dyn CatalogSource<Artisan>>,
    pub engine: QueryEngine,
    pub categories: Arc<CategoryIndex>,
    pub config: Arc<CatalogConfig>,
}

/// Listing query string
///
/// Numeric and boolean parameters are kept as raw strings and parsed in
/// [`ListingParams::to_spec`], so a malformed value is reported as a typed
/// `INVALID_INPUT` error.
///
/// ```text
/// GET /products?q=silk&category=wood-carving&materials=Silk,Clay&min=0&max=90000&sort=price-low&page=2
/// GET /artisans?location=Toamasina&min=4.5&custom_orders=true&sort=experience
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ListingParams {
    /// Text search
    pub q: Option<String>,

    /// Category slug; unknown slugs disable the category filter
    pub category: Option<String>,

    pub location: Option<String>,

    /// Comma-separated tags
    pub materials: Option<String>,

    /// Lower bound of the price (products) or rating (artisans) range
    pub min: Option<String>,

    pub max: Option<String>,

    pub in_stock: Option<String>,

    pub custom_orders: Option<String>,

    /// Sort key, e.g. `price-low`
    pub sort: Option<String>,

    /// Page number (starts at 1)
    pub page: Option<String>,
}

/// Parse an optional raw parameter; absent and empty values yield `None`
fn parse_param<V>(name: &str, raw: Option<&str>) -> Result<Option<V>, CatalogError>
where
    V: FromStr,
{
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(|_| {
            CatalogError::invalid_input(name, format!("cannot parse '{}'", value))
        }),
    }
}

impl ListingParams {
    /// Translate the query string into a [`QuerySpec`]
    pub fn to_spec(&self, categories: &CategoryIndex) -> Result<QuerySpec, CatalogError> {
        let sort = match self.sort.as_deref() {
            None | Some("") => SortKey::Featured,
            Some(raw) => raw
                .parse::<SortKey>()
                .map_err(|e| CatalogError::invalid_input("sort", e))?,
        };

        let category = self
            .category
            .as_deref()
            .and_then(|slug| categories.slug_to_label(slug))
            .map(|label| Selection::Only(label.to_string()))
            .unwrap_or_default();

        let materials: BTreeSet<String> = self
            .materials
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(String::from)
            .collect();

        let min: Option<f64> = parse_param("min", self.min.as_deref())?;
        let max: Option<f64> = parse_param("max", self.max.as_deref())?;
        let page: Option<usize> = parse_param("page", self.page.as_deref())?;
        let in_stock: Option<bool> = parse_param("in_stock", self.in_stock.as_deref())?;
        let custom_orders: Option<bool> =
            parse_param("custom_orders", self.custom_orders.as_deref())?;

        let range = match (min, max) {
            (None, None) => None,
            (min, max) => Some(NumericRange::new(
                min.unwrap_or(f64::NEG_INFINITY),
                max.unwrap_or(f64::INFINITY),
            )),
        };

        Ok(QuerySpec {
            text: self.q.clone().unwrap_or_default(),
            category,
            location: Selection::from_label(self.location.as_deref().unwrap_or_default()),
            materials,
            range,
            in_stock_only: in_stock.unwrap_or(false),
            custom_orders_only: custom_orders.unwrap_or(false),
            sort,
            page: page.unwrap_or(1).max(1),
            ..QuerySpec::default()
        })
    }
}

/// Listing response body
#[derive(Debug, Serialize)]
pub struct ListingResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
    /// Page numbers to render as buttons
    pub pages: Vec<usize>,
}

/// Category entry with its product count
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct CategorySummary {
    pub label: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub count: usize,
}

async fn list_entities<T>(
    source: &dyn CatalogSource<T>,
    state: &AppState,
    params: &ListingParams,
) -> Result<Json<ListingResponse<T>>, CatalogError>
where
    T: CatalogItem + Serialize,
{
    let spec = params.to_spec(&state.categories)?;
    let items = source.list().await?;
    let page = state.engine.evaluate(&items, &spec);
    let pages = page.pagination.window(state.config.pagination_window);

    Ok(Json(ListingResponse {
        data: page.data.into_iter().cloned().collect(),
        pagination: page.pagination,
        pages,
    }))
}

async fn get_entity<T>(source: &dyn CatalogSource<T>, raw_id: &str) -> Result<Json<T>, CatalogError>
where
    T: CatalogItem + Serialize,
{
    let id: ItemId = raw_id
        .parse()
        .map_err(|_| CatalogError::invalid_input("id", raw_id))?;
    source
        .get(&id)
        .await?
        .map(Json)
        .ok_or_else(|| CatalogError::not_found(T::resource_name_singular(), &id))
}

/// GET /products
pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<ListingParams>,
) -> Result<Json<ListingResponse<Product>>, CatalogError> {
    list_entities(state.products.as_ref(), &state, &params).await
}

/// GET /products/{id}
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, CatalogError> {
    get_entity(state.products.as_ref(), &id).await
}

/// GET /artisans
pub async fn list_artisans(
    State(state): State<AppState>,
    Query(params): Query<ListingParams>,
) -> Result<Json<ListingResponse<Artisan>>, CatalogError> {
    list_entities(state.artisans.as_ref(), &state, &params).await
}

/// GET /artisans/{id}
pub async fn get_artisan(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Artisan>, CatalogError> {
    get_entity(state.artisans.as_ref(), &id).await
}

/// GET /categories
///
/// Configured categories in display order with their product counts.
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategorySummary>>, CatalogError> {
    let products = state.products.list().await?;
    let counts = category_counts(&products, |p| p.category.as_str());

    let summaries = state
        .config
        .categories
        .iter()
        .map(|category| CategorySummary {
            label: category.label.clone(),
            slug: category.slug(),
            description: category.description.clone(),
            count: counts
                .iter()
                .find(|(label, _)| *label == category.label)
                .map(|(_, count)| *count)
                .unwrap_or(0),
        })
        .collect();

    Ok(Json(summaries))
}

/// GET /health
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
