//! Page-local load state around the query engine
//!
//! A listing page fetches its collection once, then re-runs the engine on
//! every interaction. Fetch errors stay here as page state and never reach the
//! engine, which only ever sees a successfully loaded collection.

use crate::core::engine::QueryEngine;
use crate::core::entity::CatalogItem;
use crate::core::error::CatalogError;
use crate::core::field::ItemId;
use crate::core::pagination::{PaginatedResponse, PaginationMeta};
use crate::core::query::{QueryAction, QuerySpec};
use crate::core::service::CatalogSource;

/// Lifecycle of a page's collection
#[derive(Debug)]
pub enum LoadState<T> {
    Loading,
    Ready(Vec<T>),
    Failed(CatalogError),
}

/// What a listing page should render
#[derive(Debug)]
pub enum ListingView<'a, T> {
    Loading,
    /// Fetch failed; `retryable` drives the "try again" action
    Failed { message: String, retryable: bool },
    /// Valid fetch but nothing matches; `clear_filters` tells whether a
    /// "clear filters" action would change anything
    Empty { clear_filters: bool },
    Results(PaginatedResponse<&'a T>),
}

/// What a detail page should render
#[derive(Debug)]
pub enum DetailView<T> {
    Found(T),
    NotFound { entity_type: &'static str, id: ItemId },
    Failed { message: String, retryable: bool },
}

/// Owns a listing page's collection and query state
pub struct ListingController<T> {
    engine: QueryEngine,
    state: LoadState<T>,
    spec: QuerySpec,
}

impl<T: CatalogItem> ListingController<T> {
    pub fn new(engine: QueryEngine) -> Self {
        Self::with_spec(engine, QuerySpec::default())
    }

    /// Start with a pre-seeded spec, e.g. a category read from the URL
    pub fn with_spec(engine: QueryEngine, spec: QuerySpec) -> Self {
        Self {
            engine,
            state: LoadState::Loading,
            spec,
        }
    }

    pub fn state(&self) -> &LoadState<T> {
        &self.state
    }

    pub fn spec(&self) -> &QuerySpec {
        &self.spec
    }

    /// Fetch the collection from `source`
    pub async fn load<S>(&mut self, source: &S)
    where
        S: CatalogSource<T> + ?Sized,
    {
        self.state = match source.list().await {
            Ok(items) => LoadState::Ready(items),
            Err(e) => {
                tracing::warn!(resource = T::resource_name(), error = %e, "catalog fetch failed");
                LoadState::Failed(e)
            }
        };
        self.clamp_page();
    }

    /// Re-run a failed fetch
    pub async fn retry<S>(&mut self, source: &S)
    where
        S: CatalogSource<T> + ?Sized,
    {
        self.load(source).await;
    }

    /// Apply a user interaction to the query
    pub fn dispatch(&mut self, action: QueryAction) {
        self.spec = self.spec.apply(action);
        self.clamp_page();
    }

    /// Keep the held page within `[1, total_pages]` of the loaded collection
    fn clamp_page(&mut self) {
        let LoadState::Ready(items) = &self.state else {
            return;
        };
        let matched = self.engine.filter(items, &self.spec).len();
        let last = PaginationMeta::new(1, self.engine.page_size(), matched).total_pages;
        if self.spec.page > last {
            self.spec.page = last;
        }
    }

    /// Evaluate the current query against the loaded collection
    pub fn view(&self) -> ListingView<'_, T> {
        match &self.state {
            LoadState::Loading => ListingView::Loading,
            LoadState::Failed(e) => ListingView::Failed {
                message: e.to_string(),
                retryable: e.is_retryable(),
            },
            LoadState::Ready(items) => {
                let page = self.engine.evaluate(items, &self.spec);
                if page.is_empty() {
                    ListingView::Empty {
                        clear_filters: self.spec.has_active_filters(),
                    }
                } else {
                    ListingView::Results(page)
                }
            }
        }
    }
}

/// Look up a single entity for a detail page
pub async fn find_detail<T, S>(source: &S, id: &ItemId) -> DetailView<T>
where
    T: CatalogItem,
    S: CatalogSource<T> + ?Sized,
{
    match source.get(id).await {
        Ok(Some(item)) => DetailView::Found(item),
        Ok(None) => DetailView::NotFound {
            entity_type: T::resource_name_singular(),
            id: id.clone(),
        },
        Err(e) => DetailView::Failed {
            message: e.to_string(),
            retryable: e.is_retryable(),
        },
    }
}

#[cfg(all(test, feature = "fixtures"))]
mod tests {
    use super::*;
    use crate::core::error::CatalogResult;
    use crate::entities::{Product, fixtures};
    use crate::storage::FixtureSource;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Source that fails until switched on
    struct Flaky {
        up: AtomicBool,
    }

    #[async_trait]
    impl CatalogSource<Product> for Flaky {
        async fn list(&self) -> CatalogResult<Vec<Product>> {
            if self.up.load(Ordering::SeqCst) {
                Ok(fixtures::products())
            } else {
                Err(CatalogError::fetch_failed("products", "backend unavailable"))
            }
        }
    }

    #[tokio::test]
    async fn test_loading_before_fetch() {
        let controller: ListingController<Product> = ListingController::new(QueryEngine::default());
        assert!(matches!(controller.view(), ListingView::Loading));
    }

    #[tokio::test]
    async fn test_failed_fetch_then_retry() {
        let source = Flaky {
            up: AtomicBool::new(false),
        };
        let mut controller: ListingController<Product> =
            ListingController::new(QueryEngine::default());
        controller.load(&source).await;

        match controller.view() {
            ListingView::Failed { retryable, .. } => assert!(retryable),
            other => panic!("expected failure, got {:?}", other),
        }

        source.up.store(true, Ordering::SeqCst);
        controller.retry(&source).await;
        assert!(matches!(controller.view(), ListingView::Results(_)));
    }

    #[tokio::test]
    async fn test_empty_result_offers_clear_filters() {
        let source = FixtureSource::new(fixtures::products());
        let mut controller: ListingController<Product> =
            ListingController::new(QueryEngine::default());
        controller.load(&source).await;
        controller.dispatch(QueryAction::SetText("zzz".into()));

        match controller.view() {
            ListingView::Empty { clear_filters } => assert!(clear_filters),
            other => panic!("expected empty state, got {:?}", other),
        }

        controller.dispatch(QueryAction::ClearFilters);
        assert!(matches!(controller.view(), ListingView::Results(_)));
    }

    #[tokio::test]
    async fn test_next_page_stops_at_last_page() {
        let source = FixtureSource::new(fixtures::products());
        let mut controller: ListingController<Product> =
            ListingController::new(QueryEngine::default());
        controller.load(&source).await;

        for _ in 0..3 {
            controller.dispatch(QueryAction::NextPage);
        }
        assert_eq!(controller.spec().page, 2);

        controller.dispatch(QueryAction::PrevPage);
        assert_eq!(controller.spec().page, 1);
        match controller.view() {
            ListingView::Results(page) => assert_eq!(page.pagination.page, 1),
            other => panic!("expected results, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_seeded_page_clamped_on_load() {
        let source = FixtureSource::new(fixtures::products());
        let spec = QuerySpec {
            page: 9,
            ..QuerySpec::default()
        };
        let mut controller: ListingController<Product> =
            ListingController::with_spec(QueryEngine::default(), spec);
        controller.load(&source).await;
        assert_eq!(controller.spec().page, 2);

        controller.dispatch(QueryAction::SetPage(40));
        assert_eq!(controller.spec().page, 2);
    }

    #[tokio::test]
    async fn test_detail_found_and_not_found() {
        let source = FixtureSource::new(fixtures::products());

        match find_detail::<Product, _>(&source, &ItemId::Int(3)).await {
            DetailView::Found(product) => assert_eq!(product.name, "Silver Filigree Necklace"),
            other => panic!("expected product, got {:?}", other),
        }

        match find_detail::<Product, _>(&source, &ItemId::Int(404)).await {
            DetailView::NotFound { entity_type, id } => {
                assert_eq!(entity_type, "product");
                assert_eq!(id, ItemId::Int(404));
            }
            other => panic!("expected not found, got {:?}", other),
        }
    }
}
