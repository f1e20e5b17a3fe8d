//! ServerBuilder for fluent API to build the catalog HTTP server

use super::handlers::AppState;
use super::router::build_catalog_routes;
use crate::config::CatalogConfig;
use crate::core::engine::QueryEngine;
use crate::core::service::CatalogSource;
use crate::entities::{Artisan, Product};
use anyhow::Result;
use axum::Router;
use axum::http::{Method, header::CONTENT_TYPE};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builder for the catalog HTTP server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_config(CatalogConfig::from_yaml_file("catalog.yaml")?)
///     .with_products(FixtureSource::new(fixtures::products()))
///     .with_artisans(FixtureSource::new(fixtures::artisans()))
///     .build()?;
/// ```
pub struct ServerBuilder {
    config: CatalogConfig,
    products: Option<Arc<dyn CatalogSource<Product>>>,
    artisans: Option<Arc<dyn CatalogSource<Artisan>>>,
    custom_routes: Vec<Router>,
    cors: bool,
}

impl ServerBuilder {
    /// Create a new ServerBuilder with the default configuration
    pub fn new() -> Self {
        Self {
            config: CatalogConfig::default_config(),
            products: None,
            artisans: None,
            custom_routes: Vec::new(),
            cors: false,
        }
    }

    pub fn with_config(mut self, config: CatalogConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the product source (required)
    pub fn with_products(mut self, source: impl CatalogSource<Product> + 'static) -> Self {
        self.products = Some(Arc::new(source));
        self
    }

    /// Set the artisan source (required)
    pub fn with_artisans(mut self, source: impl CatalogSource<Artisan> + 'static) -> Self {
        self.artisans = Some(Arc::new(source));
        self
    }

    /// Add custom routes next to the catalog API, e.g. checkout endpoints
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Allow cross-origin GET requests from a browser storefront
    pub fn with_cors(mut self) -> Self {
        self.cors = true;
        self
    }

    /// Build the shared handler state
    pub fn build_state(self) -> Result<AppState> {
        self.into_parts().map(|(state, _, _)| state)
    }

    fn into_parts(self) -> Result<(AppState, Vec<Router>, bool)> {
        self.config.check()?;

        let products = self
            .products
            .ok_or_else(|| anyhow::anyhow!("Product source is required. Call .with_products()"))?;
        let artisans = self
            .artisans
            .ok_or_else(|| anyhow::anyhow!("Artisan source is required. Call .with_artisans()"))?;

        let state = AppState {
            products,
            artisans,
            engine: QueryEngine::new(self.config.page_size),
            categories: Arc::new(self.config.category_index()),
            config: Arc::new(self.config),
        };

        Ok((state, self.custom_routes, self.cors))
    }

    /// Build the final router
    pub fn build(self) -> Result<Router> {
        let (state, custom_routes, cors) = self.into_parts()?;

        let mut app = build_catalog_routes(state);
        for routes in custom_routes {
            app = app.merge(routes);
        }

        if cors {
            app = app.layer(
                CorsLayer::new()
                    .allow_methods([Method::GET, Method::OPTIONS])
                    .allow_headers([CONTENT_TYPE])
                    .max_age(Duration::from_secs(60 * 60)),
            );
        }

        Ok(app.layer(ServiceBuilder::new().layer(TraceLayer::new_for_http())))
    }

    /// Serve the application with graceful shutdown
    ///
    /// Handles SIGTERM and SIGINT (Ctrl+C).
    ///
    /// # Example
    ///
    /// ```ignore
    /// ServerBuilder::new()
    ///     .with_products(products)
    ///     .with_artisans(artisans)
    ///     .serve("127.0.0.1:3000").await?;
    /// ```
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Catalog server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}

#[cfg(all(test, feature = "fixtures"))]
mod tests {
    use super::*;
    use crate::entities::fixtures;
    use crate::storage::FixtureSource;

    fn complete() -> ServerBuilder {
        ServerBuilder::new()
            .with_products(FixtureSource::new(fixtures::products()))
            .with_artisans(FixtureSource::new(fixtures::artisans()))
    }

    #[test]
    fn test_build_requires_sources() {
        let err = ServerBuilder::new().build().unwrap_err();
        assert!(err.to_string().contains("with_products"));

        let err = ServerBuilder::new()
            .with_products(FixtureSource::new(fixtures::products()))
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("with_artisans"));
    }

    #[test]
    fn test_build_rejects_invalid_config() {
        let mut config = CatalogConfig::default_config();
        config.page_size = 0;
        assert!(complete().with_config(config).build().is_err());
    }

    #[test]
    fn test_state_uses_configured_page_size() {
        let mut config = CatalogConfig::default_config();
        config.page_size = 8;
        let state = complete().with_config(config).build_state().unwrap();
        assert_eq!(state.engine.page_size(), 8);
        assert_eq!(state.categories.entries().len(), 6);
    }

    #[test]
    fn test_build_with_cors_and_custom_routes() {
        let extra = Router::new().route("/ping", axum::routing::get(|| async { "pong" }));
        assert!(complete().with_cors().with_custom_routes(extra).build().is_ok());
    }
}
