//! Storefront demo: query the fixture catalog, then serve it over HTTP
//!
//! ```text
//! RUST_LOG=catalog=debug,tower_http=info cargo run --example storefront [catalog.yaml]
//! curl 'http://127.0.0.1:3000/products?category=textiles&sort=price-low'
//! ```

use catalog::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("catalog=info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => CatalogConfig::from_yaml_file(&path)?,
        None => CatalogConfig::default_config(),
    };

    println!("🧺 Artisan Catalog\n");

    let products = fixtures::products();
    let engine = QueryEngine::new(config.page_size);

    let spec = QuerySpec::default()
        .apply(QueryAction::SetCategory(Selection::Only("Textiles".into())))
        .apply(QueryAction::SetSort(SortKey::PriceLow));
    let page = engine.evaluate(&products, &spec);

    println!(
        "📋 Textiles by price ({} of {}):",
        page.data.len(),
        page.pagination.total
    );
    for product in &page.data {
        println!(
            "   {} by {} - {}",
            product.name,
            product.artisan.name,
            format_price(product.price, "MGA")
        );
    }

    // Cart and orders live in a local store
    let store = InMemoryStore::new();
    let mut cart = Cart::load(&store).await?;
    if let Some(first) = page.data.first() {
        cart.add(CartItem::from(*first), 2);
    }
    cart.save(&store).await?;

    let mut orders = OrderBook::load(&store).await?;
    let order = orders.place_order(cart.lines().iter().map(Into::into).collect(), None)?;
    orders.save(&store).await?;
    println!(
        "\n✅ Order {} placed: {} (shipping {})\n",
        order.id,
        format_price(order.total, "MGA"),
        format_price(order.shipping, "MGA")
    );

    ServerBuilder::new()
        .with_config(config)
        .with_products(FixtureSource::new(products))
        .with_artisans(FixtureSource::new(fixtures::artisans()))
        .with_cors()
        .serve("127.0.0.1:3000")
        .await
}
