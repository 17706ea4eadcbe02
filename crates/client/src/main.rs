//! Headless storefront entry point: mounts the listing and logs what it shows.
//!
//! Pass `--all` to keep loading pages until the whole catalog is listed.

use std::sync::Arc;

use anyhow::Context;

use storefront_client::{CartStore, ClientConfig, FileStorage, HttpCatalogClient, ListingView};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    storefront_observability::init();

    let load_all = std::env::args().skip(1).any(|arg| arg == "--all");

    let config = ClientConfig::from_env().context("failed to read storefront configuration")?;
    tracing::info!(api_url = %config.api_url, storage = ?config.storage_path, "starting storefront client");

    let client = Arc::new(HttpCatalogClient::new(&config).context("failed to build HTTP client")?);
    let storage = FileStorage::open(&config.storage_path)
        .with_context(|| format!("failed to open local storage at {:?}", config.storage_path))?;
    let cart = Arc::new(CartStore::load(Arc::new(storage)));

    let mut view = ListingView::new(client.clone(), client, cart.clone())
        .with_display_order(config.display_order);
    view.mount().await;

    while load_all && view.load_more_visible() {
        let before = view.products().len();
        view.load_more().await;
        if view.products().len() == before {
            tracing::warn!(shown = before, total = view.total_count(), "no further products; stopping");
            break;
        }
    }

    for category in view.categories() {
        tracing::info!(id = %category.id, name = %category.name, "category");
    }
    for product in view.products() {
        tracing::info!(
            id = %product.id,
            name = %product.name,
            brand = %product.brand,
            price = product.price,
            rating = product.rating,
            image = %view.image_url(product),
            "product"
        );
    }
    tracing::info!(
        shown = view.products().len(),
        total = view.total_count(),
        load_more = view.load_more_visible(),
        cart_items = cart.len(),
        cart_total = cart.total_price(),
        "listing ready"
    );

    Ok(())
}
