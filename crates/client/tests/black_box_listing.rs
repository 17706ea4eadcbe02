use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use reqwest::Url;
use serde_json::{Value, json};

use storefront_catalog::{FilterRequest, Product, price_range};
use storefront_client::cart::CART_KEY;
use storefront_client::{
    CartStore, DisplayMode, DisplayOrder, FileStorage, HttpCatalogClient, ListingView,
    LocalStorage,
};
use storefront_core::CategoryId;

const PAGE_SIZE: usize = 10;

#[derive(Clone, Default)]
struct Backend {
    // (product, category id)
    catalog: Arc<Vec<(Product, &'static str)>>,
    filter_bodies: Arc<Mutex<Vec<Value>>>,
}

fn product(n: usize) -> Product {
    serde_json::from_value(json!({
        "_id": format!("p{n}"),
        "name": format!("Product {n}"),
        "slug": format!("product-{n}"),
        "brand": "Acme",
        "price": 5 * n,
        "rating": 4,
        "description": "served by the stub",
    }))
    .unwrap()
}

fn backend(n: usize) -> Backend {
    let catalog = (1..=n)
        .map(|i| (product(i), if i % 3 == 0 { "c1" } else { "c2" }))
        .collect();
    Backend {
        catalog: Arc::new(catalog),
        ..Backend::default()
    }
}

async fn categories() -> Json<Value> {
    Json(json!({
        "success": true,
        "message": "All Categories List",
        "category": [
            { "_id": "c1", "name": "Phones", "slug": "phones" },
            { "_id": "c2", "name": "Books", "slug": "books" },
        ]
    }))
}

async fn product_list(State(b): State<Backend>, Path(page): Path<usize>) -> Json<Value> {
    let products: Vec<&Product> = b
        .catalog
        .iter()
        .map(|(p, _)| p)
        .skip((page.max(1) - 1) * PAGE_SIZE)
        .take(PAGE_SIZE)
        .collect();
    Json(json!({ "success": true, "products": products }))
}

async fn product_count(State(b): State<Backend>) -> Json<Value> {
    Json(json!({ "success": true, "totalCount": b.catalog.len() }))
}

async fn product_filters(State(b): State<Backend>, Json(body): Json<Value>) -> Json<Value> {
    b.filter_bodies.lock().unwrap().push(body.clone());
    let request: FilterRequest = serde_json::from_value(body).unwrap();

    let products: Vec<&Product> = b
        .catalog
        .iter()
        .filter(|(_, c)| request.checked.is_empty() || request.checked.iter().any(|id| id.as_str() == *c))
        .filter(|(p, _)| match request.radio.as_slice() {
            [lo, hi] => p.price >= *lo && p.price <= *hi,
            _ => true,
        })
        .map(|(p, _)| p)
        .collect();
    Json(json!({ "success": true, "products": products }))
}

struct TestServer {
    base_url: Url,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(backend: Backend) -> Self {
        let app = Router::new()
            .route("/api/v1/category/get-category", get(categories))
            .route("/api/v1/product/product-list/:page", get(product_list))
            .route("/api/v1/product/product-count", get(product_count))
            .route("/api/v1/product/product-filters", post(product_filters))
            .with_state(backend);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = Url::parse(&format!("http://{}", addr)).unwrap();

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Unique storage directory, removed when the test finishes (pass or panic).
struct TempStore {
    dir: PathBuf,
}

impl TempStore {
    fn new() -> Self {
        Self {
            dir: std::env::temp_dir().join(format!("storefront-bb-{}", uuid::Uuid::now_v7())),
        }
    }

    fn path(&self) -> PathBuf {
        self.dir.join("local_storage.json")
    }

    fn open(&self) -> Arc<FileStorage> {
        Arc::new(FileStorage::open(self.path()).unwrap())
    }
}

impl Drop for TempStore {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.dir);
    }
}

fn view_for(base_url: &Url, storage: Arc<FileStorage>, order: DisplayOrder) -> ListingView {
    let client = Arc::new(HttpCatalogClient::with_client(reqwest::Client::new(), base_url.clone()));
    let cart = Arc::new(CartStore::load(storage));
    ListingView::new(client.clone(), client, cart).with_display_order(order)
}

fn ids(products: &[Product]) -> Vec<String> {
    let mut ids: Vec<String> = products.iter().map(|p| p.id.to_string()).collect();
    ids.sort();
    ids
}

#[tokio::test]
async fn twelve_products_page_through_with_load_more() {
    let b = backend(12);
    let srv = TestServer::spawn(b.clone()).await;
    let store = TempStore::new();
    let mut view = view_for(&srv.base_url, store.open(), DisplayOrder::Shuffled);

    view.mount().await;
    assert_eq!(view.categories().len(), 2);
    assert_eq!(view.total_count(), 12);
    assert_eq!(view.products().len(), 10);
    assert!(view.load_more_visible());

    view.load_more().await;
    assert_eq!(view.products().len(), 12);
    assert!(!view.load_more_visible());

    let expected: Vec<Product> = b.catalog.iter().map(|(p, _)| p.clone()).collect();
    assert_eq!(ids(view.products()), ids(&expected));
}

#[tokio::test]
async fn category_filter_posts_selection_and_shows_response_verbatim() {
    let b = backend(12);
    let srv = TestServer::spawn(b.clone()).await;
    let store = TempStore::new();
    let mut view = view_for(&srv.base_url, store.open(), DisplayOrder::AsReceived);
    view.mount().await;

    view.toggle_category(CategoryId::new("c1").unwrap(), true).await;

    assert_eq!(
        *b.filter_bodies.lock().unwrap(),
        vec![json!({ "checked": ["c1"], "radio": [] })]
    );
    let shown: Vec<String> = view.products().iter().map(|p| p.id.to_string()).collect();
    assert_eq!(shown, ["p3", "p6", "p9", "p12"]);
    assert_eq!(view.mode(), DisplayMode::Filtered);

    view.load_more().await;
    assert_eq!(view.products().len(), 4);

    view.set_price_range(Some(price_range(1).unwrap())).await;
    assert_eq!(
        b.filter_bodies.lock().unwrap().last().unwrap(),
        &json!({ "checked": ["c1"], "radio": [20.0, 39.0] })
    );
    let shown: Vec<String> = view.products().iter().map(|p| p.id.to_string()).collect();
    assert_eq!(shown, ["p6"]);
}

#[tokio::test]
async fn unreachable_backend_leaves_view_empty() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let base_url = Url::parse(&format!("http://{}", addr)).unwrap();

    let store = TempStore::new();
    let mut view = view_for(&base_url, store.open(), DisplayOrder::AsReceived);
    view.mount().await;

    assert!(view.categories().is_empty());
    assert!(view.products().is_empty());
    assert_eq!(view.total_count(), 0);
    assert!(!view.is_loading());
    assert!(!view.load_more_visible());
}

#[tokio::test]
async fn cart_survives_reset_and_restart() {
    let b = backend(3);
    let srv = TestServer::spawn(b).await;
    let store = TempStore::new();
    let storage = store.open();

    let mut view = view_for(&srv.base_url, storage.clone(), DisplayOrder::AsReceived);
    view.mount().await;
    let first = view.products()[0].clone();
    view.add_to_cart(&first);
    view.add_to_cart(&first);

    view.reset_filters().await;
    assert_eq!(view.cart().len(), 2);

    let raw = storage.get_item(CART_KEY).unwrap().unwrap();
    let stored: Vec<Value> = serde_json::from_str(&raw).unwrap();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0]["_id"], "p1");
    assert_eq!(stored[0]["description"], "served by the stub");

    let restarted = view_for(&srv.base_url, store.open(), DisplayOrder::AsReceived);
    assert_eq!(restarted.cart().items(), vec![first.clone(), first]);
    assert_eq!(
        restarted.cart().items()[0].extra.get("description"),
        Some(&json!("served by the stub"))
    );
}

#[tokio::test]
async fn image_url_is_rooted_at_backend() {
    let srv = TestServer::spawn(backend(1)).await;
    let store = TempStore::new();
    let mut view = view_for(&srv.base_url, store.open(), DisplayOrder::AsReceived);
    view.mount().await;

    let product = view.products()[0].clone();
    assert_eq!(
        view.image_url(&product),
        format!("{}api/v1/product/product-image/p1", srv.base_url)
    );
}
