//! The product-listing view: categories, filters, paging and add-to-cart.
//!
//! The view is either browsing the unfiltered list page by page, or showing
//! one server-side filtered result set. Filter changes go through
//! [`ListingView::refresh`], which picks the mode from the current selection.
//!
//! Every backend failure is logged and swallowed: the view keeps whatever it
//! was showing and the loading flag is cleared.

use std::sync::Arc;

use rand::seq::SliceRandom;

use storefront_catalog::{Category, FilterState, PriceRange, Product};
use storefront_core::CategoryId;

use crate::api::{CategoryService, ProductService};
use crate::cart::CartStore;
use crate::host::{Navigator, Notifier, TracingNavigator, TracingNotifier};

pub const ADDED_TO_CART: &str = "Item Added to Cart";

/// How a freshly fetched page is ordered before display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DisplayOrder {
    /// Random order within each page.
    #[default]
    Shuffled,
    AsReceived,
}

impl DisplayOrder {
    fn arrange(self, products: &mut [Product]) {
        if self == DisplayOrder::Shuffled {
            products.shuffle(&mut rand::rng());
        }
    }
}

/// Where the displayed products came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// Unfiltered list; `page` is the last page loaded, 0 before any has.
    Browsing { page: u32 },
    /// Result of a filter query; paging is off.
    Filtered,
}

#[derive(Debug, Clone)]
struct ListingState {
    categories: Vec<Category>,
    products: Vec<Product>,
    filter: FilterState,
    mode: DisplayMode,
    total_count: u64,
    loading: bool,
}

impl Default for ListingState {
    fn default() -> Self {
        Self {
            categories: Vec::new(),
            products: Vec::new(),
            filter: FilterState::new(),
            mode: DisplayMode::Browsing { page: 0 },
            total_count: 0,
            loading: false,
        }
    }
}

pub struct ListingView {
    categories: Arc<dyn CategoryService>,
    products: Arc<dyn ProductService>,
    cart: Arc<CartStore>,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
    order: DisplayOrder,
    state: ListingState,
}

impl ListingView {
    pub fn new(
        categories: Arc<dyn CategoryService>,
        products: Arc<dyn ProductService>,
        cart: Arc<CartStore>,
    ) -> Self {
        Self {
            categories,
            products,
            cart,
            navigator: Arc::new(TracingNavigator),
            notifier: Arc::new(TracingNotifier),
            order: DisplayOrder::default(),
            state: ListingState::default(),
        }
    }

    pub fn with_navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = navigator;
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_display_order(mut self, order: DisplayOrder) -> Self {
        self.order = order;
        self
    }

    pub fn categories(&self) -> &[Category] {
        &self.state.categories
    }

    pub fn products(&self) -> &[Product] {
        &self.state.products
    }

    pub fn filter(&self) -> &FilterState {
        &self.state.filter
    }

    pub fn mode(&self) -> DisplayMode {
        self.state.mode
    }

    pub fn total_count(&self) -> u64 {
        self.state.total_count
    }

    pub fn is_loading(&self) -> bool {
        self.state.loading
    }

    pub fn cart(&self) -> &Arc<CartStore> {
        &self.cart
    }

    /// Whether the "load more" control is shown.
    pub fn load_more_visible(&self) -> bool {
        (self.state.products.len() as u64) < self.state.total_count
    }

    /// Initial load: categories, total count, then the first page.
    pub async fn mount(&mut self) {
        self.load_categories().await;
        self.load_total_count().await;
        self.refresh().await;
    }

    pub async fn load_categories(&mut self) {
        match self.categories.categories().await {
            Ok(resp) if resp.success => {
                tracing::debug!(count = resp.category.len(), "categories loaded");
                self.state.categories = resp.category;
            }
            Ok(_) => tracing::warn!("category request reported failure"),
            Err(e) => tracing::warn!(error = %e, "failed to load categories"),
        }
    }

    pub async fn load_total_count(&mut self) {
        match self.products.product_count().await {
            Ok(total) => self.state.total_count = total,
            Err(e) => tracing::warn!(error = %e, "failed to load product count"),
        }
    }

    /// Fetch page `page` of the unfiltered list.
    ///
    /// Page 1 replaces the displayed set and (re)enters browsing mode. A later
    /// page appends, and only when it directly follows the last loaded page,
    /// so the list is always pages `1..=n` in order.
    pub async fn load_product_page(&mut self, page: u32) {
        let page = page.max(1);
        if page > 1 && self.state.mode != (DisplayMode::Browsing { page: page - 1 }) {
            tracing::debug!(page, mode = ?self.state.mode, "ignoring out-of-sequence page load");
            return;
        }

        self.state.loading = true;
        let result = self.products.product_page(page).await;
        self.state.loading = false;

        match result {
            Ok(mut fetched) => {
                self.order.arrange(&mut fetched);
                tracing::debug!(page, count = fetched.len(), "product page loaded");
                if page == 1 {
                    self.state.products = fetched;
                } else {
                    self.state.products.extend(fetched);
                }
                self.state.mode = DisplayMode::Browsing { page };
            }
            Err(e) => tracing::warn!(page, error = %e, "failed to load product page"),
        }
    }

    /// Load the next page (page 1 again if it never loaded). No-op while a
    /// filter is active.
    pub async fn load_more(&mut self) {
        match self.state.mode {
            DisplayMode::Browsing { page } => self.load_product_page(page + 1).await,
            DisplayMode::Filtered => tracing::debug!("load more ignored while filtered"),
        }
    }

    /// Replace the selection and show the server's filtered result set.
    ///
    /// Paging is abandoned as soon as a filter is applied, even if the query
    /// fails; the previous products then stay visible.
    pub async fn apply_filter(&mut self, filter: FilterState) {
        self.state.filter = filter;
        self.state.mode = DisplayMode::Filtered;

        let request = self.state.filter.to_request();
        match self.products.filter_products(&request).await {
            Ok(products) => {
                tracing::debug!(
                    categories = request.checked.len(),
                    count = products.len(),
                    "filter applied"
                );
                self.state.products = products;
            }
            Err(e) => tracing::warn!(error = %e, "failed to filter products"),
        }
    }

    pub async fn toggle_category(&mut self, id: CategoryId, selected: bool) {
        self.state.filter.toggle_category(id, selected);
        self.refresh().await;
    }

    /// Select a price bucket, or clear it with `None`.
    pub async fn set_price_range(&mut self, range: Option<PriceRange>) {
        self.state.filter.set_price(range);
        self.refresh().await;
    }

    /// Re-query for the current selection: browse from page 1 when nothing is
    /// selected, filter otherwise.
    pub async fn refresh(&mut self) {
        if self.state.filter.is_empty() {
            self.state.mode = DisplayMode::Browsing { page: 0 };
            self.load_product_page(1).await;
        } else {
            let filter = self.state.filter.clone();
            self.apply_filter(filter).await;
        }
    }

    /// Drop every piece of view state and mount again.
    pub async fn reset_filters(&mut self) {
        self.state = ListingState::default();
        self.mount().await;
    }

    /// Append `product` to the shared cart. Duplicates are kept.
    pub fn add_to_cart(&self, product: &Product) {
        match self.cart.add(product.clone()) {
            Ok(len) => {
                tracing::debug!(product = %product.id, cart_len = len, "added to cart");
                self.notifier.success(ADDED_TO_CART);
            }
            Err(e) => tracing::warn!(product = %product.id, error = %e, "failed to persist cart"),
        }
    }

    pub fn open_details(&self, product: &Product) {
        self.navigator.navigate(&product.detail_path());
    }

    pub fn image_url(&self, product: &Product) -> String {
        self.products.image_url(product)
    }
}
