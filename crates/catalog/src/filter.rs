//! The shopper's filter selection and its wire form.

use serde::{Deserialize, Serialize};

use storefront_core::{CategoryId, ValueObject};

use crate::price::PriceRange;

/// Selected categories plus at most one price bucket.
///
/// Categories keep selection order and never repeat.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    checked: Vec<CategoryId>,
    price: Option<PriceRange>,
}

impl ValueObject for FilterState {}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn checked(&self) -> &[CategoryId] {
        &self.checked
    }

    pub fn price(&self) -> Option<&PriceRange> {
        self.price.as_ref()
    }

    /// True when neither a category nor a price bucket is selected.
    pub fn is_empty(&self) -> bool {
        self.checked.is_empty() && self.price.is_none()
    }

    /// Check or uncheck a category box.
    pub fn toggle_category(&mut self, id: CategoryId, selected: bool) {
        if selected {
            if !self.checked.contains(&id) {
                self.checked.push(id);
            }
        } else {
            self.checked.retain(|c| c != &id);
        }
    }

    pub fn set_price(&mut self, range: Option<PriceRange>) {
        self.price = range;
    }

    /// Body of `POST /api/v1/product/product-filters`.
    pub fn to_request(&self) -> FilterRequest {
        FilterRequest {
            checked: self.checked.clone(),
            radio: self.price.map(|r| r.bounds.to_vec()).unwrap_or_default(),
        }
    }
}

/// Wire body of the filter query: `{checked: id[], radio: [lo, hi] | []}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterRequest {
    pub checked: Vec<CategoryId>,
    pub radio: Vec<f64>,
}
