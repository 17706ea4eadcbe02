use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use storefront_core::ProductId;

/// A product as listed by the backend.
///
/// The client never mutates these fields; a cart entry is a verbatim copy,
/// including whatever other fields the backend sent (kept in `extra`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ProductId,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub brand: String,
    pub price: f64,
    #[serde(default)]
    pub rating: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    /// Path of the detail view for this product.
    pub fn detail_path(&self) -> String {
        format!("/product/{}", self.slug)
    }

    /// Path of the image endpoint for this product, relative to the API root.
    pub fn image_path(&self) -> String {
        format!("api/v1/product/product-image/{}", self.id)
    }
}
