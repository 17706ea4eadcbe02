//! Shopping cart shared by every view, mirrored to local storage.

use std::sync::{Arc, Mutex, PoisonError};

use storefront_catalog::Product;
use storefront_core::ProductId;

use crate::storage::{LocalStorage, StorageError};

/// Storage key holding the JSON array of cart products.
pub const CART_KEY: &str = "cart";

/// In-memory cart list plus its persisted mirror.
///
/// Entries are whole products; adding the same product twice yields two
/// entries. Share it between views as `Arc<CartStore>`.
pub struct CartStore {
    storage: Arc<dyn LocalStorage>,
    items: Mutex<Vec<Product>>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("items", &self.items)
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Restore the cart from storage.
    ///
    /// A missing key is an empty cart. Unreadable content is logged and
    /// treated as empty; it is overwritten on the next change.
    pub fn load(storage: Arc<dyn LocalStorage>) -> Self {
        let items = match storage.get_item(CART_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Product>>(&raw) {
                Ok(items) => items,
                Err(e) => {
                    tracing::warn!(error = %e, "discarding unreadable cart");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read cart from storage");
                Vec::new()
            }
        };

        tracing::debug!(items = items.len(), "cart loaded");

        Self {
            storage,
            items: Mutex::new(items),
        }
    }

    /// Append a product and persist. Returns the new cart length.
    ///
    /// The in-memory list keeps the entry even when persisting fails.
    pub fn add(&self, product: Product) -> Result<usize, StorageError> {
        let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        items.push(product);
        self.persist(&items)?;
        Ok(items.len())
    }

    /// Remove the first entry for `id` and persist.
    pub fn remove(&self, id: &ProductId) -> Result<Option<Product>, StorageError> {
        let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(index) = items.iter().position(|p| &p.id == id) else {
            return Ok(None);
        };
        let removed = items.remove(index);
        self.persist(&items)?;
        Ok(Some(removed))
    }

    /// Empty the cart and drop its storage key.
    pub fn clear(&self) -> Result<(), StorageError> {
        let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        items.clear();
        self.storage.remove_item(CART_KEY)
    }

    pub fn items(&self) -> Vec<Product> {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.items.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn total_price(&self) -> f64 {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|p| p.price)
            .sum()
    }

    fn persist(&self, items: &[Product]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(items)?;
        self.storage.set_item(CART_KEY, &raw)
    }
}
