//! Catalog types for the storefront listing.
//!
//! Products and categories as the backend serves them, the fixed price
//! buckets, and the shopper's filter selection. Pure data, no IO.

pub mod category;
pub mod filter;
pub mod price;
pub mod product;

pub use category::Category;
pub use filter::{FilterRequest, FilterState};
pub use price::{PRICE_RANGES, PriceRange, price_range};
pub use product::Product;
