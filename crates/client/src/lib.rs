//! `storefront-client`
//!
//! **Responsibility:** headless client for the storefront's product listing.
//!
//! This crate provides:
//! - HTTP access to the catalog endpoints (`api`)
//! - The listing view: browsing, filtering, paging (`listing`)
//! - A cart persisted in local storage (`cart`, `storage`)
//!
//! The backend stays the authority; nothing here is cached beyond the cart.

pub mod api;
pub mod cart;
pub mod config;
pub mod host;
pub mod listing;
pub mod storage;

pub use api::{CategoryService, ClientError, HttpCatalogClient, ProductService};
pub use cart::CartStore;
pub use config::ClientConfig;
pub use host::{Navigator, Notifier};
pub use listing::{DisplayMode, DisplayOrder, ListingView};
pub use storage::{FileStorage, LocalStorage, MemoryStorage, StorageError};
