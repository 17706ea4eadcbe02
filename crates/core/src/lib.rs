//! `storefront-core`: shared building blocks for the storefront client.
//!
//! This crate contains **pure** primitives (no HTTP, no storage).

pub mod error;
pub mod id;
pub mod value_object;

pub use error::{DomainError, DomainResult};
pub use id::{CategoryId, ProductId};
pub use value_object::ValueObject;
