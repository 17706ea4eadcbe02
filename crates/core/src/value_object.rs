//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attribute values. In the
/// storefront the price buckets and the filter selection are value objects:
/// two selections with the same categories and bucket are the same selection.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq)]
/// struct Bounds { lower: f64, upper: f64 }
///
/// impl ValueObject for Bounds {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
