//! Fixed price buckets offered by the price filter.

use serde::Serialize;

use storefront_core::{DomainError, DomainResult, ValueObject};

/// A `[lower, upper]` price bucket; the backend matches both ends inclusively.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceRange {
    pub id: u8,
    pub label: &'static str,
    pub bounds: [f64; 2],
}

impl ValueObject for PriceRange {}

/// The lookup table shown to the shopper. Not user-editable.
pub const PRICE_RANGES: [PriceRange; 6] = [
    PriceRange { id: 0, label: "$0 to 19", bounds: [0.0, 19.0] },
    PriceRange { id: 1, label: "$20 to 39", bounds: [20.0, 39.0] },
    PriceRange { id: 2, label: "$40 to 59", bounds: [40.0, 59.0] },
    PriceRange { id: 3, label: "$60 to 79", bounds: [60.0, 79.0] },
    PriceRange { id: 4, label: "$80 to 99", bounds: [80.0, 99.0] },
    PriceRange { id: 5, label: "$100 or more", bounds: [100.0, 9999.0] },
];

/// Look up a bucket by id.
pub fn price_range(id: u8) -> DomainResult<PriceRange> {
    PRICE_RANGES
        .iter()
        .find(|r| r.id == id)
        .copied()
        .ok_or_else(|| DomainError::not_found(format!("price range {id}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_ordered_and_non_overlapping() {
        for pair in PRICE_RANGES.windows(2) {
            assert!(pair[0].bounds[1] < pair[1].bounds[0]);
        }
    }

    #[test]
    fn lookup_by_id() {
        let range = price_range(2).unwrap();
        assert_eq!(range.label, "$40 to 59");
        assert_eq!(range.bounds, [40.0, 59.0]);
    }

    #[test]
    fn unknown_id_is_not_found() {
        assert!(matches!(price_range(42), Err(DomainError::NotFound(_))));
    }
}
