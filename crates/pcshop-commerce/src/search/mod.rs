//! Search module.
//!
//! Contains the listing filter state, the faceted filter evaluator, facet
//! option lists, and the builder picker's sub-filter.

mod facets;
mod filter;
mod picker;
mod query;

pub use facets::{brand_facet, distinct_brands, Facet, FacetValue};
pub use filter::{filter_product_refs, filter_products, CategoryFilter, FilterState, PriceRange};
pub use picker::PickerFilter;

/// Trimmed, Unicode-lowercased form used for every case-insensitive facet
/// comparison.
pub(crate) fn fold(text: &str) -> String {
    text.trim().to_lowercase()
}

pub(crate) fn same_text(a: &str, b: &str) -> bool {
    fold(a) == fold(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_text_folds_non_ascii() {
        assert!(same_text(" Điện Máy Xanh ", "điện máy xanh"));
        assert!(same_text("ÉLITE", "élite"));
        assert!(!same_text("Dell", "Del"));
    }
}
