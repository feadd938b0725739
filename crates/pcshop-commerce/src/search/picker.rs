//! Sub-filter used inside the PC-builder part picker.
//!
//! Unlike the catalog listing, where a brand chip is single-select and exact,
//! the picker lets the shopper tick several brands and keeps a product whose
//! brand is any of them.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::search::{same_text, PriceRange};

/// Brand set and price bounds for one picker session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PickerFilter {
    /// Ticked brands; empty means no brand restriction.
    pub selected_brands: Vec<String>,
    pub price_range: PriceRange,
}

impl PickerFilter {
    pub fn new(selected_brands: Vec<String>, price_range: PriceRange) -> Self {
        Self {
            selected_brands,
            price_range,
        }
    }

    /// Tick or untick a brand.
    pub fn toggle_brand(&mut self, brand: &str) {
        let brand = brand.trim();
        if brand.is_empty() {
            return;
        }
        let before = self.selected_brands.len();
        self.selected_brands.retain(|b| !same_text(b, brand));
        if self.selected_brands.len() == before {
            self.selected_brands.push(brand.to_string());
        }
    }

    pub fn set_price_range(&mut self, range: PriceRange) {
        self.price_range = range;
    }

    /// Back to no restriction.
    pub fn reset(&mut self) {
        self.selected_brands.clear();
        self.price_range = PriceRange::default();
    }

    pub fn admits(&self, product: &Product) -> bool {
        self.admits_brand(product) && self.price_range.contains(product.price)
    }

    fn admits_brand(&self, product: &Product) -> bool {
        if self.selected_brands.is_empty() {
            return true;
        }
        let Some(brand) = product.brand.as_deref() else {
            return false;
        };
        self.selected_brands
            .iter()
            .any(|selected| same_text(selected, brand))
    }

    /// Filter a candidate list, keeping input order.
    pub fn apply(&self, candidates: &[Product]) -> Vec<Product> {
        candidates.iter().filter(|p| self.admits(p)).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates() -> Vec<Product> {
        vec![
            Product::new("intel", "Core i5", "parts").with_brand("Intel").with_price(20),
            Product::new("amd", "Ryzen 5", "parts").with_brand("AMD").with_price(10),
            Product::new("msi", "MSI part", "parts").with_brand("MSI").with_price(30),
        ]
    }

    #[test]
    fn test_brand_set_and_price_range_scenario() {
        let filter = PickerFilter::new(
            vec!["Intel".to_string(), "AMD".to_string()],
            PriceRange::new(Some(15), Some(100)),
        );
        let visible = filter.apply(&candidates());
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id.as_str(), "intel");
    }

    #[test]
    fn test_empty_brand_set_passes_everything() {
        assert_eq!(PickerFilter::default().apply(&candidates()).len(), 3);
    }

    #[test]
    fn test_single_bound() {
        let filter = PickerFilter::new(Vec::new(), PriceRange::new(None, Some(20)));
        let ids: Vec<_> = filter.apply(&candidates()).into_iter().map(|p| p.id.into_inner()).collect();
        assert_eq!(ids, vec!["intel", "amd"]);
    }

    #[test]
    fn test_missing_price_fails_bounded_range() {
        let products = vec![Product::new("x", "No price", "parts").with_brand("Intel")];
        let bounded = PickerFilter::new(Vec::new(), PriceRange::new(Some(0), None));
        assert!(bounded.apply(&products).is_empty());
        assert_eq!(PickerFilter::default().apply(&products).len(), 1);
    }

    #[test]
    fn test_non_ascii_brand_matches_any_case() {
        let products = vec![Product::new("v", "PSU", "parts").with_brand("Đại Việt").with_price(5)];
        let mut filter = PickerFilter::default();
        filter.toggle_brand("ĐẠI VIỆT");
        assert_eq!(filter.apply(&products).len(), 1);

        filter.toggle_brand("đại việt");
        assert!(filter.selected_brands.is_empty());
    }

    #[test]
    fn test_toggle_and_reset() {
        let mut filter = PickerFilter::default();
        filter.toggle_brand("Intel");
        filter.toggle_brand("AMD");
        filter.toggle_brand("intel");
        assert_eq!(filter.selected_brands, vec!["AMD".to_string()]);

        filter.set_price_range(PriceRange::new(Some(1), None));
        filter.reset();
        assert_eq!(filter, PickerFilter::default());
    }
}
