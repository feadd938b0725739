//! Facet option lists for the filter sidebar.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::search::same_text;

/// Distinct brand values in first-occurrence order.
///
/// Values are trimmed; empty and missing brands are skipped; duplicates are
/// compared exactly.
pub fn distinct_brands(products: &[Product]) -> Vec<String> {
    let mut brands: Vec<String> = Vec::new();
    for brand in products.iter().filter_map(|p| p.brand.as_deref()) {
        let brand = brand.trim();
        if !brand.is_empty() && !brands.iter().any(|b| b == brand) {
            brands.push(brand.to_string());
        }
    }
    brands
}

/// Build the brand facet with per-brand counts.
pub fn brand_facet(products: &[Product], selected: Option<&str>) -> Facet {
    let mut facet = Facet::terms("Brand", "brand");
    for brand in distinct_brands(products) {
        let count = products
            .iter()
            .filter(|p| p.brand.as_deref().map(str::trim) == Some(brand.as_str()))
            .count();
        let is_selected = selected.is_some_and(|s| same_text(s, &brand));
        facet.add_value(brand, count, is_selected);
    }
    facet
}

/// A facet for filtering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Facet {
    /// Facet name (e.g., "Brand").
    pub name: String,
    /// Query key this facet filters on.
    pub field: String,
    /// Facet values.
    pub values: Vec<FacetValue>,
}

impl Facet {
    /// Create a new terms facet.
    pub fn terms(name: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field: field.into(),
            values: Vec::new(),
        }
    }

    /// Add a value to the facet.
    pub fn add_value(&mut self, value: impl Into<String>, count: usize, selected: bool) {
        self.values.push(FacetValue {
            value: value.into(),
            count,
            selected,
        });
    }

    pub fn selected(&self) -> Option<&FacetValue> {
        self.values.iter().find(|v| v.selected)
    }
}

/// A single facet value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FacetValue {
    pub value: String,
    /// Number of products carrying this value.
    pub count: usize,
    /// Whether currently selected.
    pub selected: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn products() -> Vec<Product> {
        vec![
            Product::new("1", "a", "parts").with_brand("Intel"),
            Product::new("2", "b", "parts").with_brand("AMD"),
            Product::new("3", "c", "parts"),
            Product::new("4", "d", "parts").with_brand("Intel"),
            Product::new("5", "e", "parts").with_brand("   "),
            Product::new("6", "f", "parts").with_brand(" MSI "),
        ]
    }

    #[test]
    fn test_distinct_brands_first_occurrence_order() {
        let products = products();
        let brands = distinct_brands(&products);
        assert_eq!(brands, vec!["Intel", "AMD", "MSI"]);
        assert!(brands.len() <= products.len());
        assert!(brands.iter().all(|b| !b.is_empty()));
    }

    #[test]
    fn test_distinct_brands_empty_input() {
        assert!(distinct_brands(&[]).is_empty());
    }

    #[test]
    fn test_brand_facet_counts_and_selection() {
        let facet = brand_facet(&products(), Some("amd"));
        assert_eq!(facet.values.len(), 3);
        assert_eq!(facet.values[0].count, 2);
        assert_eq!(facet.selected().map(|v| v.value.as_str()), Some("AMD"));
    }
}
