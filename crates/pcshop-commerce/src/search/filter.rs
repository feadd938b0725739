//! Catalog filter state and the faceted filter evaluator.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::{Category, PartKind, Product};
use crate::search::{fold, same_text};

/// Which slice of the catalog the listing shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryFilter {
    /// Every category.
    All,
    /// The PC-builder tab; it has its own flow, so the listing is always empty.
    Build,
    /// A single category.
    Only(Category),
}

impl CategoryFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Build => "build",
            CategoryFilter::Only(category) => category.as_str(),
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "all" => Some(CategoryFilter::All),
            "build" => Some(CategoryFilter::Build),
            other => Category::from_str(other).map(CategoryFilter::Only),
        }
    }

    /// The selected category, if the filter names exactly one.
    pub fn category(&self) -> Option<Category> {
        match self {
            CategoryFilter::Only(category) => Some(*category),
            _ => None,
        }
    }

    fn admits(&self, product: &Product) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Build => false,
            CategoryFilter::Only(category) => category.matches_stored(&product.category),
        }
    }
}

impl Default for CategoryFilter {
    fn default() -> Self {
        CategoryFilter::Only(Category::Laptop)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive price bounds in VND; either side may be open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct PriceRange {
    pub min: Option<i64>,
    pub max: Option<i64>,
}

impl PriceRange {
    pub fn new(min: Option<i64>, max: Option<i64>) -> Self {
        Self { min, max }
    }

    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// Check a price against the bounds.
    ///
    /// An unbounded range admits everything, including products without a
    /// price; any bound rejects a missing price.
    pub fn contains(&self, price: Option<i64>) -> bool {
        if self.is_unbounded() {
            return true;
        }
        let Some(price) = price else {
            return false;
        };
        self.min.map_or(true, |min| price >= min) && self.max.map_or(true, |max| price <= max)
    }
}

/// The catalog listing's active filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FilterState {
    pub category: CategoryFilter,
    /// Single selected brand, exact match.
    pub brand: Option<String>,
    /// Single selected usage tag, substring match.
    pub usage: Option<String>,
    /// Part type, substring match; only consulted for the parts category.
    pub part_type: Option<String>,
    /// Free-text search.
    pub search: Option<String>,
    /// Carried with the state but not applied by [`filter_products`].
    pub price_range: PriceRange,
}

impl FilterState {
    /// Create a state scoped to one category.
    pub fn for_category(category: CategoryFilter) -> Self {
        Self {
            category,
            ..Default::default()
        }
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = Some(usage.into());
        self
    }

    pub fn with_part_type(mut self, part_type: impl Into<String>) -> Self {
        self.part_type = Some(part_type.into());
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Switch category; category-scoped facets are dropped.
    pub fn set_category(&mut self, category: CategoryFilter) {
        if self.category != category {
            self.brand = None;
            self.usage = None;
            self.part_type = None;
        }
        self.category = category;
    }

    /// Select a brand chip, or clear it if it is already selected.
    pub fn toggle_brand(&mut self, brand: &str) {
        toggle(&mut self.brand, brand);
    }

    pub fn toggle_usage(&mut self, usage: &str) {
        toggle(&mut self.usage, usage);
    }

    pub fn toggle_part_type(&mut self, part_type: &str) {
        toggle(&mut self.part_type, part_type);
    }

    /// Set the search box text; blank text clears the search.
    pub fn set_search(&mut self, text: &str) {
        self.search = non_blank(text);
    }

    pub fn set_price_range(&mut self, range: PriceRange) {
        self.price_range = range;
    }

    /// Trimmed, lowercased search term if one is active.
    pub fn search_term(&self) -> Option<String> {
        active(&self.search)
    }

    /// Part kind to request from the API. The type step only applies to the
    /// parts category, so other listings never narrow by it.
    pub fn part_kind(&self) -> Option<PartKind> {
        if self.category != CategoryFilter::Only(Category::Parts) {
            return None;
        }
        self.part_type.as_deref().and_then(PartKind::from_str)
    }

    /// Check whether any facet or search narrows the listing.
    pub fn is_narrowed(&self) -> bool {
        self.search_term().is_some()
            || active(&self.brand).is_some()
            || active(&self.usage).is_some()
            || active(&self.part_type).is_some()
    }

    /// Evaluate every active step against one product.
    pub fn admits(&self, product: &Product) -> bool {
        if let Some(term) = self.search_term() {
            if !matches_search(product, &term) {
                return false;
            }
        }

        if !self.category.admits(product) {
            return false;
        }

        if let Some(brand) = active(&self.brand) {
            let matched = product
                .brand
                .as_deref()
                .is_some_and(|b| fold(b) == brand);
            if !matched {
                return false;
            }
        }

        if let Some(usage) = active(&self.usage) {
            if !contains_ci(product.usage.as_deref(), &usage) {
                return false;
            }
        }

        if self.category == CategoryFilter::Only(Category::Parts) {
            if let Some(part_type) = active(&self.part_type) {
                let matched = contains_ci(product.part_type.as_deref(), &part_type)
                    || contains_ci(product.sub_category.as_deref(), &part_type);
                if !matched {
                    return false;
                }
            }
        }

        true
    }
}

/// Filter a product list, keeping input order.
pub fn filter_products(products: &[Product], state: &FilterState) -> Vec<Product> {
    filter_product_refs(products, state).into_iter().cloned().collect()
}

/// Borrowing variant of [`filter_products`].
pub fn filter_product_refs<'a>(products: &'a [Product], state: &FilterState) -> Vec<&'a Product> {
    if state.category == CategoryFilter::Build {
        return Vec::new();
    }

    let visible: Vec<&Product> = products.iter().filter(|p| state.admits(p)).collect();

    tracing::debug!(
        category = %state.category,
        input = products.len(),
        visible = visible.len(),
        "filtered catalog"
    );

    visible
}

fn matches_search(product: &Product, term: &str) -> bool {
    contains_ci(Some(&product.name), term)
        || contains_ci(product.brand.as_deref(), term)
        || contains_ci(Some(&product.category), term)
        || contains_ci(product.description.as_deref(), term)
}

/// `term` must already be lowercased.
fn contains_ci(haystack: Option<&str>, term: &str) -> bool {
    haystack.is_some_and(|h| h.to_lowercase().contains(term))
}

fn active(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(fold)
        .filter(|v| !v.is_empty())
}

fn non_blank(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn toggle(slot: &mut Option<String>, value: &str) {
    let Some(value) = non_blank(value) else {
        *slot = None;
        return;
    };
    let already = slot
        .as_deref()
        .is_some_and(|current| same_text(current, &value));
    *slot = if already { None } else { Some(value) };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Product> {
        vec![
            Product::new("1", "Dell Inspiron 15", "laptop")
                .with_brand("Dell")
                .with_usage("Office, Student")
                .with_price(10),
            Product::new("2", "Core i5-13400F", "parts")
                .with_brand("Intel")
                .with_sub_category("cpu")
                .with_price(20),
            Product::new("3", "Kingston Fury 16GB", "linh kien")
                .with_brand("Kingston")
                .with_sub_category("ram")
                .with_price(15),
            Product::new("4", "ASUS TUF Gaming", "laptop")
                .with_brand("ASUS")
                .with_usage("Gaming")
                .with_price(30),
            Product::new("5", "LG UltraGear 27", "monitor")
                .with_brand("LG")
                .with_price(25),
            Product::new("6", "Unbranded fan", "accessory").with_sub_category("cooling"),
        ]
    }

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.id.to_string()).collect()
    }

    #[test]
    fn test_parts_scenario() {
        let products = vec![
            Product::new("a", "Laptop", "laptop").with_brand("Dell").with_price(10),
            Product::new("b", "CPU", "parts")
                .with_sub_category("cpu")
                .with_brand("Intel")
                .with_price(20),
        ];
        let state = FilterState::for_category(CategoryFilter::Only(Category::Parts));
        let visible = filter_products(&products, &state);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id.as_str(), "b");
    }

    #[test]
    fn test_parts_matches_every_alias() {
        let products = catalog();
        let state = FilterState::for_category(CategoryFilter::Only(Category::Parts));
        assert_eq!(ids(&filter_product_refs(&products, &state)), vec!["2", "3", "6"]);
    }

    #[test]
    fn test_all_category_with_search_only() {
        let products = catalog();
        let state = FilterState::for_category(CategoryFilter::All).with_search("  GAMING ");
        assert_eq!(ids(&filter_product_refs(&products, &state)), vec!["4"]);

        let everything = FilterState::for_category(CategoryFilter::All);
        assert_eq!(filter_product_refs(&products, &everything).len(), products.len());
    }

    #[test]
    fn test_search_matches_brand_category_and_description() {
        let mut products = catalog();
        products[4].description = Some("Fast IPS panel".to_string());
        let all = |term: &str| {
            let state = FilterState::for_category(CategoryFilter::All).with_search(term);
            ids(&filter_product_refs(&products, &state))
        };
        assert_eq!(all("kingston"), vec!["3"]);
        assert_eq!(all("monitor"), vec!["5"]);
        assert_eq!(all("ips panel"), vec!["5"]);
        assert!(all("no such thing").is_empty());
    }

    #[test]
    fn test_build_category_is_always_empty() {
        let products = catalog();
        let state = FilterState::for_category(CategoryFilter::Build);
        assert!(filter_products(&products, &state).is_empty());
    }

    #[test]
    fn test_brand_is_exact_case_insensitive() {
        let products = catalog();
        let state = FilterState::default().with_brand("dell");
        assert_eq!(ids(&filter_product_refs(&products, &state)), vec!["1"]);

        let partial = FilterState::default().with_brand("del");
        assert!(filter_product_refs(&products, &partial).is_empty());
    }

    #[test]
    fn test_missing_brand_excludes_item() {
        let products = catalog();
        let state = FilterState::for_category(CategoryFilter::Only(Category::Parts)).with_brand("intel");
        assert_eq!(ids(&filter_product_refs(&products, &state)), vec!["2"]);
    }

    #[test]
    fn test_usage_is_substring() {
        let products = catalog();
        let state = FilterState::default().with_usage("student");
        assert_eq!(ids(&filter_product_refs(&products, &state)), vec!["1"]);
    }

    #[test]
    fn test_type_only_applies_to_parts() {
        let products = catalog();
        let parts = FilterState::for_category(CategoryFilter::Only(Category::Parts)).with_part_type("ram");
        assert_eq!(ids(&filter_product_refs(&products, &parts)), vec!["3"]);

        let laptops = FilterState::default().with_part_type("ram");
        assert_eq!(ids(&filter_product_refs(&products, &laptops)), vec!["1", "4"]);
    }

    #[test]
    fn test_price_range_is_not_applied() {
        let products = catalog();
        let mut state = FilterState::default();
        state.set_price_range(PriceRange::new(Some(1000), Some(2000)));
        assert_eq!(filter_product_refs(&products, &state).len(), 2);
    }

    #[test]
    fn test_filter_is_idempotent_and_order_preserving() {
        let products = catalog();
        let state = FilterState::for_category(CategoryFilter::All).with_search("i");
        let first = filter_products(&products, &state);
        let second = filter_products(&products, &state);
        assert_eq!(first, second);

        let positions: Vec<usize> = first
            .iter()
            .map(|p| products.iter().position(|q| q.id == p.id).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_toggle_brand() {
        let mut state = FilterState::default();
        state.toggle_brand("Dell");
        assert_eq!(state.brand.as_deref(), Some("Dell"));
        state.toggle_brand("dell");
        assert_eq!(state.brand, None);
        state.toggle_brand("ASUS");
        state.toggle_brand("Dell");
        assert_eq!(state.brand.as_deref(), Some("Dell"));
    }

    #[test]
    fn test_non_ascii_brand_toggles_and_matches() {
        let products = vec![Product::new("v1", "Tai nghe", "parts").with_brand("ĐẠI VIỆT")];
        let mut state = FilterState::for_category(CategoryFilter::Only(Category::Parts));
        state.toggle_brand("Đại Việt");
        assert_eq!(ids(&filter_product_refs(&products, &state)), vec!["v1"]);

        state.toggle_brand("ĐẠI VIỆT");
        assert_eq!(state.brand, None);
    }

    #[test]
    fn test_part_kind_only_for_parts() {
        let parts = FilterState::for_category(CategoryFilter::Only(Category::Parts)).with_part_type("ram");
        assert_eq!(parts.part_kind(), Some(PartKind::Ram));

        let all = FilterState::for_category(CategoryFilter::All).with_part_type("ram");
        assert_eq!(all.part_kind(), None);
        let laptops = FilterState::default().with_part_type("ram");
        assert_eq!(laptops.part_kind(), None);
    }

    #[test]
    fn test_is_narrowed() {
        assert!(!FilterState::default().is_narrowed());
        assert!(!FilterState::default().with_search("   ").is_narrowed());
        assert!(FilterState::default().with_usage("Gaming").is_narrowed());
    }

    #[test]
    fn test_set_category_clears_facets() {
        let mut state = FilterState::default().with_brand("Dell").with_usage("Gaming");
        state.set_category(CategoryFilter::Only(Category::Monitor));
        assert_eq!(state.brand, None);
        assert_eq!(state.usage, None);

        state.toggle_brand("LG");
        state.set_category(CategoryFilter::Only(Category::Monitor));
        assert_eq!(state.brand.as_deref(), Some("LG"));
    }

    #[test]
    fn test_price_range_contains() {
        let range = PriceRange::new(Some(15), Some(100));
        assert!(range.contains(Some(15)));
        assert!(range.contains(Some(100)));
        assert!(!range.contains(Some(10)));
        assert!(!range.contains(None));
        assert!(PriceRange::default().contains(None));
        assert!(PriceRange::new(None, Some(5)).contains(Some(-1)));
    }
}
