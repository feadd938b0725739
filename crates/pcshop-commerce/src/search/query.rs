//! Query-string serialization of the filter state.
//!
//! The listing keeps its [`FilterState`] in the page URL so it survives
//! navigation and can be shared. The state value is the source of truth; the
//! query string is one encoding of it.

use url::form_urlencoded;

use crate::search::{CategoryFilter, FilterState, PriceRange};

const KEY_CATEGORY: &str = "category";
const KEY_BRAND: &str = "brand";
const KEY_USAGE: &str = "usage";
const KEY_TYPE: &str = "type";
const KEY_SEARCH: &str = "search";
const KEY_MIN_PRICE: &str = "minPrice";
const KEY_MAX_PRICE: &str = "maxPrice";

impl FilterState {
    /// Parse a URL query string (with or without the leading `?`).
    ///
    /// Unknown keys are ignored, empty values count as absent, and an
    /// unrecognized category falls back to the default.
    pub fn from_query_string(qs: &str) -> Self {
        let mut state = FilterState::default();
        let qs = qs.strip_prefix('?').unwrap_or(qs);

        for (key, value) in form_urlencoded::parse(qs.as_bytes()) {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            match key.as_ref() {
                KEY_CATEGORY => state.category = CategoryFilter::from_str(value).unwrap_or_default(),
                KEY_BRAND => state.brand = Some(value.to_string()),
                KEY_USAGE => state.usage = Some(value.to_string()),
                KEY_TYPE => state.part_type = Some(value.to_string()),
                KEY_SEARCH => state.search = Some(value.to_string()),
                KEY_MIN_PRICE => state.price_range.min = value.parse().ok(),
                KEY_MAX_PRICE => state.price_range.max = value.parse().ok(),
                _ => {}
            }
        }

        state
    }

    /// Encode as a query string without the leading `?`.
    ///
    /// `category` is always present; absent fields are omitted.
    pub fn to_query_string(&self) -> String {
        let mut out = form_urlencoded::Serializer::new(String::new());
        out.append_pair(KEY_CATEGORY, self.category.as_str());

        let optional = [
            (KEY_BRAND, &self.brand),
            (KEY_USAGE, &self.usage),
            (KEY_TYPE, &self.part_type),
            (KEY_SEARCH, &self.search),
        ];
        for (key, value) in optional {
            if let Some(value) = value.as_deref().filter(|v| !v.trim().is_empty()) {
                out.append_pair(key, value);
            }
        }

        let PriceRange { min, max } = self.price_range;
        if let Some(min) = min {
            out.append_pair(KEY_MIN_PRICE, &min.to_string());
        }
        if let Some(max) = max {
            out.append_pair(KEY_MAX_PRICE, &max.to_string());
        }

        out.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;

    #[test]
    fn test_parse_full_query() {
        let state = FilterState::from_query_string(
            "?category=parts&brand=Intel&type=cpu&search=core+i5&minPrice=100&maxPrice=900",
        );
        assert_eq!(state.category, CategoryFilter::Only(Category::Parts));
        assert_eq!(state.brand.as_deref(), Some("Intel"));
        assert_eq!(state.part_type.as_deref(), Some("cpu"));
        assert_eq!(state.search.as_deref(), Some("core i5"));
        assert_eq!(state.price_range, PriceRange::new(Some(100), Some(900)));
    }

    #[test]
    fn test_defaults_and_unknown_keys() {
        let state = FilterState::from_query_string("page=2&brand=&sort=price");
        assert_eq!(state, FilterState::default());
        assert_eq!(state.category, CategoryFilter::Only(Category::Laptop));
    }

    #[test]
    fn test_unknown_category_falls_back_to_default() {
        let state = FilterState::from_query_string("category=furniture");
        assert_eq!(state.category, CategoryFilter::default());
    }

    #[test]
    fn test_percent_decoding_handles_utf8() {
        let state = FilterState::from_query_string("category=linh%20kien&search=b%C3%A0n+ph%C3%ADm");
        assert_eq!(state.category, CategoryFilter::Only(Category::Parts));
        assert_eq!(state.search.as_deref(), Some("bàn phím"));
    }

    #[test]
    fn test_encode_omits_absent_fields() {
        let state = FilterState::for_category(CategoryFilter::All);
        assert_eq!(state.to_query_string(), "category=all");

        let state = FilterState::default().with_brand("ASUS").with_search("tuf gaming");
        assert_eq!(state.to_query_string(), "category=laptop&brand=ASUS&search=tuf+gaming");
    }

    #[test]
    fn test_encode_then_parse_preserves_state() {
        let mut state = FilterState::for_category(CategoryFilter::Only(Category::Parts))
            .with_brand("G.Skill")
            .with_part_type("ram")
            .with_search("ddr5 & rgb");
        state.set_price_range(PriceRange::new(None, Some(3_000_000)));

        assert_eq!(FilterState::from_query_string(&state.to_query_string()), state);
    }
}
