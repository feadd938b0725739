//! Product and snapshot types.
//!
//! `Product` mirrors the JSON the REST API returns. Decoding is lenient: one
//! malformed field (a price sent as `"abc"`, a `null` brand, a negative stock)
//! becomes an absent value instead of failing the whole catalog response, and
//! the filters then treat the absent value as a non-match.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::catalog::{specs_fields, Category, PartKind};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", from = "ProductRecord")]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Selling price in VND.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
    /// Price before discount.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_price: Option<i64>,
    /// Raw stored category value (may be an alias such as `linh kien`).
    pub category: String,
    /// Part sub-category for parts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<String>,
    /// Legacy type tag some parts carry instead of `subCategory`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub part_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Free-form usage tag(s); lists are joined with ", ".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Image paths, first one is the cover.
    pub images: Vec<String>,
    /// Units in stock.
    pub stock: u32,
    /// Technical specification values keyed by schema field name.
    pub specs: BTreeMap<String, String>,
}

/// Wire shape of a product. Mongo documents may carry `_id`, `id`, or both
/// (when virtuals are serialized), so the two are decoded separately.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductRecord {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    id: Option<String>,
    #[serde(rename = "_id", default, deserialize_with = "lenient::opt_string")]
    mongo_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    name: String,
    #[serde(default, deserialize_with = "lenient::price")]
    price: Option<i64>,
    #[serde(default, deserialize_with = "lenient::price")]
    old_price: Option<i64>,
    #[serde(default, deserialize_with = "lenient::string")]
    category: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    sub_category: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "lenient::opt_string")]
    part_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    brand: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    usage: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    description: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    images: Vec<String>,
    #[serde(default, deserialize_with = "lenient::stock")]
    stock: u32,
    #[serde(default, deserialize_with = "lenient::specs")]
    specs: BTreeMap<String, String>,
}

impl From<ProductRecord> for Product {
    fn from(record: ProductRecord) -> Self {
        Self {
            id: record.id.or(record.mongo_id).map(ProductId::from).unwrap_or_default(),
            name: record.name,
            price: record.price,
            old_price: record.old_price,
            category: record.category,
            sub_category: record.sub_category,
            part_type: record.part_type,
            brand: record.brand,
            usage: record.usage,
            description: record.description,
            images: record.images,
            stock: record.stock,
            specs: record.specs,
        }
    }
}

impl Product {
    /// Decode a catalog listing entry by entry. Entries that are not product
    /// records (a `null`, a bare string) are dropped instead of failing the list.
    pub fn from_values(values: Vec<Value>) -> Vec<Product> {
        let total = values.len();
        let products: Vec<Product> = values
            .into_iter()
            .filter(Value::is_object)
            .filter_map(|value| serde_json::from_value(value).ok())
            .collect();
        if products.len() < total {
            debug!(skipped = total - products.len(), "dropped malformed catalog entries");
        }
        products
    }

    /// Create a product with the required fields set.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            ..Default::default()
        }
    }

    pub fn with_price(mut self, price: i64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn with_sub_category(mut self, sub: impl Into<String>) -> Self {
        self.sub_category = Some(sub.into());
        self
    }

    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = Some(usage.into());
        self
    }

    pub fn with_stock(mut self, stock: u32) -> Self {
        self.stock = stock;
        self
    }

    pub fn with_spec(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.specs.insert(name.into(), value.into());
        self
    }

    /// Parsed category, `None` for values outside the known set.
    pub fn category_kind(&self) -> Option<Category> {
        Category::from_str(&self.category)
    }

    /// Parsed part kind from `subCategory`, falling back to the legacy `type`.
    pub fn part_kind(&self) -> Option<PartKind> {
        self.sub_category
            .as_deref()
            .and_then(PartKind::from_str)
            .or_else(|| self.part_type.as_deref().and_then(PartKind::from_str))
    }

    pub fn price_money(&self) -> Option<Money> {
        self.price.map(Money::vnd)
    }

    pub fn old_price_money(&self) -> Option<Money> {
        self.old_price.map(Money::vnd)
    }

    /// Check if the product is on sale (old price above current price).
    pub fn is_on_sale(&self) -> bool {
        matches!((self.price, self.old_price), (Some(p), Some(old)) if old > p)
    }

    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Cover image path.
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Capture the minimal copy used by the builder and the cart.
    pub fn snapshot(&self) -> Result<ProductSnapshot, CommerceError> {
        let price = self
            .price_money()
            .ok_or_else(|| CommerceError::MissingPrice(self.id.to_string()))?;
        Ok(ProductSnapshot {
            id: self.id.clone(),
            name: self.name.clone(),
            price,
            image: self.primary_image().map(str::to_string),
            brand: self.brand.clone(),
        })
    }

    /// Spec keys that the schema for this product's category does not define.
    pub fn unknown_spec_keys(&self) -> Vec<&str> {
        let fields = match self.category_kind() {
            Some(category) => specs_fields(category, self.part_kind()),
            None => &[],
        };
        self.specs
            .keys()
            .filter(|key| !fields.iter().any(|f| f.name == key.as_str()))
            .map(String::as_str)
            .collect()
    }
}

/// Minimal denormalized copy of a product captured at selection time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductSnapshot {
    pub id: ProductId,
    pub name: String,
    pub price: Money,
    pub image: Option<String>,
    pub brand: Option<String>,
}

/// Field decoders that turn malformed values into absent ones.
mod lenient {
    use std::collections::BTreeMap;

    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    fn scalar_to_string(value: Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Array(items) => {
                let parts: Vec<String> = items
                    .into_iter()
                    .filter_map(scalar_to_string)
                    .filter(|s| !s.trim().is_empty())
                    .collect();
                if parts.is_empty() {
                    None
                } else {
                    Some(parts.join(", "))
                }
            }
            Value::Null | Value::Object(_) => None,
        }
    }

    pub fn string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Ok(scalar_to_string(Value::deserialize(d)?).unwrap_or_default())
    }

    pub fn opt_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(scalar_to_string(Value::deserialize(d)?).filter(|s| !s.trim().is_empty()))
    }

    pub fn price<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
        let parsed = match Value::deserialize(d)? {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.round() as i64)),
            Value::String(s) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .map(|f| f.round() as i64),
            _ => None,
        };
        Ok(parsed)
    }

    pub fn stock<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
        let parsed = match Value::deserialize(d)? {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f as i64)),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        };
        Ok(parsed
            .map(|n| n.clamp(0, i64::from(u32::MAX)) as u32)
            .unwrap_or(0))
    }

    pub fn string_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
        let list = match Value::deserialize(d)? {
            Value::Array(items) => items
                .into_iter()
                .filter_map(|v| match v {
                    Value::String(s) if !s.trim().is_empty() => Some(s),
                    _ => None,
                })
                .collect(),
            Value::String(s) if !s.trim().is_empty() => vec![s],
            _ => Vec::new(),
        };
        Ok(list)
    }

    pub fn specs<'de, D: Deserializer<'de>>(d: D) -> Result<BTreeMap<String, String>, D::Error> {
        let map = match Value::deserialize(d)? {
            Value::Object(entries) => entries
                .into_iter()
                .filter_map(|(k, v)| scalar_to_string(v).map(|s| (k, s)))
                .collect(),
            _ => BTreeMap::new(),
        };
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_api_product() {
        let json = r#"{
            "_id": "65f0a1",
            "name": "Intel Core i5-13400F",
            "price": 4590000,
            "oldPrice": 4990000,
            "category": "parts",
            "subCategory": "cpu",
            "brand": "Intel",
            "images": ["/uploads/i5.jpg", "/uploads/i5-box.jpg"],
            "stock": 12,
            "specs": { "socket": "LGA1700", "cores": 10 }
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();

        assert_eq!(product.id.as_str(), "65f0a1");
        assert_eq!(product.price, Some(4_590_000));
        assert!(product.is_on_sale());
        assert_eq!(product.part_kind(), Some(PartKind::Cpu));
        assert_eq!(product.primary_image(), Some("/uploads/i5.jpg"));
        assert_eq!(product.specs.get("cores").map(String::as_str), Some("10"));
    }

    #[test]
    fn test_malformed_fields_become_absent() {
        let json = r#"{
            "id": "x1",
            "name": "Mystery box",
            "price": "not-a-number",
            "category": "laptop",
            "brand": null,
            "stock": -4,
            "specs": null,
            "images": "single.png"
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();

        assert_eq!(product.price, None);
        assert_eq!(product.brand, None);
        assert_eq!(product.stock, 0);
        assert!(product.specs.is_empty());
        assert_eq!(product.images, vec!["single.png".to_string()]);
    }

    #[test]
    fn test_both_ids_prefer_virtual_id() {
        let product: Product = serde_json::from_str(
            r#"{"_id":"65a1","id":"65a1-v","name":"Swift 3","category":"laptop"}"#,
        )
        .unwrap();
        assert_eq!(product.id.as_str(), "65a1-v");

        let product: Product =
            serde_json::from_str(r#"{"_id":"65a1","id":null,"category":"laptop"}"#).unwrap();
        assert_eq!(product.id.as_str(), "65a1");
    }

    #[test]
    fn test_numeric_id_is_stringified() {
        let products: Vec<Product> = serde_json::from_str(
            r#"[{"id":7,"name":"Ryzen 5","category":"parts"},{"id":"2","category":"monitor"}]"#,
        )
        .unwrap();
        assert_eq!(products[0].id.as_str(), "7");
        assert_eq!(products[1].id.as_str(), "2");
    }

    #[test]
    fn test_from_values_drops_non_records() {
        let values: Vec<Value> = serde_json::from_str(
            r#"[{"_id":"1","name":"Swift 3","category":"laptop"}, null, "oops", 42,
                {"_id":"2","id":"2","name":"VG27","category":"monitor"}]"#,
        )
        .unwrap();
        let products = Product::from_values(values);
        let ids: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn test_serialized_product_decodes_back() {
        let product = Product::new("p9", "B650 board", "parts")
            .with_sub_category("mainboard")
            .with_price(3_500_000);
        let json = serde_json::to_string(&product).unwrap();
        assert!(json.contains(r#""subCategory":"mainboard""#));
        assert_eq!(serde_json::from_str::<Product>(&json).unwrap(), product);
    }

    #[test]
    fn test_numeric_string_price_is_accepted() {
        let product: Product =
            serde_json::from_str(r#"{"id":"p","price":" 1500000 ","category":"monitor"}"#).unwrap();
        assert_eq!(product.price, Some(1_500_000));
    }

    #[test]
    fn test_usage_list_is_joined() {
        let product: Product = serde_json::from_str(
            r#"{"id":"p","category":"laptop","usage":["Gaming","Graphics Design"]}"#,
        )
        .unwrap();
        assert_eq!(product.usage.as_deref(), Some("Gaming, Graphics Design"));
    }

    #[test]
    fn test_part_kind_falls_back_to_legacy_type() {
        let product: Product =
            serde_json::from_str(r#"{"id":"p","category":"linh kien","type":"ram"}"#).unwrap();
        assert_eq!(product.category_kind(), Some(Category::Parts));
        assert_eq!(product.part_kind(), Some(PartKind::Ram));
    }

    #[test]
    fn test_snapshot_requires_price() {
        let product = Product::new("p1", "Case", "parts");
        assert!(matches!(product.snapshot(), Err(CommerceError::MissingPrice(_))));

        let snapshot = product.with_price(900_000).with_brand("NZXT").snapshot().unwrap();
        assert_eq!(snapshot.price, Money::vnd(900_000));
        assert_eq!(snapshot.brand.as_deref(), Some("NZXT"));
        assert_eq!(snapshot.image, None);
    }

    #[test]
    fn test_unknown_spec_keys() {
        let product = Product::new("p", "RAM kit", "parts")
            .with_sub_category("ram")
            .with_spec("capacity", "16GB")
            .with_spec("rgb", "yes");
        assert_eq!(product.unknown_spec_keys(), vec!["rgb"]);
    }
}
