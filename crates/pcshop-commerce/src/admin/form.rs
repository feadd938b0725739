//! Product editor form binder.
//!
//! Binds a product to an editable form whose technical inputs come from the
//! specification schema of the current category and part kind, and flattens
//! the form into the multipart payload the product API accepts.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::admin::images::{ImageSet, NewImage};
use crate::admin::options::{brand_options, usage_options};
use crate::catalog::{specs_fields, Category, FieldDescriptor, PartKind, Product};
use crate::error::CommerceError;
use crate::ids::ProductId;

/// One part of a flattened form submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum FormValue {
    Text(String),
    File(NewImage),
}

/// Flattened form submission, parts in submission order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProductPayload {
    pub parts: Vec<(String, FormValue)>,
}

impl ProductPayload {
    fn push_text(&mut self, name: &str, value: impl Into<String>) {
        self.parts.push((name.to_string(), FormValue::Text(value.into())));
    }

    fn push_opt(&mut self, name: &str, value: Option<&str>) {
        if let Some(v) = value.map(str::trim).filter(|v| !v.is_empty()) {
            self.push_text(name, v);
        }
    }

    /// First text part with this name.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|(n, v)| match v {
            FormValue::Text(t) if n == name => Some(t.as_str()),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = (&str, &str)> {
        self.parts.iter().filter_map(|(n, v)| match v {
            FormValue::Text(t) => Some((n.as_str(), t.as_str())),
            FormValue::File(_) => None,
        })
    }

    pub fn files(&self) -> impl Iterator<Item = (&str, &NewImage)> {
        self.parts.iter().filter_map(|(n, v)| match v {
            FormValue::File(f) => Some((n.as_str(), f)),
            FormValue::Text(_) => None,
        })
    }
}

/// Editable state of a product in the admin editor.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductForm {
    /// Set when editing an existing product.
    pub product_id: Option<ProductId>,
    pub name: String,
    pub price: Option<i64>,
    pub old_price: Option<i64>,
    category: Category,
    part_kind: Option<PartKind>,
    pub brand: Option<String>,
    pub usage: Option<String>,
    pub description: Option<String>,
    pub stock: u32,
    specs: BTreeMap<String, String>,
    pub images: ImageSet,
}

impl ProductForm {
    /// Blank form for a new product.
    pub fn new(category: Category) -> Self {
        Self {
            product_id: None,
            name: String::new(),
            price: None,
            old_price: None,
            category,
            part_kind: None,
            brand: None,
            usage: None,
            description: None,
            stock: 0,
            specs: BTreeMap::new(),
            images: ImageSet::new(),
        }
    }

    /// Seed the form from a stored product.
    ///
    /// The whole specs map is carried over, including keys the schema doesn't
    /// define; those are not rendered but are submitted back unchanged.
    pub fn from_product(product: &Product) -> Self {
        let category = product.category_kind().unwrap_or_else(|| {
            debug!(category = %product.category, "unknown stored category, editing as default");
            Category::default()
        });
        let part_kind = match category {
            Category::Parts => product.part_kind(),
            _ => None,
        };

        let unknown = product.unknown_spec_keys();
        if !unknown.is_empty() {
            debug!(product = %product.id, keys = ?unknown, "preserving specs outside the schema");
        }

        Self {
            product_id: Some(product.id.clone()),
            name: product.name.clone(),
            price: product.price,
            old_price: product.old_price,
            category,
            part_kind,
            brand: product.brand.clone(),
            usage: product.usage.clone(),
            description: product.description.clone(),
            stock: product.stock,
            specs: product.specs.clone(),
            images: ImageSet::from_urls(product.images.iter().cloned()),
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn part_kind(&self) -> Option<PartKind> {
        self.part_kind
    }

    /// Schema inputs for the current category, paired with their values.
    pub fn fields(&self) -> Vec<(&'static FieldDescriptor, &str)> {
        specs_fields(self.category, self.part_kind)
            .iter()
            .map(|f| (f, self.spec(f.name).unwrap_or("")))
            .collect()
    }

    pub fn spec(&self, name: &str) -> Option<&str> {
        self.specs.get(name).map(String::as_str)
    }

    pub fn specs(&self) -> &BTreeMap<String, String> {
        &self.specs
    }

    pub fn set_spec(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.specs.insert(name.into(), value.into());
    }

    /// Switch category. Leaving parts clears the part kind; a brand not offered
    /// for the new category is cleared, as is usage outside laptops.
    pub fn set_category(&mut self, category: Category) {
        if category == self.category {
            return;
        }
        self.category = category;
        if category != Category::Parts {
            self.part_kind = None;
        }
        if let Some(brand) = &self.brand {
            if !brand_options(category).contains(&brand.as_str()) {
                self.brand = None;
            }
        }
        if usage_options(category).is_empty() {
            self.usage = None;
        }
    }

    pub fn set_part_kind(&mut self, kind: Option<PartKind>) {
        self.part_kind = kind;
    }

    pub fn brand_options(&self) -> &'static [&'static str] {
        brand_options(self.category)
    }

    pub fn usage_options(&self) -> &'static [&'static str] {
        usage_options(self.category)
    }

    pub fn validate(&self) -> Result<(), CommerceError> {
        if self.name.trim().is_empty() {
            return Err(CommerceError::Validation("name is required".into()));
        }
        match self.price {
            None => return Err(CommerceError::Validation("price is required".into())),
            Some(p) if p < 0 => {
                return Err(CommerceError::Validation(format!("price must not be negative: {}", p)))
            }
            Some(_) => {}
        }
        if let Some(old) = self.old_price {
            if old < 0 {
                return Err(CommerceError::Validation(format!(
                    "old price must not be negative: {}",
                    old
                )));
            }
        }
        if self.category == Category::Parts && self.part_kind.is_none() {
            return Err(CommerceError::Validation("parts need a sub-category".into()));
        }
        Ok(())
    }

    /// Flatten into the multipart submission.
    pub fn to_payload(&self) -> Result<ProductPayload, CommerceError> {
        self.validate()?;

        let mut payload = ProductPayload::default();
        payload.push_text("name", self.name.trim());
        if let Some(price) = self.price {
            payload.push_text("price", price.to_string());
        }
        if let Some(old) = self.old_price {
            payload.push_text("oldPrice", old.to_string());
        }
        payload.push_text("category", self.category.as_str());
        if let Some(kind) = self.part_kind {
            payload.push_text("subCategory", kind.as_str());
        }
        payload.push_opt("brand", self.brand.as_deref());
        payload.push_opt("usage", self.usage.as_deref());
        payload.push_opt("description", self.description.as_deref());
        payload.push_text("stock", self.stock.to_string());

        // BTreeMap iteration is key-sorted
        for (key, value) in &self.specs {
            if !value.trim().is_empty() {
                payload.push_text(key, value.trim());
            }
        }

        let kept = serde_json::to_string(&self.images.kept_urls())?;
        payload.push_text("keptImages", kept);

        for image in self.images.new_files() {
            payload
                .parts
                .push(("images".to_string(), FormValue::File(image.clone())));
        }

        Ok(payload)
    }
}
