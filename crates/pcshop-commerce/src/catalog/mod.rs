//! Product catalog module.
//!
//! Contains products, categories, part kinds, and the specification schemas.

mod category;
mod product;
mod specs;

pub use category::{Category, PartKind, PARTS_ALIASES};
pub use product::{Product, ProductSnapshot};
pub use specs::{get_specs_fields, specs_fields, FieldDescriptor, SpecSchema};
