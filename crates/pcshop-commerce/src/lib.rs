//! Storefront domain types and logic for PCShop.
//!
//! This crate holds the client-side logic that sits between the product REST API
//! and the storefront views:
//!
//! - **Catalog**: Products, categories, part kinds, and the specification schema registry
//! - **Search**: Filter state, the faceted filter evaluator, brand facets, the builder picker filter
//! - **Builder**: The eight-slot PC-builder selection state machine
//! - **Cart**: Session cart receiving single and bulk additions
//! - **Admin**: The product editor form binder and image reconciliation
//!
//! Everything here is synchronous and side-effect free apart from the mutations
//! callers ask for explicitly.
//!
//! # Example
//!
//! ```rust,ignore
//! use pcshop_commerce::prelude::*;
//!
//! let products: Vec<Product> = serde_json::from_str(json)?;
//!
//! let state = FilterState::from_query_string("category=parts&brand=intel");
//! let visible = filter_products(&products, &state);
//!
//! let mut build = PcBuild::new();
//! build.select_product(BuildSlot::Cpu, &visible[0])?;
//!
//! let mut cart = Cart::new("session-1");
//! let report = build.add_all_to_cart(&mut cart)?;
//! println!("Cart total: {}", cart.subtotal()?.display());
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod admin;
pub mod builder;
pub mod cart;
pub mod catalog;
pub mod search;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{
        get_specs_fields, specs_fields, Category, FieldDescriptor, PartKind, Product,
        ProductSnapshot, SpecSchema,
    };

    // Search
    pub use crate::search::{
        brand_facet, distinct_brands, filter_product_refs, filter_products, CategoryFilter,
        Facet, FacetValue, FilterState, PickerFilter, PriceRange,
    };

    // Builder
    pub use crate::builder::{
        BuildSlot, BulkAddReport, CandidateRequest, CartSink, PcBuild, SlotFailure, SlotState,
    };

    // Cart
    pub use crate::cart::{Cart, LineItem, MAX_QUANTITY_PER_ITEM};

    // Admin
    pub use crate::admin::{
        FormValue, ImageEntry, ImageEntryId, ImageSet, ImageSource, NewImage, ProductForm,
        ProductPayload,
    };
}
