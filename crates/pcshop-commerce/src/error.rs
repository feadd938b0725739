//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in storefront operations.
///
/// Filtering and schema lookups never produce these; they degrade to empty
/// results instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommerceError {
    /// Product cannot be selected because nothing is in stock.
    #[error("Product out of stock: {0}")]
    OutOfStock(String),

    /// A bulk operation was requested on a build with no filled slots.
    #[error("PC build has no selected components")]
    EmptyBuild,

    /// Item not in cart.
    #[error("Item not in cart: {0}")]
    ItemNotInCart(String),

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Quantity exceeds maximum allowed.
    #[error("Quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(i64, i64),

    /// Product has no usable price.
    #[error("Product has no price: {0}")]
    MissingPrice(String),

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Image entry not found in the editor's image set.
    #[error("Image not found: {0}")]
    ImageNotFound(u32),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}
