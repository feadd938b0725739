//! Shopping cart module.
//!
//! The session cart that single "add to cart" clicks and the PC-builder's bulk
//! hand-off both land in.

mod cart;

pub use cart::{Cart, LineItem, MAX_QUANTITY_PER_ITEM};
