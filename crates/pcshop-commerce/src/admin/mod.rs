//! Admin product editor.

mod form;
mod images;
pub mod options;

pub use form::{FormValue, ProductForm, ProductPayload};
pub use images::{ImageEntry, ImageEntryId, ImageSet, ImageSource, NewImage};
pub use options::{brand_options, usage_options};
