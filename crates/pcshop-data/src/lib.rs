//! REST client for the PCShop product API.
//!
//! Requests are described with [`RequestBuilder`] and handed to a
//! [`Transport`]; [`ReqwestTransport`] sends them over the network, and tests
//! substitute their own.
//!
//! # Example
//!
//! ```rust,ignore
//! use pcshop_data::{ProductApi, ReqwestTransport};
//! use pcshop_commerce::catalog::{Category, PartKind};
//!
//! let api = ProductApi::new(ReqwestTransport::new(), "http://localhost:5000/api")?;
//! let rams = api.list_products(Category::Parts, Some(PartKind::Ram)).await?;
//! ```

mod api;
mod error;
mod request;
mod response;
mod transport;

pub use api::ProductApi;
pub use error::{FetchError, PRODUCTS_UNAVAILABLE};
pub use request::{Body, Method, RequestBuilder};
pub use response::Response;
pub use transport::{ReqwestTransport, Transport};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FetchError, ProductApi, ReqwestTransport, Response, Transport};
}
