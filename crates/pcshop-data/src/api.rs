//! Product endpoints.

use pcshop_commerce::admin::ProductPayload;
use pcshop_commerce::builder::CandidateRequest;
use pcshop_commerce::catalog::{Category, PartKind, Product};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::request::{Method, RequestBuilder};
use crate::transport::Transport;
use crate::FetchError;

/// Client for the `/products` resource.
pub struct ProductApi<T: Transport> {
    transport: T,
    base_url: Url,
    token: Option<String>,
}

impl<T: Transport> ProductApi<T> {
    /// `base_url` is the API root, e.g. `http://localhost:5000/api`.
    pub fn new(transport: T, base_url: &str) -> Result<Self, FetchError> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(FetchError::InvalidUrl(base_url.to_string()));
        }
        Ok(Self {
            transport,
            base_url,
            token: None,
        })
    }

    /// Attach a bearer token to every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, FetchError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push("products")
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder, FetchError> {
        let req = RequestBuilder::new(method, self.endpoint(segments)?).accept("application/json");
        Ok(match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        })
    }

    async fn send_json<R: DeserializeOwned>(&self, req: RequestBuilder) -> Result<R, FetchError> {
        self.transport.send(req).await?.error_for_status()?.json()
    }

    /// `GET /products?category=..&subCategory=..`
    pub async fn list_products(
        &self,
        category: Category,
        part_kind: Option<PartKind>,
    ) -> Result<Vec<Product>, FetchError> {
        let mut req = self
            .request(Method::Get, &[])?
            .query("category", category.as_str());
        if let Some(kind) = part_kind {
            req = req.query("subCategory", kind.as_str());
        }

        match self.send_json::<Vec<Value>>(req).await {
            Ok(values) => {
                let products = Product::from_values(values);
                debug!(%category, count = products.len(), "listed products");
                Ok(products)
            }
            Err(e) => {
                warn!(%category, error = %e, "product listing failed");
                Err(e)
            }
        }
    }

    /// Fetch a builder slot's candidates. The caller hands the result back to
    /// the build with the request's ticket.
    pub async fn load_candidates(
        &self,
        request: &CandidateRequest,
    ) -> Result<Vec<Product>, FetchError> {
        self.list_products(request.category, Some(request.part_kind))
            .await
    }

    /// `GET /products/{idOrSlug}`
    pub async fn get_product(&self, id_or_slug: &str) -> Result<Product, FetchError> {
        let req = self.request(Method::Get, &[id_or_slug])?;
        self.send_json(req).await
    }

    /// `POST /products` as multipart.
    pub async fn create_product(&self, payload: &ProductPayload) -> Result<Product, FetchError> {
        let req = self.request(Method::Post, &[])?.multipart(payload.clone());
        self.send_json(req).await
    }

    /// `PUT /products/{id}` as multipart.
    pub async fn update_product(
        &self,
        id: &str,
        payload: &ProductPayload,
    ) -> Result<Product, FetchError> {
        let req = self.request(Method::Put, &[id])?.multipart(payload.clone());
        self.send_json(req).await
    }

    /// `DELETE /products/{id}`
    pub async fn delete_product(&self, id: &str) -> Result<(), FetchError> {
        let req = self.request(Method::Delete, &[id])?;
        self.transport.send(req).await?.error_for_status()?;
        Ok(())
    }
}
