//! HTTP request builder.

use std::collections::BTreeMap;
use std::fmt;

use pcshop_commerce::admin::ProductPayload;
use serde::Serialize;
use url::Url;

use crate::FetchError;

/// HTTP methods used by the product API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    /// Convert to HTTP method string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request body.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Empty,
    Json(Vec<u8>),
    /// Form parts, encoded by the transport as `multipart/form-data`.
    Multipart(ProductPayload),
}

/// A fully described request, ready for a [`crate::Transport`].
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    pub(crate) method: Method,
    pub(crate) url: Url,
    pub(crate) headers: BTreeMap<String, String>,
    pub(crate) body: Body,
}

impl RequestBuilder {
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: BTreeMap::new(),
            body: Body::Empty,
        }
    }

    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Append a query parameter.
    pub fn query(mut self, key: &str, value: &str) -> Self {
        self.url.query_pairs_mut().append_pair(key, value);
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: Serialize>(mut self, value: &T) -> Result<Self, FetchError> {
        let json = serde_json::to_vec(value)?;
        self.headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        self.body = Body::Json(json);
        Ok(self)
    }

    /// Set the request body as a multipart form.
    pub fn multipart(mut self, payload: ProductPayload) -> Self {
        self.body = Body::Multipart(payload);
        self
    }

    /// Add a bearer token authorization header.
    pub fn bearer_auth(self, token: impl AsRef<str>) -> Self {
        self.header("Authorization", format!("Bearer {}", token.as_ref()))
    }

    /// Set the Accept header.
    pub fn accept(self, content_type: impl Into<String>) -> Self {
        self.header("Accept", content_type)
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    pub fn body(&self) -> &Body {
        &self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://api.pcshop.test/products").unwrap()
    }

    #[test]
    fn test_query_is_encoded() {
        let req = RequestBuilder::new(Method::Get, base())
            .query("category", "linh kien")
            .query("subCategory", "ram");
        assert_eq!(
            req.url().as_str(),
            "https://api.pcshop.test/products?category=linh+kien&subCategory=ram"
        );
    }

    #[test]
    fn test_json_sets_content_type() {
        let req = RequestBuilder::new(Method::Post, base())
            .json(&serde_json::json!({ "name": "x" }))
            .unwrap();
        assert_eq!(
            req.headers().get("Content-Type").map(String::as_str),
            Some("application/json")
        );
        assert_eq!(req.body(), &Body::Json(br#"{"name":"x"}"#.to_vec()));
    }

    #[test]
    fn test_bearer_auth() {
        let req = RequestBuilder::new(Method::Delete, base()).bearer_auth("tok");
        assert_eq!(
            req.headers().get("Authorization").map(String::as_str),
            Some("Bearer tok")
        );
        assert_eq!(req.method().to_string(), "DELETE");
    }
}
