//! Transport seam between the API client and the network.

use std::collections::HashMap;

use async_trait::async_trait;
use pcshop_commerce::admin::{FormValue, ProductPayload};
use tracing::debug;

use crate::request::{Body, Method, RequestBuilder};
use crate::{FetchError, Response};

/// Sends a described request and returns the raw response.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError>;
}

/// [`Transport`] over a pooled [`reqwest::Client`].
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reuse an existing client, e.g. one built with custom timeouts.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

fn to_multipart(payload: ProductPayload) -> Result<reqwest::multipart::Form, FetchError> {
    let mut form = reqwest::multipart::Form::new();
    for (name, value) in payload.parts {
        form = match value {
            FormValue::Text(text) => form.text(name, text),
            FormValue::File(image) => {
                let part = reqwest::multipart::Part::bytes(image.bytes)
                    .file_name(image.file_name)
                    .mime_str(&image.content_type)
                    .map_err(|e| FetchError::RequestError(e.to_string()))?;
                form.part(name, part)
            }
        };
    }
    Ok(form)
}

fn map_send_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::RequestError(e.to_string())
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        let RequestBuilder {
            method,
            url,
            headers,
            body,
        } = request;
        debug!(%method, %url, "sending request");

        let mut builder = self
            .client
            .request(to_reqwest_method(method), url.as_str());
        for (key, value) in &headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        builder = match body {
            Body::Empty => builder,
            Body::Json(bytes) => builder.body(bytes),
            Body::Multipart(payload) => builder.multipart(to_multipart(payload)?),
        };

        let resp = builder.send().await.map_err(map_send_error)?;
        let status = resp.status().as_u16();
        let headers: HashMap<String, String> = resp
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();
        let body = resp.bytes().await.map_err(map_send_error)?.to_vec();
        debug!(status, bytes = body.len(), "received response");

        Ok(Response::new(status, headers, body))
    }
}
