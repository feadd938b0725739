//! API client error types.

use thiserror::Error;

/// Message shown to shoppers whenever a product listing can't be fetched.
pub const PRODUCTS_UNAVAILABLE: &str = "Can't load products";

/// Errors that can occur when talking to the product API.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Failed to send the request.
    #[error("Request failed: {0}")]
    RequestError(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP error response.
    #[error("HTTP {status}: {message}")]
    HttpError { status: u16, message: String },

    /// Failed to parse response body.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Request timeout.
    #[error("Request timed out")]
    Timeout,

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(String),
}

impl FetchError {
    /// Text safe to show to an end user. The cause is never surfaced.
    pub fn user_message(&self) -> &'static str {
        PRODUCTS_UNAVAILABLE
    }

    /// HTTP status, for server-side failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::JsonError(e.to_string())
    }
}

impl From<url::ParseError> for FetchError {
    fn from(e: url::ParseError) -> Self {
        FetchError::InvalidUrl(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_hides_cause() {
        let errors = [
            FetchError::Timeout,
            FetchError::HttpError {
                status: 500,
                message: "stack trace".into(),
            },
            FetchError::ParseError("expected array".into()),
        ];
        for e in &errors {
            assert_eq!(e.user_message(), "Can't load products");
        }
        assert_eq!(errors[1].status(), Some(500));
        assert_eq!(errors[0].status(), None);
    }
}
