//! HTTP-specific error types.
//!
//! This module contains error types for transport operations.
//!
//! # Error Handling
//!
//! - [`HttpResponseError`]: Non-2xx HTTP responses, carrying the full response
//! - [`InvalidHttpRequestError`]: When a request fails validation before sending
//! - [`HttpError`]: Unified error type encompassing all HTTP-related errors
//!
//! # Example
//!
//! ```rust,ignore
//! use tracker_rest::clients::{HttpError, Transport};
//!
//! match transport.get("/rest/api/2/issue/1").await {
//!     Ok(response) => println!("Body: {}", response.body),
//!     Err(HttpError::Response(e)) => {
//!         println!("API error {}: {}", e.code(), e.response.body);
//!     }
//!     Err(e) => println!("Transport failure: {e}"),
//! }
//! ```

use thiserror::Error;

use crate::clients::http_response::HttpResponse;

/// Error returned when a request receives a non-successful response.
///
/// The original response is kept intact so callers can inspect the body,
/// e.g. to read field-level validation messages after a rejected write.
#[derive(Debug, Clone, Error)]
#[error("HTTP {} from {path}: {}", response.code, response.body)]
pub struct HttpResponseError {
    /// The request path that produced the response.
    pub path: String,
    /// The complete response.
    pub response: HttpResponse,
}

impl HttpResponseError {
    /// Returns the HTTP status code.
    #[must_use]
    pub const fn code(&self) -> u16 {
        self.response.code
    }
}

/// Error returned when a request fails validation before it is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A POST or PUT request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },

    /// The request path is empty.
    #[error("Request path cannot be empty.")]
    EmptyPath,
}

/// Unified error type for all HTTP-related errors.
#[derive(Debug, Error)]
pub enum HttpError {
    /// An HTTP response error (non-2xx status code).
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// A request token could not be signed.
    #[error("Failed to sign request: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl HttpError {
    /// Returns the response for [`HttpError::Response`], `None` otherwise.
    #[must_use]
    pub const fn response(&self) -> Option<&HttpResponse> {
        match self {
            Self::Response(e) => Some(&e.response),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn not_found() -> HttpResponseError {
        HttpResponseError {
            path: "/rest/api/2/issue/1".to_string(),
            response: HttpResponse::new(404, HashMap::new(), r#"{"errorMessages":["gone"]}"#),
        }
    }

    #[test]
    fn test_http_response_error_includes_code_path_and_body() {
        let message = not_found().to_string();
        assert!(message.contains("404"));
        assert!(message.contains("/rest/api/2/issue/1"));
        assert!(message.contains("gone"));
    }

    #[test]
    fn test_http_error_exposes_original_response() {
        let error = HttpError::from(not_found());
        let response = error.response().unwrap();
        assert_eq!(response.code, 404);
        assert!(response.body.contains("errorMessages"));
    }

    #[test]
    fn test_invalid_request_has_no_response() {
        let error = HttpError::from(InvalidHttpRequestError::EmptyPath);
        assert!(error.response().is_none());
        assert_eq!(error.to_string(), "Request path cannot be empty.");
    }

    #[test]
    fn test_error_implements_std_error() {
        let error: HttpError = not_found().into();
        let _: &dyn std::error::Error = &error;
    }
}
