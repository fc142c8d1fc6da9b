//! HTTP response types.
//!
//! This module provides the [`HttpResponse`] type handed back by every
//! [`Transport`](crate::clients::Transport) verb.

use std::collections::HashMap;

/// An HTTP response.
///
/// The body is kept as the raw string the server sent; JSON parsing is the
/// resource layer's job so that parse failures can be handled per operation.
///
/// # Example
///
/// ```rust
/// use tracker_rest::HttpResponse;
/// use std::collections::HashMap;
///
/// let response = HttpResponse::new(201, HashMap::new(), r#"{"id":"10000"}"#);
/// assert!(response.is_ok());
/// assert!(response.has_body());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers keyed by lowercase name (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The raw response body.
    pub body: String,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`. Header names are lowercased.
    #[must_use]
    pub fn new(
        code: u16,
        headers: HashMap<String, Vec<String>>,
        body: impl Into<String>,
    ) -> Self {
        let headers = headers
            .into_iter()
            .map(|(k, v)| (k.to_lowercase(), v))
            .collect();
        Self {
            code,
            headers,
            body: body.into(),
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns `true` if the body is long enough to hold a JSON document.
    ///
    /// Bodies shorter than two characters (empty, or a stray newline) are
    /// what servers send for 204-style replies and are never parsed.
    #[must_use]
    pub fn has_body(&self) -> bool {
        self.body.trim().len() >= 2
    }

    /// Returns the first value of a header, if present.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the `X-Request-Id` header value, if present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.header("x-request-id")
    }
}
