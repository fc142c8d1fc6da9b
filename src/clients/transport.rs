//! The transport seam between resources and the network.
//!
//! Resources never talk to an HTTP library directly. They hold an
//! `Arc<dyn Transport>` and call its four verbs with a path (and, for
//! writes, a serialized JSON body). [`HttpClient`](crate::clients::HttpClient)
//! is the production implementation; tests substitute an in-memory one.
//!
//! Implementors only need [`Transport::rest_base_path`] and
//! [`Transport::request`]; the verb methods are provided.

use std::fmt;

use async_trait::async_trait;

use crate::clients::{HttpError, HttpMethod, HttpRequest, HttpResponse};

/// A request/response transport shared by every resource instance.
///
/// A non-2xx response must be reported as
/// [`HttpError::Response`](crate::clients::HttpError::Response) carrying the
/// original response.
#[async_trait]
pub trait Transport: Send + Sync + fmt::Debug {
    /// The configured path prefix of every REST resource (e.g., `/rest/api/2`).
    fn rest_base_path(&self) -> &str;

    /// Sends a request and waits for its response.
    async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError>;

    /// Sends a GET request.
    async fn get(&self, path: &str) -> Result<HttpResponse, HttpError> {
        let request = HttpRequest::builder(HttpMethod::Get, path).build()?;
        self.request(request).await
    }

    /// Sends a POST request with a serialized body.
    async fn post(&self, path: &str, body: String) -> Result<HttpResponse, HttpError> {
        let request = HttpRequest::builder(HttpMethod::Post, path)
            .body(body)
            .build()?;
        self.request(request).await
    }

    /// Sends a PUT request with a serialized body.
    async fn put(&self, path: &str, body: String) -> Result<HttpResponse, HttpError> {
        let request = HttpRequest::builder(HttpMethod::Put, path)
            .body(body)
            .build()?;
        self.request(request).await
    }

    /// Sends a DELETE request.
    async fn delete(&self, path: &str) -> Result<HttpResponse, HttpError> {
        let request = HttpRequest::builder(HttpMethod::Delete, path).build()?;
        self.request(request).await
    }
}
