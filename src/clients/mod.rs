//! Transport types for tracker API communication.
//!
//! This module provides the transport seam the resource layer is written
//! against, and the reqwest-backed implementation of it.
//!
//! # Overview
//!
//! - [`Transport`]: The four-verb request/response trait resources call
//! - [`HttpClient`]: The async HTTP implementation of [`Transport`]
//! - [`HttpRequest`]: A request to be sent
//! - [`HttpResponse`]: A response with status, headers and raw body
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PUT, DELETE)
//! - [`HttpError`]: Transport failures, including non-2xx responses
//!
//! # Example
//!
//! ```rust,ignore
//! use tracker_rest::{ClientConfig, HttpClient, SiteUrl, Transport};
//!
//! let config = ClientConfig::builder()
//!     .site(SiteUrl::new("https://tracker.example.com").unwrap())
//!     .build()?;
//! let client = HttpClient::new(&config)?;
//!
//! let response = client.get("/rest/api/2/project").await?;
//! println!("{}", response.body);
//! ```
//!
//! # Retry Behavior
//!
//! None. A failed request is reported to the caller exactly once.

mod errors;
mod http_client;
mod http_request;
mod http_response;
mod transport;

pub use errors::{HttpError, HttpResponseError, InvalidHttpRequestError};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;
pub use transport::Transport;
