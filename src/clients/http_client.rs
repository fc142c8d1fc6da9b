//! HTTP client for tracker API communication.
//!
//! This module provides the [`HttpClient`] type, the reqwest-backed
//! [`Transport`] implementation.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::clients::errors::{HttpError, HttpResponseError};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::clients::transport::Transport;
use crate::config::ClientConfig;

/// Crate version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for making requests to a tracker's REST API.
///
/// The client handles:
/// - URL construction from the configured site (server-provided absolute
///   URLs are used as-is)
/// - Default headers including User-Agent
/// - The `Authorization` header derived from the configured credentials
///
/// Non-2xx responses become [`HttpError::Response`] with the full response
/// attached. Failed requests are not retried.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, so one instance can back many resources.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use tracker_rest::{ClientConfig, HttpClient, SiteUrl, Transport};
///
/// let config = ClientConfig::builder()
///     .site(SiteUrl::new("https://tracker.example.com").unwrap())
///     .build()?;
/// let client = Arc::new(HttpClient::new(&config)?);
///
/// let response = client.get("/rest/api/2/serverInfo").await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// The configuration requests are built from.
    config: ClientConfig,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying reqwest client
    /// cannot be created (e.g., TLS initialization failure).
    pub fn new(config: &ClientConfig) -> Result<Self, HttpError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}tracker-rest v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        let client = reqwest::Client::builder().use_rustls_tls().build()?;

        Ok(Self {
            client,
            config: config.clone(),
            default_headers,
        })
    }

    /// Returns the configuration this client was built from.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Resolves a request path to an absolute URL.
    ///
    /// Paths that are already absolute (a resource's `self` link) are
    /// returned unchanged.
    #[must_use]
    pub fn absolute_url(&self, path: &str) -> String {
        if is_absolute(path) {
            path.to_string()
        } else {
            format!("{}{}", self.config.site(), path)
        }
    }

    fn build_headers(&self, request: &HttpRequest) -> Result<HashMap<String, String>, HttpError> {
        let mut headers = self.default_headers.clone();
        if request.body.is_some() {
            headers.insert("Content-Type".to_string(), "application/json".to_string());
        }

        let target = site_relative(&request.path);
        if let Some(value) = self.config.credentials().authorization(
            request.http_method,
            target,
            self.config.context_path(),
        )? {
            headers.insert("Authorization".to_string(), value);
        }

        if let Some(extra) = &request.extra_headers {
            for (key, value) in extra {
                headers.insert(key.clone(), value.clone());
            }
        }
        Ok(headers)
    }

    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            if let Ok(value) = value.to_str() {
                result
                    .entry(name.as_str().to_string())
                    .or_default()
                    .push(value.to_string());
            }
        }
        result
    }
}

#[async_trait]
impl Transport for HttpClient {
    fn rest_base_path(&self) -> &str {
        self.config.rest_base_path()
    }

    async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = self.absolute_url(&request.path);
        let headers = self.build_headers(&request)?;

        let mut req_builder = match request.http_method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Put => self.client.put(&url),
            HttpMethod::Delete => self.client.delete(&url),
        };

        for (key, value) in &headers {
            req_builder = req_builder.header(key, value);
        }

        if let Some(body) = &request.body {
            req_builder = req_builder.body(body.clone());
        }

        tracing::debug!("{} {}", request.http_method.as_str().to_uppercase(), url);

        let res = req_builder.send().await?;
        let code = res.status().as_u16();
        let res_headers = Self::parse_response_headers(res.headers());
        let body = res.text().await?;

        let response = HttpResponse::new(code, res_headers, body);

        if response.is_ok() {
            return Ok(response);
        }

        tracing::warn!(
            "Request {} {} failed with status {}",
            request.http_method.as_str().to_uppercase(),
            request.path,
            code
        );

        Err(HttpError::Response(HttpResponseError {
            path: request.path,
            response,
        }))
    }
}

fn is_absolute(path: &str) -> bool {
    path.starts_with("http://") || path.starts_with("https://")
}

/// Strips scheme and host from an absolute URL, leaving path and query.
fn site_relative(path: &str) -> &str {
    if !is_absolute(path) {
        return path;
    }
    let after_scheme = path.find("://").map_or(path, |i| &path[i + 3..]);
    after_scheme.find('/').map_or("/", |i| &after_scheme[i..])
}
