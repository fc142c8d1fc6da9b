//! # tracker-rest
//!
//! A generic object-to-REST-resource mapping layer for issue-tracker style
//! REST APIs. Resource types are declared as data (key attribute, endpoint,
//! parent and child relations); every instance is an attribute bag that can
//! be fetched, saved and deleted through a shared HTTP transport.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`ClientConfig`] and [`ClientConfigBuilder`]
//! - Validated newtypes for the site URL and credentials
//! - Basic, bearer and JWT request authentication via [`Credentials`]
//! - An async HTTP transport, [`HttpClient`], behind the [`Transport`] trait
//! - The resource layer in [`rest`]: metadata, registry, paths, lifecycle
//!   and relations
//!
//! ## Quick Start
//!
//! ```rust
//! use tracker_rest::{ApiToken, ClientConfig, Credentials, SiteUrl, Username};
//!
//! let config = ClientConfig::builder()
//!     .site(SiteUrl::new("https://tracker.example.com").unwrap())
//!     .credentials(Credentials::basic(
//!         Username::new("admin").unwrap(),
//!         ApiToken::new("api-token").unwrap(),
//!     ))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.rest_base_path(), "/rest/api/2");
//! ```
//!
//! ## Declaring Resources
//!
//! ```rust
//! use tracker_rest::rest::{RelationOptions, ResourceMetadata, ResourceRegistry};
//!
//! let registry = ResourceRegistry::builder()
//!     .register(
//!         ResourceMetadata::builder("Project")
//!             .key_attribute("key")
//!             .has_many("versions", RelationOptions::new())
//!             .build()
//!             .unwrap(),
//!     )
//!     .register(ResourceMetadata::builder("Version").belongs_to("project").build().unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(registry.len(), 2);
//! ```
//!
//! ## Working With Resources
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tracker_rest::rest::{ApiClient, Attributes, ResourceOptions};
//! use tracker_rest::HttpClient;
//!
//! let client = ApiClient::new(Arc::new(HttpClient::new(&config)?), registry);
//!
//! let mut project = client.resource("Project")?.find("TEST", ResourceOptions::new()).await?;
//! let versions = project.has_many("versions")?;
//!
//! let mut changes = Attributes::new();
//! changes.insert("description".into(), "Test project".into());
//! if !project.save(changes).await? {
//!     eprintln!("save rejected: {:?}", project.get("errors"));
//! }
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Types live in a registry owned by the client
//! - **Fail-fast validation**: Newtypes and declarations validate on construction
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with the Tokio async runtime

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod rest;

// Re-export public types at crate root for convenience
pub use auth::Credentials;
pub use config::{
    AccessToken, ApiToken, ApiVersion, ClientConfig, ClientConfigBuilder, SharedSecret, SiteUrl,
    Username,
};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    HttpResponseError, InvalidHttpRequestError, Transport,
};

// Re-export the resource layer entry points
pub use rest::{ApiClient, Resource, ResourceError, ResourceOptions, ResourceRegistry};
