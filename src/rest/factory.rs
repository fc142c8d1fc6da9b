//! The API client handle and per-type factories.
//!
//! An [`ApiClient`] bundles the transport with the registry of resource
//! types. It is cheap to clone and every [`Resource`] holds one.
//! [`ApiClient::resource`] resolves a type by name and returns a
//! [`ResourceFactory`] exposing the type-level operations.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tracker_rest::rest::{ApiClient, ResourceMetadata, ResourceOptions, ResourceRegistry};
//! use tracker_rest::{ClientConfig, HttpClient, SiteUrl};
//!
//! let config = ClientConfig::builder()
//!     .site(SiteUrl::new("https://tracker.example.com")?)
//!     .build()?;
//! let registry = ResourceRegistry::builder()
//!     .register(ResourceMetadata::builder("Project").key_attribute("key").build()?)
//!     .build()?;
//! let client = ApiClient::new(Arc::new(HttpClient::new(&config)?), registry);
//!
//! let projects = client.resource("Project")?.all(ResourceOptions::new()).await?;
//! ```

use std::sync::Arc;

use crate::clients::Transport;
use crate::rest::{Attributes, Resource, ResourceError, ResourceMetadata, ResourceOptions, ResourceRegistry};

/// A transport plus the resource types it serves.
#[derive(Clone, Debug)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    registry: Arc<ResourceRegistry>,
}

// Verify ApiClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiClient>();
};

impl ApiClient {
    /// Creates a client from a transport and a validated registry.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, registry: ResourceRegistry) -> Self {
        Self {
            transport,
            registry: Arc::new(registry),
        }
    }

    /// The transport requests are sent through.
    #[must_use]
    pub fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    /// The registered resource types.
    #[must_use]
    pub fn registry(&self) -> &ResourceRegistry {
        &self.registry
    }

    /// Returns the metadata of a registered type.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnknownType`] if no type has this name.
    pub fn metadata(&self, type_name: &str) -> Result<Arc<ResourceMetadata>, ResourceError> {
        self.registry
            .get(type_name)
            .cloned()
            .ok_or_else(|| ResourceError::UnknownType {
                name: type_name.to_string(),
            })
    }

    /// Returns the factory of a registered type.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnknownType`] if no type has this name.
    pub fn resource(&self, type_name: &str) -> Result<ResourceFactory<'_>, ResourceError> {
        Ok(ResourceFactory {
            client: self,
            metadata: self.metadata(type_name)?,
        })
    }
}

/// Type-level operations of one resource type.
#[derive(Clone, Debug)]
pub struct ResourceFactory<'a> {
    client: &'a ApiClient,
    metadata: Arc<ResourceMetadata>,
}

impl ResourceFactory<'_> {
    /// The type's metadata.
    #[must_use]
    pub fn metadata(&self) -> &ResourceMetadata {
        &self.metadata
    }

    /// Constructs an instance; see [`Resource::new`].
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingRelation`] for missing parents.
    pub fn new(&self, options: ResourceOptions) -> Result<Resource, ResourceError> {
        Resource::new(self.client, Arc::clone(&self.metadata), options)
    }

    /// Constructs an unsaved instance holding `attrs`; see [`Resource::build`].
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingRelation`] if the type has parents.
    pub fn build(&self, attrs: Attributes) -> Result<Resource, ResourceError> {
        Resource::build(self.client, Arc::clone(&self.metadata), attrs)
    }

    /// Fetches one instance by key; see [`Resource::find`].
    ///
    /// # Errors
    ///
    /// See [`Resource::find`].
    pub async fn find(&self, key: &str, options: ResourceOptions) -> Result<Resource, ResourceError> {
        Resource::find(self.client, Arc::clone(&self.metadata), key, options).await
    }

    /// Lists every instance; see [`Resource::all`].
    ///
    /// # Errors
    ///
    /// See [`Resource::all`].
    pub async fn all(&self, options: ResourceOptions) -> Result<Vec<Resource>, ResourceError> {
        Resource::all(self.client, Arc::clone(&self.metadata), options).await
    }
}
