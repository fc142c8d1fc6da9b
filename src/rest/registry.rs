//! The set of resource types an [`ApiClient`](crate::rest::ApiClient) knows.
//!
//! Relations refer to their child types by name, so types are collected in
//! a [`ResourceRegistry`] and cross-checked once when it is built. After
//! that, every relation is guaranteed to resolve.
//!
//! # Example
//!
//! ```rust
//! use tracker_rest::rest::{RelationOptions, ResourceMetadata, ResourceRegistry};
//!
//! let registry = ResourceRegistry::builder()
//!     .register(
//!         ResourceMetadata::builder("Issue")
//!             .has_many("comments", RelationOptions::new())
//!             .build()
//!             .unwrap(),
//!     )
//!     .register(ResourceMetadata::builder("Comment").belongs_to("issue").build().unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert!(registry.get("Comment").is_some());
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::ConfigError;
use crate::rest::ResourceMetadata;

/// A validated lookup table of resource types by name.
#[derive(Clone, Debug, Default)]
pub struct ResourceRegistry {
    types: HashMap<String, Arc<ResourceMetadata>>,
}

// Verify ResourceRegistry is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceRegistry>();
};

impl ResourceRegistry {
    /// Creates a builder.
    #[must_use]
    pub fn builder() -> ResourceRegistryBuilder {
        ResourceRegistryBuilder::default()
    }

    /// Returns the metadata of the named type.
    #[must_use]
    pub fn get(&self, type_name: &str) -> Option<&Arc<ResourceMetadata>> {
        self.types.get(type_name)
    }

    /// Returns `true` if the named type is registered.
    #[must_use]
    pub fn contains(&self, type_name: &str) -> bool {
        self.types.contains_key(type_name)
    }

    /// Returns the registered type names, sorted.
    #[must_use]
    pub fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.types.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if no types are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Builder for [`ResourceRegistry`].
#[derive(Clone, Debug, Default)]
pub struct ResourceRegistryBuilder {
    types: Vec<ResourceMetadata>,
}

impl ResourceRegistryBuilder {
    /// Adds a type.
    #[must_use]
    pub fn register(mut self, metadata: ResourceMetadata) -> Self {
        self.types.push(metadata);
        self
    }

    /// Validates and builds the registry.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateResourceType`] if a name is registered
    /// twice, or [`ConfigError::UnknownResourceType`] if a relation refers to
    /// a type that is not registered.
    pub fn build(self) -> Result<ResourceRegistry, ConfigError> {
        let mut types = HashMap::with_capacity(self.types.len());
        for metadata in self.types {
            let name = metadata.type_name().to_string();
            if types.contains_key(&name) {
                return Err(ConfigError::DuplicateResourceType { name });
            }
            types.insert(name, Arc::new(metadata));
        }

        for metadata in types.values() {
            for relation in metadata.relations() {
                if !types.contains_key(relation.child_type()) {
                    return Err(ConfigError::UnknownResourceType {
                        resource: metadata.type_name().to_string(),
                        relation: relation.name().to_string(),
                        child_type: relation.child_type().to_string(),
                    });
                }
            }
        }

        tracing::debug!("Registered {} resource types", types.len());
        Ok(ResourceRegistry { types })
    }
}
