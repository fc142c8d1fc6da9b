//! Configuration error types.
//!
//! This module contains the error type shared by client configuration,
//! credential newtypes, and resource type declarations.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Resource declarations are checked when a
//! [`ResourceRegistry`](crate::rest::ResourceRegistry) is built, so a type
//! wired to a missing child type never reaches a request.
//!
//! # Example
//!
//! ```rust
//! use tracker_rest::{ConfigError, SiteUrl};
//!
//! let result = SiteUrl::new("not a url");
//! assert!(matches!(result, Err(ConfigError::InvalidSiteUrl { .. })));
//! ```

use thiserror::Error;

/// Errors that can occur while configuring the client or declaring resources.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Site URL is invalid.
    #[error("Invalid site URL '{url}'. Please provide a URL with scheme and host (e.g., 'https://tracker.example.com').")]
    InvalidSiteUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// A credential value was empty.
    #[error("Credential '{field}' cannot be empty.")]
    EmptyCredential {
        /// The credential field that was empty.
        field: &'static str,
    },

    /// API version is invalid.
    #[error("Invalid API version '{version}'. Expected a number (e.g., '2') or 'latest'.")]
    InvalidApiVersion {
        /// The invalid version string that was provided.
        version: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// A relation names a child type that is not registered.
    #[error("Relation '{relation}' on {resource} refers to unknown resource type '{child_type}'")]
    UnknownResourceType {
        /// The type declaring the relation.
        resource: String,
        /// The relation name.
        relation: String,
        /// The unresolved child type name.
        child_type: String,
    },

    /// The same resource type was registered twice.
    #[error("Resource type '{name}' is already registered")]
    DuplicateResourceType {
        /// The duplicated type name.
        name: String,
    },

    /// A resource declaration is malformed.
    #[error("Invalid declaration for {resource}: {reason}")]
    InvalidDeclaration {
        /// The type being declared.
        resource: String,
        /// What is wrong with it.
        reason: String,
    },
}
