//! Resource-specific error types.
//!
//! This module contains the error type returned by resource construction,
//! lifecycle operations and relationship access.
//!
//! # Error Kinds
//!
//! - [`ResourceError::MissingRelation`]: a required parent relation was not
//!   supplied at construction (configuration error, never recovered)
//! - [`ResourceError::Http`]: the transport reported a failure; for non-2xx
//!   responses the original response is attached
//! - [`ResourceError::Parse`]: a successful response body is not valid JSON
//! - [`ResourceError::UnexpectedBody`]: valid JSON of the wrong shape
//!
//! `save` is the one operation that does not surface [`ResourceError::Http`];
//! it reports `Ok(false)` instead, see
//! [`Resource::save`](crate::rest::Resource::save).
//!
//! # Example
//!
//! ```rust,ignore
//! use tracker_rest::rest::ResourceError;
//!
//! match issue.fetch(false).await {
//!     Ok(()) => println!("{}", issue),
//!     Err(e) if e.status() == Some(404) => println!("gone"),
//!     Err(e) => return Err(e.into()),
//! }
//! ```

use thiserror::Error;

use crate::clients::{HttpError, HttpResponse};

/// Error type for resource operations.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// A declared parent relation was supplied neither as an object nor as an id.
    #[error("Required option '{relation}' (or '{relation}_id') missing for {resource}")]
    MissingRelation {
        /// The type being constructed.
        resource: String,
        /// The missing relation name.
        relation: String,
    },

    /// The relation is not declared on the type (or not with that cardinality).
    #[error("{resource} has no {kind} relation named '{relation}'")]
    UnknownRelation {
        /// The type the relation was requested on.
        resource: String,
        /// The relation kind requested (`has_one` or `has_many`).
        kind: &'static str,
        /// The requested relation name.
        relation: String,
    },

    /// No resource type with this name is registered.
    #[error("Unknown resource type '{name}'")]
    UnknownType {
        /// The requested type name.
        name: String,
    },

    /// A response body could not be parsed as JSON.
    #[error("Failed to parse {resource} response: {source}")]
    Parse {
        /// The type whose response failed to parse.
        resource: String,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// A response body parsed but does not have the expected shape.
    #[error("Unexpected {resource} data: expected {expected}")]
    UnexpectedBody {
        /// The type whose data was malformed.
        resource: String,
        /// A description of the expected shape.
        expected: &'static str,
    },

    /// A transport-level failure.
    #[error(transparent)]
    Http(#[from] HttpError),
}

impl ResourceError {
    /// Returns the HTTP status code if the transport answered with a non-2xx response.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        self.response().map(|r| r.code)
    }

    /// Returns the original response for HTTP status failures.
    #[must_use]
    pub const fn response(&self) -> Option<&HttpResponse> {
        match self {
            Self::Http(e) => e.response(),
            _ => None,
        }
    }

    /// Returns `true` for the construction-time configuration error kind.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::MissingRelation { .. } | Self::UnknownRelation { .. } | Self::UnknownType { .. }
        )
    }

    pub(crate) fn parse(resource: &str, source: serde_json::Error) -> Self {
        Self::Parse {
            resource: resource.to_string(),
            source,
        }
    }

    pub(crate) fn unexpected(resource: &str, expected: &'static str) -> Self {
        Self::UnexpectedBody {
            resource: resource.to_string(),
            expected,
        }
    }
}
