//! REST resource layer.
//!
//! This module maps generic, attribute-bag objects onto a tracker's REST
//! endpoints:
//!
//! - **[`AttributeStore`]**: the raw JSON attributes of an instance and their
//!   merge rules
//! - **[`ResourceMetadata`]**: per-type declarations (key attribute, endpoint,
//!   parent and child relations)
//! - **[`ResourceRegistry`]**: the validated set of types a client serves
//! - **Path building**: collection and singular paths scoped by parent
//!   relations
//! - **[`Resource`]**: one instance with its `fetch`/`save`/`delete`
//!   lifecycle
//! - **[`HasManyProxy`]**: the children of a collection relation
//! - **[`ApiClient`]** and **[`ResourceFactory`]**: type-level `new`, `build`,
//!   `find` and `all`
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tracker_rest::rest::{
//!     ApiClient, RelationOptions, ResourceMetadata, ResourceOptions, ResourceRegistry,
//! };
//!
//! let registry = ResourceRegistry::builder()
//!     .register(
//!         ResourceMetadata::builder("Issue")
//!             .has_many("comments", RelationOptions::new().nested_under(["fields", "comment"]))
//!             .build()?,
//!     )
//!     .register(ResourceMetadata::builder("Comment").belongs_to("issue").build()?)
//!     .build()?;
//! let client = ApiClient::new(Arc::new(http_client), registry);
//!
//! // GET /rest/api/2/issue/TEST-1
//! let issue = client.resource("Issue")?.find("TEST-1", ResourceOptions::new()).await?;
//!
//! // Children read from fields.comment.comments
//! for comment in &issue.has_many("comments")? {
//!     println!("{}", comment);
//! }
//!
//! // DELETE /rest/api/2/issue/10002/comment/7
//! let mut comment = client.resource("Comment")?.new(
//!     ResourceOptions::new()
//!         .parent_id("issue", "10002")
//!         .attrs(serde_json::json!({"id": "7"}).as_object().unwrap().clone()),
//! )?;
//! comment.delete().await?;
//! ```

mod attributes;
mod errors;
mod factory;
pub mod inflector;
mod metadata;
mod path;
mod registry;
mod relations;
mod resource;

pub use attributes::{AttributeStore, Attributes};
pub use errors::ResourceError;
pub use factory::{ApiClient, ResourceFactory};
pub use metadata::{
    Cardinality, Relation, RelationOptions, ResourceMetadata, ResourceMetadataBuilder,
};
pub use path::{
    collection_path, path_component, relation_prefix, singular_path, with_query, QueryParams,
    SEARCH_PARAMS, SINGLE_FETCH_PARAMS,
};
pub use registry::{ResourceRegistry, ResourceRegistryBuilder};
pub use relations::HasManyProxy;
pub use resource::{Resource, ResourceOptions};
