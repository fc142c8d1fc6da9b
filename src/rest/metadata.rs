//! Per-type resource metadata.
//!
//! Every resource type is described by a [`ResourceMetadata`] value built
//! once, at registration time, and shared immutably by all instances of the
//! type. The metadata names the key attribute, the endpoint segment, the
//! parent relations that scope the type's URLs and the child relations that
//! can be read out of its attributes.
//!
//! # Example
//!
//! ```rust
//! use tracker_rest::rest::{RelationOptions, ResourceMetadata};
//!
//! let issue = ResourceMetadata::builder("Issue")
//!     .has_one("reporter", RelationOptions::new().child_type("User").nested_under(["fields"]))
//!     .has_many(
//!         "comments",
//!         RelationOptions::new().nested_under(["fields", "comment"]),
//!     )
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(issue.endpoint_name(), "issue");
//! assert_eq!(issue.key_attribute(), "id");
//! assert_eq!(issue.relation("comments").unwrap().child_type(), "Comment");
//!
//! let comment = ResourceMetadata::builder("Comment")
//!     .belongs_to("issue")
//!     .build()
//!     .unwrap();
//! assert_eq!(comment.belongs_to(), ["issue".to_string()]);
//! ```

use std::collections::HashSet;
use std::fmt;

use crate::error::ConfigError;
use crate::rest::inflector;

/// The number of children a relation yields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cardinality {
    /// At most one child object.
    One,
    /// An ordered collection of child objects.
    Many,
}

impl Cardinality {
    /// Returns the declaration name of this cardinality.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::One => "has_one",
            Self::Many => "has_many",
        }
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for a `has_one` or `has_many` declaration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RelationOptions {
    attribute_key: Option<String>,
    nested_under: Vec<String>,
    child_type: Option<String>,
}

impl RelationOptions {
    /// Creates default options: attribute key and type derived from the name.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the relation from this attribute instead of the relation name.
    #[must_use]
    pub fn attribute_key(mut self, key: impl Into<String>) -> Self {
        self.attribute_key = Some(key.into());
        self
    }

    /// Reads the relation from a nested object at this path of keys.
    #[must_use]
    pub fn nested_under<I, S>(mut self, path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.nested_under = path.into_iter().map(Into::into).collect();
        self
    }

    /// Uses this registered type for the children instead of the inflected name.
    #[must_use]
    pub fn child_type(mut self, type_name: impl Into<String>) -> Self {
        self.child_type = Some(type_name.into());
        self
    }
}

/// A declared child relation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Relation {
    name: String,
    cardinality: Cardinality,
    attribute_key: String,
    nested_under: Vec<String>,
    child_type: String,
}

impl Relation {
    fn new(name: String, cardinality: Cardinality, options: RelationOptions) -> Self {
        let attribute_key = options.attribute_key.unwrap_or_else(|| name.clone());
        let child_type = options
            .child_type
            .unwrap_or_else(|| inflector::classify(&name));
        Self {
            name,
            cardinality,
            attribute_key,
            nested_under: options.nested_under,
            child_type,
        }
    }

    /// The accessor name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the relation yields one child or many.
    #[must_use]
    pub const fn cardinality(&self) -> Cardinality {
        self.cardinality
    }

    /// The attribute the child data is read from.
    #[must_use]
    pub fn attribute_key(&self) -> &str {
        &self.attribute_key
    }

    /// The path of keys leading to the object holding the attribute.
    #[must_use]
    pub fn nested_under(&self) -> &[String] {
        &self.nested_under
    }

    /// The registered type name of the children.
    #[must_use]
    pub fn child_type(&self) -> &str {
        &self.child_type
    }
}

/// Immutable description of a resource type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceMetadata {
    type_name: String,
    key_attribute: String,
    endpoint_name: String,
    belongs_to: Vec<String>,
    relations: Vec<Relation>,
    nested_collections: bool,
}

// Verify ResourceMetadata is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceMetadata>();
};

impl ResourceMetadata {
    /// Starts describing a type with the given name.
    #[must_use]
    pub fn builder(type_name: impl Into<String>) -> ResourceMetadataBuilder {
        ResourceMetadataBuilder::new(type_name)
    }

    /// The registered type name (e.g., `IssueType`).
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The attribute identifying an instance. Defaults to `id`.
    #[must_use]
    pub fn key_attribute(&self) -> &str {
        &self.key_attribute
    }

    /// The URL segment of the type. Defaults to the lowercased type name.
    #[must_use]
    pub fn endpoint_name(&self) -> &str {
        &self.endpoint_name
    }

    /// The name children of this type use to refer back to it.
    ///
    /// This is the endpoint name, so a child's `belongs_to` declaration
    /// doubles as the URL segment of its parent.
    #[must_use]
    pub fn relation_name(&self) -> &str {
        &self.endpoint_name
    }

    /// Parent relations in declaration order.
    #[must_use]
    pub fn belongs_to(&self) -> &[String] {
        &self.belongs_to
    }

    /// Every declared child relation.
    #[must_use]
    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    /// Returns the child relation with the given name.
    #[must_use]
    pub fn relation(&self, name: &str) -> Option<&Relation> {
        self.relations.iter().find(|r| r.name == name)
    }

    /// Whether collection responses wrap the list under [`collection_key`](Self::collection_key).
    #[must_use]
    pub const fn nested_collections(&self) -> bool {
        self.nested_collections
    }

    /// The key a wrapped collection response keeps its list under.
    #[must_use]
    pub fn collection_key(&self) -> String {
        inflector::pluralize(&self.endpoint_name)
    }
}

/// Builder for [`ResourceMetadata`].
///
/// Each method corresponds to one declaration; [`build`](Self::build)
/// validates the declarations against each other.
#[derive(Clone, Debug)]
pub struct ResourceMetadataBuilder {
    type_name: String,
    key_attribute: Option<String>,
    endpoint_name: Option<String>,
    belongs_to: Vec<String>,
    relations: Vec<Relation>,
    nested_collections: bool,
}

impl ResourceMetadataBuilder {
    fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            key_attribute: None,
            endpoint_name: None,
            belongs_to: Vec::new(),
            relations: Vec::new(),
            nested_collections: false,
        }
    }

    /// Sets the key attribute.
    #[must_use]
    pub fn key_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.key_attribute = Some(attribute.into());
        self
    }

    /// Overrides the endpoint name.
    #[must_use]
    pub fn endpoint_name(mut self, name: impl Into<String>) -> Self {
        self.endpoint_name = Some(name.into());
        self
    }

    /// Declares a required parent relation.
    #[must_use]
    pub fn belongs_to(mut self, relation: impl Into<String>) -> Self {
        self.belongs_to.push(relation.into());
        self
    }

    /// Declares a single-child relation.
    #[must_use]
    pub fn has_one(mut self, name: impl Into<String>, options: RelationOptions) -> Self {
        self.relations
            .push(Relation::new(name.into(), Cardinality::One, options));
        self
    }

    /// Declares a collection relation.
    #[must_use]
    pub fn has_many(mut self, name: impl Into<String>, options: RelationOptions) -> Self {
        self.relations
            .push(Relation::new(name.into(), Cardinality::Many, options));
        self
    }

    /// Sets whether collection responses are wrapped under the plural endpoint name.
    #[must_use]
    pub const fn nested_collections(mut self, nested: bool) -> Self {
        self.nested_collections = nested;
        self
    }

    /// Validates the declarations and builds the metadata.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDeclaration`] if the type name is empty,
    /// a name is declared twice, or a relation has an empty name.
    pub fn build(self) -> Result<ResourceMetadata, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidDeclaration {
            resource: self.type_name.clone(),
            reason,
        };

        if self.type_name.trim().is_empty() {
            return Err(invalid("type name must not be empty".to_string()));
        }

        let mut seen = HashSet::new();
        for parent in &self.belongs_to {
            if parent.is_empty() {
                return Err(invalid("belongs_to relation name is empty".to_string()));
            }
            if !seen.insert(parent.as_str()) {
                return Err(invalid(format!("'{parent}' is declared more than once")));
            }
        }

        let mut seen = HashSet::new();
        for relation in &self.relations {
            if relation.name.is_empty() {
                return Err(invalid(format!(
                    "{} relation name is empty",
                    relation.cardinality
                )));
            }
            if !seen.insert(relation.name.as_str()) {
                return Err(invalid(format!(
                    "'{}' is declared more than once",
                    relation.name
                )));
            }
        }

        let endpoint_name = self
            .endpoint_name
            .clone()
            .unwrap_or_else(|| inflector::endpoint_name(&self.type_name));

        Ok(ResourceMetadata {
            key_attribute: self.key_attribute.unwrap_or_else(|| "id".to_string()),
            endpoint_name,
            type_name: self.type_name,
            belongs_to: self.belongs_to,
            relations: self.relations,
            nested_collections: self.nested_collections,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let metadata = ResourceMetadata::builder("IssueType").build().unwrap();

        assert_eq!(metadata.type_name(), "IssueType");
        assert_eq!(metadata.key_attribute(), "id");
        assert_eq!(metadata.endpoint_name(), "issuetype");
        assert_eq!(metadata.relation_name(), "issuetype");
        assert!(metadata.belongs_to().is_empty());
        assert!(metadata.relations().is_empty());
        assert!(!metadata.nested_collections());
    }

    #[test]
    fn test_overrides() {
        let metadata = ResourceMetadata::builder("Issue")
            .key_attribute("key")
            .endpoint_name("ticket")
            .nested_collections(true)
            .build()
            .unwrap();

        assert_eq!(metadata.key_attribute(), "key");
        assert_eq!(metadata.endpoint_name(), "ticket");
        assert_eq!(metadata.relation_name(), "ticket");
        assert!(metadata.nested_collections());
        assert_eq!(metadata.collection_key(), "tickets");
    }

    #[test]
    fn test_belongs_to_keeps_declaration_order() {
        let metadata = ResourceMetadata::builder("Worklog")
            .belongs_to("project")
            .belongs_to("issue")
            .build()
            .unwrap();
        assert_eq!(metadata.belongs_to(), ["project", "issue"]);
    }

    #[test]
    fn test_relation_defaults_derive_from_name() {
        let metadata = ResourceMetadata::builder("Issue")
            .has_many("comments", RelationOptions::new())
            .has_one("status", RelationOptions::new())
            .build()
            .unwrap();

        let comments = metadata.relation("comments").unwrap();
        assert_eq!(comments.cardinality(), Cardinality::Many);
        assert_eq!(comments.attribute_key(), "comments");
        assert_eq!(comments.child_type(), "Comment");
        assert!(comments.nested_under().is_empty());

        let status = metadata.relation("status").unwrap();
        assert_eq!(status.cardinality(), Cardinality::One);
        assert_eq!(status.child_type(), "Status");
    }

    #[test]
    fn test_relation_options_override_defaults() {
        let metadata = ResourceMetadata::builder("Issue")
            .has_one(
                "assignee",
                RelationOptions::new()
                    .attribute_key("assigneeUser")
                    .nested_under(["fields"])
                    .child_type("User"),
            )
            .build()
            .unwrap();

        let assignee = metadata.relation("assignee").unwrap();
        assert_eq!(assignee.attribute_key(), "assigneeUser");
        assert_eq!(assignee.nested_under(), ["fields"]);
        assert_eq!(assignee.child_type(), "User");
        assert!(metadata.relation("reporter").is_none());
    }

    #[test]
    fn test_duplicate_relation_is_rejected() {
        let result = ResourceMetadata::builder("Issue")
            .has_one("status", RelationOptions::new())
            .has_many("status", RelationOptions::new())
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::InvalidDeclaration { ref resource, .. }) if resource == "Issue"
        ));
    }

    #[test]
    fn test_duplicate_parent_is_rejected() {
        let result = ResourceMetadata::builder("Comment")
            .belongs_to("issue")
            .belongs_to("issue")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_type_name_is_rejected() {
        assert!(ResourceMetadata::builder("  ").build().is_err());
    }

    #[test]
    fn test_cardinality_display() {
        assert_eq!(Cardinality::One.to_string(), "has_one");
        assert_eq!(Cardinality::Many.to_string(), "has_many");
    }
}
