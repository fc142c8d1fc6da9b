//! Child relation accessors.
//!
//! Relations declared with `has_one` and `has_many` are read out of the
//! parent's attributes on demand; they make no requests. A `has_many`
//! accessor returns a [`HasManyProxy`], which behaves like a slice of the
//! children and remembers the parent so it can build new children or
//! re-list them from the server.
//!
//! Each child produced by `has_many` receives the parent object under the
//! parent type's endpoint name, which is what a child's `belongs_to`
//! declaration expects and what its URL prefix is built from.
//!
//! # Example
//!
//! ```rust,ignore
//! let issue = client.resource("Issue")?.find("TEST-1", ResourceOptions::new()).await?;
//!
//! let mut comments = issue.has_many("comments")?;
//! for comment in &comments {
//!     println!("{}", comment.url()); // /rest/api/2/issue/10002/comment/...
//! }
//!
//! let draft = comments.build(Attributes::new())?;
//! draft.save(changes).await?;
//! ```

use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use serde_json::Value;

use crate::rest::metadata::{Cardinality, Relation};
use crate::rest::{Attributes, Resource, ResourceError, ResourceMetadata, ResourceOptions};

impl Resource {
    /// Returns the single child of the `has_one` relation `name`.
    ///
    /// An absent or `null` attribute yields `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnknownRelation`] if no `has_one` relation
    /// has this name, [`ResourceError::UnexpectedBody`] if the attribute is
    /// not an object, and any construction error of the child.
    pub fn has_one(&self, name: &str) -> Result<Option<Resource>, ResourceError> {
        let (relation, child) = self.declared_relation(name, Cardinality::One)?;

        match self
            .attrs()
            .lookup(relation.attribute_key(), relation.nested_under())
        {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Object(attrs)) => Resource::new(
                self.client(),
                child,
                ResourceOptions::new().attrs(attrs.clone()),
            )
            .map(Some),
            Some(_) => Err(ResourceError::unexpected(child.type_name(), "an object")),
        }
    }

    /// Returns the children of the `has_many` relation `name`.
    ///
    /// An absent or `null` attribute yields an empty collection.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnknownRelation`] if no `has_many` relation
    /// has this name, [`ResourceError::UnexpectedBody`] if the attribute is
    /// not an array of objects, and any construction error of a child.
    pub fn has_many(&self, name: &str) -> Result<HasManyProxy, ResourceError> {
        let (relation, child) = self.declared_relation(name, Cardinality::Many)?;

        let items: &[Value] = match self
            .attrs()
            .lookup(relation.attribute_key(), relation.nested_under())
        {
            None | Some(Value::Null) => &[],
            Some(Value::Array(items)) => items,
            Some(_) => {
                return Err(ResourceError::unexpected(
                    child.type_name(),
                    "an array of objects",
                ))
            }
        };

        let mut proxy = HasManyProxy::new(Arc::new(self.clone()), child);
        for item in items {
            let Value::Object(attrs) = item else {
                return Err(ResourceError::unexpected(
                    proxy.target.type_name(),
                    "an array of objects",
                ));
            };
            proxy.build(attrs.clone())?;
        }
        Ok(proxy)
    }

    fn declared_relation(
        &self,
        name: &str,
        cardinality: Cardinality,
    ) -> Result<(&Relation, Arc<ResourceMetadata>), ResourceError> {
        let relation = self
            .metadata()
            .relation(name)
            .filter(|r| r.cardinality() == cardinality)
            .ok_or_else(|| ResourceError::UnknownRelation {
                resource: self.type_name().to_string(),
                kind: cardinality.as_str(),
                relation: name.to_string(),
            })?;
        let child = self.client().metadata(relation.child_type())?;
        Ok((relation, child))
    }
}

/// The children of a `has_many` relation, bound to their parent.
///
/// Dereferences to `[Resource]`, so it can be indexed, iterated and
/// measured like a slice.
#[derive(Clone, Debug)]
pub struct HasManyProxy {
    parent: Arc<Resource>,
    target: Arc<ResourceMetadata>,
    collection: Vec<Resource>,
}

impl HasManyProxy {
    fn new(parent: Arc<Resource>, target: Arc<ResourceMetadata>) -> Self {
        Self {
            parent,
            target,
            collection: Vec::new(),
        }
    }

    /// The parent the children belong to.
    #[must_use]
    pub fn parent(&self) -> &Resource {
        &self.parent
    }

    /// The children's type.
    #[must_use]
    pub fn target(&self) -> &ResourceMetadata {
        &self.target
    }

    /// Builds a new child holding `attrs`, appends it and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingRelation`] if the child type declares
    /// a parent relation other than this parent.
    pub fn build(&mut self, attrs: Attributes) -> Result<&mut Resource, ResourceError> {
        let child = Resource::new(
            self.parent.client(),
            Arc::clone(&self.target),
            self.child_options().attrs(attrs),
        )?;
        let index = self.collection.len();
        self.collection.push(child);
        Ok(&mut self.collection[index])
    }

    /// Replaces the children with a fresh listing from the server.
    ///
    /// # Errors
    ///
    /// See [`Resource::all`].
    pub async fn refresh(&mut self) -> Result<(), ResourceError> {
        self.collection = Resource::all(
            self.parent.client(),
            Arc::clone(&self.target),
            self.child_options(),
        )
        .await?;
        Ok(())
    }

    /// Consumes the proxy, returning the children.
    #[must_use]
    pub fn into_vec(self) -> Vec<Resource> {
        self.collection
    }

    fn child_options(&self) -> ResourceOptions {
        ResourceOptions::new().parent(self.parent.metadata().relation_name(), Arc::clone(&self.parent))
    }
}

impl Deref for HasManyProxy {
    type Target = [Resource];

    fn deref(&self) -> &Self::Target {
        &self.collection
    }
}

impl DerefMut for HasManyProxy {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.collection
    }
}

impl IntoIterator for HasManyProxy {
    type Item = Resource;
    type IntoIter = std::vec::IntoIter<Resource>;

    fn into_iter(self) -> Self::IntoIter {
        self.collection.into_iter()
    }
}

impl<'a> IntoIterator for &'a HasManyProxy {
    type Item = &'a Resource;
    type IntoIter = std::slice::Iter<'a, Resource>;

    fn into_iter(self) -> Self::IntoIter {
        self.collection.iter()
    }
}
