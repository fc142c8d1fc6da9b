//! The generic resource instance and its lifecycle.
//!
//! A [`Resource`] is one instance of a registered type: an
//! [`AttributeStore`] plus the type's shared [`ResourceMetadata`], the
//! client it talks through and the parent objects (or ids) that scope its
//! URL. The same struct serves every type; behavior differs only through
//! the metadata.
//!
//! # Lifecycle
//!
//! | Operation | Request | Effect |
//! |-----------|---------|--------|
//! | [`fetch`](Resource::fetch) | `GET url` | response merged (clobber), marked expanded |
//! | [`save`](Resource::save) | `POST` when new, `PUT` otherwise | changes merged (deep), then response (clobber) |
//! | [`delete`](Resource::delete) | `DELETE url` | marked deleted |
//!
//! `fetch` on an already expanded instance makes no request unless asked
//! to reload.
//!
//! # Example
//!
//! ```rust,ignore
//! use tracker_rest::rest::{Attributes, Resource, ResourceOptions};
//! use serde_json::json;
//!
//! let issues = client.resource("Issue")?;
//!
//! let mut issue = issues.find("TEST-1", ResourceOptions::new()).await?;
//! println!("{}", issue.get("fields").unwrap_or(&json!(null)));
//!
//! let mut changes = Attributes::new();
//! changes.insert("fields".into(), json!({"summary": "Renamed"}));
//! if !issue.save(changes).await? {
//!     println!("rejected: {:?}", issue.get("errors"));
//! }
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::clients::{HttpError, HttpResponse};
use crate::rest::path::{self, QueryParams, SEARCH_PARAMS, SINGLE_FETCH_PARAMS};
use crate::rest::{ApiClient, AttributeStore, Attributes, ResourceError, ResourceMetadata};

/// Construction options for a [`Resource`].
///
/// Parent relations declared with `belongs_to` must each be supplied,
/// either as an object with [`parent`](Self::parent) or as a bare id with
/// [`parent_id`](Self::parent_id). When both are given the object wins.
///
/// # Example
///
/// ```rust
/// use tracker_rest::rest::ResourceOptions;
/// use serde_json::json;
///
/// let options = ResourceOptions::new()
///     .attrs(json!({"body": "Looks good"}).as_object().unwrap().clone())
///     .parent_id("issue", "10002")
///     .query("expand", "renderedBody");
/// ```
#[derive(Clone, Debug, Default)]
pub struct ResourceOptions {
    attrs: Attributes,
    expanded: bool,
    parents: HashMap<String, Arc<Resource>>,
    parent_ids: HashMap<String, String>,
    query: QueryParams,
}

impl ResourceOptions {
    /// Creates empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the initial attributes.
    #[must_use]
    pub fn attrs(mut self, attrs: Attributes) -> Self {
        self.attrs = attrs;
        self
    }

    /// Marks the instance as already holding its full representation.
    #[must_use]
    pub const fn expanded(mut self, expanded: bool) -> Self {
        self.expanded = expanded;
        self
    }

    /// Supplies a parent object for a `belongs_to` relation.
    #[must_use]
    pub fn parent(mut self, relation: impl Into<String>, parent: impl Into<Arc<Resource>>) -> Self {
        self.parents.insert(relation.into(), parent.into());
        self
    }

    /// Supplies only the id of a parent for a `belongs_to` relation.
    #[must_use]
    pub fn parent_id(mut self, relation: impl Into<String>, id: impl Into<String>) -> Self {
        self.parent_ids.insert(relation.into(), id.into());
        self
    }

    /// Adds a query parameter for `find` and `all`.
    ///
    /// `find` forwards `expand` and `fields`; `all` additionally forwards
    /// `startAt` and `maxResults`. Other names are dropped.
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.query.insert(key, value);
        self
    }

    /// Replaces all query parameters.
    #[must_use]
    pub fn query_params(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    fn resolve_parents(&self, metadata: &ResourceMetadata) -> Result<Vec<ParentLink>, ResourceError> {
        metadata
            .belongs_to()
            .iter()
            .map(|relation| {
                if let Some(parent) = self.parents.get(relation) {
                    Ok(ParentLink {
                        relation: relation.clone(),
                        id: parent.key_value(),
                        resource: Some(Arc::clone(parent)),
                    })
                } else if let Some(id) = self.parent_ids.get(relation) {
                    Ok(ParentLink {
                        relation: relation.clone(),
                        id: Some(id.clone()),
                        resource: None,
                    })
                } else {
                    Err(ResourceError::MissingRelation {
                        resource: metadata.type_name().to_string(),
                        relation: relation.clone(),
                    })
                }
            })
            .collect()
    }
}

#[derive(Clone, Debug)]
struct ParentLink {
    relation: String,
    id: Option<String>,
    resource: Option<Arc<Resource>>,
}

fn relation_prefix(parents: &[ParentLink]) -> String {
    path::relation_prefix(
        parents
            .iter()
            .map(|link| (link.relation.as_str(), link.id.as_deref().unwrap_or_default())),
    )
}

/// One instance of a registered resource type.
///
/// Serializes as exactly its attributes. Displays as
/// `#<TypeName @attrs={...}>`.
#[derive(Clone, Debug)]
pub struct Resource {
    client: ApiClient,
    metadata: Arc<ResourceMetadata>,
    attrs: AttributeStore,
    expanded: bool,
    deleted: bool,
    parents: Vec<ParentLink>,
}

// Verify Resource is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Resource>();
    assert_send_sync::<ResourceOptions>();
};

impl Resource {
    /// Constructs an instance of the type described by `metadata`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingRelation`] if a `belongs_to` relation
    /// is supplied neither as an object nor as an id.
    pub fn new(
        client: &ApiClient,
        metadata: Arc<ResourceMetadata>,
        options: ResourceOptions,
    ) -> Result<Self, ResourceError> {
        let parents = options.resolve_parents(&metadata)?;
        Ok(Self::from_parts(
            client.clone(),
            metadata,
            options.attrs,
            options.expanded,
            parents,
        ))
    }

    fn from_parts(
        client: ApiClient,
        metadata: Arc<ResourceMetadata>,
        attrs: Attributes,
        expanded: bool,
        parents: Vec<ParentLink>,
    ) -> Self {
        Self {
            client,
            metadata,
            attrs: AttributeStore::from(attrs),
            expanded,
            deleted: false,
            parents,
        }
    }

    /// Constructs an unsaved instance holding `attrs`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingRelation`] if the type declares any
    /// `belongs_to` relation; use [`Resource::new`] to supply parents.
    pub fn build(
        client: &ApiClient,
        metadata: Arc<ResourceMetadata>,
        attrs: Attributes,
    ) -> Result<Self, ResourceError> {
        Self::new(client, metadata, ResourceOptions::new().attrs(attrs))
    }

    /// Fetches the instance whose key attribute is `key`.
    ///
    /// Only the `expand` and `fields` query parameters of `options` are sent.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingRelation`] for missing parents, or
    /// any error of [`Resource::fetch_with`].
    pub async fn find(
        client: &ApiClient,
        metadata: Arc<ResourceMetadata>,
        key: &str,
        options: ResourceOptions,
    ) -> Result<Self, ResourceError> {
        let query = options.query.clone();
        let mut resource = Self::new(client, metadata, options)?;
        let key_attribute = resource.metadata.key_attribute().to_string();
        resource.attrs.insert(key_attribute, key);
        resource.fetch_with(false, &query).await?;
        Ok(resource)
    }

    /// Lists every instance at the collection path.
    ///
    /// The parents in `options` scope the path and are given to every
    /// element, as are `attrs`-independent flags like `expanded`. Only the
    /// `expand`, `fields`, `startAt` and `maxResults` query parameters are
    /// sent.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingRelation`] before any request if a
    /// parent is missing, [`ResourceError::Http`] for transport failures,
    /// and [`ResourceError::Parse`] or [`ResourceError::UnexpectedBody`] for
    /// a malformed listing.
    pub async fn all(
        client: &ApiClient,
        metadata: Arc<ResourceMetadata>,
        options: ResourceOptions,
    ) -> Result<Vec<Self>, ResourceError> {
        let parents = options.resolve_parents(&metadata)?;
        let collection = path::collection_path(
            client.transport().rest_base_path(),
            &relation_prefix(&parents),
            metadata.endpoint_name(),
        );
        let url = path::with_query(&collection, &options.query.only(SEARCH_PARAMS));

        tracing::debug!("Listing {} from {}", metadata.type_name(), url);
        let response = client.transport().get(&url).await?;

        let items = parse_collection(&metadata, &response)?;
        Ok(items
            .into_iter()
            .map(|attrs| {
                Self::from_parts(
                    client.clone(),
                    Arc::clone(&metadata),
                    attrs,
                    options.expanded,
                    parents.clone(),
                )
            })
            .collect())
    }

    /// The registered type name.
    #[must_use]
    pub fn type_name(&self) -> &str {
        self.metadata.type_name()
    }

    /// The type's metadata.
    #[must_use]
    pub fn metadata(&self) -> &Arc<ResourceMetadata> {
        &self.metadata
    }

    /// The client this instance talks through.
    #[must_use]
    pub const fn client(&self) -> &ApiClient {
        &self.client
    }

    /// The raw attributes.
    #[must_use]
    pub const fn attrs(&self) -> &AttributeStore {
        &self.attrs
    }

    /// Mutable access to the raw attributes.
    pub fn attrs_mut(&mut self) -> &mut AttributeStore {
        &mut self.attrs
    }

    /// Returns the attribute under `key`; see [`AttributeStore::get`].
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attrs.get(key)
    }

    /// Returns `true` if the attribute is present.
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.attrs.has(key)
    }

    /// Merges `incoming` into the attributes; see [`AttributeStore::merge`].
    pub fn set_attrs(&mut self, incoming: Attributes, clobber: bool) {
        self.attrs.merge(incoming, clobber);
    }

    /// The `id` attribute.
    #[must_use]
    pub fn id(&self) -> Option<&Value> {
        self.attrs.get("id")
    }

    /// The value of the key attribute rendered for use in a URL.
    ///
    /// Strings are used as-is, other values are rendered as JSON. An absent
    /// or `null` key yields `None`.
    #[must_use]
    pub fn key_value(&self) -> Option<String> {
        match self.attrs.get(self.metadata.key_attribute())? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// `true` until the instance has a key value.
    #[must_use]
    pub fn new_record(&self) -> bool {
        self.key_value().is_none()
    }

    /// `true` once the full representation has been fetched.
    #[must_use]
    pub const fn expanded(&self) -> bool {
        self.expanded
    }

    /// `true` after a successful [`delete`](Self::delete).
    #[must_use]
    pub const fn deleted(&self) -> bool {
        self.deleted
    }

    /// `true` if the attributes carry an `errors` entry.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.attrs.has("errors")
    }

    /// The parent object supplied for a `belongs_to` relation.
    ///
    /// `None` if only an id was supplied.
    #[must_use]
    pub fn parent(&self, relation: &str) -> Option<&Resource> {
        self.parents
            .iter()
            .find(|link| link.relation == relation)
            .and_then(|link| link.resource.as_deref())
    }

    /// The id of the parent in a `belongs_to` relation.
    #[must_use]
    pub fn parent_id(&self, relation: &str) -> Option<&str> {
        self.parents
            .iter()
            .find(|link| link.relation == relation)
            .and_then(|link| link.id.as_deref())
    }

    /// `/{endpoint}` or `/{endpoint}/{key}` for this instance.
    #[must_use]
    pub fn path_component(&self) -> String {
        path::path_component(self.metadata.endpoint_name(), self.key_value().as_deref())
    }

    /// The prefix contributed by this instance's parents, e.g. `/project/10/`.
    #[must_use]
    pub fn relation_prefix(&self) -> String {
        relation_prefix(&self.parents)
    }

    /// The collection path of the type under `prefix`.
    #[must_use]
    pub fn rest_base_path(&self, prefix: &str) -> String {
        path::collection_path(
            self.client.transport().rest_base_path(),
            prefix,
            self.metadata.endpoint_name(),
        )
    }

    /// The URL of this instance.
    ///
    /// A server-provided `self` link wins. Otherwise the singular path when
    /// a key is known, else the collection path.
    #[must_use]
    pub fn url(&self) -> String {
        if let Some(link) = self.attrs.get("self").and_then(Value::as_str) {
            return link.to_string();
        }
        let prefix = self.relation_prefix();
        match self.key_value() {
            Some(key) => path::singular_path(
                self.client.transport().rest_base_path(),
                &key,
                &prefix,
                self.metadata.endpoint_name(),
            ),
            None => self.rest_base_path(&prefix),
        }
    }

    /// Fetches the full representation unless already expanded.
    ///
    /// # Errors
    ///
    /// See [`Resource::fetch_with`].
    pub async fn fetch(&mut self, reload: bool) -> Result<(), ResourceError> {
        self.fetch_with(reload, &QueryParams::new()).await
    }

    /// Fetches the full representation with query parameters.
    ///
    /// Does nothing if the instance is expanded and `reload` is `false`.
    /// Otherwise GETs [`url`](Self::url) with the `expand` and `fields`
    /// parameters of `query`, merges the response over the attributes and
    /// marks the instance expanded. A body shorter than two characters
    /// leaves the attributes untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] for transport failures (the instance
    /// is unchanged), [`ResourceError::Parse`] for a body that is not JSON,
    /// or [`ResourceError::UnexpectedBody`] for JSON that is not an object.
    pub async fn fetch_with(&mut self, reload: bool, query: &QueryParams) -> Result<(), ResourceError> {
        if self.expanded && !reload {
            tracing::debug!("{} is already expanded, not fetching", self.type_name());
            return Ok(());
        }

        let url = path::with_query(&self.url(), &query.only(SINGLE_FETCH_PARAMS));
        tracing::debug!("Fetching {} from {}", self.type_name(), url);

        let response = self.client.transport().get(&url).await?;
        self.apply_response(&response)?;
        self.expanded = true;
        Ok(())
    }

    /// Saves `changes`, failing on any error.
    ///
    /// POSTs to the collection path when the instance is new, PUTs to its
    /// URL otherwise. The body is exactly `changes`. On success `changes`
    /// are deep-merged into the attributes, the response is merged over
    /// them, and the instance is marked not expanded.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails (the attributes
    /// are unchanged), or a parse error for a malformed success body.
    pub async fn try_save(&mut self, changes: Attributes) -> Result<(), ResourceError> {
        let url = self.url();
        let body = Value::Object(changes.clone()).to_string();

        let response = if self.new_record() {
            tracing::debug!("Creating {} at {}", self.type_name(), url);
            self.client.transport().post(&url, body).await?
        } else {
            tracing::debug!("Updating {} at {}", self.type_name(), url);
            self.client.transport().put(&url, body).await?
        };

        self.attrs.merge(changes, false);
        self.apply_response(&response)?;
        self.expanded = false;
        Ok(())
    }

    /// Saves `changes`, reporting HTTP failures as `Ok(false)`.
    ///
    /// On an HTTP status failure the error response body, if it is a JSON
    /// object, is merged over the attributes so that server-side validation
    /// messages (usually under `errors`) can be read back. The changes
    /// themselves are not applied.
    ///
    /// # Errors
    ///
    /// Only returns an error when a successful response carries a malformed
    /// body.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// if !issue.save(changes).await? {
    ///     assert!(issue.has_errors());
    /// }
    /// ```
    pub async fn save(&mut self, changes: Attributes) -> Result<bool, ResourceError> {
        match self.try_save(changes).await {
            Ok(()) => Ok(true),
            Err(ResourceError::Http(error)) => {
                self.salvage(&error);
                Ok(false)
            }
            Err(error) => Err(error),
        }
    }

    /// Deletes the instance at its URL and marks it deleted.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails; the instance is
    /// then not marked deleted.
    pub async fn delete(&mut self) -> Result<(), ResourceError> {
        let url = self.url();
        tracing::debug!("Deleting {} at {}", self.type_name(), url);
        self.client.transport().delete(&url).await?;
        self.deleted = true;
        Ok(())
    }

    /// Serializes the attributes as a JSON string.
    ///
    /// # Errors
    ///
    /// Returns the serialization error, which does not occur for attributes
    /// built from parsed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.attrs)
    }

    fn apply_response(&mut self, response: &HttpResponse) -> Result<(), ResourceError> {
        if !response.has_body() {
            return Ok(());
        }
        let body = serde_json::from_str::<Value>(&response.body)
            .map_err(|e| ResourceError::parse(self.type_name(), e))?;
        match body {
            Value::Object(attrs) => {
                self.attrs.merge(attrs, true);
                Ok(())
            }
            _ => Err(ResourceError::unexpected(self.type_name(), "a JSON object")),
        }
    }

    fn salvage(&mut self, error: &HttpError) {
        tracing::warn!("Saving {} failed: {}", self.type_name(), error);
        if let Some(response) = error.response() {
            if let Err(e) = self.apply_response(response) {
                tracing::warn!("Ignoring unreadable error body for {}: {}", self.type_name(), e);
            }
        }
    }
}

fn parse_collection(
    metadata: &ResourceMetadata,
    response: &HttpResponse,
) -> Result<Vec<Attributes>, ResourceError> {
    if !response.has_body() {
        return Ok(Vec::new());
    }
    let mut body = serde_json::from_str::<Value>(&response.body)
        .map_err(|e| ResourceError::parse(metadata.type_name(), e))?;

    if metadata.nested_collections() {
        body = match body {
            Value::Object(mut wrapper) => wrapper
                .remove(&metadata.collection_key())
                .ok_or_else(|| ResourceError::unexpected(metadata.type_name(), "a wrapped collection"))?,
            _ => return Err(ResourceError::unexpected(metadata.type_name(), "a wrapped collection")),
        };
    }

    let Value::Array(items) = body else {
        return Err(ResourceError::unexpected(metadata.type_name(), "an array of objects"));
    };
    items
        .into_iter()
        .map(|item| match item {
            Value::Object(attrs) => Ok(attrs),
            _ => Err(ResourceError::unexpected(metadata.type_name(), "an array of objects")),
        })
        .collect()
}

impl Serialize for Resource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.attrs.serialize(serializer)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let attrs = self.to_json().map_err(|_| fmt::Error)?;
        write!(f, "#<{} @attrs={}>", self.type_name(), attrs)
    }
}
