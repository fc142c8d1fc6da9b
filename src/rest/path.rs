//! Path building for REST resources.
//!
//! Resource URLs are assembled from four parts:
//!
//! ```text
//! {rest base path}{relation prefix}{endpoint name}[/{key}]
//! /rest/api/2     /project/10/     version         /3
//! ```
//!
//! The relation prefix is `/` followed by one `name/id/` pair per declared
//! parent relation, in declaration order. A type with no parents has the
//! prefix `/`.
//!
//! Query strings are built from [`QueryParams`], which keeps its pairs
//! sorted so that the same parameters always produce the same URL.
//!
//! # Example
//!
//! ```rust
//! use tracker_rest::rest::{collection_path, relation_prefix, singular_path, with_query, QueryParams};
//!
//! let prefix = relation_prefix([("project", "10")]);
//! assert_eq!(prefix, "/project/10/");
//!
//! assert_eq!(collection_path("/rest/api/2", &prefix, "version"), "/rest/api/2/project/10/version");
//! assert_eq!(singular_path("/rest/api/2", "3", "/", "version"), "/rest/api/2/version/3");
//!
//! let query = QueryParams::new().with("expand", "changelog");
//! assert_eq!(with_query("/rest/api/2/issue/1", &query), "/rest/api/2/issue/1?expand=changelog");
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// Query parameters honored by a single-instance fetch.
pub const SINGLE_FETCH_PARAMS: &[&str] = &["expand", "fields"];

/// Query parameters honored by a collection listing.
pub const SEARCH_PARAMS: &[&str] = &["expand", "fields", "startAt", "maxResults"];

/// An ordered set of query parameters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryParams(BTreeMap<String, String>);

impl QueryParams {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds parameters from any serializable struct or map.
    ///
    /// `null` fields are skipped and arrays become comma-separated lists.
    ///
    /// # Errors
    ///
    /// Returns the serialization error if `params` cannot be serialized.
    pub fn from_serialize<T: Serialize>(params: &T) -> Result<Self, serde_json::Error> {
        let mut query = Self::new();
        if let Value::Object(map) = serde_json::to_value(params)? {
            for (key, value) in map {
                match value {
                    Value::Null => {}
                    Value::String(s) => query.insert(key, s),
                    Value::Array(values) => {
                        let values: Vec<String> = values
                            .iter()
                            .filter_map(|v| match v {
                                Value::String(s) => Some(s.clone()),
                                Value::Number(n) => Some(n.to_string()),
                                Value::Bool(b) => Some(b.to_string()),
                                _ => None,
                            })
                            .collect();
                        if !values.is_empty() {
                            query.insert(key, values.join(","));
                        }
                    }
                    other => query.insert(key, other.to_string()),
                }
            }
        }
        Ok(query)
    }

    /// Sets a parameter, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl fmt::Display) {
        self.0.insert(key.into(), value.to_string());
    }

    /// Sets a parameter and returns `self`.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.insert(key, value);
        self
    }

    /// Returns the value of a parameter.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Returns `true` if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns only the parameters whose names are in `allowed`.
    #[must_use]
    pub fn only(&self, allowed: &[&str]) -> Self {
        Self(
            self.0
                .iter()
                .filter(|(key, _)| allowed.contains(&key.as_str()))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        )
    }

    /// Renders the parameters as a percent-encoded query string (without `?`).
    #[must_use]
    pub fn to_query_string(&self) -> String {
        self.0
            .iter()
            .map(|(key, value)| {
                format!(
                    "{}={}",
                    urlencoding::encode(key),
                    urlencoding::encode(value)
                )
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl<K: Into<String>, V: fmt::Display> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut query = Self::new();
        for (key, value) in iter {
            query.insert(key, value);
        }
        query
    }
}

/// Returns `/{endpoint}` or `/{endpoint}/{key}`.
#[must_use]
pub fn path_component(endpoint: &str, key: Option<&str>) -> String {
    key.map_or_else(
        || format!("/{endpoint}"),
        |key| format!("/{endpoint}/{key}"),
    )
}

/// Builds the relation prefix from `(relation, id)` pairs.
///
/// With no pairs the prefix is `/`.
#[must_use]
pub fn relation_prefix<'a, I>(parents: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    parents
        .into_iter()
        .fold(String::from("/"), |mut prefix, (relation, id)| {
            prefix.push_str(relation);
            prefix.push('/');
            prefix.push_str(id);
            prefix.push('/');
            prefix
        })
}

/// Returns the collection path: base path, prefix and endpoint joined.
#[must_use]
pub fn collection_path(rest_base_path: &str, prefix: &str, endpoint: &str) -> String {
    format!("{rest_base_path}{prefix}{endpoint}")
}

/// Returns the path of a single instance: the collection path plus `/{key}`.
#[must_use]
pub fn singular_path(rest_base_path: &str, key: &str, prefix: &str, endpoint: &str) -> String {
    format!("{}/{key}", collection_path(rest_base_path, prefix, endpoint))
}

/// Appends a query string to a path, if there are any parameters.
///
/// Paths that already carry a query (server-provided links) are extended
/// with `&`.
#[must_use]
pub fn with_query(path: &str, query: &QueryParams) -> String {
    if query.is_empty() {
        return path.to_string();
    }
    let separator = if path.contains('?') { '&' } else { '?' };
    format!("{path}{separator}{}", query.to_query_string())
}

// Verify types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<QueryParams>();
};
