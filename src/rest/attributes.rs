//! Attribute storage and merge semantics.
//!
//! Every resource instance keeps its server data as an untyped JSON object
//! in an [`AttributeStore`]. Responses are folded in with
//! [`AttributeStore::merge`], which has two modes:
//!
//! - **clobber** (`true`): shallow overlay. Each top-level key of the
//!   incoming object replaces the stored value. Used for server responses,
//!   which are authoritative.
//! - **deep** (`false`): nested objects are merged key by key, every other
//!   value overwrites. Used to apply a caller's change set so that sending
//!   `{"fields": {"summary": "x"}}` does not drop the other `fields`.
//!
//! In deep mode, if the stored value under a key is missing or is not an
//! object, the incoming object is inserted wholesale.
//!
//! # Example
//!
//! ```rust
//! use tracker_rest::rest::AttributeStore;
//! use serde_json::json;
//!
//! let mut attrs = AttributeStore::from_value(json!({
//!     "fields": {"summary": "Old", "priority": "High"}
//! })).unwrap();
//!
//! attrs.merge(json!({"fields": {"summary": "New"}}).as_object().unwrap().clone(), false);
//! assert_eq!(attrs.get("fields"), Some(&json!({"summary": "New", "priority": "High"})));
//!
//! attrs.merge(json!({"fields": {"summary": "Newer"}}).as_object().unwrap().clone(), true);
//! assert_eq!(attrs.get("fields"), Some(&json!({"summary": "Newer"})));
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A JSON object keyed by attribute name.
pub type Attributes = Map<String, Value>;

/// The raw keyed attribute data of one resource instance.
///
/// Serializes as exactly the wrapped JSON object.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeStore(Attributes);

impl AttributeStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store from a JSON value, if it is an object.
    #[must_use]
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// Returns the value under `key`.
    ///
    /// `None` means the key is absent; a present `null` is `Some(&Value::Null)`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns `true` if `key` is present (even if its value is `null`).
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Inserts a value, returning the previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Removes a value, returning it.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    /// Looks up `key` inside the object found by walking `nested_under`.
    ///
    /// An empty path looks at the top level. A missing or non-object
    /// intermediate value yields `None`.
    #[must_use]
    pub fn lookup(&self, key: &str, nested_under: &[String]) -> Option<&Value> {
        let mut current = &self.0;
        for segment in nested_under {
            current = current.get(segment)?.as_object()?;
        }
        current.get(key)
    }

    /// Merges `incoming` into the store.
    ///
    /// With `clobber` every top-level key of `incoming` overwrites; without
    /// it nested objects are merged recursively and other values overwrite.
    /// Keys absent from `incoming` are never touched.
    pub fn merge(&mut self, incoming: Attributes, clobber: bool) {
        if clobber {
            for (key, value) in incoming {
                self.0.insert(key, value);
            }
        } else {
            deep_merge(&mut self.0, incoming);
        }
    }

    /// Returns the number of top-level attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over top-level attributes.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Returns the underlying JSON object.
    #[must_use]
    pub const fn as_map(&self) -> &Attributes {
        &self.0
    }

    /// Consumes the store, returning the underlying JSON object.
    #[must_use]
    pub fn into_map(self) -> Attributes {
        self.0
    }
}

impl From<Attributes> for AttributeStore {
    fn from(map: Attributes) -> Self {
        Self(map)
    }
}

fn deep_merge(target: &mut Attributes, incoming: Attributes) {
    for (key, value) in incoming {
        match value {
            Value::Object(nested) => match target.get_mut(&key) {
                Some(Value::Object(existing)) => deep_merge(existing, nested),
                _ => {
                    target.insert(key, Value::Object(nested));
                }
            },
            other => {
                target.insert(key, other);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store(value: Value) -> AttributeStore {
        AttributeStore::from_value(value).unwrap()
    }

    fn object(value: Value) -> Attributes {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_get_distinguishes_absent_from_null() {
        let attrs = store(json!({"resolution": null}));
        assert_eq!(attrs.get("resolution"), Some(&Value::Null));
        assert_eq!(attrs.get("missing"), None);
        assert!(attrs.has("resolution"));
        assert!(!attrs.has("missing"));
    }

    #[test]
    fn test_clobber_merge_overwrites_top_level_keys_only() {
        let mut attrs = store(json!({
            "id": "1",
            "fields": {"summary": "Old", "priority": "High"},
            "untouched": true
        }));

        attrs.merge(object(json!({"fields": {"summary": "New"}, "key": "TEST-1"})), true);

        assert_eq!(attrs.get("fields"), Some(&json!({"summary": "New"})));
        assert_eq!(attrs.get("key"), Some(&json!("TEST-1")));
        assert_eq!(attrs.get("untouched"), Some(&json!(true)));
        assert_eq!(attrs.get("id"), Some(&json!("1")));
    }

    #[test]
    fn test_clobber_merge_replaces_regardless_of_type() {
        let mut attrs = store(json!({"labels": ["a", "b"]}));
        attrs.merge(object(json!({"labels": {"not": "a list"}})), true);
        assert_eq!(attrs.get("labels"), Some(&json!({"not": "a list"})));
    }

    #[test]
    fn test_deep_merge_recurses_into_nested_objects() {
        let mut attrs = store(json!({
            "fields": {
                "summary": "Old",
                "assignee": {"name": "alice", "active": true}
            }
        }));

        attrs.merge(
            object(json!({"fields": {"assignee": {"name": "bob"}, "labels": ["x"]}})),
            false,
        );

        assert_eq!(
            attrs.get("fields"),
            Some(&json!({
                "summary": "Old",
                "assignee": {"name": "bob", "active": true},
                "labels": ["x"]
            }))
        );
    }

    #[test]
    fn test_deep_merge_overwrites_scalars_and_arrays() {
        let mut attrs = store(json!({"votes": 1, "labels": ["a"]}));
        attrs.merge(object(json!({"votes": 2, "labels": ["b"]})), false);
        assert_eq!(attrs.get("votes"), Some(&json!(2)));
        assert_eq!(attrs.get("labels"), Some(&json!(["b"])));
    }

    #[test]
    fn test_deep_merge_inserts_nested_object_when_target_absent() {
        let mut attrs = AttributeStore::new();
        attrs.merge(object(json!({"fields": {"summary": "Hi"}})), false);
        assert_eq!(attrs.get("fields"), Some(&json!({"summary": "Hi"})));
    }

    #[test]
    fn test_deep_merge_replaces_non_object_target() {
        let mut attrs = store(json!({"fields": "scalar"}));
        attrs.merge(object(json!({"fields": {"summary": "Hi"}})), false);
        assert_eq!(attrs.get("fields"), Some(&json!({"summary": "Hi"})));
    }

    #[test]
    fn test_lookup_walks_nested_path() {
        let attrs = store(json!({
            "fields": {"comment": {"comments": [{"id": "1"}]}}
        }));
        let path = vec!["fields".to_string(), "comment".to_string()];

        assert_eq!(
            attrs.lookup("comments", &path),
            Some(&json!([{"id": "1"}]))
        );
        assert_eq!(attrs.lookup("fields", &[]).map(Value::is_object), Some(true));
    }

    #[test]
    fn test_lookup_missing_intermediate_is_absent() {
        let attrs = store(json!({"fields": {"comment": null}}));
        let path = vec!["fields".to_string(), "comment".to_string()];
        assert_eq!(attrs.lookup("comments", &path), None);

        let path = vec!["nope".to_string()];
        assert_eq!(attrs.lookup("comments", &path), None);
    }

    #[test]
    fn test_serializes_as_bare_object() {
        let attrs = store(json!({"id": "10", "key": "TEST-10"}));
        let json = serde_json::to_value(&attrs).unwrap();
        assert_eq!(json, json!({"id": "10", "key": "TEST-10"}));
    }

    #[test]
    fn test_from_value_rejects_non_objects() {
        assert!(AttributeStore::from_value(json!([1, 2])).is_none());
        assert!(AttributeStore::from_value(json!("x")).is_none());
    }
}
