//! Name inflection for relation and type names.
//!
//! Relations are declared by their attribute name (`comments`, `assignee`)
//! and, unless a type is given explicitly, resolve to a registered type
//! name by singularizing and classifying that name:
//! `comments` -> `comment` -> `Comment`, `issue_links` -> `IssueLink`.
//!
//! The rules cover regular English plurals only. Irregular names should be
//! declared with an explicit type through
//! [`RelationOptions::child_type`](crate::rest::RelationOptions::child_type).

use heck::ToUpperCamelCase;

/// Returns the plural form of a lowercase singular noun.
///
/// # Example
///
/// ```rust
/// use tracker_rest::rest::inflector::pluralize;
///
/// assert_eq!(pluralize("issue"), "issues");
/// assert_eq!(pluralize("status"), "statuses");
/// assert_eq!(pluralize("priority"), "priorities");
/// ```
#[must_use]
pub fn pluralize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }
    if let Some(stem) = word.strip_suffix('y') {
        if !ends_with_vowel(stem) {
            return format!("{stem}ies");
        }
    }
    if ["s", "x", "z", "ch", "sh"]
        .iter()
        .any(|suffix| word.ends_with(suffix))
    {
        return format!("{word}es");
    }
    format!("{word}s")
}

/// Returns the singular form of a lowercase plural noun.
///
/// Words that do not look plural are returned unchanged.
///
/// # Example
///
/// ```rust
/// use tracker_rest::rest::inflector::singularize;
///
/// assert_eq!(singularize("comments"), "comment");
/// assert_eq!(singularize("priorities"), "priority");
/// assert_eq!(singularize("statuses"), "status");
/// assert_eq!(singularize("status"), "status");
/// ```
#[must_use]
pub fn singularize(word: &str) -> String {
    if let Some(stem) = word.strip_suffix("ies") {
        if !stem.is_empty() {
            return format!("{stem}y");
        }
    }
    // Only these endings take `-es`; `causes` and `sizes` just drop the `s`.
    for suffix in ["sses", "tuses", "iases", "xes", "zzes", "ches", "shes"] {
        if word.ends_with(suffix) {
            return word[..word.len() - 2].to_string();
        }
    }
    if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
        return word.to_string();
    }
    word.strip_suffix('s').unwrap_or(word).to_string()
}

/// Returns the type name a relation name refers to.
///
/// # Example
///
/// ```rust
/// use tracker_rest::rest::inflector::classify;
///
/// assert_eq!(classify("comments"), "Comment");
/// assert_eq!(classify("issue_links"), "IssueLink");
/// assert_eq!(classify("assignee"), "Assignee");
/// ```
#[must_use]
pub fn classify(name: &str) -> String {
    let mut words: Vec<&str> = name.split('_').collect();
    let last = words.pop().map(singularize).unwrap_or_default();
    let mut singular = words.join("_");
    if !singular.is_empty() {
        singular.push('_');
    }
    singular.push_str(&last);
    singular.to_upper_camel_case()
}

/// Returns the default endpoint name of a type: its name lowercased.
///
/// # Example
///
/// ```rust
/// use tracker_rest::rest::inflector::endpoint_name;
///
/// assert_eq!(endpoint_name("IssueType"), "issuetype");
/// ```
#[must_use]
pub fn endpoint_name(type_name: &str) -> String {
    type_name.to_lowercase()
}

fn ends_with_vowel(stem: &str) -> bool {
    stem.ends_with(['a', 'e', 'i', 'o', 'u'])
}
