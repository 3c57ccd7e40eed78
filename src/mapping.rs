//! # Template Data Mapping
//!
//! A theme binds template fields to GraphQL query results through a mapping
//! table in its configuration:
//!
//! ```json
//! "mappings": {
//!   "title":    { "querySource": "site", "field": "title" },
//!   "subtitle": { "querySource": null,   "field": null }
//! }
//! ```
//!
//! [`resolve_field`] looks up a template key in that table and returns the
//! matching value from a query result shaped like
//! `{ "data": { <querySource>: { <field>: value } } }`.
//!
//! A mapping whose `querySource` or `field` is explicitly `null` opts the
//! template field out of data binding and resolves to `null`. A mapping that
//! lacks either sub-key altogether is a configuration mistake and is reported
//! as [`Error::MalformedMapping`]. The two cases are never conflated.
//!
//! [`compose_query`] builds the query text itself from the theme's `query`
//! specification.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::{Error, Result};

/// Sub-key naming the query source of a mapping.
pub const QUERY_SOURCE: &str = "querySource";

/// Sub-key naming the field of a mapping.
pub const FIELD: &str = "field";

/// A parsed mapping entry. `None` stands for an explicit `null`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataMapping {
    pub query_source: Option<String>,
    pub field: Option<String>,
}

impl DataMapping {
    /// Parses the mapping entry declared for `key`.
    pub fn from_value(key: &str, entry: &Value) -> Result<Self> {
        Ok(Self {
            query_source: nullable_string(key, entry, QUERY_SOURCE)?,
            field: nullable_string(key, entry, FIELD)?,
        })
    }

    /// Source and field, or `None` when either is the `null` sentinel.
    pub fn target(&self) -> Option<(&str, &str)> {
        match (&self.query_source, &self.field) {
            (Some(source), Some(field)) => Some((source, field)),
            _ => None,
        }
    }
}

fn nullable_string(key: &str, entry: &Value, subkey: &str) -> Result<Option<String>> {
    let malformed = || Error::MalformedMapping {
        key: key.to_string(),
        subkey: subkey.to_string(),
    };
    match entry.get(subkey).ok_or_else(malformed)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        _ => Err(malformed()),
    }
}

/// Resolves the value bound to template `key`.
///
/// Returns `Value::Null` for the explicit `null` sentinel without looking at
/// `query_result`. A mapped path that does not exist in `query_result` is an
/// [`Error::QueryLookup`]; an existing `null` value is returned as is.
pub fn resolve_field(
    key: &str,
    mappings: &BTreeMap<String, Value>,
    query_result: &Value,
) -> Result<Value> {
    let entry = mappings.get(key).ok_or_else(|| Error::MissingMappingKey {
        key: key.to_string(),
    })?;
    let mapping = DataMapping::from_value(key, entry)?;

    let Some((source, field)) = mapping.target() else {
        return Ok(Value::Null);
    };

    query_result
        .get("data")
        .and_then(|data| data.get(source))
        .and_then(|source| source.get(field))
        .cloned()
        .ok_or_else(|| Error::QueryLookup {
            key: key.to_string(),
            path: format!("data.{source}.{field}"),
        })
}

/// Resolves every key of `mappings`, stopping at the first error.
pub fn resolve_all(
    mappings: &BTreeMap<String, Value>,
    query_result: &Value,
) -> Result<BTreeMap<String, Value>> {
    mappings
        .keys()
        .map(|key| Ok((key.clone(), resolve_field(key, mappings, query_result)?)))
        .collect()
}

/// Builds GraphQL query text from a theme's `query` specification.
///
/// A string is used verbatim. A mapping of alias to selection becomes one
/// aliased selection per entry wrapped in braces, e.g.
/// `{"site": "site { siteMetadata { title } }"}` composes to
/// `{ site: site { siteMetadata { title } } }`.
pub fn compose_query(query: &Value) -> Option<String> {
    match query {
        Value::String(text) => Some(text.clone()),
        Value::Object(entries) => {
            let selections: Vec<String> = entries
                .iter()
                .map(|(alias, selection)| match selection {
                    Value::String(s) => format!("{alias}: {s}"),
                    other => format!("{alias}: {other}"),
                })
                .collect();
            Some(format!("{{ {} }}", selections.join(" ")))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn mappings(value: Value) -> BTreeMap<String, Value> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_resolves_nested_value() {
        let mappings = mappings(json!({ "title": { "querySource": "site", "field": "title" } }));
        let result = json!({ "data": { "site": { "title": "Hello" } } });
        assert_eq!(resolve_field("title", &mappings, &result).unwrap(), json!("Hello"));
    }

    #[test]
    fn test_null_sentinel_skips_query_result() {
        let mappings = mappings(json!({ "subtitle": { "querySource": null, "field": null } }));
        // The query result is not even shaped correctly; it must not be read.
        let result = json!(42);
        assert_eq!(resolve_field("subtitle", &mappings, &result).unwrap(), Value::Null);
    }

    #[test]
    fn test_single_null_is_sentinel() {
        let mappings = mappings(json!({
            "a": { "querySource": null, "field": "title" },
            "b": { "querySource": "site", "field": null },
        }));
        let result = json!({ "data": {} });
        assert_eq!(resolve_field("a", &mappings, &result).unwrap(), Value::Null);
        assert_eq!(resolve_field("b", &mappings, &result).unwrap(), Value::Null);
    }

    #[test]
    fn test_missing_key() {
        let mappings = mappings(json!({ "title": { "querySource": "site", "field": "title" } }));
        let err = resolve_field("author", &mappings, &json!({})).unwrap_err();
        match err {
            Error::MissingMappingKey { key } => assert_eq!(key, "author"),
            other => panic!("expected MissingMappingKey, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_subkey_is_malformed() {
        let mappings = mappings(json!({
            "no_source": { "field": "title" },
            "no_field": { "querySource": "site" },
        }));
        let result = json!({ "data": { "site": { "title": "Hello" } } });

        match resolve_field("no_source", &mappings, &result).unwrap_err() {
            Error::MalformedMapping { key, subkey } => {
                assert_eq!(key, "no_source");
                assert_eq!(subkey, QUERY_SOURCE);
            }
            other => panic!("expected MalformedMapping, got {other:?}"),
        }
        match resolve_field("no_field", &mappings, &result).unwrap_err() {
            Error::MalformedMapping { subkey, .. } => assert_eq!(subkey, FIELD),
            other => panic!("expected MalformedMapping, got {other:?}"),
        }
    }

    #[test]
    fn test_wrong_subkey_type_is_malformed() {
        let mappings = mappings(json!({ "title": { "querySource": 3, "field": "title" } }));
        assert!(matches!(
            resolve_field("title", &mappings, &json!({})),
            Err(Error::MalformedMapping { .. })
        ));
    }

    #[test]
    fn test_missing_path_is_lookup_failure() {
        let mappings = mappings(json!({ "title": { "querySource": "site", "field": "title" } }));

        for result in [
            json!({}),
            json!({ "data": {} }),
            json!({ "data": { "site": {} } }),
        ] {
            match resolve_field("title", &mappings, &result).unwrap_err() {
                Error::QueryLookup { key, path } => {
                    assert_eq!(key, "title");
                    assert_eq!(path, "data.site.title");
                }
                other => panic!("expected QueryLookup, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_existing_null_value_is_returned() {
        let mappings = mappings(json!({ "title": { "querySource": "site", "field": "title" } }));
        let result = json!({ "data": { "site": { "title": null } } });
        assert_eq!(resolve_field("title", &mappings, &result).unwrap(), Value::Null);
    }

    #[test]
    fn test_resolve_all() {
        let mappings = mappings(json!({
            "title": { "querySource": "site", "field": "title" },
            "subtitle": { "querySource": null, "field": null },
        }));
        let result = json!({ "data": { "site": { "title": "Hello" } } });
        let resolved = resolve_all(&mappings, &result).unwrap();
        assert_eq!(resolved["title"], json!("Hello"));
        assert_eq!(resolved["subtitle"], Value::Null);
    }

    #[test]
    fn test_compose_query_from_aliases() {
        let query = json!({
            "posts": "allMarkdownRemark { nodes { id } }",
            "site": "site { siteMetadata { title } }",
        });
        assert_eq!(
            compose_query(&query).unwrap(),
            "{ posts: allMarkdownRemark { nodes { id } } site: site { siteMetadata { title } } }"
        );
    }

    #[test]
    fn test_compose_query_passthrough_and_unsupported() {
        assert_eq!(compose_query(&json!("{ site { id } }")).unwrap(), "{ site { id } }");
        assert!(compose_query(&json!(null)).is_none());
    }
}
