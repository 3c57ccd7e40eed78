//! Property-based tests for the manifest pipeline.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::error::Error;
    use crate::mapping::resolve_field;
    use crate::plugins::{find_missing, PluginRef};
    use crate::schema::validate;
    use proptest::prelude::*;
    use serde_json::{json, Value};
    use std::collections::{BTreeMap, BTreeSet};

    fn plugin_ref() -> impl Strategy<Value = PluginRef> {
        prop_oneof![
            "[a-e]".prop_map(PluginRef::Named),
            "[a-e]".prop_map(|resolve| PluginRef::WithOptions {
                resolve,
                options: BTreeMap::new(),
            }),
        ]
    }

    /// A mapping sub-key: absent, explicit null, or a name.
    fn subkey() -> impl Strategy<Value = Option<Value>> {
        prop_oneof![
            Just(None),
            Just(Some(Value::Null)),
            "[xy]".prop_map(|s| Some(Value::String(s))),
        ]
    }

    // ============================================================================
    // find_missing property tests
    // ============================================================================

    proptest! {
        /// Property: every missing name is a plugin identity that is not installed
        #[test]
        fn find_missing_is_subset_of_identities(
            plugins in prop::collection::vec(plugin_ref(), 0..12),
            installed in prop::collection::btree_set("[a-e]", 0..5),
        ) {
            let missing = find_missing(&plugins, &installed);
            for name in &missing {
                prop_assert!(plugins.iter().any(|p| p.identity() == name));
                prop_assert!(!installed.contains(name));
            }
        }

        /// Property: output is the input identities, in order, minus installed ones
        #[test]
        fn find_missing_preserves_order(
            plugins in prop::collection::vec(plugin_ref(), 0..12),
            installed in prop::collection::btree_set("[a-e]", 0..5),
        ) {
            let expected: Vec<String> = plugins
                .iter()
                .map(|p| p.identity().to_string())
                .filter(|name| !installed.contains(name))
                .collect();
            prop_assert_eq!(find_missing(&plugins, &installed), expected);
        }

        /// Property: nothing is missing iff every identity is installed
        #[test]
        fn find_missing_empty_iff_all_installed(
            plugins in prop::collection::vec(plugin_ref(), 0..12),
            installed in prop::collection::btree_set("[a-e]", 0..5),
        ) {
            let all_installed = plugins.iter().all(|p| installed.contains(p.identity()));
            prop_assert_eq!(find_missing(&plugins, &installed).is_empty(), all_installed);
        }

        /// Property: installing every identity leaves nothing missing
        #[test]
        fn find_missing_with_own_identities_is_empty(
            plugins in prop::collection::vec(plugin_ref(), 0..12),
        ) {
            let installed: BTreeSet<String> =
                plugins.iter().map(|p| p.identity().to_string()).collect();
            prop_assert!(find_missing(&plugins, &installed).is_empty());
        }
    }

    // ============================================================================
    // resolve_field property tests
    // ============================================================================

    proptest! {
        /// Property: resolve_field always lands in exactly one of its outcomes
        #[test]
        fn resolve_field_is_total(
            key in "[a-c]",
            declared in prop::option::of("[a-c]"),
            source in subkey(),
            field in subkey(),
            value in prop::option::of(any::<i64>()),
        ) {
            let mut entry = serde_json::Map::new();
            if let Some(source) = &source {
                entry.insert("querySource".to_string(), source.clone());
            }
            if let Some(field) = &field {
                entry.insert("field".to_string(), field.clone());
            }
            let mut mappings = BTreeMap::new();
            if let Some(declared) = &declared {
                mappings.insert(declared.clone(), Value::Object(entry));
            }

            let query_result = match (&source, &field, value) {
                (Some(Value::String(s)), Some(Value::String(f)), Some(v)) => {
                    let mut fields = serde_json::Map::new();
                    fields.insert(f.clone(), json!(v));
                    let mut data = serde_json::Map::new();
                    data.insert(s.clone(), Value::Object(fields));
                    json!({ "data": data })
                }
                _ => json!({ "data": {} }),
            };

            let outcome = resolve_field(&key, &mappings, &query_result);
            if declared.as_deref() != Some(key.as_str()) {
                let missing_key = matches!(outcome, Err(Error::MissingMappingKey { .. }));
                prop_assert!(missing_key, "expected MissingMappingKey, got {:?}", outcome);
            } else if source.is_none() || field.is_none() {
                let malformed = matches!(outcome, Err(Error::MalformedMapping { .. }));
                prop_assert!(malformed, "expected MalformedMapping, got {:?}", outcome);
            } else if source == Some(Value::Null) || field == Some(Value::Null) {
                prop_assert_eq!(outcome.unwrap(), Value::Null);
            } else if let Some(v) = value {
                prop_assert_eq!(outcome.unwrap(), json!(v));
            } else {
                let lookup_failed = matches!(outcome, Err(Error::QueryLookup { .. }));
                prop_assert!(lookup_failed, "expected QueryLookup, got {:?}", outcome);
            }
        }
    }

    // ============================================================================
    // schema property tests
    // ============================================================================

    proptest! {
        /// Property: unknown keys never make a valid manifest invalid
        #[test]
        fn validate_ignores_unknown_keys(
            version in 1u32..1000,
            themes_dir in "[a-z]{1,8}",
            theme in "[a-z]{1,8}",
            extra in prop::collection::btree_map("x[a-z]{1,6}", "[a-z0-9 ]{0,10}", 0..5),
        ) {
            let mut manifest = serde_yaml::Mapping::new();
            manifest.insert("version".into(), version.into());
            manifest.insert("themesDir".into(), themes_dir.into());
            manifest.insert("theme".into(), theme.into());
            for (k, v) in extra {
                manifest.insert(k.into(), v.into());
            }
            prop_assert!(validate(&serde_yaml::Value::Mapping(manifest)).is_ok());
        }

        /// Property: dropping any required key fails validation naming that key
        #[test]
        fn validate_names_missing_required_key(which in 0usize..3) {
            let keys = ["version", "themesDir", "theme"];
            let mut manifest = serde_yaml::Mapping::new();
            manifest.insert("version".into(), 1.into());
            manifest.insert("themesDir".into(), "themes".into());
            manifest.insert("theme".into(), "blog".into());
            manifest.remove(keys[which]);

            match validate(&serde_yaml::Value::Mapping(manifest)) {
                Err(Error::ManifestValidation { field, .. }) => prop_assert_eq!(field, keys[which]),
                other => prop_assert!(false, "expected validation error, got {:?}", other),
            }
        }
    }
}
