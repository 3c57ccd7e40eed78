//! # Manifest Schema Validation
//!
//! Checks a raw manifest value against the required shape before it is turned
//! into a [`crate::manifest::Manifest`].
//!
//! Validation is fail-fast: rules are checked in a fixed order and the first
//! violation is returned as [`Error::ManifestValidation`] naming the field.
//! Unknown keys are always accepted.
//!
//! | Order | Field       | Rule                                              |
//! |-------|-------------|---------------------------------------------------|
//! | 1     | `version`   | required, integer >= 1                            |
//! | 2     | `themesDir` | required, non-empty string                        |
//! | 3     | `theme`     | required, non-empty string, no path separators    |
//! | 4     | `data`      | optional, string                                  |
//! | 5     | `plugins`   | optional, not null, strings or `{resolve: ...}`   |
//! |       |             | with `options` a string-keyed mapping             |
//! | 6     | `themes`    | optional, mapping                                 |

use serde_yaml::Value;

use crate::error::{Error, Result};

/// Validates a raw manifest value.
pub fn validate(manifest: &Value) -> Result<()> {
    if !manifest.is_mapping() {
        return Err(Error::invalid("<root>", "must be a mapping"));
    }

    match manifest.get("version") {
        None => return Err(Error::invalid("version", "is required")),
        Some(version) => match version.as_u64() {
            Some(v) if v >= 1 => {}
            _ => return Err(Error::invalid("version", "must be an integer >= 1")),
        },
    }

    require_non_empty_string(manifest, "themesDir")?;
    require_non_empty_string(manifest, "theme")?;
    require_directory_name(manifest, "theme")?;

    if let Some(data) = manifest.get("data") {
        if !data.is_string() {
            return Err(Error::invalid("data", "must be a string"));
        }
    }

    if let Some(plugins) = manifest.get("plugins") {
        validate_plugins("plugins", plugins)?;
    }

    if let Some(themes) = manifest.get("themes") {
        if !themes.is_mapping() {
            return Err(Error::invalid("themes", "must be a mapping"));
        }
    }

    Ok(())
}

/// Validates a plugin list found under `field`.
///
/// Also used for the per-theme `plugins` key, which follows the same rules.
pub fn validate_plugins(field: &str, plugins: &Value) -> Result<()> {
    let items = match plugins {
        Value::Null => return Err(Error::invalid(field, "cannot be empty")),
        Value::Sequence(items) => items,
        _ => return Err(Error::invalid(field, "must be a list")),
    };

    for (idx, item) in items.iter().enumerate() {
        let valid = match item {
            Value::String(_) => true,
            Value::Mapping(_) => item.get("resolve").is_some_and(Value::is_string),
            _ => false,
        };
        if !valid {
            return Err(Error::invalid(
                format!("{field}[{idx}]"),
                "must be a package name or a mapping with a 'resolve' string",
            ));
        }

        if let Some(options) = item.get("options") {
            let string_keys = options
                .as_mapping()
                .is_some_and(|map| map.keys().all(Value::is_string));
            if !string_keys {
                return Err(Error::invalid(
                    format!("{field}[{idx}].options"),
                    "must be a mapping with string keys",
                ));
            }
        }
    }

    Ok(())
}

fn require_non_empty_string(manifest: &Value, field: &str) -> Result<()> {
    match manifest.get(field) {
        None => Err(Error::invalid(field, "is required")),
        Some(Value::String(s)) if !s.is_empty() => Ok(()),
        Some(_) => Err(Error::invalid(field, "must be a non-empty string")),
    }
}

/// The active theme must name a single directory inside `themesDir`.
fn require_directory_name(manifest: &Value, field: &str) -> Result<()> {
    let name = manifest.get(field).and_then(Value::as_str).unwrap_or_default();
    if name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(Error::invalid(
            field,
            "must be a directory name without path separators",
        ));
    }
    Ok(())
}
