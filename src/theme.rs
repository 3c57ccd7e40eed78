//! # Theme Configuration
//!
//! The derived `theme.json` handed to the site generator. It is built from the
//! active theme's entry under `themes` in the manifest, with its plugin list
//! resolved, and written next to the theme's `package.json`.
//!
//! Four keys are required in every theme entry: `mappings`, `query`,
//! `develop` and `build`. Any other keys are carried through to `theme.json`
//! unchanged.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::manifest::{self, Manifest};
use crate::plugins::{self, PluginRef};
use crate::schema;

/// Keys every theme entry must declare.
pub const REQUIRED_KEYS: [&str; 4] = ["mappings", "query", "develop", "build"];

/// The materialized configuration of one theme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Template key to data mapping entries.
    pub mappings: BTreeMap<String, Value>,
    /// Query specification used to fetch the theme's data.
    pub query: Value,
    /// Settings for `gatsby develop`.
    pub develop: Value,
    /// Settings for `gatsby build`.
    pub build: Value,
    /// Resolved plugin list.
    #[serde(default)]
    pub plugins: Vec<PluginRef>,
    /// Remaining keys of the theme entry.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ThemeConfig {
    /// Builds the configuration of the manifest's active theme.
    ///
    /// Plugins come from the theme entry's own `plugins` key when present,
    /// otherwise from the manifest-level list. Option values are resolved
    /// through `env`.
    pub fn from_manifest<F>(manifest: &Manifest, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let theme = &manifest.theme;
        let entry = manifest
            .theme_entry(theme)
            .ok_or_else(|| Error::ThemeNotDeclared {
                theme: theme.clone(),
            })?;

        if let Some(plugins) = entry.get("plugins") {
            schema::validate_plugins(&format!("themes.{theme}.plugins"), plugins)?;
        }

        let mut fields = match to_json(&format!("themes.{theme}"), entry)? {
            Value::Object(map) => map,
            _ => {
                return Err(Error::invalid(
                    format!("themes.{theme}"),
                    "must be a mapping",
                ))
            }
        };

        for key in REQUIRED_KEYS {
            if !fields.contains_key(key) {
                return Err(Error::ThemeConfig {
                    theme: theme.clone(),
                    key: key.to_string(),
                });
            }
        }
        if !fields["mappings"].is_object() {
            return Err(Error::invalid(
                format!("themes.{theme}.mappings"),
                "must be a mapping",
            ));
        }

        let declared: Vec<PluginRef> = match fields.remove("plugins") {
            Some(value) => serde_json::from_value(value)?,
            None => manifest.plugins.clone().unwrap_or_default(),
        };
        fields.insert(
            "plugins".to_string(),
            serde_json::to_value(plugins::resolve(&declared, env))?,
        );

        debug!("Built configuration for theme '{theme}'");
        Ok(serde_json::from_value(Value::Object(fields))?)
    }

    /// Reads a previously materialized configuration.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Converts a raw theme entry to JSON. Scalar mapping keys become strings;
/// any other key is a validation error naming the mapping's `field` path.
fn to_json(field: &str, value: &serde_yaml::Value) -> Result<Value> {
    use serde_yaml::Value as Yaml;

    Ok(match value {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(*b),
        Yaml::Number(n) => serde_json::to_value(n)?,
        Yaml::String(s) => Value::String(s.clone()),
        Yaml::Sequence(items) => Value::Array(
            items
                .iter()
                .enumerate()
                .map(|(idx, item)| to_json(&format!("{field}[{idx}]"), item))
                .collect::<Result<_>>()?,
        ),
        Yaml::Mapping(map) => {
            let mut object = serde_json::Map::new();
            for (key, item) in map {
                let key = manifest::key_name(key)
                    .ok_or_else(|| Error::invalid(field, "mapping keys must be scalars"))?;
                let item = to_json(&format!("{field}.{key}"), item)?;
                object.insert(key, item);
            }
            Value::Object(object)
        }
        Yaml::Tagged(tagged) => to_json(field, &tagged.value)?,
    })
}

/// Writes `config` to `path` as two-space indented JSON.
///
/// Any existing file is replaced. The data is flushed and synced to disk and
/// the handle closed before this returns.
pub fn materialize(config: &ThemeConfig, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, config)?;
    writer.write_all(b"\n")?;
    let file = writer.into_inner().map_err(|e| e.into_error())?;
    file.sync_all()?;
    debug!("Wrote {}", path.display());
    Ok(())
}
