//! # Manifest Loading
//!
//! This module reads the `gatsby-themes.yaml` manifest from disk and turns it
//! into the typed [`Manifest`].
//!
//! Loading happens in three steps, each of which can be used on its own:
//!
//! 1.  [`load`] parses the file into a raw `serde_yaml::Value` without any
//!     validation. A missing file is reported as `Ok(None)`, never as an error.
//! 2.  [`crate::schema::validate`] checks the raw value against the manifest
//!     schema.
//! 3.  [`Manifest::from_value`] converts the validated value into the typed
//!     structure.
//!
//! [`read_manifest`] runs all three and lets the caller pick what a missing
//! file means through [`MissingManifest`].

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::plugins::PluginRef;
use crate::schema;

/// Default manifest file name, looked up in the working directory.
pub const MANIFEST_FILE: &str = "gatsby-themes.yaml";

/// Name of the derived configuration file written into the theme directory.
pub const THEME_CONFIG_FILE: &str = "theme.json";

/// Name of the theme's package descriptor.
pub const PACKAGE_JSON_FILE: &str = "package.json";

/// What a caller wants to happen when the manifest file does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingManifest {
    /// Report [`Error::ManifestNotFound`].
    Fail,
    /// Return `Ok(None)` and let the caller carry on without a manifest.
    Ignore,
}

/// The root manifest object.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    /// Manifest format version (at least 1).
    pub version: u64,
    /// Directory containing the theme sub-projects, relative to the project root.
    pub themes_dir: String,
    /// Name of the active theme (a subdirectory of `themes_dir`).
    pub theme: String,
    /// Raw query text or source description.
    #[serde(default)]
    pub data: Option<String>,
    /// Plugins shared by every theme.
    #[serde(default)]
    pub plugins: Option<Vec<PluginRef>>,
    /// Per-theme configuration entries as written, keyed by theme name.
    ///
    /// Entries stay raw YAML here; keys may be any scalar until a theme is
    /// turned into a [`crate::theme::ThemeConfig`].
    #[serde(default)]
    pub themes: serde_yaml::Mapping,
}

impl Manifest {
    /// Converts a raw manifest value into a `Manifest`.
    ///
    /// The value is validated first, so schema violations are reported with
    /// the name of the offending field rather than as a deserialization error.
    pub fn from_value(value: serde_yaml::Value) -> Result<Self> {
        schema::validate(&value)?;
        Ok(serde_yaml::from_value(value)?)
    }

    /// Directory of the active theme, resolved against `root`.
    pub fn theme_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.themes_dir).join(&self.theme)
    }

    /// Path of the derived `theme.json` for the active theme.
    pub fn theme_config_path(&self, root: &Path) -> PathBuf {
        self.theme_dir(root).join(THEME_CONFIG_FILE)
    }

    /// The entry under `themes` for `name`.
    ///
    /// Scalar keys match by their string form, so an unquoted `2024:` is the
    /// entry of theme `"2024"`.
    pub fn theme_entry(&self, name: &str) -> Option<&serde_yaml::Value> {
        self.themes
            .iter()
            .find(|(key, _)| key_name(key).as_deref() == Some(name))
            .map(|(_, entry)| entry)
    }

    /// Names of the declared themes, in manifest order.
    pub fn theme_names(&self) -> Vec<String> {
        self.themes.keys().filter_map(key_name).collect()
    }

    /// Path of the active theme's `package.json`.
    pub fn package_json_path(&self, root: &Path) -> PathBuf {
        self.theme_dir(root).join(PACKAGE_JSON_FILE)
    }
}

/// String form of a scalar YAML mapping key. `None` for non-scalar keys.
pub fn key_name(key: &serde_yaml::Value) -> Option<String> {
    match key {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Parses the manifest at `path` without validating it.
///
/// Returns `Ok(None)` when the file does not exist. Malformed YAML is reported
/// as [`Error::ManifestParse`] carrying the parser's message.
pub fn load(path: &Path) -> Result<Option<serde_yaml::Value>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("No manifest at {}", path.display());
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    let value = serde_yaml::from_str(&content).map_err(|e| Error::ManifestParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    debug!("Loaded manifest from {}", path.display());
    Ok(Some(value))
}

/// Like [`load`], but a missing file is an [`Error::ManifestNotFound`].
pub fn load_required(path: &Path) -> Result<serde_yaml::Value> {
    load(path)?.ok_or_else(|| Error::ManifestNotFound {
        path: path.to_path_buf(),
    })
}

/// Loads, validates and converts the manifest at `path`.
pub fn read_manifest(path: &Path, missing: MissingManifest) -> Result<Option<Manifest>> {
    let value = match missing {
        MissingManifest::Fail => Some(load_required(path)?),
        MissingManifest::Ignore => load(path)?,
    };
    value.map(Manifest::from_value).transpose()
}

/// Sets the active theme of the manifest at `path`, keeping every other field.
///
/// The updated manifest is validated before it is written back. Setting the
/// theme that is already active rewrites an identical manifest.
pub fn write_theme(path: &Path, theme: &str) -> Result<Manifest> {
    let mut value = load_required(path)?;
    let map = value
        .as_mapping_mut()
        .ok_or_else(|| Error::invalid("<root>", "must be a mapping"))?;
    map.insert(
        serde_yaml::Value::String("theme".to_string()),
        serde_yaml::Value::String(theme.to_string()),
    );

    let manifest = Manifest::from_value(value.clone())?;
    fs::write(path, serde_yaml::to_string(&value)?)?;
    debug!("Set active theme to '{theme}' in {}", path.display());
    Ok(manifest)
}
