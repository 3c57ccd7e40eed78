//! # Plugin Resolution
//!
//! Plugins are declared in the manifest either as a plain package name or as
//! an object with a `resolve` package name and an `options` mapping:
//!
//! ```yaml
//! plugins:
//!   - gatsby-plugin-react-helmet
//!   - resolve: gatsby-source-contentful
//!     options:
//!       spaceId: process.env.CONTENTFUL_SPACE_ID
//!       accessToken: ${CONTENTFUL_TOKEN}
//! ```
//!
//! This module normalizes those declarations into [`PluginRef`], substitutes
//! environment references in option values, works out which plugin packages
//! are missing from the theme's `package.json`, and installs them.
//!
//! Environment lookups go through a caller-supplied function instead of the
//! process environment.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::process::Command;
use std::sync::LazyLock;

use log::{debug, info, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::manifest::PACKAGE_JSON_FILE;

/// Release tag every missing plugin is installed at.
pub const INSTALL_TAG: &str = "next";

/// Matches `process.env.NAME` and `${NAME}` references.
static ENV_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"process\.env\.([A-Za-z_][A-Za-z0-9_]*)|\$\{([A-Za-z_][A-Za-z0-9_]*)\}")
        .expect("environment reference pattern is valid")
});

/// A plugin declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PluginRef {
    /// A plain package name.
    Named(String),
    /// A package with plugin options.
    WithOptions {
        resolve: String,
        #[serde(default)]
        options: BTreeMap<String, serde_json::Value>,
    },
}

impl PluginRef {
    /// The package name used when comparing against installed dependencies.
    pub fn identity(&self) -> &str {
        match self {
            PluginRef::Named(name) => name,
            PluginRef::WithOptions { resolve, .. } => resolve,
        }
    }
}

/// Returns the name of the environment variable referenced by `value`, if any.
pub fn env_reference(value: &str) -> Option<&str> {
    let captures = ENV_REFERENCE.captures(value)?;
    captures
        .get(1)
        .or_else(|| captures.get(2))
        .map(|m| m.as_str())
}

/// Substitutes environment references in plugin option values.
///
/// A string option that references a variable is replaced by that variable's
/// value. When the variable is unset the option is dropped and a warning is
/// logged. Named plugins and non-string option values are left as they are.
pub fn resolve<F>(plugins: &[PluginRef], env: F) -> Vec<PluginRef>
where
    F: Fn(&str) -> Option<String>,
{
    plugins
        .iter()
        .map(|plugin| match plugin {
            PluginRef::Named(_) => plugin.clone(),
            PluginRef::WithOptions { resolve, options } => {
                let mut resolved = BTreeMap::new();
                for (key, value) in options {
                    let variable = match value {
                        serde_json::Value::String(s) => env_reference(s),
                        _ => None,
                    };
                    match variable {
                        None => {
                            resolved.insert(key.clone(), value.clone());
                        }
                        Some(variable) => match env(variable) {
                            Some(found) => {
                                debug!("Resolved option '{key}' of {resolve} from ${variable}");
                                resolved.insert(key.clone(), serde_json::Value::String(found));
                            }
                            None => warn!(
                                "Option '{key}' of plugin {resolve} references unset environment variable {variable}; leaving it out"
                            ),
                        },
                    }
                }
                PluginRef::WithOptions {
                    resolve: resolve.clone(),
                    options: resolved,
                }
            }
        })
        .collect()
}

/// Returns the identities of `plugins` that are not in `installed`.
///
/// Input order is preserved and duplicates are kept.
pub fn find_missing(plugins: &[PluginRef], installed: &BTreeSet<String>) -> Vec<String> {
    plugins
        .iter()
        .map(PluginRef::identity)
        .filter(|name| !installed.contains(*name))
        .map(str::to_string)
        .collect()
}

/// The parts of a theme's `package.json` this tool reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageJson {
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
}

impl PackageJson {
    /// Reads `package.json` from `theme_dir`.
    pub fn load(theme_dir: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(theme_dir.join(PACKAGE_JSON_FILE))?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Names of the declared dependencies.
    pub fn installed(&self) -> BTreeSet<String> {
        self.dependencies.keys().cloned().collect()
    }
}

/// Installs `missing` packages in `theme_dir` with `package_manager`.
///
/// Runs `<package_manager> add <pkg>@next ...` once with inherited stdio and
/// environment and blocks until it exits. Does nothing for an empty list.
pub fn install_missing(package_manager: &str, theme_dir: &Path, missing: &[String]) -> Result<()> {
    if missing.is_empty() {
        debug!("All plugins already installed");
        return Ok(());
    }

    let packages: Vec<String> = missing
        .iter()
        .map(|name| format!("{name}@{INSTALL_TAG}"))
        .collect();
    info!(
        "Installing {} in {}",
        packages.join(" "),
        theme_dir.display()
    );

    let status = Command::new(package_manager)
        .arg("add")
        .args(&packages)
        .current_dir(theme_dir)
        .status()
        .map_err(|e| Error::PluginInstall {
            package_manager: package_manager.to_string(),
            message: e.to_string(),
        })?;

    if !status.success() {
        return Err(Error::PluginInstall {
            package_manager: package_manager.to_string(),
            message: format!("{status}"),
        });
    }

    Ok(())
}
