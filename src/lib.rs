//! # Gatsby Themes Library
//!
//! This library provides the core functionality behind the `gatsby-themes`
//! command-line tool, which manages several theme sub-projects of a Gatsby
//! site from a single `gatsby-themes.yaml` manifest.
//!
//! ## Quick Example
//!
//! ```
//! use gatsby_themes::manifest::Manifest;
//! use gatsby_themes::plugins;
//! use std::collections::BTreeSet;
//!
//! let manifest = Manifest::from_value(serde_yaml::from_str(r#"
//! version: 1
//! themesDir: themes
//! theme: blog
//! plugins:
//!   - plugin-a
//!   - resolve: plugin-b
//!     options:
//!       key: process.env.FOO
//! "#).unwrap()).unwrap();
//!
//! let declared = manifest.plugins.unwrap_or_default();
//! let resolved = plugins::resolve(&declared, |name| {
//!     (name == "FOO").then(|| "bar".to_string())
//! });
//!
//! let installed = BTreeSet::from(["plugin-a".to_string()]);
//! assert_eq!(plugins::find_missing(&resolved, &installed), vec!["plugin-b"]);
//! ```
//!
//! ## Core Concepts
//!
//! - **Manifest (`manifest`, `schema`)**: Loads the YAML manifest, validates it
//!   fail-fast and converts it into typed form.
//! - **Plugins (`plugins`)**: Normalizes plugin declarations, substitutes
//!   environment references in their options and installs missing packages.
//! - **Theme configuration (`theme`)**: Builds and writes the `theme.json`
//!   consumed by the generator.
//! - **Data mapping (`mapping`)**: Binds template keys to GraphQL query results.
//! - **Pipeline (`pipeline`, `generator`)**: Runs resolve, materialize, install
//!   and spawn in order for a generator command.
//!
//! Environment access and the project root are always passed in explicitly.

pub mod error;
pub mod filesystem;
pub mod generator;
pub mod manifest;
pub mod mapping;
pub mod output;
pub mod pipeline;
pub mod plugins;
pub mod schema;
pub mod suggestions;
pub mod theme;

#[cfg(test)]
mod proptests;
