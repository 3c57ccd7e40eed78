//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the
//! `gatsby-themes` command-line tool. Each subcommand is defined in its own
//! file to keep the logic separated and maintainable.
//!
//! ## Structure
//!
//! Each command module typically contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the shared [`Context`] and the parsed
//!   `Args` and performs the command's logic.
//!
//! The `execute` function is the main entry point for the command and is
//! responsible for orchestrating the necessary operations, calling into the
//! `gatsby_themes` library to perform the core logic.

pub mod completions;
pub mod copy;
pub mod field;
pub mod get;
pub mod init;
pub mod run;
pub mod set;
pub mod validate;

use std::path::PathBuf;

use anyhow::Result;

use gatsby_themes::error::Error;
use gatsby_themes::manifest::{self, Manifest, MissingManifest};
use gatsby_themes::output::OutputConfig;
use gatsby_themes::pipeline::Workspace;
use gatsby_themes::suggestions;

/// Settings shared by every command, resolved from global flags.
#[derive(Debug, Clone)]
pub struct Context {
    /// Project root (the working directory).
    pub root: PathBuf,
    /// Manifest path, resolved against `root`.
    pub manifest: PathBuf,
    pub out: OutputConfig,
    /// Whether the user can be prompted (stdin and stdout are terminals).
    pub interactive: bool,
    pub gatsby: String,
    pub package_manager: String,
}

impl Context {
    /// Loads the manifest, failing with hints when it is missing.
    pub fn require_manifest(&self) -> Result<Manifest> {
        match manifest::read_manifest(&self.manifest, MissingManifest::Fail) {
            Ok(Some(manifest)) => Ok(manifest),
            Ok(None) => Err(suggestions::manifest_not_found(&self.manifest)),
            Err(e) => Err(suggestions::explain(e, &[])),
        }
    }

    /// Loads the manifest, treating a missing file as `None`.
    pub fn optional_manifest(&self) -> Result<Option<Manifest>> {
        manifest::read_manifest(&self.manifest, MissingManifest::Ignore)
            .map_err(|e| suggestions::explain(e, &[]))
    }

    pub fn workspace(&self) -> Workspace {
        Workspace {
            root: self.root.clone(),
            generator: self.gatsby.clone(),
            package_manager: self.package_manager.clone(),
        }
    }
}

/// Reads a variable from the process environment.
pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Converts a library error into a hinted one, using the manifest's declared
/// themes for suggestions.
pub fn explain(error: Error, manifest: &Manifest) -> anyhow::Error {
    let names = manifest.theme_names();
    let declared: Vec<&str> = names.iter().map(String::as_str).collect();
    suggestions::explain(error, &declared)
}
