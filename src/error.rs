//! # Error Handling
//!
//! This module defines the centralized error type for the `gatsby-themes`
//! library. It uses the `thiserror` library to create an `Error` enum that
//! covers every failure mode of the manifest pipeline, with messages that name
//! the offending field, key or program.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum. Each variant corresponds to one kind of
//!   failure and carries enough context to report it once at the CLI entry
//!   point.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! The variants fall into four groups:
//!
//! - Manifest loading and validation (`ManifestNotFound`, `ManifestParse`,
//!   `ManifestValidation`).
//! - Theme configuration (`ThemeNotDeclared`, `ThemeConfig`).
//! - Data mapping resolution (`MissingMappingKey`, `MalformedMapping`,
//!   `QueryLookup`).
//! - External processes and I/O (`PluginInstall`, `Process`, `Io`, `Json`,
//!   `Yaml`).
//!
//! `ManifestNotFound` is only produced when a caller asks for it through
//! [`crate::manifest::load_required`]; [`crate::manifest::load`] reports a
//! missing manifest as `Ok(None)` instead.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for gatsby-themes operations
#[derive(Error, Debug)]
pub enum Error {
    /// The manifest file does not exist at the expected path.
    #[error("Manifest not found: {}", path.display())]
    ManifestNotFound { path: PathBuf },

    /// The manifest file exists but is not well-formed YAML.
    #[error("Manifest parsing error in {}: {message}", path.display())]
    ManifestParse { path: PathBuf, message: String },

    /// The manifest is well-formed YAML but violates the manifest schema.
    ///
    /// Only the first violated rule is reported.
    #[error("Invalid manifest: '{field}' {message}")]
    ManifestValidation { field: String, message: String },

    /// The active theme has no entry under `themes` in the manifest.
    #[error("Theme '{theme}' is not declared under 'themes' in the manifest")]
    ThemeNotDeclared { theme: String },

    /// A theme configuration is missing one of its required keys.
    #[error("Theme configuration for '{theme}' is missing required key '{key}'")]
    ThemeConfig { theme: String, key: String },

    /// A template key has no entry in the mapping table.
    #[error("No mapping declared for template key '{key}'")]
    MissingMappingKey { key: String },

    /// A mapping entry lacks one of its sub-keys or has a sub-key of the
    /// wrong type.
    #[error("Malformed mapping for template key '{key}': '{subkey}' must be present and be a string or null")]
    MalformedMapping { key: String, subkey: String },

    /// The query result has no value at the path declared by a mapping.
    #[error("Query result has no value at '{path}' (mapped by template key '{key}')")]
    QueryLookup { key: String, path: String },

    /// The package manager failed to install missing plugins.
    #[error("Plugin installation with {package_manager} failed: {message}")]
    PluginInstall {
        package_manager: String,
        message: String,
    },

    /// An external program could not be started or exited unsuccessfully.
    #[error("Process '{program}' failed: {message}")]
    Process { program: String, message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON error, wrapped from `serde_json::Error`.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A YAML error, wrapped from `serde_yaml::Error`.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Shorthand for a [`Error::ManifestValidation`] error.
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::ManifestValidation {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
