//! Shared test utilities for the CLI end-to-end tests.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_manifest(manifests::BLOG);
//!     fixture.command().arg("validate").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::manifests;
    pub use super::TestFixture;
}

/// Manifest snippets used across tests.
#[allow(dead_code)]
pub mod manifests {
    /// One declared theme with shared plugins and an env-backed option.
    pub const BLOG: &str = r#"version: 1
themesDir: themes
theme: blog
plugins:
  - plugin-a
  - resolve: plugin-b
    options:
      token: process.env.GT_TEST_TOKEN
      path: content
themes:
  blog:
    mappings:
      title:
        querySource: site
        field: title
      subtitle:
        querySource: null
        field: null
    query:
      site: "site { siteMetadata { title } }"
    develop:
      port: 8000
    build: {}
  shop:
    mappings: {}
    query: "{ allProduct { nodes { id } } }"
    develop: {}
    build: {}
"#;

    /// Missing the required `theme` key.
    pub const MISSING_THEME: &str = "version: 1\nthemesDir: themes\n";

    /// Not parseable as YAML.
    pub const INVALID_YAML: &str = "version: [1\n";

    /// `package.json` with every plugin of [`BLOG`] installed.
    pub const ALL_INSTALLED: &str =
        r#"{"dependencies": {"plugin-a": "1.0.0", "plugin-b": "1.0.0"}}"#;

    /// `package.json` with nothing installed.
    pub const NONE_INSTALLED: &str = r#"{"dependencies": {}}"#;
}

/// A temporary project directory with an optional manifest and themes.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Add a `gatsby-themes.yaml` manifest with the given content.
    pub fn with_manifest(self, content: &str) -> Self {
        self.with_file("gatsby-themes.yaml", content)
    }

    /// Add a theme directory under `themes/` containing `package.json`.
    pub fn with_theme(self, name: &str, package_json: &str) -> Self {
        self.with_file(&format!("themes/{name}/package.json"), package_json)
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Get the path to the manifest.
    pub fn manifest_path(&self) -> PathBuf {
        self.path().join("gatsby-themes.yaml")
    }

    /// Create a child path in the temp directory.
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// Create a command running in this fixture's directory.
    ///
    /// The external programs default to `false` so a test that reaches them
    /// unexpectedly fails. Override with `--gatsby` / `--package-manager`.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("gatsby-themes");
        cmd.current_dir(self.path())
            .env_remove("GATSBY_THEMES_MANIFEST")
            .env_remove("RUST_LOG")
            .env("GATSBY_THEMES_GATSBY", "false")
            .env("GATSBY_THEMES_PACKAGE_MANAGER", "false")
            .env("NO_COLOR", "1");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
