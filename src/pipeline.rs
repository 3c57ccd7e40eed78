//! # Theme Pipeline
//!
//! The sequence run for every generator command:
//!
//! 1.  **Resolve**: build the active theme's [`ThemeConfig`] from the manifest,
//!     substituting environment references in plugin options.
//! 2.  **Materialize**: write `theme.json` into the theme directory.
//! 3.  **Install**: add plugin packages missing from the theme's
//!     `package.json`.
//! 4.  **Spawn**: run the generator in the theme directory with the forwarded
//!     arguments.
//!
//! Each step completes before the next starts. The generator is never started
//! when installation fails.
//!
//! The project root, environment lookup and external program names are
//! explicit inputs ([`Workspace`]) rather than process globals.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use log::debug;

use crate::error::Result;
use crate::generator;
use crate::manifest::Manifest;
use crate::plugins::{self, PackageJson};
use crate::theme::{self, ThemeConfig};

/// Where and with what the pipeline runs.
#[derive(Debug, Clone)]
pub struct Workspace {
    /// Project root the manifest paths are relative to.
    pub root: PathBuf,
    /// Generator program (usually `gatsby`).
    pub generator: String,
    /// Package manager program (usually `yarn`).
    pub package_manager: String,
}

/// Result of the resolve and materialize steps.
#[derive(Debug, Clone)]
pub struct Prepared {
    /// Directory of the active theme.
    pub theme_dir: PathBuf,
    /// The configuration written to `theme.json`.
    pub config: ThemeConfig,
    /// Plugin packages not yet in the theme's dependencies.
    pub missing: Vec<String>,
}

impl Workspace {
    /// Resolves the theme configuration, writes `theme.json` and works out
    /// which plugins are missing.
    pub fn prepare<F>(&self, manifest: &Manifest, env: F) -> Result<Prepared>
    where
        F: Fn(&str) -> Option<String>,
    {
        let theme_dir = manifest.theme_dir(&self.root);
        let config = ThemeConfig::from_manifest(manifest, env)?;

        theme::materialize(&config, &manifest.theme_config_path(&self.root))?;

        let installed = PackageJson::load(&theme_dir)?.installed();
        let missing = plugins::find_missing(&config.plugins, &installed);
        debug!("Missing plugins: {missing:?}");

        Ok(Prepared {
            theme_dir,
            config,
            missing,
        })
    }

    /// Runs the full pipeline and returns the generator's exit status.
    pub fn run<F>(&self, manifest: &Manifest, env: F, args: &[OsString]) -> Result<ExitStatus>
    where
        F: Fn(&str) -> Option<String>,
    {
        let prepared = self.prepare(manifest, env)?;
        plugins::install_missing(&self.package_manager, &prepared.theme_dir, &prepared.missing)?;
        generator::run(&self.generator, args, &prepared.theme_dir)
    }

    /// Runs the generator directly in `dir`, bypassing the theme pipeline.
    pub fn passthrough(&self, dir: &Path, args: &[OsString]) -> Result<ExitStatus> {
        generator::run(&self.generator, args, dir)
    }
}
