//! # Validate Command Implementation
//!
//! This module implements the `validate` subcommand, which checks the
//! `gatsby-themes.yaml` manifest and the active theme's configuration without
//! running anything.
//!
//! ## Functionality
//!
//! - **Manifest Validation**: Parses the manifest and checks its schema.
//! - **Theme Configuration**: Builds the active theme's configuration, checking
//!   the required keys, the plugin list and every data mapping entry.
//! - **Theme Directory**: Reports a missing theme directory or `package.json`
//!   and the plugins that would be installed on the next run.
//!
//! This command is read-only. It never writes `theme.json` and never installs
//! anything.

use anyhow::Result;
use clap::Args;

use gatsby_themes::mapping::{self, DataMapping};
use gatsby_themes::plugins::{self, PackageJson};
use gatsby_themes::theme::ThemeConfig;

use super::{explain, process_env, Context};

/// Validate the manifest and the active theme configuration
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Use strict validation (fail on warnings).
    #[arg(long)]
    pub strict: bool,
}

/// Execute the `validate` command.
pub fn execute(ctx: &Context, args: ValidateArgs) -> Result<()> {
    let out = &ctx.out;
    println!(
        "{} Validating manifest: {}",
        out.marker("🔍", "[SCAN]"),
        ctx.manifest.display()
    );

    let manifest = match ctx.require_manifest() {
        Ok(manifest) => {
            println!("{} Manifest parsed successfully", out.marker("✅", "[OK]"));
            manifest
        }
        Err(e) => {
            println!("{} Manifest validation failed", out.marker("❌", "[ERR]"));
            return Err(e);
        }
    };

    let mut has_warnings = false;
    let mut has_errors = false;

    println!("\n{} Manifest Summary:", out.marker("📊", "[INFO]"));
    println!("   Themes directory: {}", manifest.themes_dir);
    println!("   Active theme: {}", manifest.theme);
    println!("   Declared themes: {}", manifest.themes.len());
    println!(
        "   Shared plugins: {}",
        manifest.plugins.as_ref().map_or(0, Vec::len)
    );

    println!(
        "\n{} Checking theme '{}'...",
        out.marker("🎨", "[THEME]"),
        manifest.theme
    );
    let config = match ThemeConfig::from_manifest(&manifest, process_env) {
        Ok(config) => {
            println!(
                "{} Theme configuration is complete ({} plugins)",
                out.marker("✅", "[OK]"),
                config.plugins.len()
            );
            Some(config)
        }
        Err(e) => {
            println!("{} {}", out.marker("❌", "[ERR]"), explain(e, &manifest));
            has_errors = true;
            None
        }
    };

    if let Some(config) = &config {
        for (key, entry) in &config.mappings {
            if let Err(e) = DataMapping::from_value(key, entry) {
                println!("{} {e}", out.marker("❌", "[ERR]"));
                has_errors = true;
            }
        }
        if mapping::compose_query(&config.query).is_none() {
            println!(
                "{} Query is neither a string nor a mapping of aliases",
                out.marker("⚠️", "[WARN]")
            );
            has_warnings = true;
        }
    }

    let theme_dir = manifest.theme_dir(&ctx.root);
    println!(
        "\n{} Checking theme directory {}...",
        out.marker("📁", "[DIR]"),
        theme_dir.display()
    );
    if !theme_dir.is_dir() {
        println!(
            "{} Theme directory does not exist",
            out.marker("⚠️", "[WARN]")
        );
        has_warnings = true;
    } else {
        let config_path = manifest.theme_config_path(&ctx.root);
        if config_path.exists() {
            if let Err(e) = ThemeConfig::load(&config_path) {
                println!(
                    "{} Existing {} is unreadable and will be replaced: {e}",
                    out.marker("⚠️", "[WARN]"),
                    config_path.display()
                );
                has_warnings = true;
            }
        }

        match PackageJson::load(&theme_dir) {
            Ok(package) => {
                let missing = config
                    .as_ref()
                    .map(|config| plugins::find_missing(&config.plugins, &package.installed()))
                    .unwrap_or_default();
                if missing.is_empty() {
                    println!("{} All plugins installed", out.marker("✅", "[OK]"));
                } else {
                    println!(
                        "{} Plugins to install on next run: {}",
                        out.marker("⚠️", "[WARN]"),
                        missing.join(", ")
                    );
                    has_warnings = true;
                }
            }
            Err(e) => {
                println!(
                    "{} Could not read package.json: {e}",
                    out.marker("⚠️", "[WARN]")
                );
                has_warnings = true;
            }
        }
    }

    println!("\n{} Validation Result:", out.marker("🎯", "[RESULT]"));

    if has_errors {
        println!(
            "{} Manifest has errors that must be fixed",
            out.marker("❌", "[ERR]")
        );
        anyhow::bail!("Manifest validation failed");
    }

    if has_warnings && args.strict {
        println!(
            "{} Manifest has warnings (strict mode enabled)",
            out.marker("❌", "[ERR]")
        );
        anyhow::bail!("Manifest validation failed in strict mode");
    }

    if has_warnings {
        println!(
            "{} Manifest is valid but has warnings",
            out.marker("⚠️", "[WARN]")
        );
    } else {
        println!("{} Manifest is valid", out.marker("✅", "[OK]"));
    }

    Ok(())
}
