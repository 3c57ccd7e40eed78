//! # Set Command Implementation
//!
//! Switches the active theme by rewriting the manifest's `theme` field. All
//! other fields are kept in place, and running the command twice with the same
//! name leaves the manifest unchanged. Comments in the manifest are lost on
//! rewrite.

use anyhow::Result;
use clap::Args;
use log::warn;

use gatsby_themes::manifest;

use super::Context;

/// Set the active theme
#[derive(Args, Debug)]
pub struct SetArgs {
    /// Name of the theme to activate
    pub name: String,
}

/// Execute the `set` command.
pub fn execute(ctx: &Context, args: SetArgs) -> Result<()> {
    // Load through the usual path first so a missing manifest gets its hints.
    ctx.require_manifest()?;

    let updated = manifest::write_theme(&ctx.manifest, &args.name)?;

    let theme_dir = updated.theme_dir(&ctx.root);
    if !theme_dir.is_dir() {
        warn!("Theme directory {} does not exist", theme_dir.display());
    }
    if !updated.themes.is_empty() && updated.theme_entry(&updated.theme).is_none() {
        warn!("Theme '{}' has no entry under 'themes'", updated.theme);
    }

    ctx.out.status(
        "✅",
        "[OK]",
        format!("Active theme is now '{}'", updated.theme),
    );
    Ok(())
}
