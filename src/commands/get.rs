//! # Get Command Implementation
//!
//! Fetches a theme starter with `gatsby new` and places it under the
//! manifest's themes directory, named after the starter or the `--as` alias.

use anyhow::{bail, Result};
use clap::Args;

use gatsby_themes::generator;

use super::Context;

/// Fetch a theme starter into the themes directory
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Starter name or repository URL passed to `gatsby new`
    pub name: String,

    /// Directory name to use under the themes directory
    #[arg(long = "as", value_name = "ALIAS")]
    pub alias: Option<String>,
}

/// Execute the `get` command.
pub fn execute(ctx: &Context, args: GetArgs) -> Result<()> {
    let manifest = ctx.require_manifest()?;
    let dir_name = args.alias.as_deref().unwrap_or(&args.name);
    let dest = ctx.root.join(&manifest.themes_dir).join(dir_name);

    if dest.exists() {
        bail!(
            "Theme directory {} already exists\n\n\
             hint: Use --as <alias> to fetch it under another name",
            dest.display()
        );
    }

    ctx.out.status(
        "📥",
        "[GET]",
        format!("Fetching {} into {}", args.name, dest.display()),
    );
    generator::new_theme(&ctx.gatsby, &args.name, &dest, &ctx.root)?;
    ctx.out.status(
        "💡",
        "[TIP]",
        format!("Run `gatsby-themes set {dir_name}` to make it the active theme"),
    );

    Ok(())
}
