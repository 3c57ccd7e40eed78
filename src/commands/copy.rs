//! # Copy Command Implementation
//!
//! Copies the active theme's build output (`<themesDir>/<theme>/public`) into
//! the project's own `public` directory.

use anyhow::Result;
use clap::Args;

use gatsby_themes::filesystem::{self, PUBLIC_DIR};
use gatsby_themes::suggestions;

use super::Context;

/// Copy the active theme's build output into ./public
#[derive(Args, Debug)]
pub struct CopyArgs {}

/// Execute the `copy` command.
pub fn execute(ctx: &Context, _args: CopyArgs) -> Result<()> {
    let manifest = ctx.require_manifest()?;
    let src = manifest.theme_dir(&ctx.root).join(PUBLIC_DIR);
    let dst = ctx.root.join(PUBLIC_DIR);

    if !src.is_dir() {
        return Err(suggestions::theme_output_missing(&src));
    }

    let copied = filesystem::copy_dir(&src, &dst)?;
    ctx.out.status(
        "✅",
        "[OK]",
        format!("Copied {copied} files to {}", dst.display()),
    );
    Ok(())
}
