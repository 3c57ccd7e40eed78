//! # Init Command Implementation
//!
//! This module implements the `init` subcommand, which creates a new
//! `gatsby-themes.yaml` manifest.
//!
//! ## Functionality
//!
//! - **Example Manifest**: Writes a manifest with one example theme, its data
//!   mappings and a plugin list (default)
//! - **Empty Manifest**: Writes only the required keys
//! - **Overwrite Protection**: An existing manifest is never replaced silently.
//!   It is overwritten with `--force`, or after confirmation when running in
//!   an interactive terminal.

use std::fs;

use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm};

use gatsby_themes::suggestions;

use super::Context;

/// Create a new gatsby-themes.yaml manifest
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Write only the required keys
    #[arg(long)]
    pub empty: bool,

    /// Overwrite an existing manifest without asking
    #[arg(short, long)]
    pub force: bool,
}

/// Execute the `init` command.
pub fn execute(ctx: &Context, args: InitArgs) -> Result<()> {
    let path = &ctx.manifest;

    if path.exists() && !args.force && !confirm_overwrite(ctx)? {
        return Err(suggestions::manifest_exists(path));
    }

    let content = if args.empty {
        generate_empty_manifest()
    } else {
        generate_example_manifest()
    };

    fs::write(path, content)?;
    ctx.out.status("✅", "[OK]", format!("Created {}", path.display()));
    ctx.out.status(
        "💡",
        "[TIP]",
        "Run `gatsby-themes get <starter> --as <name>` to add a theme",
    );

    Ok(())
}

/// Asks before overwriting. Never asks outside an interactive terminal.
fn confirm_overwrite(ctx: &Context) -> Result<bool> {
    if !ctx.interactive {
        return Ok(false);
    }

    let answer = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(format!(
            "{} already exists. Overwrite it?",
            ctx.manifest.display()
        ))
        .default(false)
        .interact()?;
    Ok(answer)
}

/// Generate a manifest with only the required keys.
fn generate_empty_manifest() -> String {
    r#"# gatsby-themes manifest
version: 1
themesDir: themes
theme: default
"#
    .to_string()
}

/// Generate a manifest with an example theme.
fn generate_example_manifest() -> String {
    r#"# gatsby-themes manifest
# Declares the theme sub-projects of this site and which one is active.

version: 1

# Directory holding one sub-project per theme
themesDir: themes

# Active theme; switch with `gatsby-themes set <name>`
theme: blog

# Plugins shared by every theme. Option values may reference environment
# variables as process.env.NAME or ${NAME}.
plugins:
  - gatsby-plugin-react-helmet

themes:
  blog:
    # Template key -> query result location. Use null to leave a key unbound.
    mappings:
      title:
        querySource: site
        field: title
      subtitle:
        querySource: null
        field: null
    # Alias -> GraphQL selection
    query:
      site: "site { siteMetadata { title } }"
    develop:
      port: 8000
    build:
      prefixPaths: false
    # Theme-specific plugins replace the shared list
    plugins:
      - gatsby-plugin-react-helmet
      - resolve: gatsby-source-filesystem
        options:
          name: posts
          path: content/posts
"#
    .to_string()
}
