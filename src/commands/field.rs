//! # Field Command Implementation
//!
//! Resolves template keys against a GraphQL query result using the active
//! theme's data mappings, printing the resolved JSON. Useful for checking
//! mappings without starting the generator.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Args;
use serde_json::Value;

use gatsby_themes::mapping;
use gatsby_themes::theme::ThemeConfig;

use super::{explain, process_env, Context};

/// Resolve template keys against a query result
#[derive(Args, Debug)]
pub struct FieldArgs {
    /// Template key to resolve. All keys are resolved when omitted.
    pub key: Option<String>,

    /// JSON file holding the query result (`{"data": {...}}`)
    #[arg(short, long, value_name = "FILE")]
    pub result: PathBuf,

    /// Read mappings from a materialized theme.json instead of the manifest
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Execute the `field` command.
pub fn execute(ctx: &Context, args: FieldArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => ThemeConfig::load(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let manifest = ctx.require_manifest()?;
            ThemeConfig::from_manifest(&manifest, process_env)
                .map_err(|e| explain(e, &manifest))?
        }
    };

    let content = fs::read_to_string(&args.result)
        .with_context(|| format!("Failed to read {}", args.result.display()))?;
    let query_result: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", args.result.display()))?;

    let resolved = match &args.key {
        Some(key) => mapping::resolve_field(key, &config.mappings, &query_result)?,
        None => serde_json::to_value(mapping::resolve_all(&config.mappings, &query_result)?)?,
    };

    println!("{}", serde_json::to_string_pretty(&resolved)?);
    Ok(())
}
