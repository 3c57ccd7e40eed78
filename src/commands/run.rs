//! # Generator Passthrough
//!
//! Handles every verb the CLI does not define itself (`develop`, `build`,
//! `serve`, ...). The active theme's configuration is written and its missing
//! plugins installed before the generator is started inside the theme
//! directory with the arguments exactly as given.
//!
//! Without a manifest the generator runs directly in the working directory.

use std::ffi::OsString;
use std::process::{ExitCode, ExitStatus};

use anyhow::Result;
use log::debug;

use super::{explain, process_env, Context};

/// Execute a forwarded generator command.
///
/// Returns the generator's own exit code.
pub fn execute(ctx: &Context, args: Vec<OsString>) -> Result<ExitCode> {
    let workspace = ctx.workspace();

    let status = match ctx.optional_manifest()? {
        None => {
            debug!(
                "No manifest at {}, running {} in {}",
                ctx.manifest.display(),
                workspace.generator,
                ctx.root.display()
            );
            workspace.passthrough(&ctx.root, &args)?
        }
        Some(manifest) => workspace
            .run(&manifest, process_env, &args)
            .map_err(|e| explain(e, &manifest))?,
    };

    Ok(exit_code(status))
}

/// Exit codes outside 0..=255 or a signal exit become a plain failure.
fn exit_code(status: ExitStatus) -> ExitCode {
    match status.code().map(u8::try_from) {
        Some(Ok(code)) => ExitCode::from(code),
        _ => ExitCode::FAILURE,
    }
}
