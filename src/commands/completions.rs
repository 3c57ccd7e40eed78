//! # Completions Command Implementation
//!
//! Prints a shell completion script for `gatsby-themes` to stdout.
//!
//! ```bash
//! gatsby-themes completions bash > ~/.local/share/bash-completion/completions/gatsby-themes
//! gatsby-themes completions zsh > ~/.zfunc/_gatsby-themes
//! ```
//!
//! Forwarded generator verbs (`develop`, `build`, ...) are not known to the
//! CLI and are not completed.

use std::io::{self, Write};

use anyhow::Result;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};

use crate::cli::Cli;

const BIN_NAME: &str = "gatsby-themes";

/// Generate shell completion scripts
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// The shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Execute the `completions` command.
pub fn execute(args: CompletionsArgs) -> Result<()> {
    write_completions(args.shell, &mut io::stdout())
}

fn write_completions(shell: Shell, writer: &mut dyn Write) -> Result<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, BIN_NAME, writer);
    writer.flush()?;
    Ok(())
}
