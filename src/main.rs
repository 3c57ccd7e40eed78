//! # Gatsby Themes CLI
//!
//! This is the binary entry point for the `gatsby-themes` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Executing the appropriate command based on the parsed arguments.
//! - Reporting errors once and exiting with a non-zero code, or with the exit
//!   code of the forwarded gatsby command.
//!
//! The core logic lives in the `gatsby_themes` library crate; the binary is a
//! thin wrapper around it.

mod cli;
mod commands;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<ExitCode> {
    let cli = cli::Cli::parse();
    cli.execute()
}
