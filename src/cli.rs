//! CLI argument parsing and command dispatch

use std::ffi::OsString;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use console::Term;
use log::LevelFilter;

use gatsby_themes::generator::DEFAULT_GENERATOR;
use gatsby_themes::manifest::MANIFEST_FILE;
use gatsby_themes::output::OutputConfig;

use crate::commands::{self, Context};

/// Gatsby Themes - Manage the theme sub-projects of a Gatsby site
///
/// Any command not listed below is forwarded to the gatsby CLI and run inside
/// the active theme, e.g. `gatsby-themes develop` or `gatsby-themes build`.
#[derive(Parser, Debug)]
#[command(name = "gatsby-themes")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "info")]
    log_level: LevelFilter,

    /// Path to the themes manifest
    #[arg(
        short,
        long,
        global = true,
        value_name = "FILE",
        env = "GATSBY_THEMES_MANIFEST",
        default_value = MANIFEST_FILE
    )]
    manifest: PathBuf,

    /// Site generator program
    #[arg(long, global = true, value_name = "PROGRAM", env = "GATSBY_THEMES_GATSBY", default_value = DEFAULT_GENERATOR)]
    gatsby: String,

    /// Package manager used to install missing plugins
    #[arg(
        long,
        global = true,
        value_name = "PROGRAM",
        env = "GATSBY_THEMES_PACKAGE_MANAGER",
        default_value = "yarn"
    )]
    package_manager: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a new gatsby-themes.yaml manifest
    Init(commands::init::InitArgs),

    /// Fetch a theme starter into the themes directory
    Get(commands::get::GetArgs),

    /// Set the active theme
    #[command(
        after_help = "The manifest is rewritten in place. Key order is kept, comments are not."
    )]
    Set(commands::set::SetArgs),

    /// Copy the active theme's build output into ./public
    Copy(commands::copy::CopyArgs),

    /// Validate the manifest and the active theme configuration
    Validate(commands::validate::ValidateArgs),

    /// Resolve template keys against a query result
    Field(commands::field::FieldArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),

    /// Run a gatsby command inside the active theme
    #[command(external_subcommand)]
    Gatsby(Vec<OsString>),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<ExitCode> {
        init_logging(self.log_level);

        let root = std::env::current_dir().context("Failed to get current directory")?;
        let ctx = Context {
            manifest: root.join(&self.manifest),
            root,
            out: OutputConfig::from_env_and_flag(&self.color),
            interactive: io::stdin().is_terminal() && Term::stdout().is_term(),
            gatsby: self.gatsby,
            package_manager: self.package_manager,
        };

        let done = |result: Result<()>| result.map(|()| ExitCode::SUCCESS);
        match self.command {
            Commands::Init(args) => done(commands::init::execute(&ctx, args)),
            Commands::Get(args) => done(commands::get::execute(&ctx, args)),
            Commands::Set(args) => done(commands::set::execute(&ctx, args)),
            Commands::Copy(args) => done(commands::copy::execute(&ctx, args)),
            Commands::Validate(args) => done(commands::validate::execute(&ctx, args)),
            Commands::Field(args) => done(commands::field::execute(&ctx, args)),
            Commands::Completions(args) => done(commands::completions::execute(args)),
            Commands::Gatsby(args) => commands::run::execute(&ctx, args),
        }
    }
}

/// `RUST_LOG`, when set, takes precedence over `--log-level`.
fn init_logging(level: LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .format_target(false)
        .parse_default_env()
        .try_init()
        .ok();
}
