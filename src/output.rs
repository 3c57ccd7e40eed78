//! Status lines printed by the CLI.
//!
//! With colors enabled each line starts with an emoji, otherwise with a plain
//! marker such as `[OK]`. `--color=auto` follows `NO_COLOR`, `CLICOLOR`,
//! `CLICOLOR_FORCE` and `TERM=dumb`, then whether stdout is a terminal.

use std::env;
use std::fmt::Display;

/// Output settings resolved from `--color` and the environment.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub use_color: bool,
}

impl OutputConfig {
    /// `color_flag` is the value of `--color`: `always`, `never` or `auto`.
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => auto_color(
                |name| env::var(name).ok(),
                console::Term::stdout().features().colors_supported(),
            ),
        };
        Self { use_color }
    }

    /// Picks the emoji or the plain marker.
    pub fn marker<'a>(&self, emoji: &'a str, plain: &'a str) -> &'a str {
        if self.use_color {
            emoji
        } else {
            plain
        }
    }

    /// Prints `message` to stdout behind a status marker.
    pub fn status(&self, emoji: &str, plain: &str, message: impl Display) {
        println!("{} {message}", self.marker(emoji, plain));
    }
}

/// `NO_COLOR` (even empty) and `CLICOLOR=0` win over `CLICOLOR_FORCE`, which
/// wins over `TERM=dumb` and the terminal check.
fn auto_color<F>(var: F, terminal_colors: bool) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    if var("NO_COLOR").is_some() || var("CLICOLOR").as_deref() == Some("0") {
        return false;
    }
    if var("CLICOLOR_FORCE").is_some_and(|v| !v.is_empty() && v != "0") {
        return true;
    }
    var("TERM").as_deref() != Some("dumb") && terminal_colors
}
