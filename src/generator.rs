//! Invocation of the site generator CLI.
//!
//! The generator is always run as a blocking child process with inherited
//! stdio and environment. Its exit status is handed back to the caller so the
//! CLI can exit with the same code.

use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, ExitStatus};

use log::info;

use crate::error::{Error, Result};

/// Default generator program.
pub const DEFAULT_GENERATOR: &str = "gatsby";

/// Runs `<program> <args...>` in `cwd` and waits for it to exit.
pub fn run<I, S>(program: &str, args: I, cwd: &Path) -> Result<ExitStatus>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut command = Command::new(program);
    command.args(args).current_dir(cwd);
    info!("Running {:?} in {}", command, cwd.display());

    command.status().map_err(|e| Error::Process {
        program: program.to_string(),
        message: e.to_string(),
    })
}

/// Scaffolds `starter` into `dest` with `<program> new <dest> <starter>`.
///
/// Unlike [`run`], a non-zero exit is reported as an error.
pub fn new_theme(program: &str, starter: &str, dest: &Path, cwd: &Path) -> Result<()> {
    let args = [OsStr::new("new"), dest.as_os_str(), OsStr::new(starter)];
    let status = run(program, args, cwd)?;
    if !status.success() {
        return Err(Error::Process {
            program: program.to_string(),
            message: format!("'new {starter}' exited with {status}"),
        });
    }
    Ok(())
}
