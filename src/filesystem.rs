//! Directory copying for theme build output.

use std::fs;
use std::io;
use std::path::Path;

use log::debug;
use walkdir::WalkDir;

use crate::error::Result;

/// Name of the generator's build output directory.
pub const PUBLIC_DIR: &str = "public";

/// Recursively copies the contents of `src` into `dst`.
///
/// Directories are created as needed and existing files in `dst` are
/// overwritten; files only present in `dst` are left alone. Returns the number
/// of files copied.
pub fn copy_dir(src: &Path, dst: &Path) -> Result<usize> {
    if !src.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("directory not found: {}", src.display()),
        )
        .into());
    }

    let mut copied = 0;
    for entry in WalkDir::new(src) {
        let entry = entry.map_err(io::Error::from)?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(io::Error::other)?;
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }

    debug!("Copied {copied} files from {} to {}", src.display(), dst.display());
    Ok(copied)
}
