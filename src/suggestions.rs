//! # Error Suggestions
//!
//! This module provides helper functions for generating helpful error
//! messages with hints and suggestions. Errors should tell users what went
//! wrong AND how to fix it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gatsby_themes::suggestions;
//!
//! // Instead of:
//! anyhow::bail!("Manifest not found: {}", path.display());
//!
//! // Use:
//! return Err(suggestions::manifest_not_found(path));
//! ```

use std::path::Path;

use crate::error::Error;

/// Generate an error for when the manifest is not found.
///
/// Includes hints about:
/// - Creating a manifest with `init`
/// - Using the -m/--manifest flag
/// - Using the GATSBY_THEMES_MANIFEST environment variable
pub fn manifest_not_found(path: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "Manifest not found: {path}\n\n\
         hint: Run 'gatsby-themes init' to create one\n\
         hint: Use -m/--manifest to specify a different path\n\
         hint: Set GATSBY_THEMES_MANIFEST environment variable",
        path = path.display()
    )
}

/// Generate an error for `init` when a manifest is already present.
pub fn manifest_exists(path: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "Manifest '{path}' already exists. Use --force to overwrite.",
        path = path.display()
    )
}

/// Generate an error for an active theme missing from `themes`.
///
/// Suggests the closest declared theme name when there is one.
pub fn unknown_theme(theme: &str, declared: &[&str]) -> anyhow::Error {
    let did_you_mean = find_similar(theme, declared)
        .map(|s| format!("\nhint: Did you mean '{s}'?"))
        .unwrap_or_default();
    let known = if declared.is_empty() {
        "none".to_string()
    } else {
        declared.join(", ")
    };

    anyhow::anyhow!(
        "Theme '{theme}' is not declared under 'themes' in the manifest{did_you_mean}\n\n\
         Declared themes: {known}\n\
         hint: Add a 'themes.{theme}' entry with mappings, query, develop and build"
    )
}

/// Generate an error for a missing build output directory.
pub fn theme_output_missing(dir: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "Theme build output not found: {dir}\n\n\
         hint: Run 'gatsby-themes build' first",
        dir = dir.display()
    )
}

/// Generate an error for a failed plugin installation.
pub fn plugin_install_failed(error: Error) -> anyhow::Error {
    anyhow::anyhow!(
        "{error}\n\n\
         hint: Check that the package manager is installed and on PATH\n\
         hint: Use --package-manager or GATSBY_THEMES_PACKAGE_MANAGER to pick another one"
    )
}

/// Attach hints to library errors that have a well-known fix.
///
/// `declared` lists the theme names found in the manifest, used to suggest a
/// replacement for an undeclared theme.
pub fn explain(error: Error, declared: &[&str]) -> anyhow::Error {
    match error {
        Error::ManifestNotFound { path } => manifest_not_found(&path),
        Error::ThemeNotDeclared { theme } => unknown_theme(&theme, declared),
        error @ Error::PluginInstall { .. } => plugin_install_failed(error),
        other => other.into(),
    }
}

/// Find a similar string from a list of candidates using edit distance.
///
/// Returns Some(candidate) if a close match is found (edit distance <= 2).
fn find_similar<'a>(input: &str, candidates: &[&'a str]) -> Option<&'a str> {
    candidates
        .iter()
        .filter_map(|&candidate| {
            let distance = edit_distance(input, candidate);
            if distance <= 2 && distance < input.len() {
                Some((candidate, distance))
            } else {
                None
            }
        })
        .min_by_key(|(_, distance)| *distance)
        .map(|(candidate, _)| candidate)
}

/// Calculate the Levenshtein edit distance between two strings.
fn edit_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let a_len = a_chars.len();
    let b_len = b_chars.len();

    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    let mut matrix = vec![vec![0usize; b_len + 1]; a_len + 1];

    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    for (j, cell) in matrix[0].iter_mut().enumerate() {
        *cell = j;
    }

    for i in 1..=a_len {
        for j in 1..=b_len {
            let cost = if a_chars[i - 1] == b_chars[j - 1] {
                0
            } else {
                1
            };
            matrix[i][j] = (matrix[i - 1][j] + 1)
                .min(matrix[i][j - 1] + 1)
                .min(matrix[i - 1][j - 1] + cost);
        }
    }

    matrix[a_len][b_len]
}
