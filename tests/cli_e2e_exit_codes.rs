//! End-to-end tests for CLI exit codes.
//!
//! - Exit code 0: Success
//! - Exit code 1: General error
//! - Exit code 2: Invalid command-line usage (handled by clap)
//! - Forwarded commands exit with the generator's own code

mod common;
use common::prelude::*;

#[test]
fn test_exit_code_help() {
    cargo_bin_cmd!("gatsby-themes").arg("--help").assert().code(0);
}

#[test]
fn test_exit_code_version() {
    cargo_bin_cmd!("gatsby-themes")
        .arg("--version")
        .assert()
        .code(0)
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_exit_code_manifest_not_found() {
    TestFixture::new().command().arg("validate").assert().code(1);
}

#[test]
fn test_exit_code_invalid_flag() {
    TestFixture::new()
        .command()
        .args(["validate", "--no-such-flag"])
        .assert()
        .code(2);
}

#[test]
fn test_exit_code_invalid_log_level() {
    TestFixture::new()
        .command()
        .args(["--log-level", "loud", "validate"])
        .assert()
        .code(2);
}

#[cfg(unix)]
#[test]
fn test_exit_code_from_generator() {
    let fixture = TestFixture::new()
        .with_manifest(manifests::BLOG)
        .with_theme("blog", manifests::ALL_INSTALLED);

    fixture
        .command()
        .args(["--gatsby", "true", "build"])
        .assert()
        .code(0);
    fixture
        .command()
        .args(["--gatsby", "false", "build"])
        .assert()
        .code(1);
}
