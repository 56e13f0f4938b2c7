//! Stamps the binary with a version string.
//!
//! `REDMINE_VERSION` set in the build environment wins; otherwise the
//! version comes from `git describe`, marked `-dirty` for uncommitted
//! changes, and finally from the package version.

use std::env;
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-env-changed=REDMINE_VERSION");
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/index");

    let version = env::var("REDMINE_VERSION")
        .ok()
        .filter(|version| !version.trim().is_empty())
        .or_else(describe)
        .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());

    println!("cargo:rustc-env=REDMINE_VERSION={version}");
}

fn describe() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        .ok()
        .filter(|output| output.status.success())?;

    let described = String::from_utf8(output.stdout).ok()?;
    match described.trim() {
        "" => None,
        tag => Some(tag.trim_start_matches('v').to_string()),
    }
}
