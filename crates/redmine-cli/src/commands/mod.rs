//! Subcommand implementations.

pub mod decode;
pub mod encode;
pub mod list;
pub mod types;

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use redmine_core::Format;

use crate::cli::Commands;

pub fn handle(cmd: Commands, format: Format) -> Result<()> {
    match cmd {
        Commands::Decode(args) => decode::run(args, format),
        Commands::List(args) => list::run(args, format),
        Commands::Encode(args) => encode::run(args, format),
        Commands::Types(args) => types::run(args),
    }
}

/// Reads the document from `path`, or from stdin when no path is given.
fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut document = String::new();
            std::io::stdin()
                .read_to_string(&mut document)
                .context("Failed to read stdin")?;
            Ok(document)
        }
    }
}
