//! Encode command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use redmine_core::{Codec, Format, RecordKind, Registry};

use crate::output;

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Record type (issue, project, time_entry, ...)
    #[arg(long = "type", value_name = "KIND")]
    pub kind: RecordKind,

    /// Format of the input document (defaults to --format)
    #[arg(long)]
    pub from: Option<Format>,

    /// Format of the request body to produce
    #[arg(long)]
    pub to: Format,

    /// Document to read (defaults to stdin)
    pub file: Option<PathBuf>,
}

pub fn run(args: EncodeArgs, format: Format) -> Result<()> {
    let document = super::read_input(args.file.as_deref())?;
    let registry = Registry::global();
    let from = args.from.unwrap_or(format);

    let record = Codec::new(registry, from)
        .deserialize_kind(&document, args.kind, None)
        .with_context(|| format!("Failed to decode {} document", from))?
        .with_context(|| format!("No {} record in the document", args.kind))?;

    let body = Codec::new(registry, args.to)
        .serialize_record(&record)
        .context("Failed to encode record")?;
    output::document(&body);

    Ok(())
}
