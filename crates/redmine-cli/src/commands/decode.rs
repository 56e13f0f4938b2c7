//! Decode command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use redmine_core::{Codec, Format, RecordKind, Registry};
use tracing::info;

use crate::output;

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Record type (issue, project, time_entry, ...)
    #[arg(long = "type", value_name = "KIND")]
    pub kind: RecordKind,

    /// Root key to read the record from (defaults to the type's own)
    #[arg(long)]
    pub root: Option<String>,

    /// Document to read (defaults to stdin)
    pub file: Option<PathBuf>,
}

pub fn run(args: DecodeArgs, format: Format) -> Result<()> {
    let document = super::read_input(args.file.as_deref())?;
    let registry = Registry::global();

    let record = Codec::new(registry, format)
        .deserialize_kind(&document, args.kind, args.root.as_deref())
        .with_context(|| format!("Failed to decode {} document", format))?;

    let Some(record) = record else {
        output::notice("No record found.");
        return Ok(());
    };
    info!(kind = %record.kind(), id = record.id(), "decoded record");

    let dump = Codec::new(registry, Format::Json)
        .dump(&record)
        .context("Failed to render record")?;
    output::document(&dump);

    Ok(())
}
