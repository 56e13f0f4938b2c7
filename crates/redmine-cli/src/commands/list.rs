//! List command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use redmine_core::{Codec, Format, RecordKind, Registry};
use serde_json::Value;

use crate::output;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Record type of the items (issue, project, error, ...)
    #[arg(long = "type", value_name = "KIND")]
    pub kind: RecordKind,

    /// Root key holding the items (issues, projects, errors, ...)
    #[arg(long)]
    pub root: String,

    /// Document to read (defaults to stdin)
    pub file: Option<PathBuf>,
}

pub fn run(args: ListArgs, format: Format) -> Result<()> {
    let document = super::read_input(args.file.as_deref())?;
    let registry = Registry::global();

    let envelope = Codec::new(registry, format)
        .deserialize_list_kind(&document, args.kind, &args.root)
        .with_context(|| format!("Failed to decode {} list", format))?;

    output::field("Total count", &envelope.total_count.to_string());
    if let Some(offset) = envelope.offset {
        output::field("Offset", &offset.to_string());
    }
    if let Some(limit) = envelope.limit {
        output::field("Limit", &limit.to_string());
    }

    if envelope.is_empty() {
        output::notice("No records found.");
        return Ok(());
    }

    let json = Codec::new(registry, Format::Json);
    for record in &envelope.items {
        let dump = json.dump(record).context("Failed to render record")?;
        let value: Value = serde_json::from_str(&dump)?;
        output::json(&value)?;
    }

    Ok(())
}
