//! Types command implementation.

use anyhow::Result;
use clap::Args;
use redmine_core::Registry;

use crate::output;

#[derive(Args, Debug)]
pub struct TypesArgs {
    /// Print one JSON object per type
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: TypesArgs) -> Result<()> {
    let registry = Registry::global();
    for kind in registry.kinds() {
        let root = registry.converter(kind)?.root();
        if args.json {
            output::json(&serde_json::json!({ "type": kind, "root": root }))?;
        } else {
            output::field(kind.as_str(), root);
        }
    }
    Ok(())
}
