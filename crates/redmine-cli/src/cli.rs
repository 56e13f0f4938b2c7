//! CLI argument definitions.

use clap::{Parser, Subcommand};
use redmine_core::Format;

use crate::commands::{decode, encode, list, types};

/// Decode and encode Redmine REST documents.
#[derive(Parser, Debug)]
#[command(name = "redmine")]
#[command(author, version = env!("REDMINE_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Wire format of input documents (xml or json)
    #[arg(long, global = true, env = "REDMINE_FORMAT", default_value = "json")]
    pub format: Format,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decode a single record and print every field
    Decode(decode::DecodeArgs),

    /// Decode a list response
    List(list::ListArgs),

    /// Re-encode a record as a create/update request body
    Encode(encode::EncodeArgs),

    /// Show the registered record types
    Types(types::TypesArgs),
}
