//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::filter_arg::FilterSpec;

/// Explore table snapshots: search, filter and page through records.
#[derive(Parser, Debug)]
#[command(name = "gridscope")]
#[command(version)]
#[command(about = "Search, filter and page through table snapshots")]
pub struct Cli {
    /// Configuration file (defaults to ./gridscope.yaml)
    #[arg(long, global = true, env = "GRIDSCOPE_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the selected table, filtered, searched and paged
    Table(TableArgs),

    /// Show every field of one record
    Record(RecordArgs),

    /// List the fields of the selected table and their filter operators
    Fields(FieldsArgs),
}

#[derive(Args, Debug)]
pub struct TableArgs {
    /// Snapshot document (JSON)
    #[arg(value_name = "SNAPSHOT")]
    pub snapshot: PathBuf,

    /// Free-text search across every field
    #[arg(short, long, value_name = "TEXT")]
    pub search: Option<String>,

    /// Filter row as FIELD:OP[:VALUE]; repeat to AND several
    #[arg(short, long = "filter", value_name = "FIELD:OP[:VALUE]")]
    pub filters: Vec<FilterSpec>,

    /// Page to show (1-based)
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,

    /// Records per page (overrides the configured size)
    #[arg(long, value_name = "N")]
    pub page_size: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Term)]
    pub output: OutputFormat,

    /// Do not mark search matches
    #[arg(long)]
    pub no_highlight: bool,
}

#[derive(Args, Debug)]
pub struct RecordArgs {
    /// Snapshot document (JSON)
    #[arg(value_name = "SNAPSHOT")]
    pub snapshot: PathBuf,

    /// Record to show instead of the selected one
    #[arg(long, value_name = "RECORD_ID")]
    pub id: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Term)]
    pub output: OutputFormat,
}

#[derive(Args, Debug)]
pub struct FieldsArgs {
    /// Snapshot document (JSON)
    #[arg(value_name = "SNAPSHOT")]
    pub snapshot: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Term)]
    pub output: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned, styled terminal text
    Term,
    /// Pretty-printed JSON
    Json,
}
