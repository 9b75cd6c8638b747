//! # gridscope
//!
//! Command-line table explorer over host snapshot documents.
//!
//! ```text
//! gridscope table tasks.json --search release -f "Score:gte:15" --page-size 20
//! gridscope record tasks.json --id rec2
//! gridscope fields tasks.json --output json
//! ```
//!
//! `table` builds an explorer session from the selected table's first grid
//! view, applies the `--filter` rows and `--search` query (filters first),
//! and prints one page. Filter rows are `FIELD:OP[:VALUE]` with the field
//! named by id or display name; values are read according to the field's
//! type (numbers, dates, `true`/`false` or the locale's checkbox tokens,
//! comma-separated choice names or ids).

pub mod cli;
pub mod commands;
pub mod config;
pub mod filter_arg;
pub mod logging;
pub mod render;

use std::io;

pub use cli::{Cli, Command, OutputFormat};
pub use config::Config;
pub use filter_arg::FilterSpec;

/// Loads configuration, installs logging and runs the command on stdout.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    logging::init(&config.log_level, cli.verbose)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    commands::dispatch(&mut out, &cli.command, &config).await
}
