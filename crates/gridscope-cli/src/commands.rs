//! Command handlers.
//!
//! Handlers write to any `Write` so tests can capture output.

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use gridscope_host::{fetch_record, fetch_snapshot, ExplorerSession, JsonHost, TableSnapshot};
use gridscope_seeker::{operators_for, FieldType, Seeker};
use serde::Serialize;

use crate::cli::{Command, FieldsArgs, OutputFormat, RecordArgs, TableArgs};
use crate::config::Config;
use crate::render::{self, Styles, TablePage};

const NOTHING_SELECTED: &str = "Nothing to show: no table is selected or it has no grid view.";

/// Runs one parsed command.
pub async fn dispatch<W: Write>(out: &mut W, command: &Command, config: &Config) -> anyhow::Result<()> {
    match command {
        Command::Table(args) => table(out, args, config).await,
        Command::Record(args) => record(out, args, config).await,
        Command::Fields(args) => fields(out, args).await,
    }
}

fn open(path: &Path) -> anyhow::Result<JsonHost> {
    JsonHost::from_path(path).with_context(|| format!("cannot load snapshot {}", path.display()))
}

async fn load_snapshot(path: &Path) -> anyhow::Result<Option<TableSnapshot>> {
    let host = open(path)?;
    Ok(fetch_snapshot(&host).await?)
}

pub async fn table<W: Write>(out: &mut W, args: &TableArgs, config: &Config) -> anyhow::Result<()> {
    let Some(snapshot) = load_snapshot(&args.snapshot).await? else {
        writeln!(out, "{}", NOTHING_SELECTED)?;
        return Ok(());
    };

    let seeker = Seeker::new(config.locale.clone());
    let filters = args
        .filters
        .iter()
        .map(|spec| spec.resolve(&snapshot.fields, seeker.locale()))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let mut session = ExplorerSession::new(snapshot, seeker);
    session.set_page_size(args.page_size.unwrap_or(config.page_size));
    session.apply_filters(filters);
    if let Some(query) = &args.search {
        session.set_query(query.as_str());
    }
    session.set_page(args.page);

    match args.output {
        OutputFormat::Term => render::write_table(out, &session, &Styles::new(!args.no_highlight))?,
        OutputFormat::Json => render::write_json(out, &TablePage::new(&session))?,
    }
    Ok(())
}

pub async fn record<W: Write>(out: &mut W, args: &RecordArgs, config: &Config) -> anyhow::Result<()> {
    let host = open(&args.snapshot)?;
    let Some(snapshot) = fetch_record(&host, args.id.as_deref()).await? else {
        writeln!(out, "Nothing to show: no record is selected.")?;
        return Ok(());
    };

    match args.output {
        OutputFormat::Term => {
            render::write_record(out, &snapshot, &config.locale, &Styles::new(false))?
        }
        OutputFormat::Json => render::write_json(out, &snapshot)?,
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct FieldInfo<'a> {
    id: &'a str,
    name: &'a str,
    #[serde(rename = "type")]
    field_type: FieldType,
    operators: Vec<&'static str>,
}

pub async fn fields<W: Write>(out: &mut W, args: &FieldsArgs) -> anyhow::Result<()> {
    let Some(snapshot) = load_snapshot(&args.snapshot).await? else {
        writeln!(out, "{}", NOTHING_SELECTED)?;
        return Ok(());
    };

    match args.output {
        OutputFormat::Term => render::write_fields(out, &snapshot.fields, &Styles::new(false))?,
        OutputFormat::Json => {
            let infos: Vec<FieldInfo> = snapshot
                .fields
                .iter()
                .map(|field| FieldInfo {
                    id: &field.id,
                    name: &field.name,
                    field_type: field.field_type,
                    operators: operators_for(field.field_type)
                        .iter()
                        .map(|op| op.as_str())
                        .collect(),
                })
                .collect();
            render::write_json(out, &infos)?
        }
    }
    Ok(())
}
