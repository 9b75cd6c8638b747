//! Fetching table data from a host into engine records.

use futures_util::future::join_all;
use gridscope_seeker::{CellValue, Field, Record};
use serde::Serialize;

use crate::error::{HostError, Result};
use crate::host::{TableHost, ViewType};

/// Fields and records of one table view, fetched once.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableSnapshot {
    pub table_id: String,
    pub view_id: String,
    pub fields: Vec<Field>,
    pub records: Vec<Record>,
    /// Number of visible record ids the view reported.
    pub total: usize,
}

/// One record with every field of its table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordSnapshot {
    pub table_id: String,
    pub fields: Vec<Field>,
    pub record: Record,
}

/// Fetches the selected table through its first grid view.
///
/// Returns `Ok(None)` when nothing is selected or the table has no grid
/// view. A cell that fails to load is logged and left empty; failures of
/// the structural calls propagate.
pub async fn fetch_snapshot(host: &dyn TableHost) -> Result<Option<TableSnapshot>> {
    let selection = host.selection().await?;
    let Some(table_id) = selection.table_id else {
        log::info!("no table selected");
        return Ok(None);
    };

    let views = host.views(&table_id).await?;
    let Some(grid) = views.into_iter().find(|view| view.view_type == ViewType::Grid) else {
        log::info!("table {} has no grid view", table_id);
        return Ok(None);
    };
    log::debug!("using view {} of table {}", grid.id, table_id);

    let record_ids = host.visible_record_ids(&table_id, &grid.id).await?;
    let fields = host.view_fields(&table_id, &grid.id).await?;
    let total = record_ids.len();
    log::debug!("fetching {} records x {} fields", total, fields.len());

    let pending = record_ids
        .iter()
        .filter(|id| !id.is_empty())
        .enumerate()
        .map(|(index, record_id)| {
            if index % 100 == 0 {
                log::debug!("fetching record {}/{}", index, total);
            }
            fetch_record_values(host, &table_id, &fields, record_id)
        });
    let records = join_all(pending).await;

    log::info!("fetched {} records from table {}", records.len(), table_id);
    Ok(Some(TableSnapshot {
        table_id,
        view_id: grid.id,
        fields,
        records,
        total,
    }))
}

/// Fetches one record of the selected table.
///
/// `record_id` overrides the selected record. Returns `Ok(None)` when no
/// table or no record is selected, and [`HostError::RecordNotFound`] when
/// the table does not hold the record.
pub async fn fetch_record(
    host: &dyn TableHost,
    record_id: Option<&str>,
) -> Result<Option<RecordSnapshot>> {
    let selection = host.selection().await?;
    let Some(table_id) = selection.table_id else {
        return Ok(None);
    };
    let Some(record_id) = record_id.map(str::to_string).or(selection.record_id) else {
        return Ok(None);
    };

    if !host.has_record(&table_id, &record_id).await? {
        return Err(HostError::RecordNotFound {
            table: table_id,
            record: record_id,
        });
    }

    let fields = host.table_fields(&table_id).await?;
    let record = fetch_record_values_strict(host, &table_id, &fields, &record_id).await?;
    Ok(Some(RecordSnapshot {
        table_id,
        fields,
        record,
    }))
}

async fn fetch_record_values(
    host: &dyn TableHost,
    table_id: &str,
    fields: &[Field],
    record_id: &str,
) -> Record {
    let cells = join_all(fields.iter().map(|field| async move {
        let value = match host.cell_value(table_id, &field.id, record_id).await {
            Ok(json) => CellValue::from_json(json, field.field_type),
            Err(err) => {
                log::warn!(
                    "cannot read cell field={} record={}: {}",
                    field.id,
                    record_id,
                    err
                );
                CellValue::Empty
            }
        };
        (field.id.clone(), value)
    }))
    .await;

    let mut record = Record::new(record_id);
    record.values.extend(cells);
    record
}

/// Like [`fetch_record_values`], but a missing record is an error.
async fn fetch_record_values_strict(
    host: &dyn TableHost,
    table_id: &str,
    fields: &[Field],
    record_id: &str,
) -> Result<Record> {
    let mut record = Record::new(record_id);
    for field in fields {
        match host.cell_value(table_id, &field.id, record_id).await {
            Ok(json) => {
                record
                    .values
                    .insert(field.id.clone(), CellValue::from_json(json, field.field_type));
            }
            Err(err @ HostError::RecordNotFound { .. }) => return Err(err),
            Err(err) => {
                log::warn!("cannot read cell field={} record={}: {}", field.id, record_id, err);
                record.values.insert(field.id.clone(), CellValue::Empty);
            }
        }
    }
    Ok(record)
}
