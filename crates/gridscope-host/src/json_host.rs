//! A [`TableHost`] backed by a JSON snapshot document.
//!
//! The document mirrors what a live host would answer:
//!
//! ```json
//! {
//!   "selection": { "tableId": "tbl1", "recordId": "rec2" },
//!   "tables": [{
//!     "id": "tbl1",
//!     "name": "Tasks",
//!     "views": [{ "id": "vew1", "name": "Grid", "type": "grid" }],
//!     "fields": [{ "id": "fld1", "name": "Title", "type": 1 }],
//!     "records": [{ "id": "rec1", "values": { "fld1": "Write docs" } }]
//!   }]
//! }
//! ```
//!
//! A view may narrow what it shows with `visibleFields` and
//! `visibleRecords` (id lists); without them it shows the whole table.

use std::collections::BTreeMap;
use std::path::Path;

use async_trait::async_trait;
use gridscope_seeker::Field;
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

use crate::error::{HostError, Result};
use crate::host::{Selection, TableHost, ViewMeta};

/// Top-level snapshot document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostDocument {
    #[serde(default)]
    pub selection: Selection,
    #[serde(default)]
    pub tables: Vec<TableDocument>,
}

/// One table of the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDocument {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub views: Vec<ViewDocument>,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub records: Vec<RecordDocument>,
}

/// One view of a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewDocument {
    #[serde(flatten)]
    pub meta: ViewMeta,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible_fields: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible_records: Option<Vec<String>>,
}

/// One record with raw cell values keyed by field id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordDocument {
    pub id: String,
    #[serde(default)]
    pub values: BTreeMap<String, Json>,
}

/// Serves [`TableHost`] calls from an in-memory [`HostDocument`].
#[derive(Debug, Clone, Default)]
pub struct JsonHost {
    document: HostDocument,
}

impl JsonHost {
    pub fn new(document: HostDocument) -> Self {
        JsonHost { document }
    }

    /// Loads a document from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| HostError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let host = Self::from_json_str(&text)?;
        log::debug!(
            "loaded {} table(s) from {}",
            host.document.tables.len(),
            path.display()
        );
        Ok(host)
    }

    /// Parses a document from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(JsonHost::new(serde_json::from_str(text)?))
    }

    /// Replaces the stored selection.
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.document.selection = selection;
        self
    }

    pub fn document(&self) -> &HostDocument {
        &self.document
    }

    fn table(&self, table_id: &str) -> Result<&TableDocument> {
        self.document
            .tables
            .iter()
            .find(|table| table.id == table_id)
            .ok_or_else(|| HostError::TableNotFound(table_id.to_string()))
    }

    fn view<'a>(&self, table: &'a TableDocument, view_id: &str) -> Result<&'a ViewDocument> {
        table
            .views
            .iter()
            .find(|view| view.meta.id == view_id)
            .ok_or_else(|| HostError::ViewNotFound {
                table: table.id.clone(),
                view: view_id.to_string(),
            })
    }
}

#[async_trait]
impl TableHost for JsonHost {
    async fn selection(&self) -> Result<Selection> {
        Ok(self.document.selection.clone())
    }

    async fn views(&self, table_id: &str) -> Result<Vec<ViewMeta>> {
        let table = self.table(table_id)?;
        Ok(table.views.iter().map(|view| view.meta.clone()).collect())
    }

    async fn visible_record_ids(&self, table_id: &str, view_id: &str) -> Result<Vec<String>> {
        let table = self.table(table_id)?;
        let view = self.view(table, view_id)?;
        Ok(match &view.visible_records {
            Some(ids) => ids.clone(),
            None => table.records.iter().map(|record| record.id.clone()).collect(),
        })
    }

    async fn view_fields(&self, table_id: &str, view_id: &str) -> Result<Vec<Field>> {
        let table = self.table(table_id)?;
        let view = self.view(table, view_id)?;
        Ok(match &view.visible_fields {
            Some(ids) => ids
                .iter()
                .filter_map(|id| gridscope_seeker::by_id(&table.fields, id).cloned())
                .collect(),
            None => table.fields.clone(),
        })
    }

    async fn table_fields(&self, table_id: &str) -> Result<Vec<Field>> {
        Ok(self.table(table_id)?.fields.clone())
    }

    async fn has_record(&self, table_id: &str, record_id: &str) -> Result<bool> {
        let table = self.table(table_id)?;
        Ok(table.records.iter().any(|record| record.id == record_id))
    }

    async fn cell_value(&self, table_id: &str, field_id: &str, record_id: &str) -> Result<Json> {
        let table = self.table(table_id)?;
        if gridscope_seeker::by_id(&table.fields, field_id).is_none() {
            return Err(HostError::FieldNotFound {
                table: table_id.to_string(),
                field: field_id.to_string(),
            });
        }
        let record = table
            .records
            .iter()
            .find(|record| record.id == record_id)
            .ok_or_else(|| HostError::RecordNotFound {
                table: table_id.to_string(),
                record: record_id.to_string(),
            })?;
        Ok(record.values.get(field_id).cloned().unwrap_or(Json::Null))
    }
}
