//! The table host interface.
//!
//! A host is the spreadsheet-like application that owns the tables. Every
//! call is asynchronous and may fail; failures carry host-defined detail in
//! [`HostError`](crate::HostError).

use async_trait::async_trait;
use gridscope_seeker::Field;
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

use crate::error::Result;

/// What the user currently has selected. Any part may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    #[serde(default)]
    pub table_id: Option<String>,
    #[serde(default)]
    pub view_id: Option<String>,
    #[serde(default)]
    pub record_id: Option<String>,
}

/// View layout kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewType {
    Grid,
    Kanban,
    Form,
    Gallery,
    Gantt,
    #[serde(other)]
    Other,
}

/// View metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewMeta {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub view_type: ViewType,
}

/// Access to the host's tables.
///
/// Cell values come back as raw host JSON; decoding into
/// [`CellValue`](gridscope_seeker::CellValue) needs the field type and
/// happens in [`fetch_snapshot`](crate::fetch_snapshot).
#[async_trait]
pub trait TableHost: Send + Sync {
    /// The current selection.
    async fn selection(&self) -> Result<Selection>;

    /// Views of a table, in host order.
    async fn views(&self, table_id: &str) -> Result<Vec<ViewMeta>>;

    /// Ids of the records a view shows, in display order.
    async fn visible_record_ids(&self, table_id: &str, view_id: &str) -> Result<Vec<String>>;

    /// Fields a view shows, in display order.
    async fn view_fields(&self, table_id: &str, view_id: &str) -> Result<Vec<Field>>;

    /// Every field of a table.
    async fn table_fields(&self, table_id: &str) -> Result<Vec<Field>>;

    /// Whether a table holds the record.
    async fn has_record(&self, table_id: &str, record_id: &str) -> Result<bool>;

    /// Raw value of one cell; `null` when unset.
    async fn cell_value(&self, table_id: &str, field_id: &str, record_id: &str) -> Result<Json>;
}
