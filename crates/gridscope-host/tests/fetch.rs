//! Snapshot fetching against file-backed and failing hosts.

use std::io::Write;

use async_trait::async_trait;
use gridscope_host::{
    fetch_record, fetch_snapshot, ExplorerSession, HostError, JsonHost, Result, Selection,
    TableHost, ViewMeta,
};
use gridscope_seeker::{CellValue, Choice, Field, FilterCondition, Op, Seeker};
use serde_json::{json, Value as Json};

// ============================================================================
// Fixtures
// ============================================================================

fn document() -> Json {
    json!({
        "selection": {"tableId": "tblTasks", "recordId": "rec2"},
        "tables": [{
            "id": "tblTasks",
            "name": "Tasks",
            "views": [
                {"id": "vewForm", "name": "Intake", "type": "form"},
                {"id": "vewGrid", "name": "All", "type": "grid",
                 "visibleFields": ["fldTitle", "fldStatus", "fldScore"]}
            ],
            "fields": [
                {"id": "fldTitle", "name": "Title", "type": 1},
                {"id": "fldStatus", "name": "Status", "type": 3,
                 "property": {"options": [{"id": "optA", "name": "Open"}, {"id": "optB", "name": "Closed"}]}},
                {"id": "fldScore", "name": "Score", "type": 2},
                {"id": "fldNotes", "name": "Notes", "type": 1}
            ],
            "records": [
                {"id": "rec1", "values": {"fldTitle": "Write docs", "fldStatus": {"id": "optA", "text": "Open"}, "fldScore": 3}},
                {"id": "rec2", "values": {"fldTitle": "Fix bug", "fldStatus": {"id": "optB", "text": "Closed"}, "fldNotes": "urgent"}},
                {"id": "rec3", "values": {"fldTitle": "Release", "fldScore": 8}}
            ]
        }]
    })
}

fn write_document(doc: &Json) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{}", doc).unwrap();
    file
}

/// Wraps a [`JsonHost`] and fails every read of one field.
struct FlakyHost {
    inner: JsonHost,
    broken_field: &'static str,
}

#[async_trait]
impl TableHost for FlakyHost {
    async fn selection(&self) -> Result<Selection> {
        self.inner.selection().await
    }

    async fn views(&self, table_id: &str) -> Result<Vec<ViewMeta>> {
        self.inner.views(table_id).await
    }

    async fn visible_record_ids(&self, table_id: &str, view_id: &str) -> Result<Vec<String>> {
        self.inner.visible_record_ids(table_id, view_id).await
    }

    async fn view_fields(&self, table_id: &str, view_id: &str) -> Result<Vec<Field>> {
        self.inner.view_fields(table_id, view_id).await
    }

    async fn table_fields(&self, table_id: &str) -> Result<Vec<Field>> {
        self.inner.table_fields(table_id).await
    }

    async fn has_record(&self, table_id: &str, record_id: &str) -> Result<bool> {
        self.inner.has_record(table_id, record_id).await
    }

    async fn cell_value(&self, table_id: &str, field_id: &str, record_id: &str) -> Result<Json> {
        if field_id == self.broken_field {
            return Err(HostError::host("cell service unavailable"));
        }
        self.inner.cell_value(table_id, field_id, record_id).await
    }
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn fetches_first_grid_view_from_file() {
    let file = write_document(&document());
    let host = JsonHost::from_path(file.path()).unwrap();

    let snapshot = fetch_snapshot(&host).await.unwrap().unwrap();
    assert_eq!(snapshot.table_id, "tblTasks");
    assert_eq!(snapshot.view_id, "vewGrid");
    assert_eq!(snapshot.total, 3);

    let field_ids: Vec<_> = snapshot.fields.iter().map(|f| f.id.as_str()).collect();
    assert_eq!(field_ids, vec!["fldTitle", "fldStatus", "fldScore"]);
    assert_eq!(snapshot.fields[1].options().len(), 2);

    let first = &snapshot.records[0];
    assert_eq!(first.id, "rec1");
    assert_eq!(first.value("fldTitle"), &CellValue::Text("Write docs".into()));
    assert_eq!(
        first.value("fldStatus"),
        &CellValue::Choice(Choice {
            id: Some("optA".into()),
            text: Some("Open".into()),
            ..Choice::default()
        })
    );
    assert_eq!(first.value("fldScore"), &CellValue::Number(3.0));
    assert!(snapshot.records[1].value("fldScore").is_empty());
    assert!(snapshot.records[1].value("fldNotes").is_empty());
}

#[tokio::test]
async fn nothing_selected_or_no_grid_yields_none() {
    let host = JsonHost::new(serde_json::from_value(document()).unwrap())
        .with_selection(Selection::default());
    assert!(fetch_snapshot(&host).await.unwrap().is_none());

    let mut doc = document();
    doc["tables"][0]["views"] = json!([{"id": "vewK", "name": "Board", "type": "kanban"}]);
    let host = JsonHost::new(serde_json::from_value(doc).unwrap());
    assert!(fetch_snapshot(&host).await.unwrap().is_none());
}

#[tokio::test]
async fn structural_failures_propagate() {
    let host = JsonHost::new(serde_json::from_value(document()).unwrap()).with_selection(
        Selection {
            table_id: Some("tblGone".into()),
            ..Selection::default()
        },
    );
    assert!(matches!(
        fetch_snapshot(&host).await,
        Err(HostError::TableNotFound(id)) if id == "tblGone"
    ));
}

#[tokio::test]
async fn failing_cells_are_left_empty() {
    let host = FlakyHost {
        inner: JsonHost::new(serde_json::from_value(document()).unwrap()),
        broken_field: "fldStatus",
    };

    let snapshot = fetch_snapshot(&host).await.unwrap().unwrap();
    assert_eq!(snapshot.records.len(), 3);
    for record in &snapshot.records {
        assert!(record.value("fldStatus").is_empty());
    }
    assert_eq!(snapshot.records[2].value("fldScore"), &CellValue::Number(8.0));
}

#[tokio::test]
async fn fetches_selected_or_requested_record() {
    let host = JsonHost::new(serde_json::from_value(document()).unwrap());

    let selected = fetch_record(&host, None).await.unwrap().unwrap();
    assert_eq!(selected.record.id, "rec2");
    assert_eq!(selected.fields.len(), 4);
    assert_eq!(selected.record.value("fldNotes"), &CellValue::Text("urgent".into()));

    let requested = fetch_record(&host, Some("rec3")).await.unwrap().unwrap();
    assert_eq!(requested.record.value("fldScore"), &CellValue::Number(8.0));

    assert!(matches!(
        fetch_record(&host, Some("rec404")).await,
        Err(HostError::RecordNotFound { .. })
    ));

    let unselected = host.clone().with_selection(Selection {
        table_id: Some("tblTasks".into()),
        ..Selection::default()
    });
    assert!(fetch_record(&unselected, None).await.unwrap().is_none());
}

#[tokio::test]
async fn missing_record_is_an_error_without_fields() {
    let mut doc = document();
    doc["tables"][0]["fields"] = json!([]);
    let host = JsonHost::new(serde_json::from_value(doc).unwrap());

    assert!(matches!(
        fetch_record(&host, Some("rec404")).await,
        Err(HostError::RecordNotFound { record, .. }) if record == "rec404"
    ));
    let found = fetch_record(&host, Some("rec1")).await.unwrap().unwrap();
    assert!(found.fields.is_empty());
    assert!(found.record.values.is_empty());
}

#[tokio::test]
async fn session_over_fetched_snapshot() {
    let host = JsonHost::new(serde_json::from_value(document()).unwrap());
    let snapshot = fetch_snapshot(&host).await.unwrap().unwrap();
    let mut session = ExplorerSession::new(snapshot, Seeker::default());

    session.apply_filters(vec![FilterCondition::new("fldStatus", Op::Neq, "optA")]);
    let ids: Vec<_> = session.results().records.iter().map(|r| r.id.clone()).collect();
    assert_eq!(ids, vec!["rec2"]);

    session.clear_filters();
    session.set_query("D");
    let ids: Vec<_> = session.page().iter().map(|r| r.id.clone()).collect();
    assert_eq!(ids, vec!["rec1", "rec2"]);
}
