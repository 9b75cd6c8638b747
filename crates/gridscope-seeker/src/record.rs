//! Table rows.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::cell::CellValue;

static EMPTY: CellValue = CellValue::Empty;

/// One table row: cell values keyed by field id.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Record {
    pub id: String,
    pub values: BTreeMap<String, CellValue>,
}

impl Record {
    /// Creates a record with no values.
    pub fn new(id: impl Into<String>) -> Self {
        Record {
            id: id.into(),
            values: BTreeMap::new(),
        }
    }

    /// Sets a value, builder style.
    pub fn with(mut self, field_id: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.values.insert(field_id.into(), value.into());
        self
    }

    /// Returns the value for `field_id`, [`CellValue::Empty`] if absent.
    pub fn value(&self, field_id: &str) -> &CellValue {
        self.values.get(field_id).unwrap_or(&EMPTY)
    }

    /// Field ids of `other` whose value differs from this record's.
    ///
    /// Only keys present in `other` are compared; a key missing here counts
    /// as [`CellValue::Empty`].
    pub fn changed_fields(&self, other: &Record) -> Vec<String> {
        other
            .values
            .iter()
            .filter(|(field_id, value)| self.value(field_id) != *value)
            .map(|(field_id, _)| field_id.clone())
            .collect()
    }
}
