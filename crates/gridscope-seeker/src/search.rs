//! Free-text search over normalized cell values.
//!
//! Matching is plain case-insensitive substring containment against the
//! normalized string of every field. No tokenizing, no regex, no ranking:
//! the output is the matching subsequence of the input.

use crate::field::Field;
use crate::locale::Locale;
use crate::normalize::normalize_with;
use crate::record::Record;

/// Searches records with the default locale.
///
/// ```
/// use gridscope_seeker::{search, Field, FieldType, Record};
///
/// let fields = vec![Field::new("name", "Name", FieldType::Text)];
/// let records = vec![
///     Record::new("r1").with("name", "Tōkyō"),
///     Record::new("r2").with("name", "Osaka"),
/// ];
///
/// let hits = search(&records, "TŌKYŌ", &fields);
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].id, "r1");
/// ```
pub fn search<'a, I>(records: I, query: &str, fields: &[Field]) -> Vec<&'a Record>
where
    I: IntoIterator<Item = &'a Record>,
{
    search_with(records, query, fields, &Locale::default())
}

/// Searches records, rendering cells with `locale`.
///
/// A blank query returns every record. Otherwise a record matches when
/// any field's normalized value contains the trimmed, lowercased query.
pub fn search_with<'a, I>(records: I, query: &str, fields: &[Field], locale: &Locale) -> Vec<&'a Record>
where
    I: IntoIterator<Item = &'a Record>,
{
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return records.into_iter().collect();
    }

    let mut scanned = 0usize;
    let hits: Vec<&'a Record> = records
        .into_iter()
        .inspect(|_| scanned += 1)
        .filter(|record| record_contains(record, &needle, fields, locale))
        .collect();

    log::debug!(
        "search {:?}: {} of {} records match",
        needle,
        hits.len(),
        scanned
    );
    hits
}

/// Returns `true` if any field of `record` contains `needle`.
///
/// `needle` must already be trimmed and lowercased.
pub(crate) fn record_contains(record: &Record, needle: &str, fields: &[Field], locale: &Locale) -> bool {
    fields.iter().any(|field| {
        let value = record.value(&field.id);
        if value.is_empty() {
            return false;
        }
        normalize_with(value, field.field_type, locale)
            .to_lowercase()
            .contains(needle)
    })
}
