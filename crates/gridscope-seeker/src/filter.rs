//! Condition filtering.

use crate::condition::FilterCondition;
use crate::field::Field;
use crate::locale::Locale;
use crate::record::Record;

/// Filters records with the default locale.
pub fn filter<'a, I>(records: I, conditions: &[FilterCondition], fields: &[Field]) -> Vec<&'a Record>
where
    I: IntoIterator<Item = &'a Record>,
{
    filter_with(records, conditions, fields, &Locale::default())
}

/// Keeps the records that satisfy **all** conditions, in input order.
///
/// No conditions keeps everything. Each condition is fail-open, see
/// [`FilterCondition::matches`].
pub fn filter_with<'a, I>(
    records: I,
    conditions: &[FilterCondition],
    fields: &[Field],
    locale: &Locale,
) -> Vec<&'a Record>
where
    I: IntoIterator<Item = &'a Record>,
{
    if conditions.is_empty() {
        return records.into_iter().collect();
    }

    let mut scanned = 0usize;
    let kept: Vec<&'a Record> = records
        .into_iter()
        .inspect(|_| scanned += 1)
        .filter(|record| {
            conditions
                .iter()
                .all(|condition| condition.matches(record, fields, locale))
        })
        .collect();

    log::debug!(
        "filter ({} conditions): {} of {} records kept",
        conditions.len(),
        kept.len(),
        scanned
    );
    kept
}
