//! Filter-then-search pipeline.
//!
//! [`process`] runs the conditions over the full record set first and only
//! then searches the survivors. A search hit never brings back a record an
//! active filter removed, and the count always describes the final set.

use serde::Serialize;

use crate::condition::FilterCondition;
use crate::field::Field;
use crate::filter::filter_with;
use crate::locale::Locale;
use crate::record::Record;
use crate::search::search_with;

/// Records surviving the pipeline, with their count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessResult<'a> {
    pub records: Vec<&'a Record>,
    pub count: usize,
}

impl<'a> ProcessResult<'a> {
    /// Returns `true` if nothing survived.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Clones the surviving records.
    pub fn to_owned_records(&self) -> Vec<Record> {
        self.records.iter().map(|r| (*r).clone()).collect()
    }
}

/// Locale-bound entry point for search, filter and the pipeline.
///
/// The free functions [`crate::search()`], [`crate::filter()`] and [`process`]
/// use the default locale; a `Seeker` carries a configured one.
///
/// # Example
///
/// ```
/// use gridscope_seeker::{Field, FieldType, FilterCondition, Locale, Op, Record, Seeker};
///
/// let fields = vec![
///     Field::new("title", "Title", FieldType::Text),
///     Field::new("score", "Score", FieldType::Number),
/// ];
/// let records = vec![
///     Record::new("r1").with("title", "Alpha").with("score", 10i64),
///     Record::new("r2").with("title", "Beta").with("score", 20i64),
/// ];
///
/// let seeker = Seeker::new(Locale::default());
/// let result = seeker.process(
///     &records,
///     &[FilterCondition::new("score", Op::Gte, 15i64)],
///     "alph",
///     &fields,
/// );
/// assert_eq!(result.count, 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Seeker {
    locale: Locale,
}

impl Seeker {
    /// Creates a seeker rendering cells with `locale`.
    pub fn new(locale: Locale) -> Self {
        Seeker { locale }
    }

    /// The locale cells are rendered with.
    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// See [`crate::search_with`].
    pub fn search<'a, I>(&self, records: I, query: &str, fields: &[Field]) -> Vec<&'a Record>
    where
        I: IntoIterator<Item = &'a Record>,
    {
        search_with(records, query, fields, &self.locale)
    }

    /// See [`crate::filter_with`].
    pub fn filter<'a, I>(
        &self,
        records: I,
        conditions: &[FilterCondition],
        fields: &[Field],
    ) -> Vec<&'a Record>
    where
        I: IntoIterator<Item = &'a Record>,
    {
        filter_with(records, conditions, fields, &self.locale)
    }

    /// Filters, then searches the filtered subset.
    pub fn process<'a, I>(
        &self,
        records: I,
        conditions: &[FilterCondition],
        query: &str,
        fields: &[Field],
    ) -> ProcessResult<'a>
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let filtered = self.filter(records, conditions, fields);
        let records = self.search(filtered, query, fields);
        let count = records.len();
        log::debug!("pipeline: {} records after filter and search", count);
        ProcessResult { records, count }
    }
}

/// Filters, then searches, with the default locale.
pub fn process<'a, I>(
    records: I,
    conditions: &[FilterCondition],
    query: &str,
    fields: &[Field],
) -> ProcessResult<'a>
where
    I: IntoIterator<Item = &'a Record>,
{
    Seeker::default().process(records, conditions, query, fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldType;
    use crate::op::Op;

    fn fields() -> Vec<Field> {
        vec![
            Field::new("title", "Title", FieldType::Text),
            Field::new("score", "Score", FieldType::Number),
        ]
    }

    fn records() -> Vec<Record> {
        vec![
            Record::new("1").with("title", "Alpha").with("score", 10i64),
            Record::new("2").with("title", "Beta").with("score", 20i64),
        ]
    }

    #[test]
    fn search_cannot_resurrect_filtered_records() {
        let records = records();
        let conditions = vec![FilterCondition::new("score", Op::Gte, 15i64)];

        let result = process(&records, &conditions, "alph", &fields());
        assert!(result.is_empty());
        assert_eq!(result.count, 0);
    }

    #[test]
    fn count_reflects_final_set() {
        let records = records();
        let conditions = vec![FilterCondition::new("score", Op::Gte, 15i64)];

        let result = process(&records, &conditions, "a", &fields());
        assert_eq!(result.count, 1);
        assert_eq!(result.records[0].id, "2");
        assert_eq!(result.to_owned_records(), vec![records[1].clone()]);
    }

    #[test]
    fn empty_inputs_pass_everything() {
        let records = records();
        let result = process(&records, &[], "", &fields());
        assert_eq!(result.count, 2);
    }
}
