//! Typed filter predicates, one per field kind.
//!
//! Every predicate rejects an empty cell and accepts an operator it does
//! not know. Operands the predicate cannot interpret count as "not
//! configured yet" and accept.

use crate::cell::{CellValue, ReferenceIds};
use crate::condition::{FilterValue, IdOperand};
use crate::locale::Locale;
use crate::normalize;
use crate::op::Op;

/// Case-insensitive text comparison (`eq neq contains not_contains`).
pub(crate) fn text(cell: &CellValue, op: Op, operand: &FilterValue, locale: &Locale) -> bool {
    if cell.is_empty() {
        return false;
    }
    let stored = normalize::generic(cell, locale).to_lowercase();
    let needle = operand.as_text().unwrap_or_default().to_lowercase();

    match op {
        Op::Eq => stored == needle,
        Op::Neq => stored != needle,
        Op::Contains => stored.contains(&needle),
        Op::NotContains => !stored.contains(&needle),
        _ => true,
    }
}

/// Numeric comparison (`eq neq gt lt gte lte`).
pub(crate) fn number(cell: &CellValue, op: Op, operand: &FilterValue, _locale: &Locale) -> bool {
    let Some(stored) = cell.as_number() else {
        return false;
    };
    let Some(target) = operand.as_number() else {
        return true;
    };

    match op {
        Op::Eq | Op::Neq | Op::Gt | Op::Lt | Op::Gte | Op::Lte => stored
            .partial_cmp(&target)
            .map(|ordering| op.eval_ordering(ordering))
            .unwrap_or(false),
        _ => true,
    }
}

/// Date comparison.
///
/// `eq`/`neq` compare calendar days in the locale's zone, ignoring the time
/// of day. `after`/`before` compare raw epoch milliseconds.
pub(crate) fn date(cell: &CellValue, op: Op, operand: &FilterValue, locale: &Locale) -> bool {
    let stored = match cell {
        CellValue::Timestamp(ms) => *ms,
        other => match other.as_number() {
            Some(n) if n.is_finite() => n as i64,
            _ => return false,
        },
    };
    let target = match operand.as_number() {
        Some(n) if n.is_finite() => n as i64,
        _ => return true,
    };

    let same_day = || match (locale.calendar_day(stored), locale.calendar_day(target)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    };

    match op {
        Op::Eq => same_day(),
        Op::Neq => !same_day(),
        Op::After => stored > target,
        Op::Before => stored < target,
        _ => true,
    }
}

/// Checkbox comparison (`eq`).
pub(crate) fn checkbox(cell: &CellValue, op: Op, operand: &FilterValue, _locale: &Locale) -> bool {
    if cell.is_empty() {
        return false;
    }
    let Some(target) = operand.as_bool() else {
        return true;
    };

    match op {
        Op::Eq => cell.is_truthy() == target,
        _ => true,
    }
}

/// Choice and user comparison (`eq neq`), keyed by id.
///
/// A single stored object matches `eq` when the operand names its id
/// (membership for a set, equality for a scalar). A stored list matches
/// `eq` when it contains **every** id of the operand set. `neq` is the
/// negation of `eq` in both cases, so for lists it means "not all of",
/// not "none of".
pub(crate) fn reference(cell: &CellValue, op: Op, operand: &FilterValue, _locale: &Locale) -> bool {
    let Some(stored) = cell.reference_ids() else {
        return false;
    };
    let Some(wanted) = operand.ids() else {
        return true;
    };

    let equal = match (&stored, &wanted) {
        (ReferenceIds::Single(None), _) => return false,
        (ReferenceIds::Single(Some(id)), IdOperand::Many(set)) => set.iter().any(|s| s == id),
        (ReferenceIds::Single(Some(id)), IdOperand::One(one)) => one == id,
        (ReferenceIds::Many(ids), IdOperand::Many(set)) => {
            set.iter().all(|s| ids.contains(&s.as_str()))
        }
        (ReferenceIds::Many(ids), IdOperand::One(one)) => ids.contains(&one.as_str()),
    };

    match op {
        Op::Eq => equal,
        Op::Neq => !equal,
        _ => true,
    }
}

/// Field kinds without predicates accept everything.
pub(crate) fn accept(_cell: &CellValue, _op: Op, _operand: &FilterValue, _locale: &Locale) -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::{Choice, UserRef};
    use crate::locale::Zone;

    fn utc() -> Locale {
        Locale::default().with_zone(Zone::utc())
    }

    #[test]
    fn text_ops_ignore_case() {
        let locale = utc();
        let cell = CellValue::Text("Hello World".into());
        assert!(text(&cell, Op::Eq, &"hello world".into(), &locale));
        assert!(!text(&cell, Op::Neq, &"HELLO WORLD".into(), &locale));
        assert!(text(&cell, Op::Contains, &"WORLD".into(), &locale));
        assert!(text(&cell, Op::NotContains, &"moon".into(), &locale));
        assert!(text(&cell, Op::Gt, &"x".into(), &locale));
        assert!(!text(&CellValue::Empty, Op::Neq, &"x".into(), &locale));
    }

    #[test]
    fn number_ops() {
        let locale = utc();
        let cell = CellValue::Number(10.0);
        assert!(number(&cell, Op::Eq, &10i64.into(), &locale));
        assert!(number(&cell, Op::Neq, &11i64.into(), &locale));
        assert!(number(&cell, Op::Gt, &9i64.into(), &locale));
        assert!(!number(&cell, Op::Lt, &10i64.into(), &locale));
        assert!(number(&cell, Op::Gte, &10i64.into(), &locale));
        assert!(number(&cell, Op::Lte, &10i64.into(), &locale));
        assert!(number(&cell, Op::Eq, &"10".into(), &locale));
    }

    #[test]
    fn non_numeric_stored_value_fails() {
        let locale = utc();
        assert!(!number(&CellValue::Text("n/a".into()), Op::Neq, &1i64.into(), &locale));
        assert!(!number(&CellValue::Empty, Op::Neq, &1i64.into(), &locale));
        assert!(number(&CellValue::Text("12".into()), Op::Gt, &1i64.into(), &locale));
        assert!(!number(&CellValue::Text("inf".into()), Op::Gt, &5i64.into(), &locale));
        assert!(!number(&CellValue::Text("+inf".into()), Op::Gt, &5i64.into(), &locale));
        assert!(number(&CellValue::Text("Infinity".into()), Op::Gt, &5i64.into(), &locale));
    }

    #[test]
    fn unusable_number_operand_accepts() {
        let locale = utc();
        assert!(number(&CellValue::Number(1.0), Op::Eq, &"abc".into(), &locale));
    }

    #[test]
    fn date_eq_ignores_time_of_day() {
        let locale = utc();
        // 2024-01-29 03:46:40 and 2024-01-29 20:00:00 UTC
        let morning: i64 = 1_706_500_000_000;
        let evening: i64 = 1_706_558_400_000;
        let cell = CellValue::Timestamp(morning);

        assert!(date(&cell, Op::Eq, &(evening as f64).into(), &locale));
        assert!(!date(&cell, Op::Neq, &(evening as f64).into(), &locale));
        assert!(date(&cell, Op::Before, &(evening as f64).into(), &locale));
        assert!(!date(&cell, Op::After, &(evening as f64).into(), &locale));
    }

    #[test]
    fn date_eq_follows_zone() {
        // 2024-01-29 23:30 UTC vs 2024-01-30 01:00 UTC
        let late: i64 = 1_706_571_000_000;
        let next: i64 = 1_706_576_400_000;
        let cell = CellValue::Timestamp(late);
        let operand = FilterValue::Number(next as f64);

        assert!(!date(&cell, Op::Eq, &operand, &utc()));
        let tokyo = Locale::default().with_zone(Zone::east_hours(9).unwrap());
        assert!(date(&cell, Op::Eq, &operand, &tokyo));
    }

    #[test]
    fn date_rejects_non_numeric_cells() {
        let locale = utc();
        assert!(!date(&CellValue::Text("soon".into()), Op::Neq, &0i64.into(), &locale));
        assert!(!date(&CellValue::Empty, Op::Before, &0i64.into(), &locale));
    }

    #[test]
    fn checkbox_eq() {
        let locale = utc();
        assert!(checkbox(&CellValue::Checkbox(true), Op::Eq, &true.into(), &locale));
        assert!(!checkbox(&CellValue::Checkbox(false), Op::Eq, &true.into(), &locale));
        assert!(checkbox(&CellValue::Checkbox(false), Op::Eq, &false.into(), &locale));
        assert!(!checkbox(&CellValue::Empty, Op::Eq, &false.into(), &locale));
        assert!(checkbox(&CellValue::Checkbox(false), Op::Neq, &true.into(), &locale));
    }

    #[test]
    fn single_choice_membership() {
        let locale = utc();
        let cell = CellValue::Choice(Choice::new("a", "A"));
        assert!(reference(&cell, Op::Eq, &"a".into(), &locale));
        assert!(reference(&cell, Op::Eq, &vec!["b", "a"].into(), &locale));
        assert!(!reference(&cell, Op::Eq, &vec!["b"].into(), &locale));
        assert!(reference(&cell, Op::Neq, &vec!["b"].into(), &locale));
        assert!(!reference(&cell, Op::Neq, &"a".into(), &locale));
    }

    #[test]
    fn choice_without_id_never_matches() {
        let locale = utc();
        let cell = CellValue::Choice(Choice {
            name: Some("loose".into()),
            ..Choice::default()
        });
        assert!(!reference(&cell, Op::Eq, &"loose".into(), &locale));
        assert!(!reference(&cell, Op::Neq, &"x".into(), &locale));
    }

    #[test]
    fn multi_choice_all_of() {
        let locale = utc();
        let cell = CellValue::Choices(vec![
            Choice::new("A", "a"),
            Choice::new("B", "b"),
            Choice::new("C", "c"),
        ]);
        assert!(reference(&cell, Op::Eq, &vec!["A", "B"].into(), &locale));
        assert!(!reference(&cell, Op::Eq, &vec!["A", "D"].into(), &locale));
        assert!(reference(&cell, Op::Eq, &"C".into(), &locale));
    }

    #[test]
    fn multi_choice_neq_is_negated_all_of() {
        let locale = utc();
        let cell = CellValue::Choices(vec![Choice::new("A", "a"), Choice::new("B", "b")]);
        // Shares "A" with the operand, yet passes: only "all of" is negated.
        assert!(reference(&cell, Op::Neq, &vec!["A", "D"].into(), &locale));
        assert!(!reference(&cell, Op::Neq, &vec!["A", "B"].into(), &locale));
    }

    #[test]
    fn users_follow_choice_semantics() {
        let locale = utc();
        let one = CellValue::User(UserRef::new("ou_1", "Aiko"));
        assert!(reference(&one, Op::Eq, &"ou_1".into(), &locale));

        let many = CellValue::Users(vec![UserRef::new("ou_1", "Aiko"), UserRef::new("ou_2", "Ben")]);
        assert!(reference(&many, Op::Eq, &vec!["ou_2", "ou_1"].into(), &locale));
        assert!(!reference(&many, Op::Eq, &vec!["ou_3"].into(), &locale));
    }

    #[test]
    fn reference_rejects_scalars_and_empty() {
        let locale = utc();
        assert!(!reference(&CellValue::Text("a".into()), Op::Eq, &"a".into(), &locale));
        assert!(!reference(&CellValue::Empty, Op::Neq, &"a".into(), &locale));
    }
}
