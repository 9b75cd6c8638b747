//! The per-kind capability table.
//!
//! Normalization, the operator list a filter panel offers, and predicate
//! evaluation all vary by field kind. Each kind owns one static
//! [`Capability`] entry bundling the three, so call sites dispatch through
//! [`FieldKind::capability`] instead of branching on the type themselves.

use crate::cell::CellValue;
use crate::condition::FilterValue;
use crate::field::{FieldKind, FieldType};
use crate::locale::Locale;
use crate::normalize;
use crate::op::Op;
use crate::predicate;

type NormalizeFn = fn(&CellValue, &Locale) -> String;
type EvaluateFn = fn(&CellValue, Op, &FilterValue, &Locale) -> bool;

/// Normalizer, operator set and evaluator of one field kind.
#[derive(Debug)]
pub struct Capability {
    kind: FieldKind,
    operators: &'static [Op],
    normalize: NormalizeFn,
    evaluate: EvaluateFn,
}

impl Capability {
    /// The kind this entry serves.
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Operators offered for this kind, first one is the panel default.
    pub fn operators(&self) -> &'static [Op] {
        self.operators
    }

    /// Returns `true` if `op` is offered for this kind.
    pub fn supports(&self, op: Op) -> bool {
        self.operators.contains(&op)
    }

    /// Renders a non-empty, non-text value.
    pub fn normalize(&self, value: &CellValue, locale: &Locale) -> String {
        (self.normalize)(value, locale)
    }

    /// Evaluates a resolved operator against a stored value.
    ///
    /// Operators outside [`Capability::operators`] are accepted.
    pub fn evaluate(&self, cell: &CellValue, op: Op, operand: &FilterValue, locale: &Locale) -> bool {
        if !self.supports(op) {
            return true;
        }
        (self.evaluate)(cell, op, operand, locale)
    }
}

const TEXT_OPS: &[Op] = &[Op::Eq, Op::Neq, Op::Contains, Op::NotContains];
const NUMBER_OPS: &[Op] = &[Op::Eq, Op::Neq, Op::Gte, Op::Lte, Op::Gt, Op::Lt];
const DATE_OPS: &[Op] = &[Op::Eq, Op::Neq, Op::After, Op::Before];
const CHECKBOX_OPS: &[Op] = &[Op::Eq];
const REFERENCE_OPS: &[Op] = &[Op::Eq, Op::Neq];

static TEXT: Capability = Capability {
    kind: FieldKind::Text,
    operators: TEXT_OPS,
    normalize: normalize::generic,
    evaluate: predicate::text,
};

static NUMBER: Capability = Capability {
    kind: FieldKind::Number,
    operators: NUMBER_OPS,
    normalize: normalize::generic,
    evaluate: predicate::number,
};

static DATE_TIME: Capability = Capability {
    kind: FieldKind::DateTime,
    operators: DATE_OPS,
    normalize: normalize::timestamp,
    evaluate: predicate::date,
};

static CHECKBOX: Capability = Capability {
    kind: FieldKind::Checkbox,
    operators: CHECKBOX_OPS,
    normalize: normalize::checkbox,
    evaluate: predicate::checkbox,
};

static SINGLE_SELECT: Capability = Capability {
    kind: FieldKind::SingleSelect,
    operators: REFERENCE_OPS,
    normalize: normalize::single_select,
    evaluate: predicate::reference,
};

static MULTI_SELECT: Capability = Capability {
    kind: FieldKind::MultiSelect,
    operators: REFERENCE_OPS,
    normalize: normalize::multi_select,
    evaluate: predicate::reference,
};

static USER: Capability = Capability {
    kind: FieldKind::User,
    operators: REFERENCE_OPS,
    normalize: normalize::user,
    evaluate: predicate::reference,
};

static OTHER: Capability = Capability {
    kind: FieldKind::Other,
    operators: REFERENCE_OPS,
    normalize: normalize::generic,
    evaluate: predicate::accept,
};

impl FieldKind {
    /// The capability entry for this kind.
    pub fn capability(self) -> &'static Capability {
        match self {
            FieldKind::Text => &TEXT,
            FieldKind::Number => &NUMBER,
            FieldKind::DateTime => &DATE_TIME,
            FieldKind::Checkbox => &CHECKBOX,
            FieldKind::SingleSelect => &SINGLE_SELECT,
            FieldKind::MultiSelect => &MULTI_SELECT,
            FieldKind::User => &USER,
            FieldKind::Other => &OTHER,
        }
    }
}

/// Operators a filter panel offers for `field_type`.
///
/// ```
/// use gridscope_seeker::{operators_for, FieldType, Op};
///
/// assert_eq!(operators_for(FieldType::Checkbox), &[Op::Eq]);
/// assert!(operators_for(FieldType::Url).contains(&Op::Contains));
/// ```
pub fn operators_for(field_type: FieldType) -> &'static [Op] {
    field_type.kind().capability().operators()
}
