//! Filter conditions.
//!
//! A [`FilterCondition`] is one row of a filter panel: a field id, an
//! operator name and an operand. Rows are built and edited transiently by
//! the UI and may be incomplete, so nothing is validated at construction.
//! Evaluation is fail-open: an unknown field, an unknown operator or a
//! missing operand never excludes a record. [`FilterCondition::validate`]
//! offers the strict view for flagging incomplete rows.

use serde::{Deserialize, Serialize};

use crate::capability::operators_for;
use crate::cell::{format_number, parse_number};
use crate::error::{Result, SeekerError};
use crate::field::{self, Field, FieldKind};
use crate::locale::Locale;
use crate::op::Op;
use crate::record::Record;

/// Comparison operand of a condition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// No operand chosen yet.
    #[default]
    Null,
    /// Boolean operand (checkbox fields).
    Bool(bool),
    /// Numeric operand; dates are epoch milliseconds.
    Number(f64),
    /// Text operand, or a single choice/user id.
    Text(String),
    /// A set of choice or user ids.
    List(Vec<String>),
}

/// Choice or user ids named by an operand.
#[derive(Debug, Clone, PartialEq)]
pub enum IdOperand<'a> {
    /// A single id.
    One(String),
    /// A set of ids.
    Many(&'a [String]),
}

impl FilterValue {
    /// Returns `true` if no operand is set.
    pub fn is_null(&self) -> bool {
        matches!(self, FilterValue::Null)
    }

    /// The operand as text. Lists join with commas.
    pub fn as_text(&self) -> Option<String> {
        match self {
            FilterValue::Null => None,
            FilterValue::Bool(b) => Some(b.to_string()),
            FilterValue::Number(n) => Some(format_number(*n)),
            FilterValue::Text(s) => Some(s.clone()),
            FilterValue::List(ids) => Some(ids.join(",")),
        }
    }

    /// The operand as a number; text is parsed after trimming.
    pub fn as_number(&self) -> Option<f64> {
        let n = match self {
            FilterValue::Number(n) => *n,
            FilterValue::Bool(b) => f64::from(u8::from(*b)),
            FilterValue::Text(s) => parse_number(s)?,
            _ => return None,
        };
        (!n.is_nan()).then_some(n)
    }

    /// The operand as a boolean. Only boolean operands qualify.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FilterValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The operand as choice/user ids.
    pub fn ids(&self) -> Option<IdOperand<'_>> {
        match self {
            FilterValue::Null => None,
            FilterValue::List(ids) => Some(IdOperand::Many(ids)),
            scalar => scalar.as_text().map(IdOperand::One),
        }
    }
}

impl From<bool> for FilterValue {
    fn from(b: bool) -> Self {
        FilterValue::Bool(b)
    }
}

impl From<f64> for FilterValue {
    fn from(n: f64) -> Self {
        FilterValue::Number(n)
    }
}

impl From<i64> for FilterValue {
    fn from(n: i64) -> Self {
        FilterValue::Number(n as f64)
    }
}

impl From<i32> for FilterValue {
    fn from(n: i32) -> Self {
        FilterValue::Number(f64::from(n))
    }
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        FilterValue::Text(s.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        FilterValue::Text(s)
    }
}

impl<S: Into<String>> From<Vec<S>> for FilterValue {
    fn from(ids: Vec<S>) -> Self {
        FilterValue::List(ids.into_iter().map(Into::into).collect())
    }
}

/// A single filter predicate: field, operator, operand.
///
/// # Example
///
/// ```
/// use gridscope_seeker::{FilterCondition, Op};
///
/// let condition = FilterCondition::new("fld_score", Op::Gte, 15i64);
/// assert_eq!(condition.op(), Some(Op::Gte));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCondition {
    /// Id of the field the condition applies to.
    pub field_id: String,
    /// Operator name as chosen in the panel.
    pub operator: String,
    /// Comparison operand.
    #[serde(default)]
    pub value: FilterValue,
}

impl FilterCondition {
    /// Creates a condition with a known operator.
    pub fn new(field_id: impl Into<String>, op: Op, value: impl Into<FilterValue>) -> Self {
        FilterCondition {
            field_id: field_id.into(),
            operator: op.as_str().to_string(),
            value: value.into(),
        }
    }

    /// Creates a condition from a raw operator name.
    pub fn raw(
        field_id: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<FilterValue>,
    ) -> Self {
        FilterCondition {
            field_id: field_id.into(),
            operator: operator.into(),
            value: value.into(),
        }
    }

    /// A fresh panel row for `field`: its first operator and a default operand.
    pub fn for_field(field: &Field) -> Self {
        let value = match field.kind() {
            FieldKind::Checkbox => FilterValue::Bool(false),
            FieldKind::Number => FilterValue::Number(0.0),
            FieldKind::Text => FilterValue::Text(String::new()),
            _ => FilterValue::Null,
        };
        FilterCondition {
            field_id: field.id.clone(),
            operator: first_operator(field).to_string(),
            value,
        }
    }

    /// Points the row at another field, resetting operator and operand.
    pub fn retarget(&mut self, field: &Field) {
        self.field_id = field.id.clone();
        self.operator = first_operator(field).to_string();
        self.value = FilterValue::Null;
    }

    /// Resolves the operator name.
    pub fn op(&self) -> Option<Op> {
        Op::parse(&self.operator)
    }

    /// Tests one record, fail-open.
    ///
    /// Returns `true` when the field is unknown, the operand is null or the
    /// operator is unknown; otherwise dispatches to the field kind's
    /// predicate.
    pub fn matches(&self, record: &Record, fields: &[Field], locale: &Locale) -> bool {
        let Some(field) = field::by_id(fields, &self.field_id) else {
            return true;
        };
        if self.value.is_null() {
            return true;
        }
        let Some(op) = self.op() else {
            return true;
        };
        field
            .kind()
            .capability()
            .evaluate(record.value(&field.id), op, &self.value, locale)
    }

    /// Strict check of a panel row against the field list.
    pub fn validate(&self, fields: &[Field]) -> Result<()> {
        let field = field::by_id(fields, &self.field_id)
            .ok_or_else(|| SeekerError::UnknownField(self.field_id.clone()))?;
        let op: Op = self.operator.parse()?;
        if !operators_for(field.field_type).contains(&op) {
            return Err(SeekerError::InvalidOperatorForType {
                op: op.to_string(),
                field_type: field.field_type.to_string(),
            });
        }
        if self.value.is_null() {
            return Err(SeekerError::MissingValue(self.field_id.clone()));
        }
        Ok(())
    }
}

fn first_operator(field: &Field) -> &'static str {
    operators_for(field.field_type)
        .first()
        .map(|op| op.as_str())
        .unwrap_or("eq")
}
