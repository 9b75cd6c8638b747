//! Filter operators.
//!
//! The [`Op`] enum lists every operator a filter condition may name. Each
//! field kind accepts a subset, published through the capability table.
//! Conditions keep the operator as the raw string the filter panel sent;
//! [`Op::parse`] resolves it at evaluation time.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SeekerError};

/// Comparison operator for a filter condition.
///
/// Operators are grouped by the kinds that accept them:
/// - **Universal**: `Eq`, `Neq`
/// - **Text**: `Contains`, `NotContains`
/// - **Number**: `Gt`, `Lt`, `Gte`, `Lte`
/// - **Date**: `After`, `Before`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// Equal.
    Eq,
    /// Not equal.
    Neq,
    /// Text contains substring.
    Contains,
    /// Text does not contain substring.
    NotContains,
    /// Greater than.
    Gt,
    /// Less than.
    Lt,
    /// Greater than or equal.
    Gte,
    /// Less than or equal.
    Lte,
    /// Later than (raw epoch ordering).
    After,
    /// Earlier than (raw epoch ordering).
    Before,
}

impl Op {
    /// All operators, in panel order.
    pub const ALL: [Op; 10] = [
        Op::Eq,
        Op::Neq,
        Op::Contains,
        Op::NotContains,
        Op::Gte,
        Op::Lte,
        Op::Gt,
        Op::Lt,
        Op::After,
        Op::Before,
    ];

    /// Resolves an operator name, `None` if unknown.
    pub fn parse(name: &str) -> Option<Op> {
        Op::ALL.into_iter().find(|op| op.as_str() == name)
    }

    /// Evaluates an ordering-based operator.
    ///
    /// `After` and `Before` read as `Gt` and `Lt`. Text operators never hold.
    pub fn eval_ordering(self, ordering: Ordering) -> bool {
        match self {
            Op::Eq => ordering == Ordering::Equal,
            Op::Neq => ordering != Ordering::Equal,
            Op::Gt | Op::After => ordering == Ordering::Greater,
            Op::Gte => ordering != Ordering::Less,
            Op::Lt | Op::Before => ordering == Ordering::Less,
            Op::Lte => ordering != Ordering::Greater,
            Op::Contains | Op::NotContains => false,
        }
    }

    /// Returns the wire name of this operator.
    pub fn as_str(self) -> &'static str {
        match self {
            Op::Eq => "eq",
            Op::Neq => "neq",
            Op::Contains => "contains",
            Op::NotContains => "not_contains",
            Op::Gt => "gt",
            Op::Lt => "lt",
            Op::Gte => "gte",
            Op::Lte => "lte",
            Op::After => "after",
            Op::Before => "before",
        }
    }

    /// Human-readable label for filter panels.
    pub fn label(self) -> &'static str {
        match self {
            Op::Eq => "equals",
            Op::Neq => "does not equal",
            Op::Contains => "contains",
            Op::NotContains => "does not contain",
            Op::Gt => "greater than",
            Op::Lt => "less than",
            Op::Gte => "at least",
            Op::Lte => "at most",
            Op::After => "after",
            Op::Before => "before",
        }
    }
}

impl FromStr for Op {
    type Err = SeekerError;

    fn from_str(s: &str) -> Result<Self> {
        Op::parse(s).ok_or_else(|| SeekerError::UnknownOperator(s.to_string()))
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_and_unknown() {
        assert_eq!(Op::parse("not_contains"), Some(Op::NotContains));
        assert_eq!(Op::parse("gte"), Some(Op::Gte));
        assert_eq!(Op::parse("ne"), None);
        assert_eq!(Op::parse("EQ"), None);
        assert_eq!(
            "between".parse::<Op>(),
            Err(SeekerError::UnknownOperator("between".into()))
        );
    }

    #[test]
    fn names_round_trip() {
        for op in Op::ALL {
            assert_eq!(Op::parse(op.as_str()), Some(op));
            assert_eq!(op.to_string(), op.as_str());
        }
    }

    #[test]
    fn op_eval_ordering() {
        assert!(Op::Eq.eval_ordering(Ordering::Equal));
        assert!(!Op::Eq.eval_ordering(Ordering::Less));

        assert!(Op::Neq.eval_ordering(Ordering::Greater));
        assert!(!Op::Neq.eval_ordering(Ordering::Equal));

        assert!(Op::Gt.eval_ordering(Ordering::Greater));
        assert!(!Op::Gt.eval_ordering(Ordering::Equal));

        assert!(Op::Gte.eval_ordering(Ordering::Equal));
        assert!(!Op::Gte.eval_ordering(Ordering::Less));

        assert!(Op::Lt.eval_ordering(Ordering::Less));
        assert!(Op::Lte.eval_ordering(Ordering::Equal));
        assert!(!Op::Lte.eval_ordering(Ordering::Greater));

        // Date aliases
        assert!(Op::After.eval_ordering(Ordering::Greater));
        assert!(Op::Before.eval_ordering(Ordering::Less));
        assert!(!Op::Before.eval_ordering(Ordering::Equal));

        // Text operators are not ordering-based
        assert!(!Op::Contains.eval_ordering(Ordering::Equal));
    }
}
