//! Error types for the seeker crate.
//!
//! Evaluation never fails: search, filter and the pipeline always return a
//! value. These errors come from the strict helpers a filter panel uses to
//! flag partially configured rows.

use thiserror::Error;

/// Errors reported by parsing and validation helpers.
#[derive(Debug, Error, PartialEq)]
pub enum SeekerError {
    /// Operator name is not one of the known operators.
    #[error("unknown operator '{0}'")]
    UnknownOperator(String),

    /// Field type name or code is not recognized.
    #[error("unknown field type '{0}'")]
    UnknownFieldType(String),

    /// Condition references a field id missing from the field list.
    #[error("no field with id '{0}'")]
    UnknownField(String),

    /// Operator is not offered for the referenced field's type.
    #[error("operator '{op}' is not valid for {field_type} fields")]
    InvalidOperatorForType { op: String, field_type: String },

    /// Condition has no comparison operand yet.
    #[error("condition on field '{0}' has no value")]
    MissingValue(String),
}

/// Result type for seeker operations.
pub type Result<T> = std::result::Result<T, SeekerError>;
