//! Cell value normalization: typed value → canonical display string.
//!
//! The display string is what search matches against and what a table
//! shows. Per-kind rendering lives in the capability table; this module
//! holds the shared entry point and the per-kind renderers.

use crate::cell::{format_number, json_scalar_string, CellValue, Choice, UserRef};
use crate::field::FieldType;
use crate::locale::Locale;

/// Normalizes a cell value with the default locale.
///
/// ```
/// use gridscope_seeker::{normalize, CellValue, FieldType};
///
/// assert_eq!(normalize(&CellValue::Number(10.0), FieldType::Number), "10");
/// assert_eq!(normalize(&CellValue::Empty, FieldType::Text), "");
/// ```
pub fn normalize(value: &CellValue, field_type: FieldType) -> String {
    normalize_with(value, field_type, &Locale::default())
}

/// Normalizes a cell value.
///
/// Empty values render as `""` and plain text is returned unchanged for
/// every field type; everything else goes through the field kind's
/// renderer.
pub fn normalize_with(value: &CellValue, field_type: FieldType, locale: &Locale) -> String {
    match value {
        CellValue::Empty => String::new(),
        CellValue::Text(s) => s.clone(),
        other => field_type.kind().capability().normalize(other, locale),
    }
}

/// Kind-agnostic stringification.
pub(crate) fn generic(value: &CellValue, _locale: &Locale) -> String {
    match value {
        CellValue::Empty => String::new(),
        CellValue::Text(s) => s.clone(),
        CellValue::Number(n) => format_number(*n),
        CellValue::Checkbox(b) => b.to_string(),
        CellValue::Timestamp(ms) => ms.to_string(),
        CellValue::Choice(choice) => choice.label(),
        CellValue::Choices(choices) => join_choices(choices),
        CellValue::User(user) => user.label(),
        CellValue::Users(users) => join_users(users),
        CellValue::Other(json) => json_scalar_string(json),
    }
}

pub(crate) fn timestamp(value: &CellValue, locale: &Locale) -> String {
    let millis = match value {
        CellValue::Timestamp(ms) => *ms,
        CellValue::Number(n) if n.is_finite() => *n as i64,
        _ => return String::new(),
    };
    locale.format_timestamp(millis).unwrap_or_default()
}

pub(crate) fn checkbox(value: &CellValue, locale: &Locale) -> String {
    locale.checkbox_token(value.is_truthy()).to_string()
}

pub(crate) fn single_select(value: &CellValue, _locale: &Locale) -> String {
    match value {
        CellValue::Choice(choice) => choice.label(),
        CellValue::Choices(choices) => join_choices(choices),
        _ => String::new(),
    }
}

pub(crate) fn multi_select(value: &CellValue, _locale: &Locale) -> String {
    match value {
        CellValue::Choices(choices) => join_choices(choices),
        CellValue::Choice(choice) => choice.label(),
        _ => String::new(),
    }
}

pub(crate) fn user(value: &CellValue, _locale: &Locale) -> String {
    match value {
        CellValue::User(user) => user.label(),
        CellValue::Users(users) => join_users(users),
        _ => String::new(),
    }
}

fn join_choices(choices: &[Choice]) -> String {
    choices
        .iter()
        .map(Choice::label)
        .collect::<Vec<_>>()
        .join(", ")
}

fn join_users(users: &[UserRef]) -> String {
    users.iter().map(UserRef::label).collect::<Vec<_>>().join(", ")
}
