//! Typed cell values.
//!
//! The host delivers cell contents as loosely shaped JSON whose layout
//! depends on the owning field's type: scalars, epoch-millisecond numbers,
//! `{id, name}` objects or arrays of them. [`CellValue`] captures those
//! shapes as an explicit sum type so normalization and filtering can match
//! exhaustively instead of probing objects for keys.

use serde::Serialize;
use serde_json::{Map, Value as Json};

use crate::field::{FieldKind, FieldType};

/// The typed content of one (record, field) intersection.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    /// No value (host `null` or a missing key).
    #[default]
    Empty,
    /// Plain text.
    Text(String),
    /// Numeric value.
    Number(f64),
    /// Checkbox state.
    Checkbox(bool),
    /// Milliseconds since the Unix epoch.
    Timestamp(i64),
    /// A single select choice.
    Choice(Choice),
    /// An ordered list of select choices.
    Choices(Vec<Choice>),
    /// A single user reference.
    User(UserRef),
    /// An ordered list of user references.
    Users(Vec<UserRef>),
    /// Any other host shape, kept verbatim.
    Other(Json),
}

impl CellValue {
    /// Decodes a host JSON value in the context of its field type.
    ///
    /// Strings, booleans and `null` decode the same for every type. Numbers
    /// become timestamps under date types. Objects and arrays become choices
    /// or users under select and user types; under text types an array of
    /// rich-text segments is flattened to its text.
    pub fn from_json(json: Json, field_type: FieldType) -> Self {
        let kind = field_type.kind();
        match json {
            Json::Null => CellValue::Empty,
            Json::String(s) => CellValue::Text(s),
            Json::Bool(b) => CellValue::Checkbox(b),
            Json::Number(n) => match kind {
                FieldKind::DateTime => n
                    .as_i64()
                    .or_else(|| n.as_f64().map(|f| f as i64))
                    .map(CellValue::Timestamp)
                    .unwrap_or(CellValue::Empty),
                _ => n
                    .as_f64()
                    .map(CellValue::Number)
                    .unwrap_or(CellValue::Empty),
            },
            Json::Object(map) => match kind {
                FieldKind::SingleSelect | FieldKind::MultiSelect => {
                    CellValue::Choice(Choice::from_map(map))
                }
                FieldKind::User => CellValue::User(UserRef::from_map(map)),
                _ => CellValue::Other(Json::Object(map)),
            },
            Json::Array(items) => match kind {
                FieldKind::SingleSelect | FieldKind::MultiSelect => {
                    CellValue::Choices(items.into_iter().map(Choice::from_item).collect())
                }
                FieldKind::User => {
                    CellValue::Users(items.into_iter().map(UserRef::from_item).collect())
                }
                FieldKind::Text => match flatten_segments(&items) {
                    Some(text) => CellValue::Text(text),
                    None => CellValue::Other(Json::Array(items)),
                },
                _ => CellValue::Other(Json::Array(items)),
            },
        }
    }

    /// Returns `true` for [`CellValue::Empty`].
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Truthiness as the host UI understands it.
    ///
    /// Empty text, zero, `NaN`, `false` and empty values are falsy; objects
    /// and lists are always truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            CellValue::Empty => false,
            CellValue::Text(s) => !s.is_empty(),
            CellValue::Number(n) => *n != 0.0 && !n.is_nan(),
            CellValue::Checkbox(b) => *b,
            CellValue::Timestamp(ms) => *ms != 0,
            CellValue::Choice(_)
            | CellValue::Choices(_)
            | CellValue::User(_)
            | CellValue::Users(_) => true,
            CellValue::Other(json) => json_truthy(json),
        }
    }

    /// Numeric coercion.
    ///
    /// Text is parsed with [`parse_number`]; `NaN` and structured values
    /// yield `None`.
    pub fn as_number(&self) -> Option<f64> {
        let n = match self {
            CellValue::Number(n) => *n,
            CellValue::Timestamp(ms) => *ms as f64,
            CellValue::Checkbox(b) => f64::from(u8::from(*b)),
            CellValue::Text(s) => parse_number(s)?,
            CellValue::Other(Json::Number(n)) => n.as_f64()?,
            _ => return None,
        };
        (!n.is_nan()).then_some(n)
    }

    /// Ids of the referenced choices or users.
    ///
    /// Returns `None` when the value is not a choice/user shape. Entries
    /// without an id are skipped.
    pub fn reference_ids(&self) -> Option<ReferenceIds<'_>> {
        match self {
            CellValue::Choice(choice) => Some(ReferenceIds::Single(choice.id.as_deref())),
            CellValue::User(user) => Some(ReferenceIds::Single(user.id.as_deref())),
            CellValue::Choices(choices) => Some(ReferenceIds::Many(
                choices.iter().filter_map(|c| c.id.as_deref()).collect(),
            )),
            CellValue::Users(users) => Some(ReferenceIds::Many(
                users.iter().filter_map(|u| u.id.as_deref()).collect(),
            )),
            _ => None,
        }
    }
}

/// Referenced ids of a choice or user cell.
#[derive(Debug, Clone, PartialEq)]
pub enum ReferenceIds<'a> {
    /// A single object; `None` if it carries no id.
    Single(Option<&'a str>),
    /// A list of objects, ids in stored order.
    Many(Vec<&'a str>),
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Checkbox(b)
    }
}

impl From<Choice> for CellValue {
    fn from(choice: Choice) -> Self {
        CellValue::Choice(choice)
    }
}

impl From<UserRef> for CellValue {
    fn from(user: UserRef) -> Self {
        CellValue::User(user)
    }
}

/// A select choice as stored in a cell.
///
/// Hosts are inconsistent about which label key they fill, so all of
/// `name`, `text` and `value` are kept; unrecognized keys land in `rest`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Choice {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(flatten)]
    pub rest: Map<String, Json>,
}

impl Choice {
    /// Creates a choice with an id and a display name.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Choice {
            id: Some(id.into()),
            name: Some(name.into()),
            ..Choice::default()
        }
    }

    fn from_map(mut map: Map<String, Json>) -> Self {
        Choice {
            id: take_scalar(&mut map, "id"),
            name: take_scalar(&mut map, "name"),
            text: take_scalar(&mut map, "text"),
            value: take_scalar(&mut map, "value"),
            rest: map,
        }
    }

    fn from_item(item: Json) -> Self {
        match item {
            Json::Object(map) => Choice::from_map(map),
            other => Choice {
                name: Some(json_scalar_string(&other)),
                ..Choice::default()
            },
        }
    }

    /// Display label: `name`, then `text`, `value`, `id`, else the JSON form.
    pub fn label(&self) -> String {
        self.name
            .as_ref()
            .or(self.text.as_ref())
            .or(self.value.as_ref())
            .or(self.id.as_ref())
            .cloned()
            .unwrap_or_else(|| serde_json::to_string(self).unwrap_or_default())
    }
}

/// A user reference as stored in a cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserRef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub rest: Map<String, Json>,
}

impl UserRef {
    /// Creates a user reference with an id and a display name.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        UserRef {
            id: Some(id.into()),
            name: Some(name.into()),
            rest: Map::new(),
        }
    }

    fn from_map(mut map: Map<String, Json>) -> Self {
        UserRef {
            id: take_scalar(&mut map, "id"),
            name: take_scalar(&mut map, "name"),
            rest: map,
        }
    }

    fn from_item(item: Json) -> Self {
        match item {
            Json::Object(map) => UserRef::from_map(map),
            other => UserRef {
                name: Some(json_scalar_string(&other)),
                ..UserRef::default()
            },
        }
    }

    /// Display label: `name`, then `id`, else the JSON form.
    pub fn label(&self) -> String {
        self.name
            .as_ref()
            .or(self.id.as_ref())
            .cloned()
            .unwrap_or_else(|| serde_json::to_string(self).unwrap_or_default())
    }
}

fn take_scalar(map: &mut Map<String, Json>, key: &str) -> Option<String> {
    match map.get(key) {
        Some(Json::Null) | None => None,
        Some(Json::Object(_)) | Some(Json::Array(_)) => None,
        Some(_) => map.remove(key).map(|v| json_scalar_string(&v)),
    }
}

/// Stringifies a JSON value the way the host UI prints scalars.
pub(crate) fn json_scalar_string(json: &Json) -> String {
    match json {
        Json::Null => String::new(),
        Json::String(s) => s.clone(),
        Json::Bool(b) => b.to_string(),
        Json::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() => format_number(f),
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}

/// Prints a number; `f64`'s `Display` already drops the `.0` of
/// integral values.
pub(crate) fn format_number(n: f64) -> String {
    n.to_string()
}

/// Parses user or cell text as a number.
///
/// Blank text is not a number. Of the infinities only the spelled-out
/// `Infinity` forms count; `inf`, `nan` and friends do not.
pub(crate) fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    let n = trimmed.parse::<f64>().ok()?;
    if n.is_finite() || matches!(trimmed, "Infinity" | "+Infinity" | "-Infinity") {
        Some(n)
    } else {
        None
    }
}

fn json_truthy(json: &Json) -> bool {
    match json {
        Json::Null => false,
        Json::Bool(b) => *b,
        Json::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Json::String(s) => !s.is_empty(),
        Json::Array(_) | Json::Object(_) => true,
    }
}

fn flatten_segments(items: &[Json]) -> Option<String> {
    let mut text = String::new();
    for item in items {
        text.push_str(item.get("text")?.as_str()?);
    }
    Some(text)
}
