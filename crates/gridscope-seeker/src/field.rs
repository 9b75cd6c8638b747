//! Field metadata: column definitions of a host table.
//!
//! A [`Field`] is an immutable snapshot of one column as reported by the
//! host. Records key their values by [`Field::id`]; names may collide or
//! change between fetches and are only used for display and lookup by
//! humans.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{Result, SeekerError};

/// Column type as defined by the host table platform.
///
/// Each variant carries the host's numeric type code (see [`FieldType::code`]).
/// Types this crate has no name for are kept as [`FieldType::Unknown`] so
/// newer host versions do not break deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    Text,
    Number,
    SingleSelect,
    MultiSelect,
    DateTime,
    Checkbox,
    User,
    Phone,
    Url,
    Attachment,
    SingleLink,
    Lookup,
    Formula,
    DuplexLink,
    Location,
    GroupChat,
    CreatedTime,
    ModifiedTime,
    CreatedUser,
    ModifiedUser,
    AutoNumber,
    Barcode,
    Progress,
    Currency,
    Rating,
    Email,
    /// Host type code without a named variant.
    Unknown(u32),
}

const NAMED_TYPES: &[(FieldType, u32, &str)] = &[
    (FieldType::Text, 1, "Text"),
    (FieldType::Number, 2, "Number"),
    (FieldType::SingleSelect, 3, "SingleSelect"),
    (FieldType::MultiSelect, 4, "MultiSelect"),
    (FieldType::DateTime, 5, "DateTime"),
    (FieldType::Checkbox, 7, "Checkbox"),
    (FieldType::User, 11, "User"),
    (FieldType::Phone, 13, "Phone"),
    (FieldType::Url, 15, "Url"),
    (FieldType::Attachment, 17, "Attachment"),
    (FieldType::SingleLink, 18, "SingleLink"),
    (FieldType::Lookup, 19, "Lookup"),
    (FieldType::Formula, 20, "Formula"),
    (FieldType::DuplexLink, 21, "DuplexLink"),
    (FieldType::Location, 22, "Location"),
    (FieldType::GroupChat, 23, "GroupChat"),
    (FieldType::CreatedTime, 1001, "CreatedTime"),
    (FieldType::ModifiedTime, 1002, "ModifiedTime"),
    (FieldType::CreatedUser, 1003, "CreatedUser"),
    (FieldType::ModifiedUser, 1004, "ModifiedUser"),
    (FieldType::AutoNumber, 1005, "AutoNumber"),
    (FieldType::Barcode, 99001, "Barcode"),
    (FieldType::Progress, 99002, "Progress"),
    (FieldType::Currency, 99003, "Currency"),
    (FieldType::Rating, 99004, "Rating"),
    (FieldType::Email, 99005, "Email"),
];

impl FieldType {
    /// Returns the host's numeric type code.
    pub fn code(self) -> u32 {
        match self {
            FieldType::Unknown(code) => code,
            named => NAMED_TYPES
                .iter()
                .find(|(ty, _, _)| *ty == named)
                .map(|(_, code, _)| *code)
                .unwrap_or(0),
        }
    }

    /// Maps a host type code to a field type.
    pub fn from_code(code: u32) -> Self {
        NAMED_TYPES
            .iter()
            .find(|(_, c, _)| *c == code)
            .map(|(ty, _, _)| *ty)
            .unwrap_or(FieldType::Unknown(code))
    }

    /// Returns the type name, or `"Unknown"` for unnamed codes.
    pub fn name(self) -> &'static str {
        NAMED_TYPES
            .iter()
            .find(|(ty, _, _)| *ty == self)
            .map(|(_, _, name)| *name)
            .unwrap_or("Unknown")
    }

    /// Returns the behavior kind used for normalization and filtering.
    pub fn kind(self) -> FieldKind {
        match self {
            FieldType::Text | FieldType::Url => FieldKind::Text,
            FieldType::Number | FieldType::Currency | FieldType::Rating => FieldKind::Number,
            FieldType::DateTime | FieldType::CreatedTime | FieldType::ModifiedTime => {
                FieldKind::DateTime
            }
            FieldType::Checkbox => FieldKind::Checkbox,
            FieldType::SingleSelect => FieldKind::SingleSelect,
            FieldType::MultiSelect => FieldKind::MultiSelect,
            FieldType::User | FieldType::CreatedUser | FieldType::ModifiedUser => FieldKind::User,
            _ => FieldKind::Other,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Unknown(code) => write!(f, "Unknown({})", code),
            named => f.write_str(named.name()),
        }
    }
}

impl FromStr for FieldType {
    type Err = SeekerError;

    /// Parses a type name (case-insensitive) or a numeric code.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if let Ok(code) = trimmed.parse::<u32>() {
            return Ok(FieldType::from_code(code));
        }
        NAMED_TYPES
            .iter()
            .find(|(_, _, name)| name.eq_ignore_ascii_case(trimmed))
            .map(|(ty, _, _)| *ty)
            .ok_or_else(|| SeekerError::UnknownFieldType(s.to_string()))
    }
}

impl Serialize for FieldType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            FieldType::Unknown(code) => serializer.serialize_u32(*code),
            named => serializer.serialize_str(named.name()),
        }
    }
}

impl<'de> Deserialize<'de> for FieldType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Code(u32),
            Name(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Code(code) => Ok(FieldType::from_code(code)),
            Repr::Name(name) => name.parse().map_err(de::Error::custom),
        }
    }
}

/// Behavior family of a field type.
///
/// Several host types share normalization and filter semantics (a URL is
/// compared like text, a currency like a number). The kind selects the
/// entry of the capability table, see [`crate::capability`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Text,
    Number,
    DateTime,
    Checkbox,
    SingleSelect,
    MultiSelect,
    User,
    Other,
}

/// One selectable choice of a select field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<i64>,
}

/// A column definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Opaque per-type metadata as delivered by the host.
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub property: serde_json::Value,
}

impl Field {
    /// Creates a field without type properties.
    pub fn new(id: impl Into<String>, name: impl Into<String>, field_type: FieldType) -> Self {
        Field {
            id: id.into(),
            name: name.into(),
            field_type,
            property: serde_json::Value::Null,
        }
    }

    /// Attaches type properties.
    pub fn with_property(mut self, property: serde_json::Value) -> Self {
        self.property = property;
        self
    }

    /// Returns the behavior kind of this field.
    pub fn kind(&self) -> FieldKind {
        self.field_type.kind()
    }

    /// Returns the choices declared in `property.options`.
    ///
    /// Malformed entries are skipped. Non-select fields yield an empty list.
    pub fn options(&self) -> Vec<ChoiceOption> {
        self.property
            .get("options")
            .and_then(|options| options.as_array())
            .map(|options| {
                options
                    .iter()
                    .filter_map(|option| ChoiceOption::deserialize(option).ok())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Finds a field by id.
pub fn by_id<'a>(fields: &'a [Field], id: &str) -> Option<&'a Field> {
    fields.iter().find(|field| field.id == id)
}

/// Finds the first field with the given name.
pub fn by_name<'a>(fields: &'a [Field], name: &str) -> Option<&'a Field> {
    fields.iter().find(|field| field.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn codes_round_trip_through_names() {
        assert_eq!(FieldType::from_code(4), FieldType::MultiSelect);
        assert_eq!(FieldType::MultiSelect.code(), 4);
        assert_eq!(FieldType::from_code(99003), FieldType::Currency);
        assert_eq!(FieldType::from_code(4242), FieldType::Unknown(4242));
        assert_eq!(FieldType::Unknown(4242).code(), 4242);
    }

    #[test]
    fn parse_by_name_or_code() {
        assert_eq!("datetime".parse::<FieldType>(), Ok(FieldType::DateTime));
        assert_eq!("1003".parse::<FieldType>(), Ok(FieldType::CreatedUser));
        assert_eq!(
            "Spreadsheet".parse::<FieldType>(),
            Err(SeekerError::UnknownFieldType("Spreadsheet".into()))
        );
    }

    #[test]
    fn kinds_group_types() {
        assert_eq!(FieldType::Url.kind(), FieldKind::Text);
        assert_eq!(FieldType::Rating.kind(), FieldKind::Number);
        assert_eq!(FieldType::ModifiedTime.kind(), FieldKind::DateTime);
        assert_eq!(FieldType::ModifiedUser.kind(), FieldKind::User);
        assert_eq!(FieldType::Formula.kind(), FieldKind::Other);
        assert_eq!(FieldType::Unknown(7777).kind(), FieldKind::Other);
    }

    #[test]
    fn deserialize_from_code_and_name() {
        let by_code: Field =
            serde_json::from_value(json!({"id": "f1", "name": "Score", "type": 2})).unwrap();
        assert_eq!(by_code.field_type, FieldType::Number);

        let by_name: Field =
            serde_json::from_value(json!({"id": "f2", "name": "Tags", "type": "MultiSelect"}))
                .unwrap();
        assert_eq!(by_name.field_type, FieldType::MultiSelect);

        let bad = serde_json::from_value::<Field>(json!({"id": "f3", "name": "x", "type": "Nope"}));
        assert!(bad.is_err());
    }

    #[test]
    fn serialize_uses_names() {
        let field = Field::new("f1", "Done", FieldType::Checkbox);
        let value = serde_json::to_value(&field).unwrap();
        assert_eq!(value, json!({"id": "f1", "name": "Done", "type": "Checkbox"}));
    }

    #[test]
    fn options_from_property() {
        let field = Field::new("f1", "Status", FieldType::SingleSelect).with_property(json!({
            "options": [
                {"id": "opt1", "name": "Open", "color": 0},
                {"id": "opt2", "name": "Closed"},
                "garbage"
            ]
        }));
        let options = field.options();
        assert_eq!(options.len(), 2);
        assert_eq!(options[0].name, "Open");
        assert_eq!(options[1].id, "opt2");

        assert!(Field::new("f2", "Title", FieldType::Text).options().is_empty());
    }

    #[test]
    fn lookup_helpers() {
        let fields = vec![
            Field::new("f1", "Title", FieldType::Text),
            Field::new("f2", "Title", FieldType::Number),
        ];
        assert_eq!(by_id(&fields, "f2").map(|f| f.field_type), Some(FieldType::Number));
        assert_eq!(by_name(&fields, "Title").map(|f| f.id.as_str()), Some("f1"));
        assert!(by_id(&fields, "missing").is_none());
    }
}
