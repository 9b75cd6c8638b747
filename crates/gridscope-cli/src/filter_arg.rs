//! `--filter FIELD:OP[:VALUE]` arguments.
//!
//! The command line is a stricter filter panel: a row naming an unknown
//! field, an operator the field does not offer, or no value is rejected
//! up front instead of being ignored.

use std::str::FromStr;

use anyhow::{bail, Context};
use gridscope_seeker::{by_id, by_name, Field, FieldKind, FilterCondition, FilterValue, Locale, Op};

/// One unresolved filter row as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    /// Field id or name.
    pub field: String,
    pub operator: String,
    pub value: Option<String>,
}

impl FromStr for FilterSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ':');
        let field = parts.next().unwrap_or_default().trim();
        let operator = parts.next().unwrap_or_default().trim();
        if field.is_empty() || operator.is_empty() {
            return Err(format!("expected FIELD:OP[:VALUE], got '{}'", s));
        }
        Ok(FilterSpec {
            field: field.to_string(),
            operator: operator.to_string(),
            value: parts.next().map(str::to_string),
        })
    }
}

impl FilterSpec {
    /// Resolves the row against the table's fields.
    pub fn resolve(&self, fields: &[Field], locale: &Locale) -> anyhow::Result<FilterCondition> {
        let field = by_id(fields, &self.field)
            .or_else(|| by_name(fields, &self.field))
            .with_context(|| format!("unknown field '{}'", self.field))?;
        let op: Op = self.operator.parse()?;

        let value = match &self.value {
            None => FilterValue::Null,
            Some(raw) => operand(field, raw, locale)
                .with_context(|| format!("invalid value for field '{}'", field.name))?,
        };

        let condition = FilterCondition::new(field.id.clone(), op, value);
        condition.validate(fields)?;
        Ok(condition)
    }
}

fn operand(field: &Field, raw: &str, locale: &Locale) -> anyhow::Result<FilterValue> {
    let trimmed = raw.trim();
    Ok(match field.kind() {
        FieldKind::Checkbox => {
            let lower = trimmed.to_lowercase();
            if lower == "true" || lower == locale.yes.to_lowercase() {
                FilterValue::Bool(true)
            } else if lower == "false" || lower == locale.no.to_lowercase() {
                FilterValue::Bool(false)
            } else {
                bail!("expected true/false, got '{}'", raw);
            }
        }
        FieldKind::Number => match trimmed.parse::<f64>() {
            Ok(n) if !n.is_nan() => FilterValue::Number(n),
            _ => bail!("expected a number, got '{}'", raw),
        },
        FieldKind::DateTime => match trimmed.parse::<f64>() {
            Ok(ms) if ms.is_finite() => FilterValue::Number(ms),
            _ => match locale.parse_timestamp(trimmed) {
                Some(ms) => FilterValue::Number(ms as f64),
                None => bail!("expected a date or epoch milliseconds, got '{}'", raw),
            },
        },
        FieldKind::SingleSelect | FieldKind::MultiSelect | FieldKind::User => {
            let options = field.options();
            let mut ids: Vec<String> = trimmed
                .split(',')
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(|token| {
                    options
                        .iter()
                        .find(|option| option.name == token)
                        .map(|option| option.id.clone())
                        .unwrap_or_else(|| token.to_string())
                })
                .collect();
            match ids.len() {
                0 => bail!("expected one or more ids"),
                1 => FilterValue::Text(ids.remove(0)),
                _ => FilterValue::List(ids),
            }
        }
        FieldKind::Text | FieldKind::Other => FilterValue::Text(raw.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridscope_seeker::{FieldType, Zone};
    use serde_json::json;

    fn fields() -> Vec<Field> {
        vec![
            Field::new("fldTitle", "Title", FieldType::Text),
            Field::new("fldScore", "Score", FieldType::Number),
            Field::new("fldDone", "Done", FieldType::Checkbox),
            Field::new("fldDue", "Due", FieldType::DateTime),
            Field::new("fldTags", "Tags", FieldType::MultiSelect).with_property(json!({
                "options": [{"id": "optA", "name": "api"}, {"id": "optB", "name": "backend"}]
            })),
        ]
    }

    fn resolve(spec: &str) -> anyhow::Result<FilterCondition> {
        let locale = Locale::default().with_zone(Zone::utc());
        spec.parse::<FilterSpec>()
            .map_err(anyhow::Error::msg)?
            .resolve(&fields(), &locale)
    }

    #[test]
    fn splits_into_three_parts() {
        let spec: FilterSpec = "Due:after:2024-01-29 10:00:00".parse().unwrap();
        assert_eq!(spec.field, "Due");
        assert_eq!(spec.operator, "after");
        assert_eq!(spec.value.as_deref(), Some("2024-01-29 10:00:00"));

        let bare: FilterSpec = "Title:eq".parse().unwrap();
        assert_eq!(bare.value, None);

        assert!("Title".parse::<FilterSpec>().is_err());
        assert!(":eq:x".parse::<FilterSpec>().is_err());
    }

    #[test]
    fn resolves_by_name_or_id() {
        assert_eq!(
            resolve("Score:gte:15").unwrap(),
            FilterCondition::new("fldScore", Op::Gte, 15i64)
        );
        assert_eq!(
            resolve("fldTitle:contains:Ship it").unwrap(),
            FilterCondition::new("fldTitle", Op::Contains, "Ship it")
        );
    }

    #[test]
    fn typed_operands() {
        assert_eq!(
            resolve("Done:eq:yes").unwrap().value,
            FilterValue::Bool(true)
        );
        assert_eq!(
            resolve("Due:eq:2024-01-29").unwrap().value,
            FilterValue::Number(1_706_486_400_000.0)
        );
        assert_eq!(
            resolve("Tags:eq:api, optC").unwrap().value,
            FilterValue::List(vec!["optA".into(), "optC".into()])
        );
        assert_eq!(
            resolve("Tags:neq:backend").unwrap().value,
            FilterValue::Text("optB".into())
        );
    }

    #[test]
    fn rejects_incomplete_rows() {
        assert!(resolve("Nope:eq:1").is_err());
        assert!(resolve("Score:between:1").is_err());
        assert!(resolve("Done:gt:true").is_err());
        assert!(resolve("Score:eq:many").is_err());
        assert!(resolve("Score:eq").is_err());
    }
}
