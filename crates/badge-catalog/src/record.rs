//! Badge records and their validated construction from raw rows.
//!
//! The data platform hands rows over as untyped JSON objects. Nothing past
//! this module sees those rows: [`BadgeRecord::from_row`] either yields a
//! fully-typed record or a [`CatalogError::MalformedRecord`].

use crate::error::{CatalogError, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// Opaque record identifier, kept in the representation the store used.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum BadgeId {
    /// Integer primary key.
    Integer(i64),
    /// Text key (uuid, slug).
    Text(String),
}

impl fmt::Display for BadgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for BadgeId {
    fn from(id: i64) -> Self {
        Self::Integer(id)
    }
}

impl From<&str> for BadgeId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

/// Threshold half of a badge rule, exactly as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CriteriaValue {
    /// Numeric column value.
    Number(serde_json::Number),
    /// Text column value.
    Text(String),
}

impl fmt::Display for CriteriaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<i64> for CriteriaValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<&str> for CriteriaValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// One badge definition.
///
/// Only built through [`BadgeRecord::new`] or [`BadgeRecord::from_row`], so
/// every record has passed boundary validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeRecord {
    /// Stable record identifier.
    pub id: BadgeId,
    /// Display label.
    pub name: String,
    /// Rule family the badge belongs to.
    pub criteria_type: String,
    /// Threshold paired with the criteria type.
    pub criteria_value: CriteriaValue,
    /// Raw creation timestamp, display only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl BadgeRecord {
    /// Convenience constructor for already-typed data.
    pub fn new(
        id: impl Into<BadgeId>,
        name: impl Into<String>,
        criteria_type: impl Into<String>,
        criteria_value: impl Into<CriteriaValue>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            criteria_type: criteria_type.into(),
            criteria_value: criteria_value.into(),
            created_at: None,
        }
    }

    /// Attach a creation timestamp.
    pub fn with_created_at(mut self, created_at: impl Into<String>) -> Self {
        self.created_at = Some(created_at.into());
        self
    }

    /// Validate a raw row into a record.
    ///
    /// Columns may use either the camelCase or the snake_case spelling. A
    /// `null` column is treated the same as an absent one.
    pub fn from_row(index: usize, row: &Value) -> Result<Self> {
        let Some(fields) = row.as_object() else {
            return Err(CatalogError::malformed(
                index,
                None,
                format!("expected an object, found {}", kind_of(row)),
            ));
        };

        let id = match field(fields, "id", "id") {
            Some(Value::Number(n)) => match n.as_i64() {
                Some(id) => BadgeId::Integer(id),
                None if n.is_u64() => {
                    return Err(CatalogError::malformed(
                        index,
                        Some(n.to_string()),
                        "integer id exceeds the signed 64-bit range",
                    ))
                }
                None => {
                    return Err(CatalogError::malformed(
                        index,
                        Some(n.to_string()),
                        "id must be an integer or a string",
                    ))
                }
            },
            Some(Value::String(s)) if !s.is_empty() => BadgeId::Text(s.clone()),
            Some(Value::String(_)) => return Err(CatalogError::malformed(index, None, "empty id")),
            Some(other) => {
                return Err(CatalogError::malformed(
                    index,
                    None,
                    format!("id must be an integer or a string, found {}", kind_of(other)),
                ))
            }
            None => return Err(CatalogError::malformed(index, None, "missing id")),
        };
        let shown_id = Some(id.to_string());

        let name = match field(fields, "name", "name") {
            Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
            Some(Value::String(_)) => {
                return Err(CatalogError::malformed(index, shown_id, "empty name"))
            }
            Some(other) => {
                return Err(CatalogError::malformed(
                    index,
                    shown_id,
                    format!("name must be a string, found {}", kind_of(other)),
                ))
            }
            None => return Err(CatalogError::malformed(index, shown_id, "missing name")),
        };

        let criteria_type = match field(fields, "criteriaType", "criteria_type") {
            Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
            Some(Value::String(_)) => {
                return Err(CatalogError::malformed(
                    index,
                    shown_id,
                    "empty criteriaType",
                ))
            }
            Some(other) => {
                return Err(CatalogError::malformed(
                    index,
                    shown_id,
                    format!("criteriaType must be a string, found {}", kind_of(other)),
                ))
            }
            None => {
                return Err(CatalogError::malformed(
                    index,
                    shown_id,
                    "missing criteriaType",
                ))
            }
        };

        let criteria_value = match field(fields, "criteriaValue", "criteria_value") {
            Some(Value::Number(n)) => CriteriaValue::Number(n.clone()),
            Some(Value::String(s)) => CriteriaValue::Text(s.clone()),
            Some(other) => {
                return Err(CatalogError::malformed(
                    index,
                    shown_id,
                    format!(
                        "criteriaValue must be a number or a string, found {}",
                        kind_of(other)
                    ),
                ))
            }
            None => {
                return Err(CatalogError::malformed(
                    index,
                    shown_id,
                    "missing criteriaValue",
                ))
            }
        };

        let created_at = match field(fields, "createdAt", "created_at") {
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
            None => None,
        };

        Ok(Self {
            id,
            name,
            criteria_type,
            criteria_value,
            created_at,
        })
    }
}

/// Validate every row, aborting on the first malformed one.
pub fn records_from_rows(rows: &[Value]) -> Result<Vec<BadgeRecord>> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| BadgeRecord::from_row(index, row))
        .collect()
}

fn field<'a>(fields: &'a Map<String, Value>, camel: &str, snake: &str) -> Option<&'a Value> {
    fields
        .get(camel)
        .or_else(|| fields.get(snake))
        .filter(|value| !value.is_null())
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    #[test]
    fn accepts_camel_and_snake_case_columns() {
        let camel = json!({
            "id": 7,
            "name": "Focus Master",
            "criteriaType": "focus_master",
            "criteriaValue": 10,
            "createdAt": "2024-03-01T10:00:00Z"
        });
        let snake = json!({
            "id": 7,
            "name": "Focus Master",
            "criteria_type": "focus_master",
            "criteria_value": 10,
            "created_at": "2024-03-01T10:00:00Z"
        });

        let a = BadgeRecord::from_row(0, &camel).unwrap();
        let b = BadgeRecord::from_row(0, &snake).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.id, BadgeId::Integer(7));
        assert_eq!(a.criteria_value, CriteriaValue::from(10));
        assert_eq!(a.created_at.as_deref(), Some("2024-03-01T10:00:00Z"));
    }

    #[test]
    fn keeps_stored_value_representation() {
        let row = json!({"id": "b-1", "name": "Five", "criteriaType": "streak", "criteriaValue": "5"});
        let record = BadgeRecord::from_row(0, &row).unwrap();
        assert_eq!(record.criteria_value, CriteriaValue::Text("5".to_string()));
        assert_eq!(record.id, BadgeId::Text("b-1".to_string()));
    }

    #[test]
    fn missing_criteria_fields_are_malformed() {
        let row = json!({"id": 1, "name": "No type", "criteriaValue": 3});
        assert_matches!(
            BadgeRecord::from_row(4, &row),
            Err(CatalogError::MalformedRecord { index: 4, id: Some(ref id), ref reason })
                if id == "1" && reason == "missing criteriaType"
        );

        let row = json!({"id": 2, "name": "Null value", "criteriaType": "streak", "criteriaValue": null});
        assert_matches!(
            BadgeRecord::from_row(0, &row),
            Err(CatalogError::MalformedRecord { ref reason, .. }) if reason == "missing criteriaValue"
        );
    }

    #[test]
    fn rejects_unusable_shapes() {
        assert_matches!(
            BadgeRecord::from_row(0, &json!([1, 2])),
            Err(CatalogError::MalformedRecord { id: None, .. })
        );
        let row = json!({"id": 1, "name": "Bool", "criteriaType": "streak", "criteriaValue": true});
        assert_matches!(
            BadgeRecord::from_row(0, &row),
            Err(CatalogError::MalformedRecord { .. })
        );
        let row = json!({"id": 1, "name": "  ", "criteriaType": "streak", "criteriaValue": 1});
        assert_matches!(
            BadgeRecord::from_row(0, &row),
            Err(CatalogError::MalformedRecord { ref reason, .. }) if reason == "empty name"
        );
        let row = json!({"id": 1.5, "name": "Float id", "criteriaType": "streak", "criteriaValue": 1});
        assert_matches!(
            BadgeRecord::from_row(0, &row),
            Err(CatalogError::MalformedRecord { .. })
        );
    }

    #[test]
    fn oversized_integer_id_is_named_as_such() {
        let row = json!({"id": 18_446_744_073_709_551_615u64, "name": "Huge", "criteriaType": "streak", "criteriaValue": 1});
        assert_matches!(
            BadgeRecord::from_row(2, &row),
            Err(CatalogError::MalformedRecord { index: 2, id: Some(ref id), ref reason })
                if id == "18446744073709551615" && reason == "integer id exceeds the signed 64-bit range"
        );
    }

    #[test]
    fn first_malformed_row_aborts_the_batch() {
        let rows = vec![
            json!({"id": 1, "name": "Ok", "criteriaType": "streak", "criteriaValue": 1}),
            json!({"id": 2, "name": "Broken", "criteriaType": "streak"}),
            json!({"id": 3, "name": "Also broken"}),
        ];
        assert_matches!(
            records_from_rows(&rows),
            Err(CatalogError::MalformedRecord { index: 1, .. })
        );
    }

    #[test]
    fn serializes_with_platform_field_names() {
        let record = BadgeRecord::new(1, "Streak", "streak", 5);
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({"id": 1, "name": "Streak", "criteriaType": "streak", "criteriaValue": 5})
        );
    }
}
