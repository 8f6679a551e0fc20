//! Log rows: flat measurement records returned by the log endpoints.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::time::{Timestamp, from_epoch_millis, parse_row_timestamp};

/// Key under which every row carries its timestamp.
pub const TIMESTAMP_FIELD: &str = "timestamp";

/// A single field value of a log row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    Null,
}

impl FieldValue {
    fn from_json(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Number(number) => {
                number.as_f64().map_or(Self::Null, Self::Number)
            }
            serde_json::Value::String(text) => Self::Text(text),
            serde_json::Value::Bool(flag) => Self::Text(flag.to_string()),
            serde_json::Value::Null => Self::Null,
            other @ (serde_json::Value::Array(_) | serde_json::Value::Object(_)) => {
                Self::Text(other.to_string())
            }
        }
    }
}

/// Returned when a row is not a JSON object.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("log row must be a JSON object, got {0}")]
pub struct RowShapeError(pub &'static str);

/// A flat record: an optional timestamp plus named numeric-or-text fields.
///
/// The shape differs per log kind; rows are treated uniformly and the
/// per-kind column schema decides which fields are displayed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub struct LogRow {
    timestamp: Option<Timestamp>,
    fields: BTreeMap<String, FieldValue>,
}

impl LogRow {
    /// Create a builder for constructing a [`LogRow`].
    #[must_use]
    pub fn builder() -> LogRowBuilder {
        LogRowBuilder::default()
    }

    #[must_use]
    pub fn timestamp(&self) -> Option<Timestamp> {
        self.timestamp
    }

    /// Raw field lookup.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// Numeric reading for `key`; numeric text is accepted, anything else is `None`.
    #[must_use]
    pub fn number(&self, key: &str) -> Option<f64> {
        match self.fields.get(key)? {
            FieldValue::Number(value) => Some(*value),
            FieldValue::Text(text) => text.trim().parse().ok(),
            FieldValue::Null => None,
        }
    }

    /// Integer reading for `key`, if the field holds a whole number.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn integer(&self, key: &str) -> Option<i64> {
        let value = self.number(key)?;
        if value.is_finite() && value.fract() == 0.0 {
            Some(value as i64)
        } else {
            None
        }
    }

    /// Non-empty text for `key`; numbers are rendered without trailing zeros.
    #[must_use]
    pub fn text(&self, key: &str) -> Option<String> {
        match self.fields.get(key)? {
            FieldValue::Text(text) if !text.trim().is_empty() => Some(text.clone()),
            FieldValue::Number(value) => Some(value.to_string()),
            FieldValue::Text(_) | FieldValue::Null => None,
        }
    }

    /// Iterate over the fields in key order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(key, value)| (key.as_str(), value))
    }
}

impl TryFrom<serde_json::Value> for LogRow {
    type Error = RowShapeError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        let map = match value {
            serde_json::Value::Object(map) => map,
            other => return Err(RowShapeError(json_type_name(&other))),
        };
        let mut row = LogRow::default();
        for (key, value) in map {
            if key == TIMESTAMP_FIELD {
                row.timestamp = parse_timestamp(&value);
            } else {
                row.fields.insert(key, FieldValue::from_json(value));
            }
        }
        Ok(row)
    }
}

fn parse_timestamp(value: &serde_json::Value) -> Option<Timestamp> {
    match value {
        serde_json::Value::Number(number) => from_epoch_millis(number.as_i64()?),
        serde_json::Value::String(text) => parse_row_timestamp(text),
        _ => None,
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Step-by-step builder for [`LogRow`].
#[derive(Debug, Default)]
pub struct LogRowBuilder {
    row: LogRow,
}

impl LogRowBuilder {
    #[must_use]
    pub fn timestamp(mut self, timestamp: Timestamp) -> Self {
        self.row.timestamp = Some(timestamp);
        self
    }

    #[must_use]
    pub fn number(mut self, key: impl Into<String>, value: f64) -> Self {
        self.row.fields.insert(key.into(), FieldValue::Number(value));
        self
    }

    #[must_use]
    pub fn text(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.row
            .fields
            .insert(key.into(), FieldValue::Text(value.into()));
        self
    }

    #[must_use]
    pub fn null(mut self, key: impl Into<String>) -> Self {
        self.row.fields.insert(key.into(), FieldValue::Null);
        self
    }

    /// Consume the builder and return the [`LogRow`].
    #[must_use]
    pub fn build(self) -> LogRow {
        self.row
    }
}
