//! Query filters: the keyed values a log view sends with every request.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::time::{format_filter_date, parse_filter_date};

/// Filter keys understood by the log endpoints, named as on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKey {
    /// Arm number (1–4).
    Arm,
    /// Battery address within the arm.
    Battery,
    /// Measurement code.
    Dtype,
    /// Row status (`success`, `warning`, `error`).
    Status,
    /// Inclusive range start, `YYYY-MM-DD`.
    StartDate,
    /// Inclusive range end, `YYYY-MM-DD`.
    EndDate,
}

impl FilterKey {
    /// The wire name of this key.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Arm => "arm",
            Self::Battery => "battery",
            Self::Dtype => "dtype",
            Self::Status => "status",
            Self::StartDate => "start_date",
            Self::EndDate => "end_date",
        }
    }

    fn is_date(self) -> bool {
        matches!(self, Self::StartDate | Self::EndDate)
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A filter value: either a number or free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Int(i64),
    Text(String),
}

impl FilterValue {
    /// Whether this value means "unset" (blank text).
    #[must_use]
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Text(text) if text.trim().is_empty())
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => value.fmt(f),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u8> for FilterValue {
    fn from(value: u8) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<NaiveDate> for FilterValue {
    fn from(value: NaiveDate) -> Self {
        Self::Text(format_filter_date(value))
    }
}

/// The set of active filters. Unset keys are absent, never null.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FilterSet(BTreeMap<FilterKey, FilterValue>);

impl FromIterator<(FilterKey, FilterValue)> for FilterSet {
    fn from_iter<I: IntoIterator<Item = (FilterKey, FilterValue)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (key, value) in iter {
            set.insert(key, value);
        }
        set
    }
}

impl<'de> Deserialize<'de> for FilterSet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = BTreeMap::<FilterKey, FilterValue>::deserialize(deserializer)?;
        Ok(map.into_iter().collect())
    }
}

impl FilterSet {
    /// An empty filter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A filter set holding only the given date range.
    #[must_use]
    pub fn with_date_range(start: NaiveDate, end: NaiveDate) -> Self {
        let mut set = Self::new();
        set.insert(FilterKey::StartDate, start);
        set.insert(FilterKey::EndDate, end);
        set
    }

    /// Store `value` under `key`. A blank value removes the key instead.
    pub fn insert(&mut self, key: FilterKey, value: impl Into<FilterValue>) {
        let value = value.into();
        if value.is_blank() {
            self.0.remove(&key);
        } else {
            self.0.insert(key, value);
        }
    }

    /// Remove `key`, returning its previous value.
    pub fn remove(&mut self, key: FilterKey) -> Option<FilterValue> {
        self.0.remove(&key)
    }

    /// Look up a filter value.
    #[must_use]
    pub fn get(&self, key: FilterKey) -> Option<&FilterValue> {
        self.0.get(&key)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over the set filters in key order.
    pub fn iter(&self) -> impl Iterator<Item = (FilterKey, &FilterValue)> {
        self.0.iter().map(|(key, value)| (*key, value))
    }

    /// Parse a date filter, if present.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidDate`] when the value is not `YYYY-MM-DD`.
    pub fn date(&self, key: FilterKey) -> Result<Option<NaiveDate>, ValidationError> {
        let Some(value) = self.get(key) else {
            return Ok(None);
        };
        let text = value.to_string();
        parse_filter_date(&text)
            .map(Some)
            .ok_or(ValidationError::InvalidDate { key, value: text })
    }

    /// Check the set's invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidDate`] for an unparseable date and
    /// [`ValidationError::InvalidDateRange`] when the start lies after the end.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (key, _) in self.iter().filter(|(key, _)| key.is_date()) {
            self.date(key)?;
        }
        if let (Some(start), Some(end)) =
            (self.date(FilterKey::StartDate)?, self.date(FilterKey::EndDate)?)
        {
            if start > end {
                return Err(ValidationError::InvalidDateRange { start, end });
            }
        }
        Ok(())
    }

    /// The JSON object sent as the `filters` payload.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        let map = self
            .iter()
            .map(|(key, value)| {
                let json = match value {
                    FilterValue::Int(number) => serde_json::Value::from(*number),
                    FilterValue::Text(text) => serde_json::Value::from(text.as_str()),
                };
                (key.as_str().to_string(), json)
            })
            .collect();
        serde_json::Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn should_remove_key_when_value_is_blank() {
        let mut set = FilterSet::new();
        set.insert(FilterKey::Arm, 2_u8);
        set.insert(FilterKey::Arm, "  ");
        assert!(set.get(FilterKey::Arm).is_none());
        assert!(set.is_empty());
    }

    #[test]
    fn should_drop_blank_values_when_deserializing() {
        let set: FilterSet = serde_json::from_value(serde_json::json!({
            "arm": "",
            "battery": 2,
            "status": " ",
            "start_date": "2026-10-09"
        }))
        .unwrap();

        assert!(set.get(FilterKey::Arm).is_none());
        assert!(set.get(FilterKey::Status).is_none());
        assert_eq!(set.get(FilterKey::Battery), Some(&FilterValue::Int(2)));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn should_accept_ordered_range() {
        let set = FilterSet::with_date_range(date(2026, 10, 1), date(2026, 10, 16));
        assert!(set.validate().is_ok());
    }

    #[test]
    fn should_accept_single_day_range() {
        let set = FilterSet::with_date_range(date(2026, 10, 16), date(2026, 10, 16));
        assert!(set.validate().is_ok());
    }

    #[test]
    fn should_reject_start_after_end() {
        let set = FilterSet::with_date_range(date(2026, 10, 16), date(2026, 10, 1));
        assert_eq!(
            set.validate(),
            Err(ValidationError::InvalidDateRange {
                start: date(2026, 10, 16),
                end: date(2026, 10, 1),
            })
        );
    }

    #[test]
    fn should_reject_unparseable_date() {
        let mut set = FilterSet::new();
        set.insert(FilterKey::EndDate, "16/10/2026");
        assert!(matches!(
            set.validate(),
            Err(ValidationError::InvalidDate {
                key: FilterKey::EndDate,
                ..
            })
        ));
    }

    #[test]
    fn should_accept_open_ended_range() {
        let mut set = FilterSet::new();
        set.insert(FilterKey::StartDate, date(2026, 10, 16));
        assert!(set.validate().is_ok());
    }

    #[test]
    fn should_serialize_with_wire_names_and_omit_unset_keys() {
        let mut set = FilterSet::with_date_range(date(2026, 10, 9), date(2026, 10, 16));
        set.insert(FilterKey::Arm, 3_u8);
        set.insert(FilterKey::Status, "warning");

        assert_eq!(
            set.to_json(),
            serde_json::json!({
                "arm": 3,
                "status": "warning",
                "start_date": "2026-10-09",
                "end_date": "2026-10-16",
            })
        );
        assert_eq!(serde_json::to_value(&set).unwrap(), set.to_json());
    }
}
