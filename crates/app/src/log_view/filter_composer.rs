//! Filter composition for a single log view.

use batlog_domain::error::ValidationError;
use batlog_domain::filter::{FilterKey, FilterSet, FilterValue};
use batlog_domain::log_kind::LogSchema;
use batlog_domain::time::{LocalClock, trailing_window};

/// Holds the active filters of a view and restores its default window.
///
/// Only keys accepted by the view's [`LogSchema`] can be set. Validation is
/// reported as a value; nothing here blocks or panics.
#[derive(Debug, Clone)]
pub struct FilterComposer {
    schema: &'static LogSchema,
    window_days: u32,
    clock: LocalClock,
    filters: FilterSet,
}

impl FilterComposer {
    /// Create a composer holding the default filters.
    ///
    /// A `window_days` of 0 means no default date range. The window ends on
    /// the clock's local date.
    #[must_use]
    pub fn new(schema: &'static LogSchema, window_days: u32, clock: LocalClock) -> Self {
        let mut composer = Self {
            schema,
            window_days,
            clock,
            filters: FilterSet::new(),
        };
        composer.clear();
        composer
    }

    /// Store `value` under `key`; a blank value unsets the key.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnsupportedFilter`] when the log does not
    /// accept `key`. The filters are left unchanged in that case.
    pub fn set(
        &mut self,
        key: FilterKey,
        value: impl Into<FilterValue>,
    ) -> Result<(), ValidationError> {
        if !self.schema.supports(key) {
            return Err(ValidationError::UnsupportedFilter(key));
        }
        self.filters.insert(key, value);
        Ok(())
    }

    /// Unset `key`.
    pub fn unset(&mut self, key: FilterKey) {
        self.filters.remove(key);
    }

    /// Restore the default date window and drop every other key.
    pub fn clear(&mut self) {
        self.filters = self.default_filters();
    }

    /// The filters a freshly mounted view starts with.
    #[must_use]
    pub fn default_filters(&self) -> FilterSet {
        if self.window_days == 0 {
            return FilterSet::new();
        }
        let (start, end) = trailing_window(self.clock.today(), self.window_days);
        FilterSet::with_date_range(start, end)
    }

    /// Check the current filters without side effects.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.filters.validate()
    }

    /// The `filters` request payload.
    #[must_use]
    pub fn serialize(&self) -> serde_json::Value {
        self.filters.to_json()
    }

    #[must_use]
    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use batlog_domain::log_kind::LogKind;
    use batlog_domain::time::{Timestamp, parse_row_timestamp};
    use chrono::{FixedOffset, Offset, Utc};

    fn fixed_now() -> Timestamp {
        parse_row_timestamp("2026-10-16T10:00:00Z").unwrap()
    }

    fn utc_clock() -> LocalClock {
        LocalClock::new(fixed_now, Utc.fix())
    }

    fn composer(kind: LogKind) -> FilterComposer {
        FilterComposer::new(kind.schema(), 7, utc_clock())
    }

    #[test]
    fn should_start_with_trailing_seven_day_window() {
        let composer = composer(LogKind::Event);
        assert_eq!(
            composer.serialize(),
            serde_json::json!({"start_date": "2026-10-09", "end_date": "2026-10-16"})
        );
    }

    #[test]
    fn should_shift_window_with_clock_offset() {
        fn late_evening() -> Timestamp {
            parse_row_timestamp("2026-10-16T23:30:00Z").unwrap()
        }
        let clock = LocalClock::new(late_evening, FixedOffset::east_opt(3 * 3600).unwrap());
        let composer = FilterComposer::new(LogKind::Event.schema(), 7, clock);
        assert_eq!(
            composer.serialize(),
            serde_json::json!({"start_date": "2026-10-10", "end_date": "2026-10-17"})
        );
    }

    #[test]
    fn should_start_empty_without_window() {
        let composer = FilterComposer::new(LogKind::Arm.schema(), 0, utc_clock());
        assert!(composer.filters().is_empty());
    }

    #[test]
    fn should_reject_filter_the_log_does_not_accept() {
        let mut composer = composer(LogKind::Arm);
        let before = composer.filters().clone();

        let result = composer.set(FilterKey::Status, "error");

        assert_eq!(result, Err(ValidationError::UnsupportedFilter(FilterKey::Status)));
        assert_eq!(composer.filters(), &before);
    }

    #[test]
    fn should_clear_back_to_default_window() {
        let mut composer = composer(LogKind::Battery);
        composer.set(FilterKey::Arm, 3_u8).unwrap();
        composer.set(FilterKey::Battery, 7_u8).unwrap();
        composer.set(FilterKey::StartDate, "2026-01-01").unwrap();

        composer.clear();

        assert_eq!(composer.filters(), &composer.default_filters());
        assert!(composer.filters().get(FilterKey::Arm).is_none());
    }

    #[test]
    fn should_report_reversed_range_without_changing_filters() {
        let mut composer = composer(LogKind::Event);
        composer.set(FilterKey::StartDate, "2026-10-20").unwrap();
        let before = composer.filters().clone();

        assert!(matches!(
            composer.validate(),
            Err(ValidationError::InvalidDateRange { .. })
        ));
        assert_eq!(composer.filters(), &before);
    }

    #[test]
    fn should_unset_key() {
        let mut composer = composer(LogKind::Event);
        composer.unset(FilterKey::EndDate);
        assert!(composer.filters().get(FilterKey::EndDate).is_none());
    }
}
