//! Time and timestamp helpers.

use chrono::{DateTime, Days, FixedOffset, NaiveDate, NaiveDateTime, Offset, Utc};

/// UTC timestamp carried by log rows.
pub type Timestamp = DateTime<Utc>;

/// Wire format of date filters (`<input type="date">`).
pub const FILTER_DATE_FORMAT: &str = "%Y-%m-%d";

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Current instant read in the viewer's fixed offset.
///
/// "Today" is the calendar date at that offset, not the UTC date.
#[derive(Debug, Clone, Copy)]
pub struct LocalClock {
    now: fn() -> Timestamp,
    offset: FixedOffset,
}

impl LocalClock {
    #[must_use]
    pub fn new(now: fn() -> Timestamp, offset: FixedOffset) -> Self {
        Self { now, offset }
    }

    #[must_use]
    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// The calendar date at this clock's offset.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        (self.now)().with_timezone(&self.offset).date_naive()
    }
}

impl Default for LocalClock {
    fn default() -> Self {
        Self::new(now, Utc.fix())
    }
}

/// Trailing window of `days` ending on `today`, as `(start, end)`.
#[must_use]
pub fn trailing_window(today: NaiveDate, days: u32) -> (NaiveDate, NaiveDate) {
    let start = today
        .checked_sub_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MIN);
    (start, today)
}

/// Parse a `YYYY-MM-DD` filter value.
#[must_use]
pub fn parse_filter_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), FILTER_DATE_FORMAT).ok()
}

/// Render a date in the filter wire format.
#[must_use]
pub fn format_filter_date(date: NaiveDate) -> String {
    date.format(FILTER_DATE_FORMAT).to_string()
}

/// Interpret epoch milliseconds as a timestamp.
#[must_use]
pub fn from_epoch_millis(millis: i64) -> Option<Timestamp> {
    DateTime::from_timestamp_millis(millis)
}

/// Parse a textual row timestamp: RFC 3339, or a naive
/// `YYYY-MM-DD HH:MM:SS` / `YYYY-MM-DDTHH:MM:SS` taken as UTC.
#[must_use]
pub fn parse_row_timestamp(value: &str) -> Option<Timestamp> {
    let value = value.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn should_return_current_utc_time() {
        let before = Utc::now();
        let ts = now();
        let after = Utc::now();
        assert!(ts >= before);
        assert!(ts <= after);
    }

    fn late_evening_utc() -> Timestamp {
        parse_row_timestamp("2026-10-15T22:30:00Z").unwrap()
    }

    #[test]
    fn should_take_today_at_the_clock_offset() {
        let istanbul = FixedOffset::east_opt(3 * 3600).unwrap();
        let local = LocalClock::new(late_evening_utc, istanbul);
        let utc = LocalClock::new(late_evening_utc, Utc.fix());

        assert_eq!(local.today(), NaiveDate::from_ymd_opt(2026, 10, 16).unwrap());
        assert_eq!(utc.today(), NaiveDate::from_ymd_opt(2026, 10, 15).unwrap());
    }

    #[test]
    fn should_build_seven_day_trailing_window() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let (start, end) = trailing_window(today, 7);
        assert_eq!(start, NaiveDate::from_ymd_opt(2026, 10, 9).unwrap());
        assert_eq!(end, today);
    }

    #[test]
    fn should_parse_and_format_filter_dates() {
        let date = parse_filter_date("2026-02-28").unwrap();
        assert_eq!(format_filter_date(date), "2026-02-28");
        assert!(parse_filter_date("28.02.2026").is_none());
        assert!(parse_filter_date("").is_none());
    }

    #[test]
    fn should_parse_epoch_millis() {
        let ts = from_epoch_millis(1_760_623_385_000).unwrap();
        assert_eq!(ts.year(), 2025);
        assert_eq!(ts.second(), 5);
    }

    #[test]
    fn should_parse_rfc3339_and_naive_timestamps() {
        let with_offset = parse_row_timestamp("2026-10-16T17:03:05+03:00").unwrap();
        assert_eq!(with_offset.hour(), 14);

        let naive = parse_row_timestamp("2026-10-16 14:03:05").unwrap();
        assert_eq!(naive, with_offset);

        assert!(parse_row_timestamp("yesterday").is_none());
    }
}
