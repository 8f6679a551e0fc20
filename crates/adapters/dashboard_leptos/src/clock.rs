//! The browser's local time zone as a fixed offset.

use chrono::{FixedOffset, Offset, Utc};

use batlog_app::log_view::LogViewOptions;

/// `Date.getTimezoneOffset()` is minutes *behind* UTC (`-180` for UTC+3).
#[allow(clippy::cast_possible_truncation)]
fn offset_from_js_minutes(minutes: f64) -> FixedOffset {
    if !minutes.is_finite() {
        return Utc.fix();
    }
    FixedOffset::west_opt((minutes * 60.0).round() as i32).unwrap_or_else(|| Utc.fix())
}

/// The offset the browser currently applies to local times.
pub fn browser_offset() -> FixedOffset {
    offset_from_js_minutes(js_sys::Date::new_0().get_timezone_offset())
}

/// View options that show times and "today" in the browser's zone.
pub fn view_options() -> LogViewOptions {
    LogViewOptions {
        display_offset: browser_offset(),
        ..LogViewOptions::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_flip_sign_of_js_offset() {
        assert_eq!(offset_from_js_minutes(-180.0).local_minus_utc(), 3 * 3600);
        assert_eq!(offset_from_js_minutes(300.0).local_minus_utc(), -5 * 3600);
        assert_eq!(offset_from_js_minutes(0.0).local_minus_utc(), 0);
    }

    #[test]
    fn should_fall_back_to_utc_for_nonsense() {
        assert_eq!(offset_from_js_minutes(f64::NAN).local_minus_utc(), 0);
        assert_eq!(offset_from_js_minutes(99_999.0).local_minus_utc(), 0);
    }
}
