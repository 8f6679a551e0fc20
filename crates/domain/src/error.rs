//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into these via
//! `#[from]` or an explicit `into_domain` at the port boundary.

use chrono::NaiveDate;

use crate::filter::FilterKey;
use crate::locale::Locale;
use crate::messages::Message;

/// Top-level error for batlog operations.
#[derive(Debug, thiserror::Error)]
pub enum BatlogError {
    /// Bad filter input, caught before any network call.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// A query or export request did not produce a usable result.
    #[error("query failed")]
    Query(#[from] QueryFailure),
}

/// Filter validation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The date range start lies after its end.
    #[error("start date {start} is after end date {end}")]
    InvalidDateRange {
        /// Parsed start of the range.
        start: NaiveDate,
        /// Parsed end of the range.
        end: NaiveDate,
    },

    /// A date filter could not be parsed as `YYYY-MM-DD`.
    #[error("filter {key} has invalid date {value:?}")]
    InvalidDate {
        /// The offending filter key.
        key: FilterKey,
        /// The raw value as entered.
        value: String,
    },

    /// The log kind does not accept this filter key.
    #[error("filter {0} is not supported by this log")]
    UnsupportedFilter(FilterKey),
}

impl ValidationError {
    /// Localized message suitable for an inline form hint.
    #[must_use]
    pub fn localized(&self, locale: Locale) -> String {
        let headline = Message::InvalidFilter.text(locale);
        format!("{headline}: {self}")
    }
}

/// Classified failure of a query or export round trip.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryFailure {
    /// Transport-level failure (connection refused, DNS, aborted fetch, …).
    #[error("network failure: {0}")]
    Network(String),

    /// The server answered with a non-success status.
    #[error("server failure ({status}): {message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Error text from the body, or `HTTP <status>`.
        message: String,
    },

    /// The body did not have the expected shape.
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl QueryFailure {
    /// Localized text shown inside the errored view.
    #[must_use]
    pub fn localized(&self, locale: Locale) -> &'static str {
        match self {
            Self::Network(_) => Message::NetworkFailure.text(locale),
            Self::Server { .. } => Message::ServerFailure.text(locale),
            Self::Malformed(_) => Message::MalformedResponse.text(locale),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_invalid_date_range() {
        let err = ValidationError::InvalidDateRange {
            start: NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
            end: NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "start date 2026-10-16 is after end date 2026-10-01"
        );
    }

    #[test]
    fn should_convert_validation_error_into_batlog_error() {
        let err: BatlogError = ValidationError::UnsupportedFilter(FilterKey::Dtype).into();
        assert!(matches!(err, BatlogError::Validation(_)));
    }

    #[test]
    fn should_convert_query_failure_into_batlog_error() {
        let err: BatlogError = QueryFailure::Network("refused".to_string()).into();
        assert!(matches!(err, BatlogError::Query(QueryFailure::Network(_))));
    }

    #[test]
    fn should_localize_failure_by_kind() {
        let server = QueryFailure::Server {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(server.localized(Locale::En), "The server reported an error.");
        assert_eq!(
            QueryFailure::Network("x".to_string()).localized(Locale::Tr),
            "Sunucuya ulaşılamadı."
        );
    }

    #[test]
    fn should_prefix_localized_validation_message() {
        let err = ValidationError::UnsupportedFilter(FilterKey::Battery);
        assert_eq!(
            err.localized(Locale::En),
            "Invalid filter: filter battery is not supported by this log"
        );
    }
}
