//! Query issuing and stale-response discard.
//!
//! A query is split into three steps so the view never holds a borrow
//! across the network call:
//!
//! 1. [`LogQueryClient::issue`] bumps the [`RequestToken`] and captures the
//!    request as a [`PendingQuery`];
//! 2. [`PendingQuery::send`] performs the request (the only suspension point);
//! 3. [`LogQueryClient::accept`] hands the outcome back only if its token is
//!    still the current one.

use serde::{Deserialize, Serialize};

use batlog_domain::error::QueryFailure;
use batlog_domain::filter::FilterSet;
use batlog_domain::locale::Locale;
use batlog_domain::log_row::LogRow;
use batlog_domain::page::PageCursor;

use crate::ports::LogTransport;

/// Monotonic request counter. Exactly one token is current per view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RequestToken(u64);

impl RequestToken {
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Body of a log query: `{page, pageSize, filters}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    pub page: u32,
    pub page_size: u32,
    pub filters: FilterSet,
}

impl QueryRequest {
    #[must_use]
    pub fn new(filters: &FilterSet, cursor: PageCursor) -> Self {
        Self {
            page: cursor.current_page(),
            page_size: cursor.page_size(),
            filters: filters.clone(),
        }
    }

    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "page": self.page,
            "pageSize": self.page_size,
            "filters": self.filters.to_json(),
        })
    }
}

/// One page of rows plus the server's page count.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LogPage {
    pub rows: Vec<LogRow>,
    /// `None` when the response carried no usable count; the cursor is
    /// then left where it was.
    pub total_pages: Option<u32>,
}

impl LogPage {
    /// The result shown when a response could not be read.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }
}

/// A query that has been issued but not sent yet.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingQuery {
    token: RequestToken,
    endpoint: &'static str,
    locale: Locale,
    request: QueryRequest,
}

impl PendingQuery {
    #[must_use]
    pub fn token(&self) -> RequestToken {
        self.token
    }

    #[must_use]
    pub fn endpoint(&self) -> &'static str {
        self.endpoint
    }

    #[must_use]
    pub fn request(&self) -> &QueryRequest {
        &self.request
    }

    /// Send the query and classify the outcome.
    ///
    /// A body that cannot be read is logged and coerced to an empty page.
    #[tracing::instrument(skip_all, fields(endpoint = self.endpoint, token = self.token.0, page = self.request.page))]
    pub async fn send<T: LogTransport>(self, transport: &T) -> CompletedQuery {
        let outcome = self.fetch(transport).await;
        if let Err(err) = &outcome {
            tracing::debug!(error = %err, "query failed");
        }
        CompletedQuery {
            token: self.token,
            outcome,
        }
    }

    async fn fetch<T: LogTransport>(&self, transport: &T) -> Result<LogPage, QueryFailure> {
        let reply = transport
            .post_json(self.endpoint, self.locale, &self.request.to_json())
            .await?
            .into_success()?;
        match decode_page(&reply.body, self.request.page) {
            Ok(page) => Ok(page),
            Err(err) => {
                tracing::warn!(error = %err, "unreadable log response, showing empty page");
                Ok(LogPage::empty())
            }
        }
    }
}

/// A resolved query, waiting to be accepted or discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedQuery {
    token: RequestToken,
    outcome: Result<LogPage, QueryFailure>,
}

impl CompletedQuery {
    /// Build a completion directly, e.g. from a transport driven elsewhere.
    #[must_use]
    pub fn new(token: RequestToken, outcome: Result<LogPage, QueryFailure>) -> Self {
        Self { token, outcome }
    }

    #[must_use]
    pub fn token(&self) -> RequestToken {
        self.token
    }

    #[must_use]
    pub fn outcome(&self) -> &Result<LogPage, QueryFailure> {
        &self.outcome
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPage {
    logs: Vec<serde_json::Value>,
    total_pages: Option<serde_json::Value>,
    has_more: Option<serde_json::Value>,
}

/// Whole, non-negative page count from a number or numeric text.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn page_count(value: &serde_json::Value) -> Option<u32> {
    let count = match value {
        serde_json::Value::Number(number) => number.as_f64()?,
        serde_json::Value::String(text) => text.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    let whole = count.is_finite() && count.fract() == 0.0;
    (whole && (0.0..=f64::from(u32::MAX)).contains(&count)).then(|| count as u32)
}

/// Decode a log response body.
///
/// The page count comes from `totalPages` (numbers and numeric text are
/// accepted), or is derived from `hasMore` relative to `requested_page`,
/// or defaults to 1. An unreadable count never discards the rows. Entries
/// that are not JSON objects are skipped.
///
/// # Errors
///
/// Returns [`QueryFailure::Malformed`] if the body is not JSON or lacks `logs`.
pub fn decode_page(body: &[u8], requested_page: u32) -> Result<LogPage, QueryFailure> {
    let raw: RawPage =
        serde_json::from_slice(body).map_err(|err| QueryFailure::Malformed(err.to_string()))?;

    let reported = raw.total_pages.as_ref().and_then(|value| {
        let count = page_count(value);
        if count.is_none() {
            tracing::warn!(%value, "unreadable totalPages, falling back");
        }
        count
    });
    let has_more = raw.has_more.as_ref().and_then(serde_json::Value::as_bool);
    let total_pages = match (reported, has_more) {
        (Some(total), _) => total,
        (None, Some(true)) => requested_page.saturating_add(1),
        (None, Some(false)) => requested_page,
        (None, None) => 1,
    };

    let mut rows = Vec::with_capacity(raw.logs.len());
    for entry in raw.logs {
        match LogRow::try_from(entry) {
            Ok(row) => rows.push(row),
            Err(err) => tracing::warn!(error = %err, "skipping log entry"),
        }
    }

    Ok(LogPage {
        rows,
        total_pages: Some(total_pages),
    })
}

/// Issues queries for one view and tracks which one is current.
#[derive(Debug)]
pub struct LogQueryClient {
    endpoint: &'static str,
    current: RequestToken,
}

impl LogQueryClient {
    #[must_use]
    pub fn new(endpoint: &'static str) -> Self {
        Self {
            endpoint,
            current: RequestToken::default(),
        }
    }

    /// Capture a new query. Every earlier token becomes stale.
    pub fn issue(&mut self, filters: &FilterSet, cursor: PageCursor, locale: Locale) -> PendingQuery {
        self.current = RequestToken(self.current.0 + 1);
        tracing::debug!(token = self.current.0, page = cursor.current_page(), "issuing query");
        PendingQuery {
            token: self.current,
            endpoint: self.endpoint,
            locale,
            request: QueryRequest::new(filters, cursor),
        }
    }

    /// The outcome of `completed`, or `None` if a newer query was issued since.
    pub fn accept(&self, completed: CompletedQuery) -> Option<Result<LogPage, QueryFailure>> {
        if completed.token != self.current {
            tracing::debug!(
                token = completed.token.0,
                current = self.current.0,
                "discarding stale response"
            );
            return None;
        }
        Some(completed.outcome)
    }

    #[must_use]
    pub fn current_token(&self) -> RequestToken {
        self.current
    }
}
