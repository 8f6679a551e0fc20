//! The paginated, filterable log view.
//!
//! One [`LogView`] drives any log kind: the per-kind differences (endpoint,
//! columns, accepted filters) come from its [`LogSchema`].
//!
//! ## State machine
//!
//! ```text
//! Idle ──mount──▶ Loading ──resolve──▶ Populated | Empty | Errored
//!                    ▲                              │
//!                    └──── any issuing action ──────┘
//! ```
//!
//! Every issuing action returns a [`PendingQuery`]; the caller sends it and
//! feeds the completion back through [`LogView::resolve`]. Only the most
//! recently issued query can change the view.

pub mod export;
pub mod filter_composer;
pub mod pagination;
pub mod query_client;
pub mod renderer;

use std::num::NonZeroU32;

use chrono::{FixedOffset, Offset, Utc};

use batlog_domain::error::{QueryFailure, ValidationError};
use batlog_domain::filter::{FilterKey, FilterSet, FilterValue};
use batlog_domain::locale::Locale;
use batlog_domain::log_kind::{LogKind, LogSchema};
use batlog_domain::log_row::LogRow;
use batlog_domain::messages::Message;
use batlog_domain::page::{DEFAULT_PAGE_SIZE, PageCursor};
use batlog_domain::time::{self, LocalClock, Timestamp};

use crate::ports::LogTransport;

pub use export::{ExportFile, ExportRequest};
pub use filter_composer::FilterComposer;
pub use pagination::PaginationController;
pub use query_client::{CompletedQuery, LogPage, LogQueryClient, PendingQuery, RequestToken};
pub use renderer::{DisplayRow, LogRenderer, RowStatus, PLACEHOLDER};

/// Visible state of a [`LogView`].
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState {
    #[default]
    Idle,
    Loading,
    Populated(Vec<LogRow>),
    Empty,
    Errored(QueryFailure),
}

impl ViewState {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Populated(_) => "populated",
            Self::Empty => "empty",
            Self::Errored(_) => "errored",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderKind {
    Spinner,
    Empty,
    Error,
}

/// The single spanning row shown instead of data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub kind: PlaceholderKind,
    pub title: &'static str,
    pub detail: Option<&'static str>,
    /// Number of columns the row spans.
    pub colspan: usize,
}

/// Construction options of a [`LogView`].
#[derive(Debug, Clone, Copy)]
pub struct LogViewOptions {
    pub page_size: NonZeroU32,
    /// Length of the default trailing date window; 0 disables it.
    pub window_days: u32,
    /// Offset in which row timestamps are displayed and "today" is taken.
    pub display_offset: FixedOffset,
    /// Source of the current instant, for the default window and export
    /// file names.
    pub clock: fn() -> Timestamp,
}

impl Default for LogViewOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            window_days: 7,
            display_offset: Utc.fix(),
            clock: time::now,
        }
    }
}

/// Controller of one log page.
pub struct LogView<T> {
    schema: &'static LogSchema,
    transport: T,
    locale: Locale,
    clock: LocalClock,
    filters: FilterComposer,
    pagination: PaginationController,
    client: LogQueryClient,
    renderer: LogRenderer,
    state: ViewState,
    rendered: Vec<DisplayRow>,
}

impl<T: LogTransport> LogView<T> {
    /// Create an idle view with default options.
    #[must_use]
    pub fn new(kind: LogKind, transport: T, locale: Locale) -> Self {
        Self::with_options(kind, transport, locale, LogViewOptions::default())
    }

    #[must_use]
    pub fn with_options(kind: LogKind, transport: T, locale: Locale, options: LogViewOptions) -> Self {
        let schema = kind.schema();
        let clock = LocalClock::new(options.clock, options.display_offset);
        Self {
            schema,
            transport,
            locale,
            clock,
            filters: FilterComposer::new(schema, options.window_days, clock),
            pagination: PaginationController::new(options.page_size),
            client: LogQueryClient::new(schema.endpoint),
            renderer: LogRenderer::new(schema, options.display_offset),
            state: ViewState::Idle,
            rendered: Vec::new(),
        }
    }

    /// Initial load.
    pub fn mount(&mut self) -> PendingQuery {
        self.issue()
    }

    /// Edit a filter without querying.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnsupportedFilter`] if this log does not
    /// accept `key`.
    pub fn set_filter(
        &mut self,
        key: FilterKey,
        value: impl Into<FilterValue>,
    ) -> Result<(), ValidationError> {
        self.filters.set(key, value)
    }

    /// Validate the filters and query page 1.
    ///
    /// # Errors
    ///
    /// Returns the [`ValidationError`] when the filters are invalid; no query
    /// is issued and neither state nor page changes.
    pub fn apply_filters(&mut self) -> Result<PendingQuery, ValidationError> {
        if let Err(err) = self.filters.validate() {
            tracing::debug!(error = %err, "filters rejected");
            return Err(err);
        }
        self.pagination.reset();
        Ok(self.issue())
    }

    /// Restore the default filters and query page 1.
    pub fn clear_filters(&mut self) -> PendingQuery {
        self.filters.clear();
        self.pagination.reset();
        self.issue()
    }

    /// Query the next page, if there is one.
    pub fn next_page(&mut self) -> Option<PendingQuery> {
        self.pagination.next().then(|| self.issue())
    }

    /// Query the previous page, if there is one.
    pub fn previous_page(&mut self) -> Option<PendingQuery> {
        self.pagination.previous().then(|| self.issue())
    }

    /// Re-run the current query.
    pub fn refresh(&mut self) -> PendingQuery {
        self.issue()
    }

    /// Apply a completed query. Returns `false` if it was stale.
    ///
    /// Failures leave the filters and page untouched so [`Self::refresh`]
    /// can retry.
    pub fn resolve(&mut self, completed: CompletedQuery) -> bool {
        let Some(outcome) = self.client.accept(completed) else {
            return false;
        };
        match outcome {
            Ok(page) => {
                if let Some(total) = page.total_pages {
                    self.pagination.apply_server_total(total);
                }
                if page.rows.is_empty() {
                    self.rendered.clear();
                    self.transition(ViewState::Empty);
                } else {
                    self.rendered = self.renderer.project_all(&page.rows, self.locale);
                    self.transition(ViewState::Populated(page.rows));
                }
            }
            Err(failure) => {
                self.rendered.clear();
                self.transition(ViewState::Errored(failure));
            }
        }
        true
    }

    /// Send `pending` and apply its completion.
    pub async fn drive(&mut self, pending: PendingQuery) -> bool {
        let completed = pending.send(&self.transport).await;
        self.resolve(completed)
    }

    /// Re-render held rows in `locale`. Never queries.
    pub fn on_locale_changed(&mut self, locale: Locale) {
        self.locale = locale;
        if let ViewState::Populated(rows) = &self.state {
            self.rendered = self.renderer.project_all(rows, locale);
        }
    }

    /// The spanning row to show instead of data, if any.
    #[must_use]
    pub fn placeholder(&self) -> Option<Placeholder> {
        let colspan = self.schema.column_count();
        let locale = self.locale;
        match &self.state {
            ViewState::Idle | ViewState::Populated(_) => None,
            ViewState::Loading => Some(Placeholder {
                kind: PlaceholderKind::Spinner,
                title: Message::Loading.text(locale),
                detail: None,
                colspan,
            }),
            ViewState::Empty => Some(Placeholder {
                kind: PlaceholderKind::Empty,
                title: Message::NoData.text(locale),
                detail: Some(Message::NoDataDetail.text(locale)),
                colspan,
            }),
            ViewState::Errored(failure) => Some(Placeholder {
                kind: PlaceholderKind::Error,
                title: Message::ErrorOccurred.text(locale),
                detail: Some(failure.localized(locale)),
                colspan,
            }),
        }
    }

    /// An export of the current filters.
    #[must_use]
    pub fn export_request(&self) -> ExportRequest {
        ExportRequest::new(
            self.schema,
            self.filters.filters().clone(),
            self.locale,
            self.clock.today(),
        )
    }

    /// Request an export of the current filters.
    ///
    /// # Errors
    ///
    /// Returns a [`QueryFailure`] if the export request fails.
    pub async fn export(&self) -> Result<ExportFile, QueryFailure> {
        self.export_request().send(&self.transport).await
    }

    #[must_use]
    pub fn kind(&self) -> LogKind {
        self.schema.kind
    }

    #[must_use]
    pub fn schema(&self) -> &'static LogSchema {
        self.schema
    }

    #[must_use]
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    #[must_use]
    pub fn rows(&self) -> &[DisplayRow] {
        &self.rendered
    }

    #[must_use]
    pub fn headers(&self) -> Vec<&'static str> {
        self.renderer.headers(self.locale)
    }

    #[must_use]
    pub fn filters(&self) -> &FilterSet {
        self.filters.filters()
    }

    #[must_use]
    pub fn cursor(&self) -> PageCursor {
        self.pagination.cursor()
    }

    #[must_use]
    pub fn can_go_next(&self) -> bool {
        self.pagination.can_go_next()
    }

    #[must_use]
    pub fn can_go_previous(&self) -> bool {
        self.pagination.can_go_previous()
    }

    #[must_use]
    pub fn locale(&self) -> Locale {
        self.locale
    }

    #[must_use]
    pub fn current_token(&self) -> RequestToken {
        self.client.current_token()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn issue(&mut self) -> PendingQuery {
        let pending = self
            .client
            .issue(self.filters.filters(), self.pagination.cursor(), self.locale);
        self.transition(ViewState::Loading);
        pending
    }

    fn transition(&mut self, next: ViewState) {
        tracing::debug!(kind = %self.schema.kind, from = self.state.name(), to = next.name(), "view state");
        self.state = next;
    }
}
