//! Export trigger: asks the server for a CSV of the filtered log.

use chrono::NaiveDate;

use batlog_domain::error::QueryFailure;
use batlog_domain::filter::FilterSet;
use batlog_domain::locale::Locale;
use batlog_domain::log_kind::LogSchema;
use batlog_domain::time::format_filter_date;

use crate::ports::LogTransport;

/// An export request for the current filters. Page and view state do not apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    endpoint: &'static str,
    prefix: &'static str,
    filters: FilterSet,
    locale: Locale,
    date: NaiveDate,
}

impl ExportRequest {
    #[must_use]
    pub fn new(schema: &'static LogSchema, filters: FilterSet, locale: Locale, date: NaiveDate) -> Self {
        Self {
            endpoint: schema.export_endpoint,
            prefix: schema.export_prefix,
            filters,
            locale,
            date,
        }
    }

    #[must_use]
    pub fn endpoint(&self) -> &'static str {
        self.endpoint
    }

    /// `<prefix>_<YYYY-MM-DD>.csv`
    #[must_use]
    pub fn filename(&self) -> String {
        format!("{}_{}.csv", self.prefix, format_filter_date(self.date))
    }

    /// The `{filters}` request body.
    #[must_use]
    pub fn body(&self) -> serde_json::Value {
        serde_json::json!({ "filters": self.filters.to_json() })
    }

    /// Request the export.
    ///
    /// # Errors
    ///
    /// Returns a [`QueryFailure`] when the request fails or the server
    /// answers with a non-success status.
    #[tracing::instrument(skip_all, fields(endpoint = self.endpoint))]
    pub async fn send<T: LogTransport>(&self, transport: &T) -> Result<ExportFile, QueryFailure> {
        let reply = transport
            .post_json(self.endpoint, self.locale, &self.body())
            .await?
            .into_success()?;
        tracing::debug!(bytes = reply.body.len(), "export received");
        Ok(ExportFile {
            filename: self.filename(),
            content: reply.body,
        })
    }
}

/// A downloaded export, ready to be saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub filename: String,
    pub content: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::HttpReply;
    use crate::testing::StubTransport;
    use batlog_domain::filter::FilterKey;
    use batlog_domain::log_kind::LogKind;

    fn request(kind: LogKind) -> ExportRequest {
        let mut filters = FilterSet::new();
        filters.insert(FilterKey::Arm, 1_u8);
        ExportRequest::new(
            kind.schema(),
            filters,
            Locale::En,
            NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
        )
    }

    #[test]
    fn should_name_file_after_prefix_and_date() {
        assert_eq!(request(LogKind::Battery).filename(), "battery_logs_export_2026-10-16.csv");
        assert_eq!(request(LogKind::Event).filename(), "logs_2026-10-16.csv");
    }

    #[tokio::test]
    async fn should_post_filters_only() {
        let transport = StubTransport::default();
        transport.push(HttpReply::new(200, "a,b\n1,2\n"));

        let file = request(LogKind::Arm).send(&transport).await.unwrap();

        assert_eq!(file.filename, "arm_logs_export_2026-10-16.csv");
        assert_eq!(file.content, b"a,b\n1,2\n");
        let sent = transport.requests();
        assert_eq!(sent[0].path, "/api/arm-logs/export");
        assert_eq!(sent[0].body, Some(serde_json::json!({"filters": {"arm": 1}})));
    }

    #[tokio::test]
    async fn should_surface_server_failure() {
        let transport = StubTransport::default();
        transport.push(HttpReply::json(500, &serde_json::json!({"error": "disk full"})));

        let result = request(LogKind::Arm).send(&transport).await;

        assert!(matches!(result, Err(QueryFailure::Server { status: 500, .. })));
    }
}
