//! Projection of log rows into display text.

use chrono::FixedOffset;

use batlog_domain::locale::Locale;
use batlog_domain::log_kind::{CellFormat, Column, Discriminant, LogSchema};
use batlog_domain::log_row::LogRow;
use batlog_domain::measurement::{self, EntityCategory, Measurement, MeasurementCode};
use batlog_domain::messages::Message;

/// Text shown for a missing or unreadable value.
pub const PLACEHOLDER: &str = "-";

/// Format a reading with three decimals and its unit.
///
/// Missing and non-finite values render as [`PLACEHOLDER`].
#[must_use]
pub fn format_reading(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(value) if value.is_finite() && unit.is_empty() => format!("{value:.3}"),
        Some(value) if value.is_finite() => format!("{value:.3} {unit}"),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Format a row timestamp in the locale's calendar format.
#[must_use]
pub fn format_timestamp(row: &LogRow, offset: FixedOffset, locale: Locale) -> String {
    row.timestamp().map_or_else(
        || PLACEHOLDER.to_string(),
        |ts| {
            ts.with_timezone(&offset)
                .format(locale.timestamp_pattern())
                .to_string()
        },
    )
}

/// Status of a generic event row, used for badge styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowStatus {
    Success,
    Warning,
    Error,
}

impl RowStatus {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "success" => Some(Self::Success),
            "warning" => Some(Self::Warning),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    #[must_use]
    pub fn label(self, locale: Locale) -> &'static str {
        match self {
            Self::Success => Message::StatusSuccess.text(locale),
            Self::Warning => Message::StatusWarning.text(locale),
            Self::Error => Message::StatusError.text(locale),
        }
    }

    /// Lowercase wire name, also used as a CSS modifier.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// A display-ready row: one text cell per schema column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    pub cells: Vec<String>,
    pub status: Option<RowStatus>,
}

/// Pure projection from rows to display rows for one log kind.
#[derive(Debug, Clone, Copy)]
pub struct LogRenderer {
    schema: &'static LogSchema,
    offset: FixedOffset,
}

impl LogRenderer {
    #[must_use]
    pub fn new(schema: &'static LogSchema, offset: FixedOffset) -> Self {
        Self { schema, offset }
    }

    /// Localized column headers.
    #[must_use]
    pub fn headers(&self, locale: Locale) -> Vec<&'static str> {
        self.schema
            .columns
            .iter()
            .map(|column| column.header.get(locale))
            .collect()
    }

    #[must_use]
    pub fn project(&self, row: &LogRow, locale: Locale) -> DisplayRow {
        let mut status = None;
        let cells = self
            .schema
            .columns
            .iter()
            .map(|column| {
                if column.format == CellFormat::Status {
                    status = row.text(column.field).as_deref().and_then(RowStatus::parse);
                }
                self.cell(row, column, locale)
            })
            .collect();
        DisplayRow { cells, status }
    }

    #[must_use]
    pub fn project_all(&self, rows: &[LogRow], locale: Locale) -> Vec<DisplayRow> {
        rows.iter().map(|row| self.project(row, locale)).collect()
    }

    fn cell(&self, row: &LogRow, column: &Column, locale: Locale) -> String {
        match column.format {
            CellFormat::Timestamp => format_timestamp(row, self.offset, locale),
            CellFormat::Identifier => row
                .text(column.field)
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
            CellFormat::Reading { unit } => format_reading(row.number(column.field), unit),
            CellFormat::MeasurementName(discriminant) => {
                match resolve_measurement(row, discriminant) {
                    Some(measurement) => measurement.name(locale).to_string(),
                    None => row
                        .text("name")
                        .unwrap_or_else(|| Message::Unknown.text(locale).to_string()),
                }
            }
            CellFormat::MeasurementReading(discriminant) => {
                let unit = match resolve_measurement(row, discriminant) {
                    Some(measurement) => measurement.unit.to_string(),
                    None => row.text("unit").unwrap_or_default(),
                };
                format_reading(row.number(column.field), &unit)
            }
            CellFormat::Status => match row.text(column.field) {
                Some(raw) => RowStatus::parse(&raw)
                    .map_or_else(|| raw.to_uppercase(), |status| status.label(locale).to_string()),
                None => PLACEHOLDER.to_string(),
            },
        }
    }
}

fn resolve_measurement(row: &LogRow, discriminant: Discriminant) -> Option<&'static Measurement> {
    let address = row.integer(discriminant.address_field)?;
    let code = u16::try_from(row.integer(discriminant.code_field)?).ok()?;
    measurement::lookup(EntityCategory::from_address(address), MeasurementCode(code))
}
