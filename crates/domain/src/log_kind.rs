//! Log kinds and their schemas.
//!
//! The three log pages differ only in endpoint, column set and accepted
//! filters. Each [`LogSchema`] captures those differences as data so a
//! single view implementation can serve all of them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::filter::FilterKey;
use crate::locale::LocalizedText;

/// One of the browsable logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogKind {
    /// Arm-level measurements (current, humidity, temperatures).
    Arm,
    /// Per-battery measurements.
    Battery,
    /// Generic event log of raw `(address, code, value)` readings.
    Event,
}

impl LogKind {
    pub const ALL: [LogKind; 3] = [LogKind::Arm, LogKind::Battery, LogKind::Event];

    /// The schema describing this log.
    #[must_use]
    pub fn schema(self) -> &'static LogSchema {
        match self {
            Self::Arm => &ARM_SCHEMA,
            Self::Battery => &BATTERY_SCHEMA,
            Self::Event => &EVENT_SCHEMA,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Arm => "arm",
            Self::Battery => "battery",
            Self::Event => "event",
        }
    }
}

impl fmt::Display for LogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no log kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown log kind {0:?} (expected arm, battery or event)")]
pub struct UnknownLogKind(pub String);

impl FromStr for LogKind {
    type Err = UnknownLogKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "arm" => Ok(Self::Arm),
            "battery" => Ok(Self::Battery),
            "event" | "events" | "logs" => Ok(Self::Event),
            _ => Err(UnknownLogKind(s.to_string())),
        }
    }
}

/// Row fields that together select a catalog measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Discriminant {
    /// Field holding the battery address (selects the entity category).
    pub address_field: &'static str,
    /// Field holding the measurement code.
    pub code_field: &'static str,
}

/// Discriminant fields of the generic event log.
pub const EVENT_DISCRIMINANT: Discriminant = Discriminant {
    address_field: "batteryAddress",
    code_field: "dtype",
};

/// How a column turns a row field into display text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellFormat {
    /// The row timestamp in the locale calendar format.
    Timestamp,
    /// An identifier shown verbatim (arm number, battery address).
    Identifier,
    /// A numeric reading with a fixed unit.
    Reading { unit: &'static str },
    /// The measurement name resolved through the discriminant.
    MeasurementName(Discriminant),
    /// A numeric reading whose unit is resolved through the discriminant.
    MeasurementReading(Discriminant),
    /// The row status as a localized badge label.
    Status,
}

/// A displayed column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    /// Row field read by this column.
    pub field: &'static str,
    pub header: LocalizedText,
    pub format: CellFormat,
}

const fn column(field: &'static str, tr: &'static str, en: &'static str, format: CellFormat) -> Column {
    Column {
        field,
        header: LocalizedText::new(tr, en),
        format,
    }
}

/// Everything that distinguishes one log page from another.
#[derive(Debug, PartialEq, Eq)]
pub struct LogSchema {
    pub kind: LogKind,
    /// Query endpoint (`POST`).
    pub endpoint: &'static str,
    /// Export endpoint (`POST`).
    pub export_endpoint: &'static str,
    /// File name prefix for exported CSV files.
    pub export_prefix: &'static str,
    pub columns: &'static [Column],
    /// Filter keys this log accepts.
    pub filters: &'static [FilterKey],
}

impl LogSchema {
    /// Number of columns, used as the span of placeholder rows.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Whether this log accepts `key` as a filter.
    #[must_use]
    pub fn supports(&self, key: FilterKey) -> bool {
        self.filters.contains(&key)
    }
}

static ARM_COLUMNS: [Column; 6] = [
    column("arm", "Kol", "Arm", CellFormat::Identifier),
    column("timestamp", "Zaman", "Time", CellFormat::Timestamp),
    column("current", "Akım", "Current", CellFormat::Reading { unit: "A" }),
    column("humidity", "Nem", "Humidity", CellFormat::Reading { unit: "%" }),
    column(
        "module_temperature",
        "Modül Sıcaklığı",
        "Module Temperature",
        CellFormat::Reading { unit: "°C" },
    ),
    column(
        "ambient_temperature",
        "Ortam Sıcaklığı",
        "Ambient Temperature",
        CellFormat::Reading { unit: "°C" },
    ),
];

static BATTERY_COLUMNS: [Column; 9] = [
    column("timestamp", "Zaman", "Time", CellFormat::Timestamp),
    column("arm", "Kol", "Arm", CellFormat::Identifier),
    column("batteryAddress", "Batarya Adresi", "Battery Address", CellFormat::Identifier),
    column("voltage", "Gerilim", "Voltage", CellFormat::Reading { unit: "V" }),
    column("charge_status", "Şarj Durumu", "Charge Status", CellFormat::Reading { unit: "%" }),
    column("temperature", "Sıcaklık", "Temperature", CellFormat::Reading { unit: "°C" }),
    column(
        "positive_pole_temp",
        "Pozitif Kutup Sıcaklığı",
        "Positive Terminal Temperature",
        CellFormat::Reading { unit: "°C" },
    ),
    column(
        "negative_pole_temp",
        "Negatif Kutup Sıcaklığı",
        "Negative Terminal Temperature",
        CellFormat::Reading { unit: "°C" },
    ),
    column("health_status", "Sağlık Durumu", "Health Status", CellFormat::Reading { unit: "%" }),
];

static EVENT_COLUMNS: [Column; 6] = [
    column("timestamp", "Zaman", "Time", CellFormat::Timestamp),
    column("arm", "Kol", "Arm", CellFormat::Identifier),
    column("batteryAddress", "Batarya Adresi", "Battery Address", CellFormat::Identifier),
    column("name", "Veri Türü", "Data Type", CellFormat::MeasurementName(EVENT_DISCRIMINANT)),
    column("data", "Veri", "Data", CellFormat::MeasurementReading(EVENT_DISCRIMINANT)),
    column("status", "Durum", "Status", CellFormat::Status),
];

static ARM_SCHEMA: LogSchema = LogSchema {
    kind: LogKind::Arm,
    endpoint: "/api/arm-logs",
    export_endpoint: "/api/arm-logs/export",
    export_prefix: "arm_logs_export",
    columns: &ARM_COLUMNS,
    filters: &[FilterKey::Arm, FilterKey::StartDate, FilterKey::EndDate],
};

static BATTERY_SCHEMA: LogSchema = LogSchema {
    kind: LogKind::Battery,
    endpoint: "/api/battery-logs",
    export_endpoint: "/api/battery-logs/export",
    export_prefix: "battery_logs_export",
    columns: &BATTERY_COLUMNS,
    filters: &[
        FilterKey::Arm,
        FilterKey::Battery,
        FilterKey::StartDate,
        FilterKey::EndDate,
    ],
};

static EVENT_SCHEMA: LogSchema = LogSchema {
    kind: LogKind::Event,
    endpoint: "/api/logs",
    export_endpoint: "/api/logs/export",
    export_prefix: "logs",
    columns: &EVENT_COLUMNS,
    filters: &[
        FilterKey::Arm,
        FilterKey::Battery,
        FilterKey::Dtype,
        FilterKey::Status,
        FilterKey::StartDate,
        FilterKey::EndDate,
    ],
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Locale;

    #[test]
    fn should_expose_column_counts_per_kind() {
        assert_eq!(LogKind::Arm.schema().column_count(), 6);
        assert_eq!(LogKind::Battery.schema().column_count(), 9);
        assert_eq!(LogKind::Event.schema().column_count(), 6);
    }

    #[test]
    fn should_point_each_kind_at_its_endpoints() {
        for kind in LogKind::ALL {
            let schema = kind.schema();
            assert_eq!(schema.kind, kind);
            assert!(schema.export_endpoint.starts_with(schema.endpoint));
            assert!(schema.export_endpoint.ends_with("/export"));
        }
    }

    #[test]
    fn should_accept_date_filters_for_every_kind() {
        for kind in LogKind::ALL {
            assert!(kind.schema().supports(FilterKey::StartDate));
            assert!(kind.schema().supports(FilterKey::EndDate));
        }
        assert!(!LogKind::Arm.schema().supports(FilterKey::Battery));
        assert!(LogKind::Event.schema().supports(FilterKey::Status));
    }

    #[test]
    fn should_parse_kind_names() {
        assert_eq!("Battery".parse::<LogKind>().unwrap(), LogKind::Battery);
        assert_eq!("logs".parse::<LogKind>().unwrap(), LogKind::Event);
        assert!("alarms".parse::<LogKind>().is_err());
    }

    #[test]
    fn should_localize_headers() {
        let header = LogKind::Battery.schema().columns[3].header;
        assert_eq!(header.get(Locale::Tr), "Gerilim");
        assert_eq!(header.get(Locale::En), "Voltage");
    }
}
