//! Measurement catalog: what a measurement code means for each entity category.
//!
//! The same numeric code denotes different physical quantities depending on
//! whether the reading came from an arm or from a battery (code 10 is the
//! arm current but the battery voltage). The mapping lives in one table.

use serde::{Deserialize, Serialize};

use crate::locale::{Locale, LocalizedText};

/// Battery address under which arm-level readings are reported.
pub const ARM_ADDRESS: i64 = 2;

/// The kind of entity a reading belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityCategory {
    Arm,
    Battery,
}

impl EntityCategory {
    /// Derive the category from a row's battery address.
    #[must_use]
    pub fn from_address(address: i64) -> Self {
        if address == ARM_ADDRESS {
            Self::Arm
        } else {
            Self::Battery
        }
    }
}

/// Numeric code identifying the measured quantity within a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MeasurementCode(pub u16);

/// One catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Measurement {
    pub category: EntityCategory,
    pub code: MeasurementCode,
    pub name: LocalizedText,
    pub unit: &'static str,
}

impl Measurement {
    #[must_use]
    pub fn name(&self, locale: Locale) -> &'static str {
        self.name.get(locale)
    }
}

const fn entry(
    category: EntityCategory,
    code: u16,
    tr: &'static str,
    en: &'static str,
    unit: &'static str,
) -> Measurement {
    Measurement {
        category,
        code: MeasurementCode(code),
        name: LocalizedText::new(tr, en),
        unit,
    }
}

/// Every known `(category, code)` pair.
pub static CATALOG: [Measurement; 9] = [
    entry(EntityCategory::Arm, 10, "Akım", "Current", "A"),
    entry(EntityCategory::Arm, 11, "Nem", "Humidity", "%"),
    entry(EntityCategory::Arm, 12, "Sıcaklık", "Temperature", "°C"),
    entry(EntityCategory::Battery, 10, "Gerilim", "Voltage", "V"),
    entry(EntityCategory::Battery, 11, "Şarj Durumu", "Charge Status", "%"),
    entry(EntityCategory::Battery, 12, "Modül Sıcaklığı", "Module Temperature", "°C"),
    entry(
        EntityCategory::Battery,
        13,
        "Pozitif Kutup Başı Sıcaklığı",
        "Positive Terminal Temperature",
        "°C",
    ),
    entry(
        EntityCategory::Battery,
        14,
        "Negatif Kutup Başı Sıcaklığı",
        "Negative Terminal Temperature",
        "°C",
    ),
    entry(EntityCategory::Battery, 126, "Sağlık Durumu", "Health Status", "%"),
];

/// Resolve a discriminant pair against the catalog.
#[must_use]
pub fn lookup(category: EntityCategory, code: MeasurementCode) -> Option<&'static Measurement> {
    CATALOG
        .iter()
        .find(|entry| entry.category == category && entry.code == code)
}

/// All measurements of one category, in catalog order.
pub fn of_category(category: EntityCategory) -> impl Iterator<Item = &'static Measurement> {
    CATALOG.iter().filter(move |entry| entry.category == category)
}
