//! Localized UI strings shared by every log view.

use crate::locale::{Locale, LocalizedText};

/// Keys for the fixed UI messages of the log pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Message {
    Loading,
    NoData,
    NoDataDetail,
    ErrorOccurred,
    NetworkFailure,
    ServerFailure,
    MalformedResponse,
    InvalidFilter,
    Unknown,
    StatusSuccess,
    StatusWarning,
    StatusError,
    AllArms,
    AllBatteries,
    Battery,
    SelectArmFirst,
    SelectBattery,
    NoBatteriesInArm,
    ExportFailed,
    ArmLogs,
    BatteryLogs,
    EventLogs,
    StartDate,
    EndDate,
    DataType,
    Status,
    AllTypes,
    AllStatuses,
    Filter,
    ClearFilters,
    Refresh,
    Export,
    PreviousPage,
    NextPage,
    Page,
}

impl Message {
    fn localized(self) -> LocalizedText {
        match self {
            Self::Loading => LocalizedText::new("Yükleniyor...", "Loading..."),
            Self::NoData => LocalizedText::new("Veri Bulunamadı", "No Data Found"),
            Self::NoDataDetail => LocalizedText::new(
                "Seçilen kriterlere uygun log verisi bulunamadı.",
                "No log data found matching the selected criteria.",
            ),
            Self::ErrorOccurred => LocalizedText::new("Hata Oluştu", "An Error Occurred"),
            Self::NetworkFailure => {
                LocalizedText::new("Sunucuya ulaşılamadı.", "The server could not be reached.")
            }
            Self::ServerFailure => {
                LocalizedText::new("Sunucu bir hata bildirdi.", "The server reported an error.")
            }
            Self::MalformedResponse => LocalizedText::new(
                "Sunucu yanıtı okunamadı.",
                "The server response could not be read.",
            ),
            Self::InvalidFilter => LocalizedText::new("Geçersiz filtre", "Invalid filter"),
            Self::Unknown => LocalizedText::new("Bilinmeyen", "Unknown"),
            Self::StatusSuccess => LocalizedText::new("BAŞARILI", "SUCCESS"),
            Self::StatusWarning => LocalizedText::new("UYARI", "WARNING"),
            Self::StatusError => LocalizedText::new("HATA", "ERROR"),
            Self::AllArms => LocalizedText::new("Tüm Kollar", "All Arms"),
            Self::AllBatteries => LocalizedText::new("Tüm Bataryalar", "All Batteries"),
            Self::Battery => LocalizedText::new("Batarya", "Battery"),
            Self::SelectArmFirst => LocalizedText::new("Önce kol seçin", "Select an arm first"),
            Self::SelectBattery => LocalizedText::new("Batarya seçin", "Select a battery"),
            Self::NoBatteriesInArm => {
                LocalizedText::new("Bu kolda batarya yok", "No batteries in this arm")
            }
            Self::ExportFailed => LocalizedText::new(
                "Dışa aktarma sırasında bir hata oluştu.",
                "An error occurred during export.",
            ),
            Self::ArmLogs => LocalizedText::new("Kol Logları", "Arm Logs"),
            Self::BatteryLogs => LocalizedText::new("Batarya Logları", "Battery Logs"),
            Self::EventLogs => LocalizedText::new("Loglar", "Logs"),
            Self::StartDate => LocalizedText::new("Başlangıç Tarihi", "Start Date"),
            Self::EndDate => LocalizedText::new("Bitiş Tarihi", "End Date"),
            Self::DataType => LocalizedText::new("Veri Türü", "Data Type"),
            Self::Status => LocalizedText::new("Durum", "Status"),
            Self::AllTypes => LocalizedText::new("Tüm Türler", "All Types"),
            Self::AllStatuses => LocalizedText::new("Tüm Durumlar", "All Statuses"),
            Self::Filter => LocalizedText::new("Filtrele", "Filter"),
            Self::ClearFilters => LocalizedText::new("Temizle", "Clear"),
            Self::Refresh => LocalizedText::new("Yenile", "Refresh"),
            Self::Export => LocalizedText::new("Dışa Aktar", "Export"),
            Self::PreviousPage => LocalizedText::new("Önceki", "Previous"),
            Self::NextPage => LocalizedText::new("Sonraki", "Next"),
            Self::Page => LocalizedText::new("Sayfa", "Page"),
        }
    }

    /// The message text in `locale`.
    #[must_use]
    pub fn text(self, locale: Locale) -> &'static str {
        self.localized().get(locale)
    }
}

/// Localized label for arm number `arm` (`"Kol 3"`, `"Arm 3"`).
#[must_use]
pub fn arm_label(arm: u8, locale: Locale) -> String {
    match locale {
        Locale::Tr => format!("Kol {arm}"),
        Locale::En => format!("Arm {arm}"),
    }
}
