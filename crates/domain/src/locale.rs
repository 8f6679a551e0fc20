//! Display locales supported by the dashboard.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A display language. Turkish is the dashboard default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Tr,
    En,
}

impl Locale {
    /// Every supported locale, in menu order.
    pub const ALL: [Locale; 2] = [Locale::Tr, Locale::En];

    /// The short language tag persisted and sent as `X-Language`.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Tr => "tr",
            Self::En => "en",
        }
    }

    /// `strftime` pattern for day, month, year, hour:minute:second.
    #[must_use]
    pub fn timestamp_pattern(self) -> &'static str {
        match self {
            Self::Tr => "%d.%m.%Y %H:%M:%S",
            Self::En => "%d/%m/%Y %H:%M:%S",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Returned when a language tag names no supported locale.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported locale {0:?}")]
pub struct UnknownLocale(pub String);

impl FromStr for Locale {
    type Err = UnknownLocale;

    /// Accepts bare tags (`en`) and region-qualified ones (`en-US`, `tr_TR`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let primary = s
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match primary.as_str() {
            "tr" => Ok(Self::Tr),
            "en" => Ok(Self::En),
            _ => Err(UnknownLocale(s.to_string())),
        }
    }
}

/// A piece of UI text in every supported locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalizedText {
    pub tr: &'static str,
    pub en: &'static str,
}

impl LocalizedText {
    #[must_use]
    pub const fn new(tr: &'static str, en: &'static str) -> Self {
        Self { tr, en }
    }

    #[must_use]
    pub fn get(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::Tr => self.tr,
            Locale::En => self.en,
        }
    }
}
