//! Locale store port: the persisted language selection.

use std::cell::Cell;

use batlog_domain::locale::Locale;

/// Small persisted key-value store holding the selected language.
///
/// Reads are synchronous snapshots; writes come only from the locale
/// control, so no locking is involved.
pub trait LocaleStore {
    /// The stored locale, if one was ever saved.
    fn load(&self) -> Option<Locale>;

    /// Persist `locale`. Storage failures are not reported.
    fn save(&self, locale: Locale);
}

/// Process-local store used by the CLI and in tests.
#[derive(Debug, Default)]
pub struct MemoryLocaleStore {
    current: Cell<Option<Locale>>,
}

impl MemoryLocaleStore {
    /// A store pre-seeded with `locale`.
    #[must_use]
    pub fn with_locale(locale: Locale) -> Self {
        Self {
            current: Cell::new(Some(locale)),
        }
    }
}

impl LocaleStore for MemoryLocaleStore {
    fn load(&self) -> Option<Locale> {
        self.current.get()
    }

    fn save(&self, locale: Locale) {
        self.current.set(Some(locale));
    }
}
