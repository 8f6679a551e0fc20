//! Language selection: `localStorage` persistence and the shared locale context.

use leptos::prelude::*;
use tokio::sync::broadcast;

use batlog_app::locale_service::LocaleService;
use batlog_app::ports::LocaleStore;
use batlog_domain::locale::Locale;

/// Key used to persist the language in `localStorage`.
const STORAGE_KEY: &str = "language";

fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

/// [`LocaleStore`] backed by `localStorage`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageLocaleStore;

impl LocaleStore for LocalStorageLocaleStore {
    fn load(&self) -> Option<Locale> {
        storage()?.get_item(STORAGE_KEY).ok().flatten()?.parse().ok()
    }

    fn save(&self, locale: Locale) {
        if let Some(storage) = storage() {
            let _ = storage.set_item(STORAGE_KEY, locale.tag());
        }
    }
}

/// Set the `lang` attribute on `<html>`.
fn apply_lang(locale: Locale) {
    if let Some(el) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|doc| doc.document_element())
    {
        let _ = el.set_attribute("lang", locale.tag());
    }
}

/// Reactive handle on the page-wide [`LocaleService`].
#[derive(Clone, Copy)]
pub struct LocaleContext {
    service: StoredValue<LocaleService<LocalStorageLocaleStore>, LocalStorage>,
    locale: RwSignal<Locale>,
}

impl LocaleContext {
    /// Create the service from `localStorage` and provide it as context.
    pub fn provide() -> Self {
        let service = LocaleService::new(LocalStorageLocaleStore, 8);
        let initial = service.current_locale();
        apply_lang(initial);
        let ctx = Self {
            service: StoredValue::new_local(service),
            locale: RwSignal::new(initial),
        };
        provide_context(ctx);
        ctx
    }

    /// The active locale, tracked.
    pub fn get(&self) -> Locale {
        self.locale.get()
    }

    pub fn get_untracked(&self) -> Locale {
        self.locale.get_untracked()
    }

    /// Switch language; persisted and broadcast to every log page.
    pub fn set(&self, locale: Locale) {
        let changed = self.service.with_value(|service| service.set_locale(locale));
        if changed {
            apply_lang(locale);
            self.locale.set(locale);
        }
    }

    /// Receive later language changes.
    pub fn subscribe(&self) -> broadcast::Receiver<Locale> {
        self.service.with_value(LocaleService::subscribe)
    }
}

/// The locale context, created on first use.
pub fn use_locale() -> LocaleContext {
    use_context::<LocaleContext>().unwrap_or_else(LocaleContext::provide)
}
