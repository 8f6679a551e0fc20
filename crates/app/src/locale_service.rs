//! Locale service: the active language and its change notifications.

use std::cell::Cell;

use tokio::sync::broadcast;

use batlog_domain::locale::Locale;

use crate::ports::LocaleStore;

/// Owns the active [`Locale`] and notifies views when it changes.
///
/// The initial locale is read from the store once; later changes are
/// persisted and broadcast to every subscriber. Re-selecting the active
/// locale is a no-op.
pub struct LocaleService<S> {
    store: S,
    current: Cell<Locale>,
    sender: broadcast::Sender<Locale>,
}

impl<S: LocaleStore> LocaleService<S> {
    /// Create a service seeded from `store`, with the given channel capacity.
    #[must_use]
    pub fn new(store: S, capacity: usize) -> Self {
        let current = store.load().unwrap_or_default();
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            store,
            current: Cell::new(current),
            sender,
        }
    }

    #[must_use]
    pub fn current_locale(&self) -> Locale {
        self.current.get()
    }

    /// Switch to `locale`, persist it and notify subscribers.
    ///
    /// Returns whether the locale changed.
    pub fn set_locale(&self, locale: Locale) -> bool {
        if self.current.get() == locale {
            return false;
        }
        self.current.set(locale);
        self.store.save(locale);
        tracing::debug!(%locale, "locale changed");
        // send fails only when nobody listens
        let _ = self.sender.send(locale);
        true
    }

    /// Receive every locale set *after* this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Locale> {
        self.sender.subscribe()
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::MemoryLocaleStore;

    #[test]
    fn should_default_to_turkish_without_stored_locale() {
        let service = LocaleService::new(MemoryLocaleStore::default(), 4);
        assert_eq!(service.current_locale(), Locale::Tr);
    }

    #[test]
    fn should_start_from_stored_locale() {
        let service = LocaleService::new(MemoryLocaleStore::with_locale(Locale::En), 4);
        assert_eq!(service.current_locale(), Locale::En);
    }

    #[tokio::test]
    async fn should_persist_and_broadcast_change() {
        let service = LocaleService::new(MemoryLocaleStore::default(), 4);
        let mut rx = service.subscribe();

        assert!(service.set_locale(Locale::En));

        assert_eq!(rx.recv().await.unwrap(), Locale::En);
        assert_eq!(service.store().load(), Some(Locale::En));
        assert_eq!(service.current_locale(), Locale::En);
    }

    #[test]
    fn should_ignore_reselecting_active_locale() {
        let service = LocaleService::new(MemoryLocaleStore::default(), 4);
        let mut rx = service.subscribe();

        assert!(!service.set_locale(Locale::Tr));

        assert!(rx.try_recv().is_err());
        assert_eq!(service.store().load(), None);
    }

    #[test]
    fn should_succeed_without_subscribers() {
        let service = LocaleService::new(MemoryLocaleStore::default(), 4);
        assert!(service.set_locale(Locale::En));
    }
}
