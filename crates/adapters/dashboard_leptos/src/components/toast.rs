//! Transient notifications carrying a catalog message and an optional
//! failure, both rendered in the current language.

use leptos::prelude::*;
use leptos::task::spawn_local;

use batlog_domain::error::QueryFailure;
use batlog_domain::locale::Locale;
use batlog_domain::messages::Message;

use crate::locale::use_locale;

/// Milliseconds before a notification dismisses itself.
const DISMISS_AFTER_MS: u32 = 5000;

#[derive(Debug, Clone, PartialEq)]
struct Notice {
    id: u32,
    title: Message,
    cause: Option<QueryFailure>,
}

fn notice_text(title: Message, cause: Option<&QueryFailure>, locale: Locale) -> String {
    match cause {
        Some(cause) => format!("{}: {}", title.text(locale), cause.localized(locale)),
        None => title.text(locale).to_string(),
    }
}

/// Handle for raising notifications from any component below
/// [`ToastContainer`].
#[derive(Clone, Copy)]
pub struct Toasts {
    notices: RwSignal<Vec<Notice>>,
    next_id: StoredValue<u32>,
}

impl Toasts {
    /// Show `title`, followed by the localized `cause` when there is one.
    pub fn raise(&self, title: Message, cause: Option<QueryFailure>) {
        let id = self.next_id.get_value();
        self.next_id.set_value(id.wrapping_add(1));
        self.notices.update(|list| list.push(Notice { id, title, cause }));

        let notices = self.notices;
        spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(DISMISS_AFTER_MS).await;
            notices.try_update(|list| list.retain(|notice| notice.id != id));
        });
    }

    pub fn dismiss(&self, id: u32) {
        self.notices.update(|list| list.retain(|notice| notice.id != id));
    }
}

/// The notification handle, if a [`ToastContainer`] is mounted above.
pub fn use_toasts() -> Option<Toasts> {
    use_context::<Toasts>()
}

/// Provides [`Toasts`] to `children` and renders the active notifications.
#[component]
pub fn ToastContainer(children: Children) -> impl IntoView {
    let locale = use_locale();
    let toasts = Toasts {
        notices: RwSignal::new(Vec::new()),
        next_id: StoredValue::new(0),
    };
    provide_context(toasts);

    view! {
        {children()}
        <div class="toast-container">
            <For
                each=move || toasts.notices.get()
                key=|notice| notice.id
                children=move |Notice { id, title, cause }| {
                    let text = move || notice_text(title, cause.as_ref(), locale.get());
                    view! {
                        <div class="toast toast-error">
                            <button class="toast-dismiss" on:click=move |_| toasts.dismiss(id)>
                                "\u{00D7}"
                            </button>
                            {text}
                        </div>
                    }
                }
            />
        </div>
    }
}
