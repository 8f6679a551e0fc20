use leptos::prelude::*;

use batlog_domain::locale::Locale;

use crate::locale::use_locale;

/// Shown when no route matches.
#[component]
pub fn NotFound() -> impl IntoView {
    let locale = use_locale();
    let (title, back) = match locale.get_untracked() {
        Locale::Tr => ("404 - Sayfa Bulunamadı", "Loglara dön"),
        Locale::En => ("404 - Page Not Found", "Back to logs"),
    };

    view! {
        <div class="not-found">
            <h1>{title}</h1>
            <p>
                <a href="/logs">{back}</a>
            </p>
        </div>
    }
}
