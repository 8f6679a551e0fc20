use leptos::prelude::*;

use batlog_domain::locale::Locale;

use crate::locale::use_locale;

/// Switches between Turkish and English.
#[component]
pub fn LanguageToggle() -> impl IntoView {
    let locale = use_locale();
    let next = move || match locale.get() {
        Locale::Tr => Locale::En,
        Locale::En => Locale::Tr,
    };

    view! {
        <button
            class="language-toggle"
            title=move || next().tag()
            on:click=move |_| locale.set(next())
        >
            {move || next().tag().to_uppercase()}
        </button>
    }
}
