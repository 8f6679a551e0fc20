use leptos::prelude::*;

use batlog_domain::messages::Message;
use batlog_domain::page::PageCursor;

use crate::locale::use_locale;

/// Previous/next controls and the `page / total` indicator.
#[component]
pub fn Pager(
    #[prop(into)] cursor: Signal<PageCursor>,
    #[prop(into)] busy: Signal<bool>,
    on_previous: Callback<()>,
    on_next: Callback<()>,
) -> impl IntoView {
    let locale = use_locale();

    view! {
        <div class="pager">
            <button
                disabled=move || busy.get() || !cursor.get().has_previous()
                on:click=move |_| on_previous.run(())
            >
                {move || Message::PreviousPage.text(locale.get())}
            </button>
            <span class="page-info">
                {move || {
                    let cursor = cursor.get();
                    format!(
                        "{} {} / {}",
                        Message::Page.text(locale.get()),
                        cursor.current_page(),
                        cursor.total_pages(),
                    )
                }}
            </span>
            <button
                disabled=move || busy.get() || !cursor.get().has_next()
                on:click=move |_| on_next.run(())
            >
                {move || Message::NextPage.text(locale.get())}
            </button>
        </div>
    }
}
