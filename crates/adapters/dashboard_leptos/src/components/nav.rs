use leptos::prelude::*;

use batlog_domain::messages::Message;

use super::LanguageToggle;
use crate::locale::use_locale;

#[component]
pub fn Nav() -> impl IntoView {
    let locale = use_locale();
    let label = move |message: Message| move || message.text(locale.get());

    view! {
        <nav>
            <ul>
                <li><a href="/arm-logs">{label(Message::ArmLogs)}</a></li>
                <li><a href="/battery-logs">{label(Message::BatteryLogs)}</a></li>
                <li><a href="/logs">{label(Message::EventLogs)}</a></li>
            </ul>
            <LanguageToggle/>
        </nav>
    }
}
