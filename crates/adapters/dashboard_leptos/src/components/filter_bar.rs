//! Filter form of a log page.

use leptos::prelude::*;

use batlog_app::arm_options::{
    arm_options, battery_options, fetch_active_arms, ArmPolicy, BatteryChoices, SelectOption,
};
use batlog_app::log_view::RowStatus;
use batlog_domain::filter::{FilterKey, FilterSet, FilterValue};
use batlog_domain::locale::Locale;
use batlog_domain::log_kind::LogKind;
use batlog_domain::measurement::CATALOG;
use batlog_domain::messages::Message;

use crate::locale::use_locale;
use crate::transport::GlooTransport;

fn select_options(options: Vec<SelectOption>, selected: &str) -> impl IntoView {
    options
        .into_iter()
        .map(|option| {
            let is_selected = option.value == selected;
            view! {
                <option value=option.value disabled=option.disabled selected=is_selected>
                    {option.label}
                </option>
            }
        })
        .collect_view()
}

/// One option per distinct measurement code; a code shared by arm and
/// battery readings lists both names.
fn dtype_options(locale: Locale) -> Vec<SelectOption> {
    let mut options = vec![SelectOption {
        value: String::new(),
        label: Message::AllTypes.text(locale).to_string(),
        disabled: false,
    }];
    for measurement in &CATALOG {
        let value = measurement.code.0.to_string();
        let name = measurement.name(locale);
        match options.iter_mut().find(|option| option.value == value) {
            Some(option) => {
                option.label.push_str(" / ");
                option.label.push_str(name);
            }
            None => options.push(SelectOption {
                label: name.to_string(),
                value,
                disabled: false,
            }),
        }
    }
    options
}

fn status_options(locale: Locale) -> Vec<SelectOption> {
    let all = SelectOption {
        value: String::new(),
        label: Message::AllStatuses.text(locale).to_string(),
        disabled: false,
    };
    std::iter::once(all)
        .chain(
            [RowStatus::Success, RowStatus::Warning, RowStatus::Error].map(|status| SelectOption {
                value: status.as_str().to_string(),
                label: status.label(locale).to_string(),
                disabled: false,
            }),
        )
        .collect()
}

fn selected_arm(filters: &FilterSet) -> Option<u8> {
    match filters.get(FilterKey::Arm)? {
        FilterValue::Int(arm) => u8::try_from(*arm).ok(),
        FilterValue::Text(text) => text.parse().ok(),
    }
}

#[component]
pub fn FilterBar(
    kind: LogKind,
    #[prop(into)] filters: Signal<FilterSet>,
    #[prop(into)] error: Signal<Option<String>>,
    #[prop(into)] busy: Signal<bool>,
    on_change: Callback<(FilterKey, String)>,
    on_apply: Callback<()>,
    on_clear: Callback<()>,
    on_refresh: Callback<()>,
    on_export: Callback<()>,
) -> impl IntoView {
    let locale = use_locale();
    let schema = kind.schema();
    let transport = use_context::<GlooTransport>().unwrap_or_default();

    let active_arms = LocalResource::new(move || {
        let transport = transport.clone();
        let locale = locale.get_untracked();
        async move {
            fetch_active_arms(&transport, locale)
                .await
                .unwrap_or_else(|err| {
                    leptos::logging::warn!("active arms unavailable: {err}");
                    Vec::new()
                })
        }
    });
    let arms = move || active_arms.get().unwrap_or_default();
    let current = move |key: FilterKey| {
        filters.with(|set| set.get(key).map(ToString::to_string).unwrap_or_default())
    };
    let change = move |key: FilterKey| {
        move |ev: leptos::ev::Event| on_change.run((key, event_target_value(&ev)))
    };
    let text = move |message: Message| move || message.text(locale.get());

    let arm_select = schema.supports(FilterKey::Arm).then(|| {
        let policy = match kind {
            LogKind::Arm => ArmPolicy::DisableEmpty,
            LogKind::Battery | LogKind::Event => ArmPolicy::HideEmpty,
        };
        view! {
            <select class="filter-arm" on:change=change(FilterKey::Arm)>
                {move || {
                    select_options(arm_options(&arms(), locale.get(), policy), &current(FilterKey::Arm))
                }}
            </select>
        }
    });

    let battery_select = schema.supports(FilterKey::Battery).then(|| {
        let choices = move || battery_options(&arms(), filters.with(selected_arm), locale.get());
        view! {
            <select
                class="filter-battery"
                disabled=move || !matches!(choices(), BatteryChoices::Batteries(_))
                on:change=change(FilterKey::Battery)
            >
                {move || match choices() {
                    BatteryChoices::Batteries(options) => {
                        select_options(options, &current(FilterKey::Battery)).into_any()
                    }
                    other => view! { <option value="">{other.prompt(locale.get())}</option> }.into_any(),
                }}
            </select>
        }
    });

    let dtype_select = schema.supports(FilterKey::Dtype).then(|| {
        view! {
            <label>
                {text(Message::DataType)}
                <select class="filter-dtype" on:change=change(FilterKey::Dtype)>
                    {move || select_options(dtype_options(locale.get()), &current(FilterKey::Dtype))}
                </select>
            </label>
        }
    });

    let status_select = schema.supports(FilterKey::Status).then(|| {
        view! {
            <label>
                {text(Message::Status)}
                <select class="filter-status" on:change=change(FilterKey::Status)>
                    {move || select_options(status_options(locale.get()), &current(FilterKey::Status))}
                </select>
            </label>
        }
    });

    view! {
        <form class="filter-bar" on:submit=move |ev| {
            ev.prevent_default();
            on_apply.run(());
        }>
            {arm_select}
            {battery_select}
            {dtype_select}
            {status_select}
            <label>
                {text(Message::StartDate)}
                <input
                    type="date"
                    prop:value=move || current(FilterKey::StartDate)
                    on:change=change(FilterKey::StartDate)
                />
            </label>
            <label>
                {text(Message::EndDate)}
                <input
                    type="date"
                    prop:value=move || current(FilterKey::EndDate)
                    on:change=change(FilterKey::EndDate)
                />
            </label>
            <div class="filter-actions">
                <button type="submit" disabled=move || busy.get()>{text(Message::Filter)}</button>
                <button type="button" disabled=move || busy.get() on:click=move |_| on_clear.run(())>
                    {text(Message::ClearFilters)}
                </button>
                <button type="button" disabled=move || busy.get() on:click=move |_| on_refresh.run(())>
                    {text(Message::Refresh)}
                </button>
                <button type="button" on:click=move |_| on_export.run(())>
                    {text(Message::Export)}
                </button>
            </div>
            {move || error.get().map(|message| view! { <p class="form-error">{message}</p> })}
        </form>
    }
}
