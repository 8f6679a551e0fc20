//! One log page: a [`LogView`] driven by UI events.

use leptos::prelude::*;
use leptos::task::spawn_local;
use tokio::sync::broadcast::error::RecvError;

use batlog_app::log_view::{LogView, PendingQuery};
use batlog_domain::error::ValidationError;
use batlog_domain::filter::{FilterKey, FilterValue};
use batlog_domain::log_kind::{CellFormat, LogKind};
use batlog_domain::messages::Message;

use crate::components::toast::use_toasts;
use crate::components::{FilterBar, LogTable, Pager, TableSnapshot};
use crate::{clock, download};
use crate::locale::use_locale;
use crate::transport::GlooTransport;

/// Numeric filters are sent as integers when the input parses.
fn filter_value(key: FilterKey, raw: String) -> FilterValue {
    let raw = raw.trim().to_string();
    match key {
        FilterKey::Arm | FilterKey::Battery | FilterKey::Dtype => match raw.parse::<i64>() {
            Ok(number) => FilterValue::Int(number),
            Err(_) => FilterValue::Text(raw),
        },
        FilterKey::Status | FilterKey::StartDate | FilterKey::EndDate => FilterValue::Text(raw),
    }
}

fn snapshot(view: &LogView<GlooTransport>) -> TableSnapshot {
    TableSnapshot {
        headers: view.headers(),
        rows: view.rows().to_vec(),
        placeholder: view.placeholder(),
        status_column: view
            .schema()
            .columns
            .iter()
            .position(|column| column.format == CellFormat::Status),
    }
}

#[component]
pub fn LogPage(kind: LogKind) -> impl IntoView {
    let locale = use_locale();
    let transport = use_context::<GlooTransport>().unwrap_or_default();
    let toasts = use_toasts();

    let view = StoredValue::new_local(LogView::with_options(
        kind,
        transport,
        locale.get_untracked(),
        clock::view_options(),
    ));
    let revision = RwSignal::new(0_u64);
    let form_error = RwSignal::new(None::<String>);

    let bump = move || {
        revision.try_update(|n| *n += 1);
    };
    let dispatch = move |pending: PendingQuery| {
        bump();
        let Some(transport) = view.try_with_value(|v| v.transport().clone()) else {
            return;
        };
        spawn_local(async move {
            let completed = pending.send(&transport).await;
            if view.try_update_value(|v| v.resolve(completed)) == Some(true) {
                bump();
            }
        });
    };

    if let Some(pending) = view.try_update_value(LogView::mount) {
        dispatch(pending);
    }

    let mut changes = locale.subscribe();
    spawn_local(async move {
        loop {
            match changes.recv().await {
                Ok(next) => {
                    if view.try_update_value(|v| v.on_locale_changed(next)).is_none() {
                        break;
                    }
                    bump();
                }
                Err(RecvError::Lagged(_)) => {}
                Err(RecvError::Closed) => break,
            }
        }
    });

    let table = Signal::derive(move || {
        revision.track();
        view.try_with_value(snapshot).unwrap_or_default()
    });
    let filters = Signal::derive(move || {
        revision.track();
        view.try_with_value(|v| v.filters().clone())
            .unwrap_or_default()
    });
    let cursor = Signal::derive(move || {
        revision.track();
        view.try_with_value(LogView::cursor).unwrap_or_default()
    });
    let busy = Signal::derive(move || {
        revision.track();
        view.try_with_value(|v| v.state().is_loading())
            .unwrap_or(false)
    });

    let on_change = Callback::new(move |(key, raw): (FilterKey, String)| {
        let value = filter_value(key, raw);
        let result = view.try_update_value(|v| {
            v.set_filter(key, value)?;
            if key == FilterKey::Arm && v.schema().supports(FilterKey::Battery) {
                v.set_filter(FilterKey::Battery, "")?;
            }
            Ok::<(), ValidationError>(())
        });
        if let Some(Err(err)) = result {
            form_error.set(Some(err.localized(locale.get_untracked())));
        }
        bump();
    });
    let on_apply = Callback::new(move |()| match view.try_update_value(LogView::apply_filters) {
        Some(Ok(pending)) => {
            form_error.set(None);
            dispatch(pending);
        }
        Some(Err(err)) => form_error.set(Some(err.localized(locale.get_untracked()))),
        None => {}
    });
    let on_clear = Callback::new(move |()| {
        form_error.set(None);
        if let Some(pending) = view.try_update_value(LogView::clear_filters) {
            dispatch(pending);
        }
    });
    let on_refresh = Callback::new(move |()| {
        if let Some(pending) = view.try_update_value(LogView::refresh) {
            dispatch(pending);
        }
    });
    let on_previous = Callback::new(move |()| {
        if let Some(Some(pending)) = view.try_update_value(LogView::previous_page) {
            dispatch(pending);
        }
    });
    let on_next = Callback::new(move |()| {
        if let Some(Some(pending)) = view.try_update_value(LogView::next_page) {
            dispatch(pending);
        }
    });
    let on_export = Callback::new(move |()| {
        let Some((request, transport)) =
            view.try_with_value(|v| (v.export_request(), v.transport().clone()))
        else {
            return;
        };
        spawn_local(async move {
            let cause = match request.send(&transport).await {
                Ok(file) => match download::save(&file) {
                    Ok(()) => return,
                    Err(err) => {
                        leptos::logging::error!("saving {} failed: {err:?}", file.filename);
                        None
                    }
                },
                Err(failure) => Some(failure),
            };
            if let Some(toasts) = toasts {
                toasts.raise(Message::ExportFailed, cause);
            }
        });
    });

    let heading = match kind {
        LogKind::Arm => Message::ArmLogs,
        LogKind::Battery => Message::BatteryLogs,
        LogKind::Event => Message::EventLogs,
    };
    let title = move || heading.text(locale.get());

    view! {
        <div class="log-page">
            <h1>{title}</h1>
            <FilterBar
                kind=kind
                filters=filters
                error=form_error
                busy=busy
                on_change=on_change
                on_apply=on_apply
                on_clear=on_clear
                on_refresh=on_refresh
                on_export=on_export
            />
            <LogTable snapshot=table/>
            <Pager cursor=cursor busy=busy on_previous=on_previous on_next=on_next/>
        </div>
    }
}

/// Route target for `/arm-logs`.
#[component]
pub fn ArmLogs() -> impl IntoView {
    view! { <LogPage kind=LogKind::Arm/> }
}

/// Route target for `/battery-logs`.
#[component]
pub fn BatteryLogs() -> impl IntoView {
    view! { <LogPage kind=LogKind::Battery/> }
}

/// Route target for `/` and `/logs`.
#[component]
pub fn EventLogs() -> impl IntoView {
    view! { <LogPage kind=LogKind::Event/> }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_send_numeric_filters_as_integers() {
        assert_eq!(filter_value(FilterKey::Arm, " 3 ".into()), FilterValue::Int(3));
        assert_eq!(filter_value(FilterKey::Dtype, "126".into()), FilterValue::Int(126));
    }

    #[test]
    fn should_keep_text_filters_verbatim() {
        assert_eq!(
            filter_value(FilterKey::StartDate, "2026-10-09".into()),
            FilterValue::Text("2026-10-09".into())
        );
        assert!(filter_value(FilterKey::Battery, String::new()).is_blank());
    }

    #[test]
    fn should_locate_status_column_of_event_log() {
        let schema = LogKind::Event.schema();
        let position = schema
            .columns
            .iter()
            .position(|column| column.format == CellFormat::Status);
        assert_eq!(position, Some(5));
    }
}
