//! The log table: headers, projected rows, or a single spanning placeholder.

use leptos::prelude::*;

use batlog_app::log_view::{DisplayRow, Placeholder, PlaceholderKind};

/// Everything the table shows at one revision of its view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableSnapshot {
    pub headers: Vec<&'static str>,
    pub rows: Vec<DisplayRow>,
    pub placeholder: Option<Placeholder>,
    /// Index of the column rendered as a status badge.
    pub status_column: Option<usize>,
}

fn placeholder_row(placeholder: Placeholder) -> AnyView {
    let class = match placeholder.kind {
        PlaceholderKind::Spinner => "placeholder loading",
        PlaceholderKind::Empty => "placeholder empty",
        PlaceholderKind::Error => "placeholder error",
    };
    let spinner = (placeholder.kind == PlaceholderKind::Spinner)
        .then(|| view! { <span class="spinner"></span> });
    view! {
        <tr>
            <td class=class colspan=placeholder.colspan.to_string()>
                {spinner}
                <strong>{placeholder.title}</strong>
                {placeholder.detail.map(|detail| view! { <p>{detail}</p> })}
            </td>
        </tr>
    }
    .into_any()
}

fn data_row(row: DisplayRow, status_column: Option<usize>) -> AnyView {
    let status = row.status;
    let cells = row
        .cells
        .into_iter()
        .enumerate()
        .map(|(index, cell)| match status {
            Some(status) if Some(index) == status_column => view! {
                <td><span class=format!("badge badge-{}", status.as_str())>{cell}</span></td>
            }
            .into_any(),
            _ => view! { <td>{cell}</td> }.into_any(),
        })
        .collect_view();
    view! { <tr>{cells}</tr> }.into_any()
}

#[component]
pub fn LogTable(#[prop(into)] snapshot: Signal<TableSnapshot>) -> impl IntoView {
    view! {
        <table class="log-table">
            <thead>
                <tr>
                    {move || {
                        snapshot
                            .get()
                            .headers
                            .into_iter()
                            .map(|header| view! { <th>{header}</th> })
                            .collect_view()
                    }}
                </tr>
            </thead>
            <tbody>
                {move || {
                    let TableSnapshot { rows, placeholder, status_column, .. } = snapshot.get();
                    match placeholder {
                        Some(placeholder) => placeholder_row(placeholder),
                        None => rows
                            .into_iter()
                            .map(|row| data_row(row, status_column))
                            .collect_view()
                            .into_any(),
                    }
                }}
            </tbody>
        </table>
    }
}
