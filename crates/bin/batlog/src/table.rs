//! Plain-text rendering of a log view.

use std::fmt::Write as _;

use batlog_app::log_view::{DisplayRow, Placeholder};
use batlog_domain::page::PageCursor;

/// Render headers and rows as an aligned text table.
///
/// When `placeholder` is set it replaces the rows, like the spanning row of
/// the dashboard table.
#[must_use]
pub fn render(
    headers: &[&str],
    rows: &[DisplayRow],
    placeholder: Option<&Placeholder>,
    cursor: PageCursor,
) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(&row.cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, headers.iter().copied(), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, rule.iter().map(String::as_str), &widths);

    match placeholder {
        Some(placeholder) => {
            out.push_str(placeholder.title);
            if let Some(detail) = placeholder.detail {
                let _ = write!(out, ": {detail}");
            }
            out.push('\n');
        }
        None => {
            for row in rows {
                push_line(&mut out, row.cells.iter().map(String::as_str), &widths);
            }
        }
    }

    let _ = writeln!(
        out,
        "\n{} / {}",
        cursor.current_page(),
        cursor.total_pages()
    );
    out
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line: Vec<String> = cells
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}
