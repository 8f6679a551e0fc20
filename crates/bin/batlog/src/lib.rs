//! # batlog: terminal log browser
//!
//! Composition root that wires the log view to the HTTP transport.
//!
//! ## Responsibilities
//! - Parse configuration (CLI args, env vars, config file)
//! - Construct the reqwest transport and the locale service
//! - Build one `LogView` per invocation and drive it like the dashboard page
//!   would: mount, apply filters, page forward
//! - Print the resulting table, save exports, list active arms
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer: no domain logic belongs here.

pub mod cli;
pub mod config;
pub mod table;

use std::io::Write;
use std::path::PathBuf;

use batlog_adapter_http_reqwest::{HttpError, ReqwestTransport};
use batlog_app::arm_options::{ARMS, fetch_active_arms};
use batlog_app::locale_service::LocaleService;
use batlog_app::log_view::{LogView, LogViewOptions, ViewState};
use batlog_app::ports::{LogTransport, MemoryLocaleStore};
use batlog_domain::error::BatlogError;
use batlog_domain::filter::FilterKey;
use batlog_domain::locale::Locale;
use batlog_domain::log_kind::LogKind;
use batlog_domain::messages::arm_label;

use crate::cli::{Cli, Command, FilterArgs};
use crate::config::{Config, ConfigError};

/// Errors that end a CLI invocation.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Http(#[from] HttpError),
    #[error(transparent)]
    Batlog(#[from] BatlogError),
    #[error("failed to write output")]
    Io(#[from] std::io::Error),
}

/// Run one command against the configured backend, writing to `out`.
///
/// # Errors
///
/// Returns a [`CliError`] when the transport cannot be built, filters are
/// rejected, the query fails, or output cannot be written.
pub async fn run(cli: Cli, mut config: Config, out: &mut impl Write) -> Result<(), CliError> {
    if let Some(base_url) = cli.base_url {
        config.server.base_url = base_url;
    }
    let options = config.view_options()?;
    let transport = ReqwestTransport::new(&config.server.base_url)?;

    let locales = LocaleService::new(MemoryLocaleStore::with_locale(config.locale.default), 1);
    if let Some(lang) = cli.lang {
        locales.set_locale(lang);
    }
    let locale = locales.current_locale();
    tracing::debug!(base_url = %transport.base_url(), %locale, "starting");

    match cli.command {
        Command::Show {
            kind,
            page,
            filters,
        } => {
            let view = show(kind, page, &filters, transport, locale, options).await?;
            let placeholder = view.placeholder();
            let text = table::render(&view.headers(), view.rows(), placeholder.as_ref(), view.cursor());
            out.write_all(text.as_bytes())?;
            if let ViewState::Errored(failure) = view.state() {
                return Err(BatlogError::from(failure.clone()).into());
            }
        }
        Command::Export {
            kind,
            output,
            filters,
        } => {
            let mut view = LogView::with_options(kind, transport, locale, options);
            apply_filter_args(&mut view, &filters).map_err(BatlogError::from)?;
            let file = view.export().await.map_err(BatlogError::from)?;
            let path = output.unwrap_or_else(|| PathBuf::from(&file.filename));
            std::fs::write(&path, &file.content)?;
            tracing::info!(path = %path.display(), bytes = file.content.len(), "export saved");
            writeln!(out, "{}", path.display())?;
        }
        Command::Arms => {
            let active = fetch_active_arms(&transport, locale)
                .await
                .map_err(BatlogError::from)?;
            for arm in ARMS {
                let count = active
                    .iter()
                    .find(|entry| entry.arm == arm)
                    .map_or(0, |entry| entry.slave_count);
                writeln!(out, "{}\t{count}", arm_label(arm, locale))?;
            }
        }
    }
    Ok(())
}

/// Load a view with `filters` applied and page forward to `page`.
///
/// Stops early on the last page or on a failed query.
///
/// # Errors
///
/// Returns a [`BatlogError::Validation`] when the filters are rejected.
pub async fn show<T: LogTransport>(
    kind: LogKind,
    page: u32,
    filters: &FilterArgs,
    transport: T,
    locale: Locale,
    options: LogViewOptions,
) -> Result<LogView<T>, BatlogError> {
    let mut view = LogView::with_options(kind, transport, locale, options);
    let first = if apply_filter_args(&mut view, filters)? {
        view.apply_filters()?
    } else {
        view.mount()
    };
    view.drive(first).await;

    while view.cursor().current_page() < page && matches!(view.state(), ViewState::Populated(_)) {
        let Some(pending) = view.next_page() else {
            break;
        };
        view.drive(pending).await;
    }
    Ok(view)
}

/// Copy CLI filter flags into the view. Returns whether anything was set.
fn apply_filter_args<T: LogTransport>(
    view: &mut LogView<T>,
    args: &FilterArgs,
) -> Result<bool, BatlogError> {
    let mut changed = false;
    if let Some(arm) = args.arm {
        view.set_filter(FilterKey::Arm, arm)?;
        changed = true;
    }
    if let Some(battery) = args.battery {
        view.set_filter(FilterKey::Battery, battery)?;
        changed = true;
    }
    if let Some(dtype) = args.dtype {
        view.set_filter(FilterKey::Dtype, i64::from(dtype))?;
        changed = true;
    }
    if let Some(status) = &args.status {
        view.set_filter(FilterKey::Status, status.as_str())?;
        changed = true;
    }
    if args.all_dates {
        view.set_filter(FilterKey::StartDate, "")?;
        view.set_filter(FilterKey::EndDate, "")?;
        changed = true;
    }
    if let Some(from) = &args.from {
        view.set_filter(FilterKey::StartDate, from.as_str())?;
        changed = true;
    }
    if let Some(to) = &args.to {
        view.set_filter(FilterKey::EndDate, to.as_str())?;
        changed = true;
    }
    Ok(changed)
}
