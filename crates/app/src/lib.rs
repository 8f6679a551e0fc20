//! # batlog-app
//!
//! Application layer: the log-view controller and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement:
//!   - `LogTransport`: POST/GET against the dashboard backend
//!   - `LocaleStore`: the persisted language selection
//! - Provide the **log view** and its parts:
//!   - `FilterComposer`: holds and validates filters
//!   - `PaginationController`: bounded page navigation
//!   - `LogQueryClient`: request tokens and stale-response discard
//!   - `LogRenderer`: rows to localized display text
//!   - `LogView`: the state machine tying them together
//! - Provide the **locale service** (broadcast on change) and the arm/battery
//!   filter options
//!
//! ## Dependency rule
//! Depends on `batlog-domain` only (plus `tokio::sync` for channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod arm_options;
pub mod locale_service;
pub mod log_view;
pub mod ports;

#[cfg(test)]
mod testing;
