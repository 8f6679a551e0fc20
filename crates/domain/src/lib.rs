//! # batlog-domain
//!
//! Pure domain model for the battery/arm telemetry log browser.
//!
//! ## Responsibilities
//! - Foundational types: error taxonomy, timestamps, locales and UI messages
//! - Define **filters** (`FilterSet`) and their invariants (ordered date range)
//! - Define the **page cursor** and its bounds
//! - Define **log rows** as decoded from the log endpoints
//! - Define the **log kinds** (arm, battery, generic event) as data-driven schemas
//! - Hold the **measurement catalog** mapping `(category, code)` to names and units
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod locale;
pub mod messages;
pub mod time;

pub mod filter;
pub mod log_kind;
pub mod log_row;
pub mod measurement;
pub mod page;
