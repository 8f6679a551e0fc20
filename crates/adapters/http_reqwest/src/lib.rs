//! # batlog-adapter-http-reqwest
//!
//! Native HTTP transport built on [reqwest](https://docs.rs/reqwest).
//!
//! ## Responsibilities
//! - Implement the `LogTransport` port for native callers (the CLI)
//! - Resolve endpoint paths against a configured base URL
//! - Announce the active locale through the `X-Language` header
//! - Hand back raw status and body; classification happens in `batlog-app`
//!
//! ## Dependency rule
//! Depends on `batlog-app` (for the port trait) and `batlog-domain`. Never
//! leaks reqwest types through the port.

pub mod error;
pub mod transport;

pub use error::HttpError;
pub use transport::ReqwestTransport;
