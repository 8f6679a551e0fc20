//! Port definitions: traits that adapters implement.
//!
//! Ports are the boundaries between the log-view core and the outside world.
//! They are defined here (in `app`) so that both the controller layer and the
//! adapter layer can depend on them without creating circular dependencies.

pub mod locale_store;
pub mod transport;

pub use locale_store::{LocaleStore, MemoryLocaleStore};
pub use transport::{HttpReply, LANGUAGE_HEADER, LogTransport, TransportError};
