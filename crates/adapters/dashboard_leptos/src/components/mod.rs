mod filter_bar;
mod language_toggle;
mod log_table;
mod nav;
mod pager;
pub mod toast;

pub use filter_bar::FilterBar;
pub use language_toggle::LanguageToggle;
pub use log_table::{LogTable, TableSnapshot};
pub use nav::Nav;
pub use pager::Pager;
pub use toast::ToastContainer;
