mod log_page;
mod not_found;

pub use log_page::{ArmLogs, BatteryLogs, EventLogs, LogPage};
pub use not_found::NotFound;
