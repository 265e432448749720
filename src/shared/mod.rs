//! Shared types between the analysis worker and the host UI

pub mod log;
pub mod messages;

pub use log::{ScanLogBuffer, DEFAULT_LOG_CAPACITY};
pub use messages::ScanUpdate;
