//! Shared utilities for tfo CLI binaries.

pub mod args;
pub mod format;
pub mod logging;

pub use args::LogLevel;
pub use format::{format_duration, format_number};
pub use logging::init_logging;
