//! # Logforge Core
//!
//! A logging facade with colorized console output, per-level log files and
//! environment-driven configuration.
//!
//! This crate provides:
//!
//! - **Facade**: a process-wide [`LogForge`] (or caller-owned instances)
//!   whose handlers are rebuilt from `LOG_*` environment variables
//! - **Formatting**: a colored console formatter and a clean file formatter
//! - **Handlers**: thresholds, exact-level filters, console and file sinks
//! - **Tracing**: a `tracing_subscriber` layer routing `tracing` events
//!   through the facade
//!
//! ## Example
//!
//! ```no_run
//! use logforge_core::{LogForge, Severity};
//!
//! // LOG_DIR=/var/log/app LOG_FILE_LEVEL=WARNING ./app
//! let log = LogForge::get_instance(Some("app"), Severity::Debug, Severity::Info)?;
//! log.info("service started");
//! logforge_core::warning!(log, "{} retries left", 3);
//! # Ok::<(), logforge_core::LogForgeError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod facade;
pub mod filter;
pub mod format;
pub mod handler;
pub mod log;
pub mod logger;
pub mod record;
pub mod term;
pub mod time;

// Re-export commonly used items
pub use facade::{LogForge, LogForgeBuilder};
pub use format::{CleanFormatter, ColorFormatter, Formatter, Template};
pub use handler::{ConsoleTarget, Handler, HandlerSummary, SharedBuffer, Sink};
pub use logforge_types::{FileLayout, LogForgeError, LogSettings, Result, Severity};
pub use logger::Logger;
pub use record::Record;

/// Logforge version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log a formatted message at DEBUG through a [`LogForge`] or [`Logger`].
#[macro_export]
macro_rules! debug {
    ($target:expr, $($arg:tt)+) => {
        $target.log_args($crate::Severity::Debug, format_args!($($arg)+))
    };
}

/// Log a formatted message at INFO through a [`LogForge`] or [`Logger`].
#[macro_export]
macro_rules! info {
    ($target:expr, $($arg:tt)+) => {
        $target.log_args($crate::Severity::Info, format_args!($($arg)+))
    };
}

/// Log a formatted message at WARNING through a [`LogForge`] or [`Logger`].
#[macro_export]
macro_rules! warning {
    ($target:expr, $($arg:tt)+) => {
        $target.log_args($crate::Severity::Warning, format_args!($($arg)+))
    };
}

/// Log a formatted message at ERROR through a [`LogForge`] or [`Logger`].
#[macro_export]
macro_rules! error {
    ($target:expr, $($arg:tt)+) => {
        $target.log_args($crate::Severity::Error, format_args!($($arg)+))
    };
}

/// Log a formatted message at CRITICAL through a [`LogForge`] or [`Logger`].
#[macro_export]
macro_rules! critical {
    ($target:expr, $($arg:tt)+) => {
        $target.log_args($crate::Severity::Critical, format_args!($($arg)+))
    };
}
