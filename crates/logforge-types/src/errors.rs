//! Error types for logforge operations.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for logforge operations.
#[derive(Error, Debug)]
pub enum LogForgeError {
    /// A severity name that does not match any known level
    #[error("Invalid log level: {0}")]
    InvalidLevel(String),

    /// The log directory could not be created
    #[error("Failed to create log directory {}: {source}", .path.display())]
    CreateDir {
        /// Directory that was being created
        path: PathBuf,
        /// Underlying filesystem error
        #[source]
        source: std::io::Error,
    },

    /// A log file could not be opened for appending
    #[error("Failed to open log file {}: {source}", .path.display())]
    OpenFile {
        /// File that was being opened
        path: PathBuf,
        /// Underlying filesystem error
        #[source]
        source: std::io::Error,
    },

    /// Configuration-related error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for logforge operations.
pub type Result<T> = std::result::Result<T, LogForgeError>;

/// Helper macro to bail out with a LogForgeError
///
/// # Example
///
/// ```ignore
/// if template.is_empty() {
///     bail!(Config, "empty template");
/// }
/// ```
#[macro_export]
macro_rules! bail {
    ($variant:ident, $msg:expr) => {
        return Err($crate::LogForgeError::$variant($msg.to_string()))
    };
    ($variant:ident, $fmt:expr, $($arg:tt)*) => {
        return Err($crate::LogForgeError::$variant(format!($fmt, $($arg)*)))
    };
}
