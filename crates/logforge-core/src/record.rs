//! Log records.

use chrono::{DateTime, Local};
use logforge_types::Severity;
use std::panic::Location;
use std::path::Path;

/// A single log event, created once per log call and shared read-only by
/// every handler.
///
/// The message is fully interpolated when the record is built, so formatters
/// never see separate arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Creation time
    pub timestamp: DateTime<Local>,
    /// Name of the logger that produced the record
    pub name: String,
    /// Severity
    pub level: Severity,
    /// Path of the source file that issued the call
    pub file: String,
    /// Line in `file`
    pub line: u32,
    /// Interpolated message
    pub message: String,
}

impl Record {
    /// Create a record stamped with the current time and no source location.
    pub fn new(name: impl Into<String>, level: Severity, message: impl Into<String>) -> Self {
        Self {
            timestamp: Local::now(),
            name: name.into(),
            level,
            file: String::new(),
            line: 0,
            message: message.into(),
        }
    }

    /// Create a record located at the caller of this function.
    #[track_caller]
    pub fn here(name: impl Into<String>, level: Severity, message: impl Into<String>) -> Self {
        let location = Location::caller();
        Self::new(name, level, message).at(location.file(), location.line())
    }

    /// Set the source location.
    pub fn at(mut self, file: impl Into<String>, line: u32) -> Self {
        self.file = file.into();
        self.line = line;
        self
    }

    /// Override the creation time.
    pub fn with_timestamp(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// File name of the source location without its directories.
    pub fn basename(&self) -> &str {
        Path::new(&self.file)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(self.file.as_str())
    }
}
