//! Common enumerations used throughout logforge.

use crate::errors::{LogForgeError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of a log record.
///
/// Variants are declared from least to most severe, so the derived ordering
/// is the threshold ordering: a handler with threshold `t` accepts a record
/// at `s` when `s >= t`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Diagnostic detail
    Debug,
    /// Normal operation
    Info,
    /// Something unexpected that does not stop the program
    Warning,
    /// An operation failed
    Error,
    /// The program may not be able to continue
    Critical,
}

impl Severity {
    /// All levels, least severe first.
    pub const ALL: [Severity; 5] = [
        Severity::Debug,
        Severity::Info,
        Severity::Warning,
        Severity::Error,
        Severity::Critical,
    ];

    /// Canonical upper-case name, as printed in log lines.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
            Severity::Critical => "CRITICAL",
        }
    }

    /// Name of the dedicated file for this level, e.g. `error.log`.
    pub fn file_name(&self) -> String {
        format!("{}.log", self.as_str().to_lowercase())
    }

    /// Levels at or above `self`, least severe first.
    pub fn and_above(self) -> impl Iterator<Item = Severity> {
        Self::ALL.into_iter().filter(move |level| *level >= self)
    }
}

impl FromStr for Severity {
    type Err = LogForgeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "DEBUG" => Ok(Severity::Debug),
            "INFO" => Ok(Severity::Info),
            "WARNING" | "WARN" => Ok(Severity::Warning),
            "ERROR" => Ok(Severity::Error),
            "CRITICAL" | "FATAL" => Ok(Severity::Critical),
            _ => Err(LogForgeError::InvalidLevel(s.to_string())),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<tracing::Level> for Severity {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::TRACE | tracing::Level::DEBUG => Severity::Debug,
            tracing::Level::INFO => Severity::Info,
            tracing::Level::WARN => Severity::Warning,
            tracing::Level::ERROR => Severity::Error,
        }
    }
}
