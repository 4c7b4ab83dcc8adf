//! Configuration types and structures.

use crate::Severity;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How file output is split across files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileLayout {
    /// One file per level, each receiving only records of exactly that level
    #[default]
    PerLevel,
    /// A single `app.log` receiving every record at or above the file level
    Single,
}

/// Resolved configuration of a logger facade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogSettings {
    /// Minimum severity written to the console
    #[serde(default = "default_console_level")]
    pub console_level: Severity,

    /// Minimum severity written to log files
    #[serde(default = "default_file_level")]
    pub file_level: Severity,

    /// Directory for log files; no files are written when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,

    /// File splitting mode
    #[serde(default)]
    pub layout: FileLayout,

    /// Whether console output carries ANSI colors
    #[serde(default = "default_use_color")]
    pub use_color: bool,
}

fn default_console_level() -> Severity {
    Severity::Debug
}

fn default_file_level() -> Severity {
    Severity::Info
}

fn default_use_color() -> bool {
    true
}

impl LogSettings {
    /// Settings with the given thresholds and no file output.
    pub fn new(console_level: Severity, file_level: Severity) -> Self {
        Self {
            console_level,
            file_level,
            log_dir: None,
            layout: FileLayout::PerLevel,
            use_color: true,
        }
    }

    /// The lowest threshold of all outputs; records below it reach no handler.
    pub fn min_level(&self) -> Severity {
        self.console_level.min(self.file_level)
    }
}

impl Default for LogSettings {
    fn default() -> Self {
        Self::new(default_console_level(), default_file_level())
    }
}
