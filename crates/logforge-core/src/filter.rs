//! Record filters.

use crate::record::Record;
use logforge_types::Severity;

/// Accepts records of exactly one severity.
///
/// Unlike a threshold, a `LevelFilter` for `Error` rejects `Critical`
/// records. Per-level files use it so each file holds a single level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelFilter {
    level: Severity,
}

impl LevelFilter {
    /// Create a filter for `level`.
    pub fn new(level: Severity) -> Self {
        Self { level }
    }

    /// The only level this filter accepts.
    pub fn level(&self) -> Severity {
        self.level
    }

    /// Check whether `record` passes the filter.
    pub fn accepts(&self, record: &Record) -> bool {
        record.level == self.level
    }
}
