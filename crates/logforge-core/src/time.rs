//! Timestamp formatting.

use chrono::{DateTime, Local};

/// Layout of the `{timestamp}` field: date, time and milliseconds.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// Format a timestamp for a log line, e.g. `2024-03-01 14:02:07,042`.
pub fn format_timestamp(timestamp: &DateTime<Local>) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}
