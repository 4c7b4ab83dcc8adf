//! Terminal color codes and ANSI handling.

use colored::Color;
use logforge_types::Severity;
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

/// Sequence that resets all terminal attributes.
pub const RESET_SEQ: &str = "\x1b[0m";

/// Color used for the `file:line` reference on the console.
pub const LOCATION_COLOR: Color = Color::BrightGreen;

static ANSI_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\x1b\[\d+(;\d+)?m").expect("ANSI pattern is a valid regex"));

/// Color assigned to a severity on the console.
pub fn severity_color(level: Severity) -> Color {
    match level {
        Severity::Debug => Color::Blue,
        Severity::Info => Color::White,
        Severity::Warning => Color::Yellow,
        Severity::Error => Color::Red,
        Severity::Critical => Color::Magenta,
    }
}

/// Wrap `text` in the escape sequence for `color`, optionally bold.
///
/// Sequences are written unconditionally. Whether coloring is wanted at all
/// is the caller's decision, independent of `colored`'s terminal detection.
pub fn paint(text: &str, color: Color, bold: bool) -> String {
    let code = color.to_fg_str();
    if bold {
        format!("\x1b[1;{}m{}{}", code, text, RESET_SEQ)
    } else {
        format!("\x1b[{}m{}{}", code, text, RESET_SEQ)
    }
}

/// Remove every ANSI color sequence from `text`.
pub fn strip_ansi(text: &str) -> Cow<'_, str> {
    ANSI_PATTERN.replace_all(text, "")
}

/// Check whether `text` contains an ANSI color sequence.
pub fn has_ansi(text: &str) -> bool {
    ANSI_PATTERN.is_match(text)
}
