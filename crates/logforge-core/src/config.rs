//! Settings resolution from environment variables.
//!
//! | Variable | Effect |
//! |---|---|
//! | `LOG_CONSOLE_LEVEL` | console threshold, when it names a valid level |
//! | `LOG_FILE_LEVEL` | file threshold, when it names a valid level |
//! | `LOG_DIR` | enables file output into this directory |
//! | `LOG_SINGLE_FILE` | `true` (any case) writes everything to `app.log` |
//! | `NO_COLOR` | any non-empty value disables console colors |
//!
//! Resolution never fails: an invalid level keeps the default and is
//! reported as a [`ConfigWarning`] for the caller to log.

use logforge_types::{FileLayout, LogForgeError, LogSettings, Severity};
use std::fmt;
use std::path::PathBuf;

/// Console threshold override.
pub const ENV_CONSOLE_LEVEL: &str = "LOG_CONSOLE_LEVEL";
/// File threshold override.
pub const ENV_FILE_LEVEL: &str = "LOG_FILE_LEVEL";
/// Log directory.
pub const ENV_LOG_DIR: &str = "LOG_DIR";
/// Single-file switch.
pub const ENV_SINGLE_FILE: &str = "LOG_SINGLE_FILE";
/// Color opt-out, see <https://no-color.org>.
pub const ENV_NO_COLOR: &str = "NO_COLOR";

/// An environment value that was ignored.
#[derive(Debug)]
pub struct ConfigWarning {
    /// Variable name
    pub variable: &'static str,
    /// The rejected value
    pub value: String,
    /// Why it was rejected
    pub error: LogForgeError,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ignoring {}={:?}: {}", self.variable, self.value, self.error)
    }
}

/// Settings together with the values that were ignored while resolving them.
#[derive(Debug)]
pub struct Resolved {
    /// Effective settings
    pub settings: LogSettings,
    /// Ignored values
    pub warnings: Vec<ConfigWarning>,
}

/// Resolve settings from the process environment.
pub fn from_env(console_level: Severity, file_level: Severity) -> Resolved {
    from_lookup(|key| std::env::var(key).ok(), console_level, file_level)
}

/// Resolve settings from an arbitrary variable lookup.
///
/// `console_level` and `file_level` are the defaults used when the matching
/// variable is unset, empty or invalid.
pub fn from_lookup<F>(lookup: F, console_level: Severity, file_level: Severity) -> Resolved
where
    F: Fn(&str) -> Option<String>,
{
    let mut warnings = Vec::new();
    let non_empty = |key: &str| lookup(key).filter(|value| !value.is_empty());

    let mut level = |variable: &'static str, default: Severity| match non_empty(variable) {
        None => default,
        Some(value) => match value.parse::<Severity>() {
            Ok(level) => level,
            Err(error) => {
                warnings.push(ConfigWarning { variable, value, error });
                default
            }
        },
    };

    let console_level = level(ENV_CONSOLE_LEVEL, console_level);
    let file_level = level(ENV_FILE_LEVEL, file_level);

    let layout = match non_empty(ENV_SINGLE_FILE) {
        Some(value) if value.eq_ignore_ascii_case("true") => FileLayout::Single,
        _ => FileLayout::PerLevel,
    };

    Resolved {
        settings: LogSettings {
            console_level,
            file_level,
            log_dir: non_empty(ENV_LOG_DIR).map(PathBuf::from),
            layout,
            use_color: non_empty(ENV_NO_COLOR).is_none(),
        },
        warnings,
    }
}
