//! # Logforge Types
//!
//! Core types shared by the logforge crates:
//!
//! - The [`Severity`] scale used for thresholds and routing
//! - [`LogSettings`], the resolved configuration of a logger facade
//! - Error types and result aliases
//!
//! ## Example
//!
//! ```
//! use logforge_types::Severity;
//!
//! let level: Severity = "warning".parse().unwrap();
//! assert_eq!(level, Severity::Warning);
//! assert!(Severity::Error > level);
//! assert_eq!(level.file_name(), "warning.log");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod enums;
pub mod errors;

// Re-export common types for convenience
pub use config::{FileLayout, LogSettings};
pub use enums::Severity;
pub use errors::{LogForgeError, Result};
