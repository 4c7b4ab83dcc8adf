//! Bridge from `tracing` to logforge.
//!
//! [`ForgeLayer`] turns `tracing` events into [`Record`]s and hands them to a
//! [`Logger`], so code instrumented with `tracing` gets the same console
//! colors and log files as direct facade calls.

use crate::facade::LogForge;
use crate::logger::Logger;
use crate::record::Record;
use logforge_types::{LogForgeError, Result, Severity};
use std::fmt;
use std::sync::Arc;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Target of the events logforge emits about itself. [`ForgeLayer`] never
/// forwards them, so they stay out of the caller's console and files.
pub const INTERNAL_TARGET: &str = "logforge";

/// A `tracing_subscriber` layer writing events through a logger.
#[derive(Debug, Clone)]
pub struct ForgeLayer {
    logger: Arc<Logger>,
}

impl ForgeLayer {
    /// Create a layer for `logger`.
    pub fn new(logger: Arc<Logger>) -> Self {
        Self { logger }
    }
}

impl<S: Subscriber> Layer<S> for ForgeLayer {
    // Level checks happen per event rather than in `enabled`, which tracing
    // caches per callsite and would miss later reconfiguration.
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if metadata.target() == INTERNAL_TARGET {
            return;
        }
        let level = Severity::from(*metadata.level());
        if !self.logger.is_enabled(level) {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let record = Record::new(self.logger.name(), level, visitor.finish())
            .at(metadata.file().unwrap_or_default(), metadata.line().unwrap_or(0));
        self.logger.handle(&record);
    }
}

/// Collects the `message` field and renders the others as `key=value`.
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: Vec<String>,
}

impl MessageVisitor {
    fn finish(self) -> String {
        match (self.message.is_empty(), self.fields.is_empty()) {
            (_, true) => self.message,
            (true, false) => self.fields.join(" "),
            (false, false) => format!("{} {}", self.message, self.fields.join(" ")),
        }
    }
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.push(format!("{}={}", field.name(), value));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            self.fields.push(format!("{}={:?}", field.name(), value));
        }
    }
}

/// Install `forge` as the global `tracing` subscriber.
///
/// # Errors
///
/// Fails when a global subscriber is already set.
pub fn init_tracing(forge: &LogForge) -> Result<()> {
    tracing_subscriber::registry()
        .with(forge.tracing_layer())
        .try_init()
        .map_err(|e| LogForgeError::Config(format!("Failed to install tracing subscriber: {}", e)))
}

/// Create the process-wide facade with default thresholds and install it as
/// the global `tracing` subscriber.
///
/// # Errors
///
/// Fails when the facade cannot be configured or a global subscriber is
/// already set.
pub fn init_default() -> Result<&'static LogForge> {
    let forge = LogForge::get_instance(None, Severity::Debug, Severity::Info)?;
    init_tracing(forge)?;
    Ok(forge)
}
