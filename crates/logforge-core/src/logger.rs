//! Named logger dispatching records to its handlers.

use crate::handler::{Handler, HandlerSummary};
use crate::record::Record;
use logforge_types::Severity;
use parking_lot::RwLock;
use std::fmt;
use std::panic::Location;

/// Name used when a logger is created without one.
pub const ROOT_LOGGER: &str = "root";

#[derive(Debug)]
struct State {
    level: Severity,
    handlers: Vec<Handler>,
}

/// A named logger owning a set of handlers.
///
/// Emission takes a read lock; [`Logger::reconfigure`] swaps level and
/// handlers together under the write lock.
#[derive(Debug)]
pub struct Logger {
    name: String,
    state: RwLock<State>,
}

impl Logger {
    /// Create a logger with no handlers that lets every level through.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: RwLock::new(State {
                level: Severity::Debug,
                handlers: Vec::new(),
            }),
        }
    }

    /// Logger name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Logger-wide minimum severity.
    pub fn level(&self) -> Severity {
        self.state.read().level
    }

    /// Set the logger-wide minimum severity.
    pub fn set_level(&self, level: Severity) {
        self.state.write().level = level;
    }

    /// Check whether a record at `level` would reach the handlers.
    pub fn is_enabled(&self, level: Severity) -> bool {
        level >= self.level()
    }

    /// Attach one more handler.
    pub fn add_handler(&self, handler: Handler) {
        self.state.write().handlers.push(handler);
    }

    /// Detach every handler. Files they held are closed.
    pub fn clear_handlers(&self) {
        let old = std::mem::take(&mut self.state.write().handlers);
        drop(old);
    }

    /// Replace level and handlers in one step and return the old handlers.
    pub fn reconfigure(&self, level: Severity, handlers: Vec<Handler>) -> Vec<Handler> {
        let mut state = self.state.write();
        state.level = level;
        std::mem::replace(&mut state.handlers, handlers)
    }

    /// Number of attached handlers.
    pub fn handler_count(&self) -> usize {
        self.state.read().handlers.len()
    }

    /// Summaries of the attached handlers, in attachment order.
    pub fn handler_summaries(&self) -> Vec<HandlerSummary> {
        self.state.read().handlers.iter().map(Handler::summary).collect()
    }

    /// Pass `record` to every handler.
    ///
    /// A failing handler does not stop the others. Failures are reported on
    /// stderr directly: going through `tracing` could route straight back
    /// into this logger.
    pub fn handle(&self, record: &Record) {
        let state = self.state.read();
        if record.level < state.level {
            return;
        }
        for handler in &state.handlers {
            if let Err(e) = handler.handle(record) {
                eprintln!(
                    "logforge: failed to write record to {}: {}",
                    handler.sink().describe(),
                    e
                );
            }
        }
    }

    /// Log preformatted arguments at `level`, located at the caller.
    #[track_caller]
    pub fn log_args(&self, level: Severity, args: fmt::Arguments<'_>) {
        if !self.is_enabled(level) {
            return;
        }
        let location = Location::caller();
        let record = Record::new(self.name.as_str(), level, args.to_string())
            .at(location.file(), location.line());
        self.handle(&record);
    }

    /// Log `message` at `level`.
    #[track_caller]
    pub fn log(&self, level: Severity, message: impl fmt::Display) {
        self.log_args(level, format_args!("{}", message));
    }

    /// Log at DEBUG.
    #[track_caller]
    pub fn debug(&self, message: impl fmt::Display) {
        self.log(Severity::Debug, message);
    }

    /// Log at INFO.
    #[track_caller]
    pub fn info(&self, message: impl fmt::Display) {
        self.log(Severity::Info, message);
    }

    /// Log at WARNING.
    #[track_caller]
    pub fn warning(&self, message: impl fmt::Display) {
        self.log(Severity::Warning, message);
    }

    /// Log at ERROR.
    #[track_caller]
    pub fn error(&self, message: impl fmt::Display) {
        self.log(Severity::Error, message);
    }

    /// Log at CRITICAL.
    #[track_caller]
    pub fn critical(&self, message: impl fmt::Display) {
        self.log(Severity::Critical, message);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(ROOT_LOGGER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{CleanFormatter, ColorFormatter};
    use crate::handler::{SharedBuffer, Sink};

    fn buffered(logger: &Logger, threshold: Severity) -> SharedBuffer {
        let buffer = SharedBuffer::new();
        logger.add_handler(
            Handler::new(Sink::writer("buf", buffer.clone()), CleanFormatter::default())
                .with_threshold(threshold),
        );
        buffer
    }

    #[test]
    fn test_logger_level_cuts_off() {
        let logger = Logger::new("svc");
        let buffer = buffered(&logger, Severity::Debug);
        logger.set_level(Severity::Warning);

        logger.info("dropped");
        logger.warning("kept");

        let lines = buffer.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with("svc - WARNING - kept"));
    }

    #[test]
    fn test_every_handler_sees_record() {
        let logger = Logger::default();
        let all = buffered(&logger, Severity::Debug);
        let errors = buffered(&logger, Severity::Error);

        logger.debug("a");
        logger.error("b");

        assert_eq!(all.lines().len(), 2);
        assert_eq!(errors.lines().len(), 1);
        assert!(all.lines()[0].contains("root - DEBUG - a"));
    }

    #[test]
    fn test_reconfigure_replaces_handlers() {
        let logger = Logger::new("svc");
        let old = buffered(&logger, Severity::Debug);

        let new = SharedBuffer::new();
        let previous = logger.reconfigure(
            Severity::Info,
            vec![Handler::new(Sink::writer("new", new.clone()), CleanFormatter::default())],
        );
        assert_eq!(previous.len(), 1);
        assert_eq!(logger.level(), Severity::Info);
        assert_eq!(logger.handler_count(), 1);

        logger.info("after");
        assert!(old.contents().is_empty());
        assert_eq!(new.lines().len(), 1);
    }

    #[test]
    fn test_clear_handlers() {
        let logger = Logger::new("svc");
        let buffer = buffered(&logger, Severity::Debug);
        logger.clear_handlers();
        logger.critical("nobody listens");
        assert_eq!(logger.handler_count(), 0);
        assert!(buffer.contents().is_empty());
    }

    #[test]
    fn test_call_site_location() {
        let logger = Logger::new("svc");
        let buffer = SharedBuffer::new();
        logger.add_handler(Handler::new(
            Sink::writer("console", buffer.clone()),
            ColorFormatter::new(Default::default(), false),
        ));

        let line = line!() + 1;
        logger.log_args(Severity::Info, format_args!("{} + {} = {}", 1, 2, 3));

        let lines = buffer.lines();
        assert!(
            lines[0].ends_with(&format!("svc - INFO - logger.rs:{} - 1 + 2 = 3", line)),
            "{}",
            lines[0]
        );
    }
}
