//! The logger facade.
//!
//! [`LogForge`] owns one [`Logger`] and rebuilds its handlers from the
//! environment:
//!
//! - a console handler with the [`ColorFormatter`], always;
//! - when `LOG_DIR` is set, either a single `app.log` or one file per level
//!   at or above the file threshold, each with the [`CleanFormatter`].
//!
//! A process-wide instance is available through [`LogForge::get_instance`];
//! [`LogForge::builder`] creates independent, caller-owned facades.
//!
//! Concurrent calls to [`LogForge::configure`] are each applied atomically,
//! but which one wins is unspecified.

use crate::config::{self, Resolved};
use crate::filter::LevelFilter;
use crate::format::{CleanFormatter, ColorFormatter, Template};
use crate::handler::{ConsoleTarget, Handler, HandlerSummary, Sink};
use crate::log::{ForgeLayer, INTERNAL_TARGET};
use crate::logger::{Logger, ROOT_LOGGER};
use logforge_types::{FileLayout, LogForgeError, LogSettings, Result, Severity};
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use std::fmt;
use std::fs;
use std::sync::Arc;

/// File used when all records share one file.
pub const SINGLE_FILE_NAME: &str = "app.log";

static INSTANCE: OnceCell<LogForge> = OnceCell::new();

#[derive(Debug, Clone, Copy)]
struct Defaults {
    console_level: Severity,
    file_level: Severity,
}

/// Logger facade with environment-driven handlers.
#[derive(Debug)]
pub struct LogForge {
    logger: Arc<Logger>,
    defaults: Mutex<Defaults>,
    console: ConsoleTarget,
    template: Template,
}

impl LogForge {
    /// Return the process-wide facade, creating and configuring it on first
    /// use.
    ///
    /// Only the first successful call's arguments are used; later calls
    /// return the existing instance unchanged. Use
    /// [`LogForge::reconfigure`] to change thresholds afterwards.
    ///
    /// # Errors
    ///
    /// Returns the configuration error of the first call. The instance is
    /// then left uninitialized and the next call tries again.
    pub fn get_instance(
        name: Option<&str>,
        console_level: Severity,
        file_level: Severity,
    ) -> Result<&'static LogForge> {
        INSTANCE.get_or_try_init(|| {
            let mut builder = Self::builder()
                .console_level(console_level)
                .file_level(file_level);
            if let Some(name) = name {
                builder = builder.name(name);
            }
            builder.build()
        })
    }

    /// The process-wide facade, if it has been created.
    pub fn global() -> Option<&'static LogForge> {
        INSTANCE.get()
    }

    /// Start building a caller-owned facade.
    pub fn builder() -> LogForgeBuilder {
        LogForgeBuilder::new()
    }

    /// Re-apply the process environment with the current default thresholds.
    ///
    /// # Errors
    ///
    /// Returns an error when the log directory or a log file cannot be
    /// created. The previous handlers then stay in place.
    pub fn configure(&self) -> Result<()> {
        let defaults = *self.defaults.lock();
        self.apply_resolved(config::from_env(defaults.console_level, defaults.file_level))
    }

    /// Replace the default thresholds, then [`configure`](Self::configure).
    ///
    /// # Errors
    ///
    /// See [`LogForge::configure`].
    pub fn reconfigure(&self, console_level: Severity, file_level: Severity) -> Result<()> {
        *self.defaults.lock() = Defaults {
            console_level,
            file_level,
        };
        self.configure()
    }

    /// Like [`configure`](Self::configure), reading variables from `lookup`
    /// instead of the process environment.
    ///
    /// # Errors
    ///
    /// See [`LogForge::configure`].
    pub fn configure_with<F>(&self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = *self.defaults.lock();
        let resolved = config::from_lookup(lookup, defaults.console_level, defaults.file_level);
        self.apply_resolved(resolved)
    }

    /// Install handlers for `settings`, replacing the current ones.
    ///
    /// The new handlers are fully built before the old ones are detached.
    ///
    /// # Errors
    ///
    /// See [`LogForge::configure`].
    pub fn apply(&self, settings: &LogSettings) -> Result<()> {
        let handlers = self.build_handlers(settings)?;
        let count = handlers.len();
        drop(self.logger.reconfigure(settings.min_level(), handlers));

        tracing::debug!(
            target: INTERNAL_TARGET,
            logger = self.logger.name(),
            handlers = count,
            "logforge handlers installed"
        );
        Ok(())
    }

    fn apply_resolved(&self, resolved: Resolved) -> Result<()> {
        self.apply(&resolved.settings)?;
        for warning in &resolved.warnings {
            self.logger.warning(warning);
        }
        Ok(())
    }

    fn build_handlers(&self, settings: &LogSettings) -> Result<Vec<Handler>> {
        let mut handlers = vec![Handler::new(
            self.console.sink(),
            ColorFormatter::new(self.template.clone(), settings.use_color),
        )
        .with_threshold(settings.console_level)];

        let Some(dir) = &settings.log_dir else {
            return Ok(handlers);
        };

        fs::create_dir_all(dir).map_err(|source| LogForgeError::CreateDir {
            path: dir.clone(),
            source,
        })?;

        match settings.layout {
            FileLayout::Single => {
                handlers.push(
                    Handler::new(
                        Sink::file(dir.join(SINGLE_FILE_NAME))?,
                        CleanFormatter::new(self.template.clone()),
                    )
                    .with_threshold(settings.file_level),
                );
            }
            FileLayout::PerLevel => {
                for level in settings.file_level.and_above() {
                    handlers.push(
                        Handler::new(
                            Sink::file(dir.join(level.file_name()))?,
                            CleanFormatter::new(self.template.clone()),
                        )
                        .with_threshold(level)
                        .with_filter(LevelFilter::new(level)),
                    );
                }
            }
        }

        Ok(handlers)
    }

    /// Logger name.
    pub fn name(&self) -> &str {
        self.logger.name()
    }

    /// The underlying logger.
    pub fn logger(&self) -> &Arc<Logger> {
        &self.logger
    }

    /// A `tracing` layer that forwards events to this facade's logger.
    pub fn tracing_layer(&self) -> ForgeLayer {
        ForgeLayer::new(Arc::clone(&self.logger))
    }

    /// Check whether a record at `level` would reach any handler.
    pub fn is_enabled(&self, level: Severity) -> bool {
        self.logger.is_enabled(level)
    }

    /// Number of attached handlers.
    pub fn handler_count(&self) -> usize {
        self.logger.handler_count()
    }

    /// Summaries of the attached handlers, console first.
    pub fn handler_summaries(&self) -> Vec<HandlerSummary> {
        self.logger.handler_summaries()
    }

    /// Log preformatted arguments at `level`.
    #[track_caller]
    pub fn log_args(&self, level: Severity, args: fmt::Arguments<'_>) {
        self.logger.log_args(level, args);
    }

    /// Log `message` at `level`.
    #[track_caller]
    pub fn log(&self, level: Severity, message: impl fmt::Display) {
        self.logger.log(level, message);
    }

    /// Log at DEBUG.
    #[track_caller]
    pub fn debug(&self, message: impl fmt::Display) {
        self.logger.debug(message);
    }

    /// Log at INFO.
    #[track_caller]
    pub fn info(&self, message: impl fmt::Display) {
        self.logger.info(message);
    }

    /// Log at WARNING.
    #[track_caller]
    pub fn warning(&self, message: impl fmt::Display) {
        self.logger.warning(message);
    }

    /// Log at ERROR.
    #[track_caller]
    pub fn error(&self, message: impl fmt::Display) {
        self.logger.error(message);
    }

    /// Log at CRITICAL.
    #[track_caller]
    pub fn critical(&self, message: impl fmt::Display) {
        self.logger.critical(message);
    }
}

/// Builder for [`LogForge`].
#[derive(Debug)]
pub struct LogForgeBuilder {
    name: String,
    console_level: Severity,
    file_level: Severity,
    console: ConsoleTarget,
    template: Template,
}

impl LogForgeBuilder {
    /// Create a builder with the default name and thresholds.
    pub fn new() -> Self {
        Self {
            name: ROOT_LOGGER.to_string(),
            console_level: Severity::Debug,
            file_level: Severity::Info,
            console: ConsoleTarget::Stderr,
            template: Template::default(),
        }
    }

    /// Set the logger name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the default console threshold.
    pub fn console_level(mut self, level: Severity) -> Self {
        self.console_level = level;
        self
    }

    /// Set the default file threshold.
    pub fn file_level(mut self, level: Severity) -> Self {
        self.file_level = level;
        self
    }

    /// Send console output somewhere other than stderr.
    pub fn console(mut self, console: ConsoleTarget) -> Self {
        self.console = console;
        self
    }

    /// Use a custom line template for every handler.
    pub fn template(mut self, template: Template) -> Self {
        self.template = template;
        self
    }

    /// Build the facade and configure it from the process environment.
    ///
    /// # Errors
    ///
    /// See [`LogForge::configure`].
    pub fn build(self) -> Result<LogForge> {
        let forge = self.into_forge();
        forge.configure()?;
        Ok(forge)
    }

    /// Build the facade and configure it from `lookup`.
    ///
    /// # Errors
    ///
    /// See [`LogForge::configure`].
    pub fn build_with<F>(self, lookup: F) -> Result<LogForge>
    where
        F: Fn(&str) -> Option<String>,
    {
        let forge = self.into_forge();
        forge.configure_with(lookup)?;
        Ok(forge)
    }

    fn into_forge(self) -> LogForge {
        LogForge {
            logger: Arc::new(Logger::new(self.name)),
            defaults: Mutex::new(Defaults {
                console_level: self.console_level,
                file_level: self.file_level,
            }),
            console: self.console,
            template: self.template,
        }
    }
}

impl Default for LogForgeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
