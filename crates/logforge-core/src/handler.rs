//! Handlers and the sinks they write to.

use crate::filter::LevelFilter;
use crate::format::Formatter;
use crate::record::Record;
use logforge_types::{LogForgeError, Result, Severity};
use parking_lot::Mutex;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Destination of rendered lines.
pub enum Sink {
    /// Standard error
    Stderr,
    /// A file opened for appending
    File {
        /// Path the file was opened at
        path: PathBuf,
        /// Open handle
        file: Mutex<File>,
    },
    /// Any other writer, e.g. a [`SharedBuffer`]
    Writer {
        /// Name shown in handler summaries
        label: String,
        /// The writer itself
        writer: Mutex<Box<dyn Write + Send>>,
    },
}

impl Sink {
    /// Open `path` for appending, creating it when missing.
    ///
    /// # Errors
    ///
    /// Returns [`LogForgeError::OpenFile`] when the file cannot be opened.
    pub fn file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| LogForgeError::OpenFile {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Sink::File {
            path: path.to_path_buf(),
            file: Mutex::new(file),
        })
    }

    /// Wrap an arbitrary writer.
    pub fn writer(label: impl Into<String>, writer: impl Write + Send + 'static) -> Self {
        Sink::Writer {
            label: label.into(),
            writer: Mutex::new(Box::new(writer)),
        }
    }

    /// Short description: `stderr`, the file path, or the writer's label.
    pub fn describe(&self) -> String {
        match self {
            Sink::Stderr => "stderr".to_string(),
            Sink::File { path, .. } => path.display().to_string(),
            Sink::Writer { label, .. } => label.clone(),
        }
    }

    /// Write `line` followed by a newline and flush.
    ///
    /// The line goes out in a single `write_all` so concurrent writers never
    /// interleave within a line.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut buf = String::with_capacity(line.len() + 1);
        buf.push_str(line);
        buf.push('\n');

        match self {
            Sink::Stderr => {
                let mut stderr = io::stderr().lock();
                stderr.write_all(buf.as_bytes())?;
                stderr.flush()
            }
            Sink::File { file, .. } => {
                let mut file = file.lock();
                file.write_all(buf.as_bytes())?;
                file.flush()
            }
            Sink::Writer { writer, .. } => {
                let mut writer = writer.lock();
                writer.write_all(buf.as_bytes())?;
                writer.flush()
            }
        }
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sink({})", self.describe())
    }
}

/// Where a facade sends its console output.
#[derive(Debug, Clone, Default)]
pub enum ConsoleTarget {
    /// Standard error
    #[default]
    Stderr,
    /// An in-memory buffer, for embedding and tests
    Buffer(SharedBuffer),
}

impl ConsoleTarget {
    /// Create a fresh sink for this target.
    pub fn sink(&self) -> Sink {
        match self {
            ConsoleTarget::Stderr => Sink::Stderr,
            ConsoleTarget::Buffer(buffer) => Sink::writer("buffer", buffer.clone()),
        }
    }
}

/// Cloneable in-memory writer; all clones share the same bytes.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.lock()).into_owned()
    }

    /// Written lines, without their terminators.
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Observable shape of a handler, used to compare handler sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerSummary {
    /// Sink description
    pub sink: String,
    /// Minimum severity
    pub threshold: Severity,
    /// Level accepted by the exact-level filter, if any
    pub exact_level: Option<Severity>,
}

/// A sink with a threshold, a formatter and an optional exact-level filter.
pub struct Handler {
    threshold: Severity,
    formatter: Box<dyn Formatter>,
    filter: Option<LevelFilter>,
    sink: Sink,
}

impl Handler {
    /// Create a handler accepting every severity.
    pub fn new(sink: Sink, formatter: impl Formatter + 'static) -> Self {
        Self {
            threshold: Severity::Debug,
            formatter: Box::new(formatter),
            filter: None,
            sink,
        }
    }

    /// Set the minimum severity.
    pub fn with_threshold(mut self, threshold: Severity) -> Self {
        self.threshold = threshold;
        self
    }

    /// Restrict the handler to one exact severity.
    pub fn with_filter(mut self, filter: LevelFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Minimum severity.
    pub fn threshold(&self) -> Severity {
        self.threshold
    }

    /// The handler's sink.
    pub fn sink(&self) -> &Sink {
        &self.sink
    }

    /// Check threshold and filter.
    pub fn accepts(&self, record: &Record) -> bool {
        record.level >= self.threshold
            && self.filter.map_or(true, |filter| filter.accepts(record))
    }

    /// Render and write `record` if it is accepted.
    ///
    /// # Errors
    ///
    /// Returns [`LogForgeError::Io`] when the sink fails.
    pub fn handle(&self, record: &Record) -> Result<()> {
        if !self.accepts(record) {
            return Ok(());
        }
        let line = self.formatter.render(record);
        self.sink.write_line(&line)?;
        Ok(())
    }

    /// Summary of this handler.
    pub fn summary(&self) -> HandlerSummary {
        HandlerSummary {
            sink: self.sink.describe(),
            threshold: self.threshold,
            exact_level: self.filter.map(|filter| filter.level()),
        }
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("sink", &self.sink)
            .field("threshold", &self.threshold)
            .field("filter", &self.filter)
            .finish()
    }
}
