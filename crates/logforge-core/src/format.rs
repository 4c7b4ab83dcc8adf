//! Record formatters.
//!
//! Formatters are pure: they read a [`Record`] and return the rendered line.
//! Handlers share records, so one handler's coloring can never leak into
//! another handler's output.

use crate::record::Record;
use crate::term::{paint, severity_color, strip_ansi, LOCATION_COLOR};
use crate::time::format_timestamp;
use logforge_types::{bail, Result};

/// Line layout used when none is given.
pub const DEFAULT_TEMPLATE: &str = "[{timestamp}] {name} - {level} - {message}";

/// Renders a record into a single line of text.
pub trait Formatter: Send + Sync {
    /// Render `record`. The result carries no trailing newline.
    fn render(&self, record: &Record) -> String;
}

/// A field that can be referenced from a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Timestamp,
    Name,
    Level,
    Message,
}

impl Field {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "timestamp" => Some(Field::Timestamp),
            "name" => Some(Field::Name),
            "level" => Some(Field::Level),
            "message" => Some(Field::Message),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field(Field),
}

/// Values substituted into a [`Template`].
#[derive(Debug, Clone, Copy)]
pub struct Fields<'a> {
    /// Rendered timestamp
    pub timestamp: &'a str,
    /// Logger name
    pub name: &'a str,
    /// Severity name, possibly colored
    pub level: &'a str,
    /// Message body, possibly decorated
    pub message: &'a str,
}

/// A parsed line layout with `{timestamp}`, `{name}`, `{level}` and
/// `{message}` placeholders. `{{` and `}}` produce literal braces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// Parse a template string.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for unknown placeholders and unbalanced
    /// braces.
    pub fn parse(template: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = template.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    literal.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    literal.push('}');
                }
                '{' => {
                    let mut name = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some(c) => name.push(c),
                            None => {
                                bail!(Config, "Unclosed placeholder in template '{}'", template)
                            }
                        }
                    }
                    let Some(field) = Field::parse(&name) else {
                        bail!(
                            Config,
                            "Unknown placeholder '{{{}}}' in template '{}'",
                            name,
                            template
                        );
                    };
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Field(field));
                }
                '}' => bail!(Config, "Unmatched '}}' in template '{}'", template),
                c => literal.push(c),
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self { segments })
    }

    /// Substitute `fields` into the template.
    pub fn render(&self, fields: &Fields<'_>) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field(Field::Timestamp) => out.push_str(fields.timestamp),
                Segment::Field(Field::Name) => out.push_str(fields.name),
                Segment::Field(Field::Level) => out.push_str(fields.level),
                Segment::Field(Field::Message) => out.push_str(fields.message),
            }
        }
        out
    }
}

impl Default for Template {
    fn default() -> Self {
        Self {
            segments: vec![
                Segment::Literal("[".to_string()),
                Segment::Field(Field::Timestamp),
                Segment::Literal("] ".to_string()),
                Segment::Field(Field::Name),
                Segment::Literal(" - ".to_string()),
                Segment::Field(Field::Level),
                Segment::Literal(" - ".to_string()),
                Segment::Field(Field::Message),
            ],
        }
    }
}

/// Console formatter: colors the severity name and prefixes the message with
/// the caller's `file:line`.
#[derive(Debug, Clone)]
pub struct ColorFormatter {
    template: Template,
    use_color: bool,
}

impl ColorFormatter {
    /// Create a formatter with the given template.
    pub fn new(template: Template, use_color: bool) -> Self {
        Self { template, use_color }
    }

    /// Whether ANSI sequences are emitted.
    pub fn use_color(&self) -> bool {
        self.use_color
    }
}

impl Default for ColorFormatter {
    fn default() -> Self {
        Self::new(Template::default(), true)
    }
}

impl Formatter for ColorFormatter {
    fn render(&self, record: &Record) -> String {
        let name = record.level.as_str();
        let line = record.line.to_string();

        let (level, location) = if self.use_color {
            (
                paint(name, severity_color(record.level), true),
                format!(
                    "{}:{}",
                    paint(record.basename(), LOCATION_COLOR, false),
                    paint(&line, LOCATION_COLOR, false)
                ),
            )
        } else {
            (name.to_string(), format!("{}:{}", record.basename(), line))
        };

        let message = format!("{} - {}", location, record.message);
        let timestamp = format_timestamp(&record.timestamp);

        self.template.render(&Fields {
            timestamp: &timestamp,
            name: &record.name,
            level: &level,
            message: &message,
        })
    }
}

/// File formatter: plain text with every ANSI color sequence removed.
#[derive(Debug, Clone, Default)]
pub struct CleanFormatter {
    template: Template,
}

impl CleanFormatter {
    /// Create a formatter with the given template.
    pub fn new(template: Template) -> Self {
        Self { template }
    }
}

impl Formatter for CleanFormatter {
    fn render(&self, record: &Record) -> String {
        let timestamp = format_timestamp(&record.timestamp);
        let name = strip_ansi(&record.name);
        let message = strip_ansi(&record.message);

        self.template.render(&Fields {
            timestamp: &timestamp,
            name: &name,
            level: record.level.as_str(),
            message: &message,
        })
    }
}
