//! Structured diagnostic records with severity, location, and context lines.

use crate::severity::Severity;
use serde::{Deserialize, Serialize};

/// One issue extracted from build-tool output.
///
/// A diagnostic is created by a rule from the line that starts it. While it is
/// the parser's current diagnostic, continuation lines are appended to
/// [`related_messages`](Self::related_messages); once flushed to the output
/// sinks it is only ever handed out by shared reference.
///
/// Each diagnostic includes:
/// - A severity level and a human-readable message
/// - An optional source location (file, line, column are independent)
/// - The emitting subsystem (`source`) and a rule-assigned `category`
/// - The raw line that started it
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    /// The main diagnostic message.
    pub message: String,
    /// The severity level of this diagnostic.
    pub severity: Severity,
    /// The source file the diagnostic points at, if any.
    pub file: Option<String>,
    /// The 1-based line number, if any.
    pub line: Option<u32>,
    /// The 1-based column number, if any.
    pub column: Option<u32>,
    /// Continuation lines captured after the start line, in input order.
    pub related_messages: Vec<String>,
    /// The emitting subsystem, e.g. `"linker"` or `"xctest"`.
    pub source: Option<String>,
    /// A finer-grained tag assigned by the rule that created this diagnostic.
    pub category: Option<String>,
    /// The exact line that started this diagnostic.
    pub raw: String,
    /// The build target or project the diagnostic belongs to, when known.
    pub build_target: Option<String>,
}

impl Diagnostic {
    /// Creates a diagnostic with the given severity, message, and raw start line.
    pub fn new(severity: Severity, message: impl Into<String>, raw: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity,
            file: None,
            line: None,
            column: None,
            related_messages: Vec::new(),
            source: None,
            category: None,
            raw: raw.into(),
            build_target: None,
        }
    }

    /// Creates a new error diagnostic.
    pub fn error(message: impl Into<String>, raw: impl Into<String>) -> Self {
        Self::new(Severity::Error, message, raw)
    }

    /// Creates a new warning diagnostic.
    pub fn warning(message: impl Into<String>, raw: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message, raw)
    }

    /// Creates a new informational diagnostic.
    pub fn info(message: impl Into<String>, raw: impl Into<String>) -> Self {
        Self::new(Severity::Info, message, raw)
    }

    /// Sets the source file.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Sets the 1-based line number.
    pub fn with_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    /// Sets the 1-based column number.
    pub fn with_column(mut self, column: u32) -> Self {
        self.column = Some(column);
        self
    }

    /// Sets the emitting subsystem tag.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the rule-assigned category tag.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets the build target context.
    pub fn with_build_target(mut self, target: impl Into<String>) -> Self {
        self.build_target = Some(target.into());
        self
    }

    /// Appends a continuation line.
    pub fn with_related(mut self, message: impl Into<String>) -> Self {
        self.related_messages.push(message.into());
        self
    }

    /// Returns `true` if this diagnostic was tagged with the given source.
    pub fn has_source(&self, source: &str) -> bool {
        self.source.as_deref() == Some(source)
    }

    /// Returns `true` if this diagnostic was tagged with the given category.
    pub fn has_category(&self, category: &str) -> bool {
        self.category.as_deref() == Some(category)
    }

    /// Formats the known parts of the location as `file:line:column`.
    ///
    /// Returns `None` when there is no file. A line without a column renders
    /// as `file:line`.
    pub fn location(&self) -> Option<String> {
        let file = self.file.as_deref()?;
        Some(match (self.line, self.column) {
            (Some(line), Some(column)) => format!("{file}:{line}:{column}"),
            (Some(line), None) => format!("{file}:{line}"),
            _ => file.to_string(),
        })
    }
}
