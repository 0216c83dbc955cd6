//! Human-readable rendering of diagnostics.

use crate::diagnostic::Diagnostic;
use crate::severity::Severity;

/// Trait for rendering a single diagnostic into a formatted string.
pub trait DiagnosticRenderer {
    /// Renders a single diagnostic into a formatted string.
    fn render(&self, diag: &Diagnostic) -> String;
}

/// Renders diagnostics in the familiar compiler style.
///
/// Produces output like:
/// ```text
/// main.swift:10:5: error: use of unresolved identifier 'foo'
///     note: did you mean 'food'?
/// ```
/// Location parts that are unknown are omitted; related messages follow the
/// header line indented by four spaces, exactly as captured.
pub struct TextRenderer {
    /// Whether to use ANSI color codes for the severity label.
    pub color: bool,
}

impl TextRenderer {
    /// Creates a new text renderer.
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn severity_label(&self, severity: Severity) -> String {
        if !self.color {
            return severity.to_string();
        }
        let code = match severity {
            Severity::Error => "1;31",
            Severity::Warning => "1;33",
            Severity::Note => "1;36",
            Severity::Info => "1;34",
        };
        format!("\x1b[{code}m{severity}\x1b[0m")
    }
}

impl DiagnosticRenderer for TextRenderer {
    fn render(&self, diag: &Diagnostic) -> String {
        let mut out = String::new();

        if let Some(location) = diag.location() {
            out.push_str(&location);
            out.push_str(": ");
        }
        out.push_str(&format!(
            "{}: {}",
            self.severity_label(diag.severity),
            diag.message
        ));

        for related in &diag.related_messages {
            out.push_str("\n    ");
            out.push_str(related);
        }

        out
    }
}
