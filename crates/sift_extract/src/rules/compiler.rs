//! Compiler diagnostics: `path:line:column: error|warning: message`.

use regex::Regex;
use sift_diagnostics::{Diagnostic, Severity};

use crate::error::RuleError;
use crate::helpers::{
    compile, has_issue_marker, is_blank, is_caret_line, is_gutter_line, parse_position,
    SOURCE_EXTENSIONS,
};
use crate::Rule;

const NAME: &str = "compiler-diagnostic";
const SOURCE: &str = "compiler";

/// Recognizes clang and swiftc diagnostics pointing into a source file.
///
/// The file must carry one of the known source extensions. Follow-up `note:`
/// lines, caret indicators and swift gutter lines are kept as related
/// messages. The diagnostic ends at a blank line or the next compiler
/// diagnostic.
pub struct CompilerDiagnostic {
    start: Regex,
    note: Regex,
}

impl CompilerDiagnostic {
    /// Compiles the rule's patterns.
    pub fn new() -> Result<Self, RuleError> {
        let extensions = SOURCE_EXTENSIONS.join("|");
        let start = compile(
            NAME,
            &format!(
                r"^(?P<file>.+?\.(?:{extensions})):(?P<line>\d+):(?P<column>\d+): (?P<severity>error|warning): (?P<message>.*)$"
            ),
        )?;
        let note = compile(NAME, r"^\s*.+?:\d+(?::\d+)?: note: ")?;
        Ok(Self { start, note })
    }
}

impl Rule for CompilerDiagnostic {
    fn name(&self) -> &str {
        NAME
    }

    fn description(&self) -> &str {
        "clang/swiftc error or warning with a source location"
    }

    fn could_start(&self, line: &str) -> bool {
        has_issue_marker(line)
    }

    fn match_start(&self, line: &str) -> Option<Diagnostic> {
        let caps = self.start.captures(line)?;
        let line_no = parse_position(&caps["line"])?;
        let column = parse_position(&caps["column"])?;
        let (severity, category) = match &caps["severity"] {
            "error" => (Severity::Error, "compile_error"),
            _ => (Severity::Warning, "compile_warning"),
        };
        Some(
            Diagnostic::new(severity, &caps["message"], line)
                .with_file(&caps["file"])
                .with_line(line_no)
                .with_column(column)
                .with_source(SOURCE)
                .with_category(category),
        )
    }

    fn match_continuation(&self, line: &str, current: Option<&Diagnostic>) -> bool {
        if !current.is_some_and(|c| self.owns(c)) {
            return false;
        }
        line.trim_start().starts_with("note:")
            || self.note.is_match(line)
            || is_caret_line(line)
            || is_gutter_line(line)
    }

    fn is_end(&self, line: &str, _current: Option<&Diagnostic>) -> bool {
        is_blank(line) || (has_issue_marker(line) && self.start.is_match(line))
    }

    fn owns(&self, current: &Diagnostic) -> bool {
        current.has_source(SOURCE)
    }
}
