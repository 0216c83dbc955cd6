//! XCTest assertion failures.

use regex::Regex;
use sift_diagnostics::Diagnostic;

use crate::error::RuleError;
use crate::helpers::{compile, is_blank, is_indented, is_test_status_line, parse_position};
use crate::Rule;

const SOURCE: &str = "xctest";
const ASSERTION: &str = "assertion";

/// Recognizes assertion failures: `<path>:<line>: error: <test> : <message>`.
///
/// The file and line come from the embedded `path:line:` prefix. Indented
/// lines that follow are kept as related messages.
pub struct TestAssertion {
    start: Regex,
}

impl TestAssertion {
    const NAME: &'static str = "test-assertion";

    /// Compiles the rule's pattern.
    pub fn new() -> Result<Self, RuleError> {
        Ok(Self {
            start: compile(
                Self::NAME,
                r"^(?P<file>[^:]+):(?P<line>\d+): error: (?P<message>.+? : .+)$",
            )?,
        })
    }
}

impl Rule for TestAssertion {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "XCTest assertion failure with file and line"
    }

    fn could_start(&self, line: &str) -> bool {
        line.contains(": error: ")
    }

    fn match_start(&self, line: &str) -> Option<Diagnostic> {
        let caps = self.start.captures(line)?;
        let line_no = parse_position(&caps["line"])?;
        Some(
            Diagnostic::error(&caps["message"], line)
                .with_file(&caps["file"])
                .with_line(line_no)
                .with_source(SOURCE)
                .with_category(ASSERTION),
        )
    }

    fn match_continuation(&self, line: &str, current: Option<&Diagnostic>) -> bool {
        current.is_some_and(|c| self.owns(c)) && is_indented(line)
    }

    fn is_end(&self, line: &str, _current: Option<&Diagnostic>) -> bool {
        is_blank(line) || is_test_status_line(line)
    }

    fn owns(&self, current: &Diagnostic) -> bool {
        current.has_category(ASSERTION)
    }
}
