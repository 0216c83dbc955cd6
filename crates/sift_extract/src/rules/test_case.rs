//! XCTest case status lines.

use regex::Regex;
use sift_diagnostics::Diagnostic;

use crate::error::RuleError;
use crate::helpers::{compile, is_test_status_line, status_severity};
use crate::Rule;

const SOURCE: &str = "xctest";
const TEST_CASE: &str = "test_case";

/// Recognizes `Test Case '<name>' started|passed|failed` lines.
///
/// Failed cases are errors, everything else is info. The diagnostic stays
/// open until the next test-case or test-suite line.
pub struct TestCase {
    start: Regex,
}

impl TestCase {
    const NAME: &'static str = "test-case";

    /// Compiles the rule's pattern.
    pub fn new() -> Result<Self, RuleError> {
        Ok(Self {
            start: compile(
                Self::NAME,
                r"^Test Case '(?P<name>[^']+)' (?P<status>started|passed|failed)(?: \((?P<secs>\d+(?:\.\d+)?) seconds\))?",
            )?,
        })
    }
}

impl Rule for TestCase {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "XCTest case status line"
    }

    fn could_start(&self, line: &str) -> bool {
        line.starts_with("Test Case '")
    }

    fn match_start(&self, line: &str) -> Option<Diagnostic> {
        let caps = self.start.captures(line)?;
        let status = &caps["status"];
        let mut message = format!("{} {}", &caps["name"], status);
        if let Some(secs) = caps.name("secs") {
            message.push_str(&format!(" ({} seconds)", secs.as_str()));
        }
        Some(
            Diagnostic::new(status_severity(status), message, line)
                .with_source(SOURCE)
                .with_category(TEST_CASE),
        )
    }

    fn match_continuation(&self, _line: &str, _current: Option<&Diagnostic>) -> bool {
        false
    }

    fn is_end(&self, line: &str, _current: Option<&Diagnostic>) -> bool {
        is_test_status_line(line)
    }

    fn owns(&self, current: &Diagnostic) -> bool {
        current.has_category(TEST_CASE)
    }
}
