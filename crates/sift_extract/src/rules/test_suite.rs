//! XCTest suite status lines.

use regex::Regex;
use sift_diagnostics::Diagnostic;

use crate::error::RuleError;
use crate::helpers::{compile, is_test_status_line, status_severity};
use crate::Rule;

const SOURCE: &str = "xctest";
const TEST_SUITE: &str = "test_suite";

/// Recognizes `Test Suite '<name>' started|passed|failed` lines.
///
/// The suite name is recorded as the build target.
pub struct TestSuite {
    start: Regex,
}

impl TestSuite {
    const NAME: &'static str = "test-suite";

    /// Compiles the rule's pattern.
    pub fn new() -> Result<Self, RuleError> {
        Ok(Self {
            start: compile(
                Self::NAME,
                r"^Test Suite '(?P<name>[^']+)' (?P<status>started|passed|failed)",
            )?,
        })
    }
}

impl Rule for TestSuite {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "XCTest suite status line"
    }

    fn could_start(&self, line: &str) -> bool {
        line.starts_with("Test Suite '")
    }

    fn match_start(&self, line: &str) -> Option<Diagnostic> {
        let caps = self.start.captures(line)?;
        let name = &caps["name"];
        let status = &caps["status"];
        Some(
            Diagnostic::new(status_severity(status), format!("{name} {status}"), line)
                .with_source(SOURCE)
                .with_category(TEST_SUITE)
                .with_build_target(name),
        )
    }

    fn match_continuation(&self, _line: &str, _current: Option<&Diagnostic>) -> bool {
        false
    }

    fn is_end(&self, line: &str, _current: Option<&Diagnostic>) -> bool {
        is_test_status_line(line)
    }

    fn owns(&self, current: &Diagnostic) -> bool {
        current.has_category(TEST_SUITE)
    }
}
