//! xcodebuild result banners.

use regex::Regex;
use sift_diagnostics::{Diagnostic, Severity};

use crate::error::RuleError;
use crate::helpers::compile;
use crate::Rule;

const SOURCE: &str = "xcodebuild";
const BUILD_STATUS: &str = "build_status";

/// Recognizes `** <ACTION> SUCCEEDED|FAILED|INTERRUPTED **` banners.
///
/// FAILED banners are errors, everything else is info. A banner is always a
/// single-line diagnostic.
pub struct BuildStatus {
    start: Regex,
}

impl BuildStatus {
    const NAME: &'static str = "build-status";

    /// Compiles the rule's pattern.
    pub fn new() -> Result<Self, RuleError> {
        Ok(Self {
            start: compile(
                Self::NAME,
                r"^\*\* (?P<action>[A-Z]+(?: [A-Z]+)*?) (?P<outcome>SUCCEEDED|FAILED|INTERRUPTED) \*\*",
            )?,
        })
    }
}

impl Rule for BuildStatus {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "xcodebuild result banner"
    }

    fn could_start(&self, line: &str) -> bool {
        line.starts_with("** ")
    }

    fn match_start(&self, line: &str) -> Option<Diagnostic> {
        let caps = self.start.captures(line)?;
        let outcome = &caps["outcome"];
        let severity = if outcome == "FAILED" {
            Severity::Error
        } else {
            Severity::Info
        };
        Some(
            Diagnostic::new(severity, format!("{} {}", &caps["action"], outcome), line)
                .with_source(SOURCE)
                .with_category(BUILD_STATUS),
        )
    }

    fn match_continuation(&self, _line: &str, _current: Option<&Diagnostic>) -> bool {
        false
    }

    fn is_end(&self, line: &str, current: Option<&Diagnostic>) -> bool {
        current.is_some_and(|c| self.owns(c)) || line.starts_with("** ")
    }

    fn owns(&self, current: &Diagnostic) -> bool {
        current.has_category(BUILD_STATUS)
    }
}
