//! swift-build emit-module failures.

use regex::Regex;
use sift_diagnostics::Diagnostic;

use crate::error::RuleError;
use crate::helpers::{compile, has_issue_marker, is_blank};
use crate::Rule;

const SOURCE: &str = "swift-build";
const MODULE_FAILED: &str = "module_failed";

/// Recognizes `error: emit-module command failed with exit code <n>`.
///
/// A `note:` hint line directly after it is kept as a related message. The
/// failure ends at a blank line or any other error or warning line.
pub struct EmitModuleFailure {
    start: Regex,
}

impl EmitModuleFailure {
    const NAME: &'static str = "emit-module-failure";

    /// Compiles the rule's pattern.
    pub fn new() -> Result<Self, RuleError> {
        Ok(Self {
            start: compile(
                Self::NAME,
                r"^error: (?P<message>emit-module command failed with exit code (?P<code>\d+).*)$",
            )?,
        })
    }
}

impl Rule for EmitModuleFailure {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "swift-build module emission failure"
    }

    fn could_start(&self, line: &str) -> bool {
        line.starts_with("error: emit-module")
    }

    fn match_start(&self, line: &str) -> Option<Diagnostic> {
        let caps = self.start.captures(line)?;
        Some(
            Diagnostic::error(caps["message"].trim_end(), line)
                .with_source(SOURCE)
                .with_category(MODULE_FAILED),
        )
    }

    fn match_continuation(&self, line: &str, current: Option<&Diagnostic>) -> bool {
        current.is_some_and(|c| self.owns(c)) && line.trim_start().starts_with("note:")
    }

    fn is_end(&self, line: &str, _current: Option<&Diagnostic>) -> bool {
        is_blank(line)
            || line.starts_with("error: ")
            || line.starts_with("warning: ")
            || has_issue_marker(line)
    }

    fn owns(&self, current: &Diagnostic) -> bool {
        current.has_category(MODULE_FAILED)
    }
}
