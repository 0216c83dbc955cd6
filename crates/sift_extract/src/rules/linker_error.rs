//! Standalone `ld:` errors and warnings.

use regex::Regex;
use sift_diagnostics::{Diagnostic, Severity};

use crate::error::RuleError;
use crate::helpers::{compile, is_blank, is_indented, is_link_failure_banner};
use crate::Rule;

const SOURCE: &str = "linker";
const LD_ERROR: &str = "ld_error";

/// Recognizes a standalone `ld: <message>` line such as
/// `ld: library not found for -lFoo`.
///
/// `ld: warning:` lines become warnings; everything else is an error.
pub struct LinkerError {
    start: Regex,
}

impl LinkerError {
    const NAME: &'static str = "linker-error";

    /// Compiles the rule's pattern.
    pub fn new() -> Result<Self, RuleError> {
        Ok(Self {
            start: compile(Self::NAME, r"^ld: (?P<message>\S.*)$")?,
        })
    }
}

impl Rule for LinkerError {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "standalone ld error or warning"
    }

    fn could_start(&self, line: &str) -> bool {
        line.starts_with("ld: ")
    }

    fn match_start(&self, line: &str) -> Option<Diagnostic> {
        let caps = self.start.captures(line)?;
        let message = &caps["message"];
        let diag = match message.strip_prefix("warning: ") {
            Some(rest) => Diagnostic::new(Severity::Warning, rest, line),
            None => Diagnostic::new(Severity::Error, message, line),
        };
        Some(diag.with_source(SOURCE).with_category(LD_ERROR))
    }

    fn match_continuation(&self, line: &str, current: Option<&Diagnostic>) -> bool {
        current.is_some_and(|c| self.owns(c)) && is_indented(line)
    }

    fn is_end(&self, line: &str, _current: Option<&Diagnostic>) -> bool {
        is_blank(line) || is_link_failure_banner(line)
    }

    fn owns(&self, current: &Diagnostic) -> bool {
        current.has_category(LD_ERROR)
    }
}
