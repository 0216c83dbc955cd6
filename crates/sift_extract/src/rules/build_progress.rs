//! swift-build step counters.

use regex::Regex;
use sift_diagnostics::{Diagnostic, Severity};

use crate::error::RuleError;
use crate::helpers::compile;
use crate::Rule;

const SOURCE: &str = "swift-build";
const PROGRESS: &str = "progress";

/// Recognizes `[n/m] Compiling|Linking|Building <target>` lines.
///
/// Always a single-line info diagnostic: any following line ends it.
pub struct BuildProgress {
    start: Regex,
}

impl BuildProgress {
    const NAME: &'static str = "build-progress";

    /// Compiles the rule's pattern.
    pub fn new() -> Result<Self, RuleError> {
        Ok(Self {
            start: compile(
                Self::NAME,
                r"^\[(?P<done>\d+)/(?P<total>\d+)\] (?P<action>Compiling|Linking|Building) (?P<target>\S.*)$",
            )?,
        })
    }
}

impl Rule for BuildProgress {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "swift-build step counter"
    }

    fn could_start(&self, line: &str) -> bool {
        line.starts_with('[')
    }

    fn match_start(&self, line: &str) -> Option<Diagnostic> {
        let caps = self.start.captures(line)?;
        let target = caps["target"].trim_end();
        let mut diag = Diagnostic::new(
            Severity::Info,
            format!("{} {}", &caps["action"], target),
            line,
        )
        .with_source(SOURCE)
        .with_category(PROGRESS);
        if let Some(module) = target.split_whitespace().next() {
            diag = diag.with_build_target(module);
        }
        Some(diag)
    }

    fn match_continuation(&self, _line: &str, _current: Option<&Diagnostic>) -> bool {
        false
    }

    fn is_end(&self, line: &str, current: Option<&Diagnostic>) -> bool {
        current.is_some_and(|c| self.owns(c)) || self.start.is_match(line)
    }

    fn owns(&self, current: &Diagnostic) -> bool {
        current.has_category(PROGRESS)
    }
}
