//! The xcodebuild failed-commands summary block.

use regex::Regex;
use sift_diagnostics::Diagnostic;

use crate::error::RuleError;
use crate::helpers::{compile, is_indented};
use crate::Rule;

const SOURCE: &str = "xcodebuild";
const FAILED_COMMANDS: &str = "failed_commands";

/// Recognizes the `The following build commands failed:` block.
///
/// Each tab-indented command is kept as a related message; the block ends at
/// the `(<n> failure[s])` line.
pub struct FailedCommands {
    end: Regex,
}

impl FailedCommands {
    const NAME: &'static str = "failed-commands";
    const BANNER: &'static str = "The following build commands failed:";

    /// Compiles the rule's pattern.
    pub fn new() -> Result<Self, RuleError> {
        Ok(Self {
            end: compile(Self::NAME, r"^\(\d+ failures?\)$")?,
        })
    }
}

impl Rule for FailedCommands {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "xcodebuild list of failed build commands"
    }

    fn could_start(&self, line: &str) -> bool {
        line.starts_with("The following")
    }

    fn match_start(&self, line: &str) -> Option<Diagnostic> {
        if line.trim_end() != Self::BANNER {
            return None;
        }
        Some(
            Diagnostic::error("The following build commands failed", line)
                .with_source(SOURCE)
                .with_category(FAILED_COMMANDS),
        )
    }

    fn match_continuation(&self, line: &str, current: Option<&Diagnostic>) -> bool {
        current.is_some_and(|c| self.owns(c)) && is_indented(line)
    }

    fn is_end(&self, line: &str, _current: Option<&Diagnostic>) -> bool {
        self.end.is_match(line.trim())
    }

    fn owns(&self, current: &Diagnostic) -> bool {
        current.has_category(FAILED_COMMANDS)
    }
}
