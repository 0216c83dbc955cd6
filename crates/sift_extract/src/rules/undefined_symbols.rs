//! Linker blocks listing undefined symbols.

use regex::Regex;
use sift_diagnostics::Diagnostic;

use crate::error::RuleError;
use crate::helpers::{compile, is_indented, is_link_failure_banner};
use crate::Rule;

const SOURCE: &str = "linker";
const UNDEFINED_SYMBOLS: &str = "undefined_symbols";

/// Recognizes the `Undefined symbols for architecture <arch>:` block.
///
/// Indented symbol and reference lines, and the `ld:`/`clang:` lines that
/// follow them, are kept as related messages. The block ends at the
/// `linker command failed` banner.
pub struct UndefinedSymbols {
    start: Regex,
}

impl UndefinedSymbols {
    const NAME: &'static str = "undefined-symbols";

    /// Compiles the rule's pattern.
    pub fn new() -> Result<Self, RuleError> {
        Ok(Self {
            start: compile(
                Self::NAME,
                r"^Undefined symbols for architecture (?P<arch>\S+):$",
            )?,
        })
    }
}

impl Rule for UndefinedSymbols {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "linker block listing undefined symbols and their references"
    }

    fn could_start(&self, line: &str) -> bool {
        line.starts_with("Undefined symbols")
    }

    fn match_start(&self, line: &str) -> Option<Diagnostic> {
        let caps = self.start.captures(line)?;
        Some(
            Diagnostic::error(
                format!("Undefined symbols for architecture {}", &caps["arch"]),
                line,
            )
            .with_source(SOURCE)
            .with_category(UNDEFINED_SYMBOLS),
        )
    }

    fn match_continuation(&self, line: &str, current: Option<&Diagnostic>) -> bool {
        current.is_some_and(|c| self.owns(c))
            && !is_link_failure_banner(line)
            && (is_indented(line) || line.starts_with("ld:") || line.starts_with("clang:"))
    }

    fn is_end(&self, line: &str, _current: Option<&Diagnostic>) -> bool {
        is_link_failure_banner(line)
    }

    fn owns(&self, current: &Diagnostic) -> bool {
        current.has_category(UNDEFINED_SYMBOLS)
    }
}
