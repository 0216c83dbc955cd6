//! Rule-driven extraction of diagnostics from build-tool output.
//!
//! Build logs are consumed one line at a time by a [`Parser`], which asks an
//! ordered list of [`Rule`]s whether each line starts, continues, or ends a
//! diagnostic. Completed diagnostics are delivered to the parser's
//! [`OutputSink`](sift_diagnostics::OutputSink)s in the order they finish.
//!
//! # Rule Sets
//!
//! - **xcodebuild:** build-status banners, failed-command blocks, compiler
//!   diagnostics, linker errors
//! - **swift-build:** emit-module failures, build progress, compiler
//!   diagnostics, linker errors
//! - **xctest:** assertion failures, test cases, test suites

#![warn(missing_docs)]

mod composite;
mod engine;
mod error;
mod helpers;
mod rules;

pub use composite::CompositeRule;
pub use engine::{read_lines, LogLines, ParseStats, Parser};
pub use error::{ParseError, RuleError};
pub use rules::{
    build_rule_sets, default_rules, BuildProgress, BuildStatus, CompilerDiagnostic,
    EmitModuleFailure, FailedCommands, LinkerError, RuleSet, TestAssertion, TestCase, TestSuite,
    UndefinedSymbols,
};

use sift_diagnostics::Diagnostic;

/// A stateless matcher for one log dialect.
///
/// A rule answers questions about a single line, optionally in the context of
/// the diagnostic the parser is currently assembling. All methods are pure:
/// compiled patterns are built once at construction and never mutated, so a
/// rule may be shared between parsers running on different threads.
pub trait Rule: Send + Sync {
    /// Returns the short kebab-case name of this rule (e.g., "compiler-diagnostic").
    fn name(&self) -> &str;

    /// Returns a human-readable description of what this rule recognizes.
    fn description(&self) -> &str;

    /// Cheap pre-check run before [`match_start`](Self::match_start).
    ///
    /// Must return `true` for every line `match_start` would accept; returning
    /// `false` promises that `match_start` would return `None`. The default
    /// accepts everything. This only saves work and never changes results.
    fn could_start(&self, _line: &str) -> bool {
        true
    }

    /// Parses `line` as the beginning of a new diagnostic.
    ///
    /// Returns a fully populated diagnostic with no related messages, or
    /// `None`. A location number that fails to parse means no match.
    fn match_start(&self, line: &str) -> Option<Diagnostic>;

    /// Returns `true` if `line` extends `current`.
    ///
    /// Implementations must check `current`'s source or category and only
    /// claim lines for diagnostics they started.
    fn match_continuation(&self, line: &str, current: Option<&Diagnostic>) -> bool;

    /// Returns `true` if `line` is a boundary that terminates `current`.
    fn is_end(&self, line: &str, current: Option<&Diagnostic>) -> bool;

    /// Returns `true` if this rule started diagnostics like `current`.
    ///
    /// The parser honors an [`is_end`](Self::is_end) verdict immediately only
    /// from a rule that owns the current diagnostic; verdicts from other rules
    /// count only when every installed rule agrees. The default owns nothing.
    fn owns(&self, _current: &Diagnostic) -> bool {
        false
    }

    /// Sub-rules of a composite rule, in evaluation order.
    fn members(&self) -> &[std::sync::Arc<dyn Rule>] {
        &[]
    }

    /// Runs [`could_start`](Self::could_start) and, if it passes,
    /// [`match_start`](Self::match_start).
    fn try_start(&self, line: &str) -> Option<Diagnostic> {
        if self.could_start(line) {
            self.match_start(line)
        } else {
            None
        }
    }
}
