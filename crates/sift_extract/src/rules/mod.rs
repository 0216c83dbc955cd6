//! Built-in rule implementations and the named rule sets built from them.
//!
//! Each atomic rule recognizes one feature of one build tool's output. The
//! [`RuleSet`]s group them into composites whose member order decides which
//! rule wins when several could start a diagnostic on the same line.

mod build_progress;
mod build_status;
mod compiler;
mod emit_module_failure;
mod failed_commands;
mod linker_error;
mod test_assertion;
mod test_case;
mod test_suite;
mod undefined_symbols;

pub use build_progress::BuildProgress;
pub use build_status::BuildStatus;
pub use compiler::CompilerDiagnostic;
pub use emit_module_failure::EmitModuleFailure;
pub use failed_commands::FailedCommands;
pub use linker_error::LinkerError;
pub use test_assertion::TestAssertion;
pub use test_case::TestCase;
pub use test_suite::TestSuite;
pub use undefined_symbols::UndefinedSymbols;

use std::fmt;
use std::sync::Arc;

use crate::composite::CompositeRule;
use crate::error::RuleError;
use crate::Rule;

/// A named, built-in group of rules for one build tool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RuleSet {
    /// `xcodebuild` output: banners, failed commands, compiler and linker.
    Xcodebuild,
    /// `swift build` output: module failures, progress, compiler and linker.
    SwiftBuild,
    /// XCTest output: assertions, test cases, test suites.
    Xctest,
}

impl RuleSet {
    /// Every built-in rule set, in default evaluation order.
    pub const ALL: [RuleSet; 3] = [RuleSet::Xcodebuild, RuleSet::SwiftBuild, RuleSet::Xctest];

    /// Returns the stable name used in configuration and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            RuleSet::Xcodebuild => "xcodebuild",
            RuleSet::SwiftBuild => "swift-build",
            RuleSet::Xctest => "xctest",
        }
    }

    /// Looks up a rule set by its stable name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|set| set.name() == name)
    }

    /// Returns a one-line description of the rule set.
    pub fn description(self) -> &'static str {
        match self {
            RuleSet::Xcodebuild => "diagnostics from xcodebuild logs",
            RuleSet::SwiftBuild => "diagnostics from swift build logs",
            RuleSet::Xctest => "failures and status from XCTest runs",
        }
    }

    /// Builds the composite rule for this set.
    pub fn build(self) -> Result<CompositeRule, RuleError> {
        let rules: Vec<Arc<dyn Rule>> = match self {
            RuleSet::Xcodebuild => vec![
                Arc::new(BuildStatus::new()?),
                Arc::new(FailedCommands::new()?),
                Arc::new(CompilerDiagnostic::new()?),
                Arc::new(UndefinedSymbols::new()?),
                Arc::new(LinkerError::new()?),
            ],
            RuleSet::SwiftBuild => vec![
                Arc::new(EmitModuleFailure::new()?),
                Arc::new(BuildProgress::new()?),
                Arc::new(CompilerDiagnostic::new()?),
                Arc::new(UndefinedSymbols::new()?),
            ],
            RuleSet::Xctest => vec![
                Arc::new(TestAssertion::new()?),
                Arc::new(TestCase::new()?),
                Arc::new(TestSuite::new()?),
            ],
        };
        Ok(CompositeRule::new(self.name(), self.description(), rules))
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Builds the parser's ordered rule list from the given rule sets.
pub fn build_rule_sets(sets: &[RuleSet]) -> Result<Vec<Arc<dyn Rule>>, RuleError> {
    sets.iter()
        .map(|set| set.build().map(|rule| Arc::new(rule) as Arc<dyn Rule>))
        .collect()
}

/// Builds every built-in rule set in default order.
pub fn default_rules() -> Result<Vec<Arc<dyn Rule>>, RuleError> {
    build_rule_sets(&RuleSet::ALL)
}
