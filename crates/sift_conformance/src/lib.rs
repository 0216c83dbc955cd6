//! Conformance test helpers for sift.
//!
//! Provides shared pipeline functions that run build-log text through rule
//! construction, parsing, and collection, and return structured results for
//! assertion in integration tests.

#![warn(missing_docs)]

use std::sync::Arc;

use sift_config::SiftConfig;
use sift_diagnostics::{Diagnostic, DiagnosticSink, Severity};
use sift_extract::{build_rule_sets, ParseStats, Parser, Rule, RuleSet};

/// Result of running a log through the extraction pipeline.
pub struct PipelineResult {
    /// All diagnostics emitted, in emission order.
    pub diagnostics: Vec<Diagnostic>,
    /// Counters reported by the parser.
    pub stats: ParseStats,
    /// Whether any errors were emitted.
    pub has_errors: bool,
    /// Number of error-severity diagnostics.
    pub error_count: usize,
    /// Number of warning-severity diagnostics.
    pub warning_count: usize,
    /// How many times the collecting sink was finished.
    pub finish_count: usize,
}

impl PipelineResult {
    /// Returns the messages of all diagnostics, in emission order.
    pub fn messages(&self) -> Vec<&str> {
        self.diagnostics.iter().map(|d| d.message.as_str()).collect()
    }

    /// Returns the diagnostics carrying the given category.
    pub fn with_category(&self, category: &str) -> Vec<&Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.has_category(category))
            .collect()
    }
}

/// Runs `input` through an explicit, ordered rule list.
pub fn run_with_rules(input: &str, rules: Vec<Arc<dyn Rule>>) -> PipelineResult {
    let sink = DiagnosticSink::new();
    let mut parser = Parser::new(rules).with_sink(sink.clone());
    let stats = parser.parse_str(input).unwrap();
    let diagnostics = sink.take_all();
    let warning_count = diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Warning)
        .count();
    PipelineResult {
        diagnostics,
        stats,
        has_errors: sink.has_errors(),
        error_count: sink.error_count(),
        warning_count,
        finish_count: sink.finish_count(),
    }
}

/// Runs `input` through the given rule sets, in order.
pub fn run_pipeline(input: &str, sets: &[RuleSet]) -> PipelineResult {
    run_with_rules(input, build_rule_sets(sets).unwrap())
}

/// Runs `input` through every built-in rule set in default order.
pub fn full_pipeline(input: &str) -> PipelineResult {
    run_pipeline(input, &RuleSet::ALL)
}

/// Runs `input` with the rule sets selected by a `sift.toml` document.
pub fn pipeline_with_config(input: &str, config_toml: &str) -> PipelineResult {
    let config = sift_config::load_config_from_str(config_toml).unwrap();
    run_pipeline(input, &config_sets(&config))
}

/// Resolves a loaded configuration's rule-set names.
pub fn config_sets(config: &SiftConfig) -> Vec<RuleSet> {
    sift_config::resolve_rule_sets(&config.rules.sets).unwrap()
}

/// Joins lines with `\n`, the way they appear in a captured log.
pub fn log(lines: &[&str]) -> String {
    lines.join("\n")
}
