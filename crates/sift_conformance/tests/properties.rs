//! Property tests over the built-in rule sets.

use std::sync::Arc;

use proptest::prelude::*;
use sift_conformance::{full_pipeline, run_pipeline, run_with_rules};
use sift_diagnostics::Severity;
use sift_extract::{
    BuildProgress, BuildStatus, CompilerDiagnostic, EmitModuleFailure, FailedCommands,
    LinkerError, Rule, RuleSet, TestAssertion, TestCase, TestSuite, UndefinedSymbols,
};

/// Realistic lines from all three dialects, mixed freely by the strategies.
const CORPUS: &[&str] = &[
    "",
    "   ",
    "main.swift:10:5: error: use of unresolved identifier 'foo'",
    "main.swift:15:3: warning: variable 'bar' was never used",
    "    ^~~",
    " 12 |   let x = foo",
    "note: previous definition is here",
    "a.h:1:6: note: declared here",
    "Undefined symbols for architecture arm64:",
    "  \"_foo\", referenced from:",
    "ld: symbol(s) not found for architecture arm64",
    "ld: library not found for -lFoo",
    "clang: error: linker command failed with exit code 1 (use -v to see invocation)",
    "** BUILD FAILED **",
    "** TEST SUCCEEDED **",
    "The following build commands failed:",
    "\tCompileSwift normal arm64 main.swift",
    "(1 failure)",
    "[1/4] Compiling App main.swift",
    "[4/4] Linking App",
    "error: emit-module command failed with exit code 1",
    "Test Suite 'All tests' started at 2024-05-01 10:00:00.000",
    "Test Case '-[A.B testC]' started.",
    "Test Case '-[A.B testC]' failed (0.001 seconds).",
    "Tests/B.swift:9: error: -[A.B testC] : XCTAssertTrue failed",
    "random build noise",
];

fn atomic_rules() -> Vec<Arc<dyn Rule>> {
    vec![
        Arc::new(CompilerDiagnostic::new().unwrap()),
        Arc::new(UndefinedSymbols::new().unwrap()),
        Arc::new(LinkerError::new().unwrap()),
        Arc::new(BuildProgress::new().unwrap()),
        Arc::new(EmitModuleFailure::new().unwrap()),
        Arc::new(BuildStatus::new().unwrap()),
        Arc::new(FailedCommands::new().unwrap()),
        Arc::new(TestCase::new().unwrap()),
        Arc::new(TestSuite::new().unwrap()),
        Arc::new(TestAssertion::new().unwrap()),
    ]
}

fn corpus_log() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(CORPUS), 0..60).prop_map(|lines| lines.join("\n"))
}

fn rule_set_subset() -> impl Strategy<Value = Vec<RuleSet>> {
    prop::sample::subsequence(RuleSet::ALL.to_vec(), 1..=3).prop_shuffle()
}

proptest! {
    #[test]
    fn blank_only_input_yields_nothing(
        input in "[ \t\n]{0,200}",
        sets in rule_set_subset(),
    ) {
        let result = run_pipeline(&input, &sets);
        prop_assert!(result.diagnostics.is_empty());
        prop_assert_eq!(result.finish_count, 1);
    }

    #[test]
    fn parsing_is_idempotent(input in corpus_log(), sets in rule_set_subset()) {
        let first = run_pipeline(&input, &sets);
        let second = run_pipeline(&input, &sets);
        prop_assert_eq!(first.diagnostics, second.diagnostics);
        prop_assert_eq!(first.stats, second.stats);
    }

    #[test]
    fn every_line_is_accounted_for(input in corpus_log()) {
        let result = full_pipeline(&input);
        let stats = result.stats;
        prop_assert_eq!(stats.lines, input.lines().count());
        prop_assert_eq!(stats.diagnostics, result.diagnostics.len());
        prop_assert!(stats.continuation_lines + stats.dropped_lines <= stats.lines);
        let related: usize = result.diagnostics.iter().map(|d| d.related_messages.len()).sum();
        prop_assert_eq!(related, stats.continuation_lines);
    }

    #[test]
    fn undefined_symbol_block_keeps_every_reference(
        refs in prop::collection::vec("[A-Za-z_][A-Za-z0-9_]{0,12}", 0..25)
    ) {
        let mut input = String::from("Undefined symbols for architecture x86_64:\n");
        for name in &refs {
            input.push_str(&format!("  \"_{name}\", referenced from:\n"));
        }
        input.push_str("clang: error: linker command failed with exit code 1\n");

        let result = full_pipeline(&input);
        prop_assert_eq!(result.diagnostics.len(), 1);
        let related = &result.diagnostics[0].related_messages;
        prop_assert_eq!(related.len(), refs.len());
        for (line, name) in related.iter().zip(&refs) {
            prop_assert!(line.contains(name.as_str()));
        }
    }

    #[test]
    fn single_compiler_line_extracts_captures(
        stem in "[A-Za-z][A-Za-z0-9_]{0,12}",
        ext in prop::sample::select(vec!["swift", "m", "c", "cpp", "h"]),
        line in 1u32..100_000,
        column in 1u32..500,
        is_error in any::<bool>(),
        message in "[A-Za-z][A-Za-z' ]{0,40}",
    ) {
        let kind = if is_error { "error" } else { "warning" };
        let file = format!("{stem}.{ext}");
        let input = format!("{file}:{line}:{column}: {kind}: {message}");
        let result = run_with_rules(&input, vec![Arc::new(CompilerDiagnostic::new().unwrap())]);

        prop_assert_eq!(result.diagnostics.len(), 1);
        let diag = &result.diagnostics[0];
        prop_assert_eq!(diag.file.as_deref(), Some(file.as_str()));
        prop_assert_eq!(diag.line, Some(line));
        prop_assert_eq!(diag.column, Some(column));
        prop_assert_eq!(&diag.message, &message);
        let expected = if is_error { Severity::Error } else { Severity::Warning };
        prop_assert_eq!(diag.severity, expected);
    }

    #[test]
    fn fast_reject_never_narrower_than_match(line in prop::sample::select(CORPUS)) {
        for rule in atomic_rules() {
            if rule.match_start(line).is_some() {
                prop_assert!(
                    rule.could_start(line),
                    "{} rejects a line it matches: {:?}",
                    rule.name(),
                    line
                );
            }
        }
    }

    #[test]
    fn each_rule_alone_starts_at_most_once_per_line(line in prop::sample::select(CORPUS)) {
        for rule in atomic_rules() {
            let expected = usize::from(rule.match_start(line).is_some());
            let result = run_with_rules(line, vec![rule]);
            prop_assert_eq!(result.diagnostics.len(), expected);
        }
    }
}
