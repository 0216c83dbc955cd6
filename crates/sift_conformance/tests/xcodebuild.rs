//! xcodebuild logs: compiler output, linker blocks, banners, and the
//! failed-commands summary, through the xcodebuild set and the full pipeline.

use sift_conformance::{full_pipeline, log, run_pipeline};
use sift_diagnostics::Severity;
use sift_extract::RuleSet;

const FAILED_BUILD: &str = r#"CompileSwift normal arm64 /App/Sources/main.swift (in target 'App' from project 'App')
    cd /App
    builtin-swiftTaskExecution -- /Applications/Xcode.app/Contents/Developer/usr/bin/swiftc -frontend -c
/App/Sources/main.swift:10:5: error: cannot find 'foo' in scope
    foo()
    ^~~
/App/Sources/main.swift:15:9: warning: initialization of immutable value 'bar' was never used
    let bar = 1
        ^

Ld /App/build/App normal (in target 'App' from project 'App')
    cd /App
Undefined symbols for architecture arm64:
  "_OBJC_CLASS_$_Foo", referenced from:
      objc-class-ref in main.o
ld: symbol(s) not found for architecture arm64
clang: error: linker command failed with exit code 1 (use -v to see invocation)

** BUILD FAILED **


The following build commands failed:
	CompileSwift normal arm64 /App/Sources/main.swift (in target 'App' from project 'App')
	Ld /App/build/App normal (in target 'App' from project 'App')
(2 failures)
"#;

fn assert_failed_build(result: &sift_conformance::PipelineResult) {
    assert_eq!(
        result.messages(),
        vec![
            "cannot find 'foo' in scope",
            "initialization of immutable value 'bar' was never used",
            "Undefined symbols for architecture arm64",
            "BUILD FAILED",
            "The following build commands failed",
        ],
        "unexpected diagnostics: {:#?}",
        result.diagnostics
    );
    assert_eq!(result.error_count, 4);
    assert_eq!(result.warning_count, 1);

    let error = &result.diagnostics[0];
    assert_eq!(error.file.as_deref(), Some("/App/Sources/main.swift"));
    assert_eq!(error.line, Some(10));
    assert_eq!(error.column, Some(5));
    assert_eq!(error.related_messages, vec!["    ^~~"]);

    let warning = &result.diagnostics[1];
    assert_eq!(warning.severity, Severity::Warning);
    assert_eq!(warning.related_messages, vec!["        ^"]);

    let link = &result.diagnostics[2];
    assert_eq!(
        link.related_messages,
        vec![
            "  \"_OBJC_CLASS_$_Foo\", referenced from:",
            "      objc-class-ref in main.o",
            "ld: symbol(s) not found for architecture arm64",
        ]
    );

    let failed = &result.diagnostics[4];
    assert_eq!(failed.related_messages.len(), 2);
    assert!(failed.related_messages[0].starts_with("\tCompileSwift"));
}

#[test]
fn failed_build_with_xcodebuild_set() {
    let result = run_pipeline(FAILED_BUILD, &[RuleSet::Xcodebuild]);
    assert_failed_build(&result);
    assert_eq!(result.finish_count, 1);
}

#[test]
fn failed_build_with_all_sets() {
    let result = full_pipeline(FAILED_BUILD);
    assert_failed_build(&result);
}

#[test]
fn compiler_scenario_two_diagnostics() {
    let input = log(&[
        "main.swift:10:5: error: use of unresolved identifier 'foo'",
        "main.swift:15:3: warning: variable 'bar' was never used",
    ]);
    let result = run_pipeline(&input, &[RuleSet::Xcodebuild]);
    assert_eq!(result.diagnostics.len(), 2);

    let first = &result.diagnostics[0];
    assert_eq!(first.severity, Severity::Error);
    assert_eq!(first.file.as_deref(), Some("main.swift"));
    assert_eq!(first.line, Some(10));
    assert_eq!(first.column, Some(5));
    assert_eq!(first.message, "use of unresolved identifier 'foo'");

    let second = &result.diagnostics[1];
    assert_eq!(second.severity, Severity::Warning);
    assert_eq!(second.file.as_deref(), Some("main.swift"));
    assert_eq!(second.line, Some(15));
    assert_eq!(second.column, Some(3));
    assert_eq!(second.message, "variable 'bar' was never used");
}

#[test]
fn linker_scenario_flushes_on_banner() {
    let input = log(&[
        "Undefined symbols for architecture x86_64:",
        "  \"_foo\", referenced from:",
        "clang: error: linker command failed",
    ]);
    let result = run_pipeline(&input, &[RuleSet::Xcodebuild]);
    assert_eq!(result.diagnostics.len(), 1);
    let diag = &result.diagnostics[0];
    assert_eq!(diag.severity, Severity::Error);
    assert_eq!(diag.related_messages, vec!["  \"_foo\", referenced from:"]);
    assert_eq!(result.stats.continuation_lines, 1);
}

#[test]
fn standalone_ld_error() {
    let input = log(&[
        "ld: library not found for -lFoo",
        "clang: error: linker command failed with exit code 1 (use -v to see invocation)",
        "** BUILD FAILED **",
    ]);
    let result = run_pipeline(&input, &[RuleSet::Xcodebuild]);
    assert_eq!(
        result.messages(),
        vec!["library not found for -lFoo", "BUILD FAILED"]
    );
    assert_eq!(result.with_category("ld_error").len(), 1);
}

#[test]
fn clang_notes_stay_with_their_error() {
    let input = log(&[
        "/App/Sources/Legacy.m:12:1: error: duplicate interface definition for class 'Foo'",
        "@interface Foo : NSObject",
        "^",
        "/App/Sources/Foo.h:3:12: note: previous definition is here",
        "@interface Foo : NSObject",
        "           ^",
        "",
    ]);
    let result = full_pipeline(&input);
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(
        result.diagnostics[0].related_messages,
        vec![
            "^",
            "/App/Sources/Foo.h:3:12: note: previous definition is here",
            "           ^",
        ]
    );
}

#[test]
fn successful_build_is_info_only() {
    let input = log(&["Build settings from command line:", "** BUILD SUCCEEDED **"]);
    let result = full_pipeline(&input);
    assert_eq!(result.messages(), vec!["BUILD SUCCEEDED"]);
    assert_eq!(result.diagnostics[0].severity, Severity::Info);
    assert!(!result.has_errors);
    assert_eq!(result.stats.dropped_lines, 1);
}

#[test]
fn unknown_extension_is_not_a_compiler_diagnostic() {
    let result = full_pipeline("Info.plist:3:1: error: malformed plist");
    assert!(result.diagnostics.is_empty());
}
