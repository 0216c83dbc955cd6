//! Configuration-driven runs: rule-set selection and order from `sift.toml`,
//! discovery on disk, and the JSON report over real pipeline output.

use std::fs;

use sift_conformance::{config_sets, log, pipeline_with_config};
use sift_config::{load_config, ConfigError, OutputFormat};
use sift_diagnostics::{JsonReport, Severity, SeverityCounts};
use sift_extract::RuleSet;
use tempfile::TempDir;

#[test]
fn config_restricts_rule_sets() {
    let input = log(&[
        "[1/2] Compiling App main.swift",
        "Test Case '-[A.B testC]' failed (0.001 seconds).",
        "** BUILD FAILED **",
    ]);
    let result = pipeline_with_config(&input, "[rules]\nsets = [\"xctest\"]\n");
    assert_eq!(result.diagnostics.len(), 1);
    assert!(result.diagnostics[0].has_category("test_case"));
}

#[test]
fn config_order_decides_overlapping_matches() {
    // Both sets carry the compiler rule; the first listed set starts it.
    let input = "main.swift:1:1: error: boom";
    let swift_first = pipeline_with_config(input, "[rules]\nsets = [\"swift-build\", \"xcodebuild\"]\n");
    let xcode_first = pipeline_with_config(input, "[rules]\nsets = [\"xcodebuild\", \"swift-build\"]\n");
    assert_eq!(swift_first.diagnostics, xcode_first.diagnostics);
    assert_eq!(swift_first.diagnostics.len(), 1);
}

#[test]
fn discovered_config_drives_the_run() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("sift.toml"),
        "[rules]\nsets = \"swift-build\"\n\n[output]\nformat = \"json\"\nmin_severity = \"warning\"\n",
    )
    .unwrap();
    let nested = tmp.path().join("Sources").join("App");
    fs::create_dir_all(&nested).unwrap();

    let config = load_config(&nested).unwrap();
    assert_eq!(config_sets(&config), vec![RuleSet::SwiftBuild]);
    assert_eq!(config.output.format, OutputFormat::Json);
    assert_eq!(config.output.min_severity, Severity::Warning);
}

#[test]
fn invalid_config_surfaces_error() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("sift.toml"), "[rules]\nsets = [\"ant\"]\n").unwrap();
    let err = load_config(tmp.path()).unwrap_err();
    assert!(matches!(err, ConfigError::UnknownRuleSet(ref name) if name == "ant"));
}

#[test]
fn json_report_over_compiler_scenario() {
    let input = log(&[
        "main.swift:10:5: error: use of unresolved identifier 'foo'",
        "main.swift:15:3: warning: variable 'bar' was never used",
    ]);
    let result = pipeline_with_config(&input, "");
    let report = JsonReport::with_timestamp(&result.diagnostics, false, "2024-05-01T10:00:00+00:00");
    let json: serde_json::Value = serde_json::from_str(&report.to_json_pretty().unwrap()).unwrap();

    let diags = json["diagnostics"].as_array().unwrap();
    assert_eq!(diags.len(), 2);
    assert_eq!(diags[0]["severity"], "error");
    assert_eq!(diags[0]["file"], "main.swift");
    assert_eq!(diags[0]["line"], 10);
    assert_eq!(diags[0]["column"], 5);
    assert_eq!(diags[1]["severity"], "warning");

    let meta = &json["metadata"];
    assert_eq!(meta["totalCount"], 2);
    assert_eq!(meta["errorCount"], 1);
    assert_eq!(meta["warningCount"], 1);
    assert_eq!(meta["infoCount"], 0);
    assert_eq!(meta["noteCount"], 0);

    assert_eq!(
        SeverityCounts::from_diagnostics(&result.diagnostics).to_string(),
        "1 error(s), 1 warning(s), 0 note(s), 0 info"
    );
}
