//! Line-classification helpers shared by several rules.

use regex::Regex;
use sift_diagnostics::Severity;

use crate::error::RuleError;

/// File extensions the compiler-diagnostic rule accepts as source files.
pub const SOURCE_EXTENSIONS: &[&str] = &[
    "swift", "m", "mm", "c", "cc", "cpp", "cxx", "h", "hh", "hpp", "metal", "s",
];

/// Compiles a rule's pattern, attributing failures to the rule.
pub fn compile(rule: &'static str, pattern: &str) -> Result<Regex, RuleError> {
    Regex::new(pattern).map_err(|source| RuleError::Pattern { rule, source })
}

/// Parses a 1-based line or column number.
///
/// Returns `None` for zero, overflow, or anything that is not decimal digits.
pub fn parse_position(text: &str) -> Option<u32> {
    text.parse::<u32>().ok().filter(|n| *n >= 1)
}

/// Returns `true` if the line is empty or whitespace only.
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Returns `true` if the line has leading whitespace and some content.
pub fn is_indented(line: &str) -> bool {
    line.starts_with([' ', '\t']) && !is_blank(line)
}

/// Returns `true` for caret/underline indicator lines such as `    ^~~~`.
pub fn is_caret_line(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.contains('^') && trimmed.chars().all(|c| matches!(c, '^' | '~' | ' ' | '\t' | '|'))
}

/// Returns `true` for swift-style source gutter lines such as ` 12 |   let x`.
pub fn is_gutter_line(line: &str) -> bool {
    let rest = line.trim_start();
    let rest = rest.trim_start_matches(|c: char| c.is_ascii_digit());
    rest.trim_start().starts_with('|')
}

/// Returns `true` if the line carries a compiler-style error or warning marker.
pub fn has_issue_marker(line: &str) -> bool {
    line.contains(": error: ") || line.contains(": warning: ")
}

/// Returns `true` for xctest case and suite status lines.
pub fn is_test_status_line(line: &str) -> bool {
    line.starts_with("Test Case '") || line.starts_with("Test Suite '")
}

/// Maps an xctest status word to a severity: `failed` is an error, the rest
/// are info.
pub fn status_severity(status: &str) -> Severity {
    if status == "failed" {
        Severity::Error
    } else {
        Severity::Info
    }
}

/// Returns `true` for the clang banner that closes a failed link.
pub fn is_link_failure_banner(line: &str) -> bool {
    line.contains("linker command failed")
}
