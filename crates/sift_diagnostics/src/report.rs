//! The JSON interchange report and per-severity counts.
//!
//! The report shape is a compatibility contract shared with other tools:
//!
//! ```json
//! {
//!   "diagnostics": [
//!     { "message": "...", "severity": "error", "file": "main.swift",
//!       "line": 10, "column": 5, "relatedMessages": [] }
//!   ],
//!   "metadata": {
//!     "totalCount": 1, "errorCount": 1, "warningCount": 0,
//!     "infoCount": 0, "noteCount": 0,
//!     "timestamp": "2024-01-01T00:00:00+00:00", "verbose": false
//!   }
//! }
//! ```
//!
//! Key names are stable. In verbose mode every diagnostic also carries
//! `source`, `category`, `raw`, and `buildTarget`.

use crate::diagnostic::Diagnostic;
use crate::error::SinkError;
use crate::severity::Severity;
use serde::Serialize;
use std::fmt;

/// Number of diagnostics seen at each severity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SeverityCounts {
    /// Error-severity diagnostics.
    pub errors: usize,
    /// Warning-severity diagnostics.
    pub warnings: usize,
    /// Note-severity diagnostics.
    pub notes: usize,
    /// Info-severity diagnostics.
    pub infos: usize,
}

impl SeverityCounts {
    /// Counts the severities of a slice of diagnostics.
    pub fn from_diagnostics(diagnostics: &[Diagnostic]) -> Self {
        let mut counts = Self::default();
        for diag in diagnostics {
            counts.record(diag.severity);
        }
        counts
    }

    /// Records one diagnostic of the given severity.
    pub fn record(&mut self, severity: Severity) {
        match severity {
            Severity::Error => self.errors += 1,
            Severity::Warning => self.warnings += 1,
            Severity::Note => self.notes += 1,
            Severity::Info => self.infos += 1,
        }
    }

    /// Total number of diagnostics recorded.
    pub fn total(&self) -> usize {
        self.errors + self.warnings + self.notes + self.infos
    }
}

impl fmt::Display for SeverityCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} error(s), {} warning(s), {} note(s), {} info",
            self.errors, self.warnings, self.notes, self.infos
        )
    }
}

/// The top-level JSON report.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    /// Diagnostics in emission order.
    pub diagnostics: Vec<ReportDiagnostic<'a>>,
    /// Counts and report-level flags.
    pub metadata: ReportMetadata,
}

/// One diagnostic as it appears in the JSON report.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDiagnostic<'a> {
    message: &'a str,
    severity: Severity,
    file: Option<&'a str>,
    line: Option<u32>,
    column: Option<u32>,
    related_messages: &'a [String],
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    detail: Option<VerboseDetail<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VerboseDetail<'a> {
    source: Option<&'a str>,
    category: Option<&'a str>,
    raw: &'a str,
    build_target: Option<&'a str>,
}

/// Report-level metadata.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    /// Total number of diagnostics in the report.
    pub total_count: usize,
    /// Number of error-severity diagnostics.
    pub error_count: usize,
    /// Number of warning-severity diagnostics.
    pub warning_count: usize,
    /// Number of info-severity diagnostics.
    pub info_count: usize,
    /// Number of note-severity diagnostics.
    pub note_count: usize,
    /// RFC 3339 time at which the report was produced.
    pub timestamp: String,
    /// Whether the per-diagnostic verbose fields are present.
    pub verbose: bool,
}

impl<'a> JsonReport<'a> {
    /// Builds a report stamped with the current UTC time.
    pub fn new(diagnostics: &'a [Diagnostic], verbose: bool) -> Self {
        Self::with_timestamp(diagnostics, verbose, chrono::Utc::now().to_rfc3339())
    }

    /// Builds a report with an explicit timestamp.
    pub fn with_timestamp(
        diagnostics: &'a [Diagnostic],
        verbose: bool,
        timestamp: impl Into<String>,
    ) -> Self {
        let counts = SeverityCounts::from_diagnostics(diagnostics);
        Self {
            diagnostics: diagnostics
                .iter()
                .map(|d| ReportDiagnostic::from_diagnostic(d, verbose))
                .collect(),
            metadata: ReportMetadata {
                total_count: counts.total(),
                error_count: counts.errors,
                warning_count: counts.warnings,
                info_count: counts.infos,
                note_count: counts.notes,
                timestamp: timestamp.into(),
                verbose,
            },
        }
    }

    /// Serializes the report as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, SinkError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl<'a> ReportDiagnostic<'a> {
    fn from_diagnostic(diag: &'a Diagnostic, verbose: bool) -> Self {
        let detail = verbose.then(|| VerboseDetail {
            source: diag.source.as_deref(),
            category: diag.category.as_deref(),
            raw: &diag.raw,
            build_target: diag.build_target.as_deref(),
        });
        Self {
            message: &diag.message,
            severity: diag.severity,
            file: diag.file.as_deref(),
            line: diag.line,
            column: diag.column,
            related_messages: &diag.related_messages,
            detail,
        }
    }
}
