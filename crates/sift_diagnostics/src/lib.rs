//! Structured diagnostic records extracted from build-tool output.
//!
//! This crate provides the [`Diagnostic`] record and its [`Severity`], the
//! [`OutputSink`] contract the parser delivers completed diagnostics to, and
//! the concrete sinks and renderers used by the command-line front end:
//! plain text, the JSON interchange report, and a one-line summary.

#![warn(missing_docs)]

pub mod diagnostic;
pub mod error;
pub mod output;
pub mod renderer;
pub mod report;
pub mod severity;
pub mod sink;

pub use diagnostic::Diagnostic;
pub use error::SinkError;
pub use output::{JsonSink, SummarySink, TextSink};
pub use renderer::{DiagnosticRenderer, TextRenderer};
pub use report::{JsonReport, ReportMetadata, SeverityCounts};
pub use severity::Severity;
pub use sink::{DiagnosticSink, OutputSink, SeverityFilter};
