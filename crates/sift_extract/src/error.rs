//! Error types for rule construction and parsing.

use sift_diagnostics::SinkError;

/// A rule could not be constructed.
///
/// Patterns are fixed at compile time, so this indicates a programming error.
/// Rule-set construction propagates it so that startup fails instead of
/// running with a rule silently missing.
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    /// A regular expression failed to compile.
    #[error("invalid pattern in rule '{rule}': {source}")]
    Pattern {
        /// The name of the rule that owns the pattern.
        rule: &'static str,
        /// The underlying regex error.
        #[source]
        source: regex::Error,
    },
}

/// A parse was aborted.
///
/// Diagnostics delivered to sinks before the failure remain valid; the
/// diagnostic that was still being assembled is discarded.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The line source failed.
    #[error("failed to read build log: {0}")]
    Io(#[from] std::io::Error),

    /// The line source produced bytes that are not valid UTF-8.
    #[error("build log is not valid UTF-8 at line {line}")]
    Encoding {
        /// The 1-based line number of the offending line.
        line: usize,
    },

    /// An output sink failed while finishing.
    #[error("output finalization failed: {0}")]
    Sink(#[from] SinkError),

    /// The parser already finished; each parser handles a single stream.
    #[error("parser has already finished its input")]
    Finished,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_pattern_error() {
        #[allow(clippy::invalid_regex)]
        let source = regex::Regex::new("(unclosed").unwrap_err();
        let err = RuleError::Pattern {
            rule: "compiler-diagnostic",
            source,
        };
        assert!(format!("{err}").starts_with("invalid pattern in rule 'compiler-diagnostic':"));
    }

    #[test]
    fn display_encoding_error() {
        let err = ParseError::Encoding { line: 12 };
        assert_eq!(format!("{err}"), "build log is not valid UTF-8 at line 12");
    }

    #[test]
    fn display_finished_error() {
        assert_eq!(
            format!("{}", ParseError::Finished),
            "parser has already finished its input"
        );
    }

    #[test]
    fn display_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "eof");
        let err = ParseError::from(io_err);
        assert!(format!("{err}").starts_with("failed to read build log:"));
    }
}
