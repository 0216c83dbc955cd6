//! Error type for output sink finalization.

/// Errors raised by an [`OutputSink`](crate::OutputSink) when it finishes.
///
/// Per-diagnostic writes never fail from the parser's point of view; a sink
/// that cannot write a diagnostic logs the problem and carries on. Only the
/// final flush of buffered output is reported back to the caller.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// Writing to the underlying stream failed.
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),

    /// The JSON report could not be serialized.
    #[error("failed to encode JSON report: {0}")]
    Serialize(#[from] serde_json::Error),
}
