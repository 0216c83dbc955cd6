//! Output sinks that receive completed diagnostics from the parser.

use crate::diagnostic::Diagnostic;
use crate::error::SinkError;
use crate::severity::Severity;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A destination for completed diagnostics.
///
/// The parser calls [`write`](Self::write) once per completed diagnostic, in
/// emission order, and [`finish`](Self::finish) exactly once after the input
/// is exhausted and any trailing diagnostic has been flushed.
///
/// `write` cannot fail: a sink that hits an I/O problem while writing must
/// deal with it itself (typically by logging it) so that one broken sink never
/// stops the parse. Only `finish` reports errors back to the caller.
pub trait OutputSink: Send {
    /// Receives one completed diagnostic.
    fn write(&mut self, diag: &Diagnostic);

    /// Called once after the last diagnostic has been written.
    fn finish(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

/// A cloneable, thread-safe accumulator of diagnostics.
///
/// Clones share the same storage, so one handle can be registered with a
/// parser while another is kept by the caller to read the results. The error
/// count is tracked atomically for fast `has_errors` checks without locking
/// the diagnostic vector.
#[derive(Clone, Default)]
pub struct DiagnosticSink {
    inner: Arc<SinkInner>,
}

#[derive(Default)]
struct SinkInner {
    diagnostics: Mutex<Vec<Diagnostic>>,
    error_count: AtomicUsize,
    finish_count: AtomicUsize,
}

impl DiagnosticSink {
    /// Creates a new empty diagnostic sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits a diagnostic into the sink.
    ///
    /// If the diagnostic has [`Severity::Error`], the error count is incremented atomically.
    pub fn emit(&self, diag: Diagnostic) {
        if diag.severity.is_error() {
            self.inner.error_count.fetch_add(1, Ordering::Relaxed);
        }
        self.lock().push(diag);
    }

    /// Returns `true` if any error-severity diagnostics have been emitted.
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// Returns the number of error-severity diagnostics emitted so far.
    pub fn error_count(&self) -> usize {
        self.inner.error_count.load(Ordering::Relaxed)
    }

    /// Returns how many times [`OutputSink::finish`] has been called.
    pub fn finish_count(&self) -> usize {
        self.inner.finish_count.load(Ordering::Relaxed)
    }

    /// Takes all accumulated diagnostics, leaving the sink empty.
    pub fn take_all(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.lock())
    }

    /// Returns a snapshot of all accumulated diagnostics without draining.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Diagnostic>> {
        self.inner
            .diagnostics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl OutputSink for DiagnosticSink {
    fn write(&mut self, diag: &Diagnostic) {
        self.emit(diag.clone());
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        self.inner.finish_count.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

/// Forwards only diagnostics at or above a minimum severity to an inner sink.
///
/// `finish` is always forwarded, even when every diagnostic was filtered out.
pub struct SeverityFilter {
    min: Severity,
    inner: Box<dyn OutputSink>,
}

impl SeverityFilter {
    /// Wraps `inner`, dropping diagnostics less severe than `min`.
    pub fn new(min: Severity, inner: Box<dyn OutputSink>) -> Self {
        Self { min, inner }
    }
}

impl OutputSink for SeverityFilter {
    fn write(&mut self, diag: &Diagnostic) {
        if diag.severity >= self.min {
            self.inner.write(diag);
        }
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        self.inner.finish()
    }
}
