//! Sinks that write rendered diagnostics to a byte stream.

use std::io::Write;

use crate::diagnostic::Diagnostic;
use crate::error::SinkError;
use crate::renderer::{DiagnosticRenderer, TextRenderer};
use crate::report::{JsonReport, SeverityCounts};
use crate::sink::OutputSink;

/// Streams each diagnostic as text the moment it is written.
pub struct TextSink<W: Write + Send> {
    writer: W,
    renderer: TextRenderer,
}

impl<W: Write + Send> TextSink<W> {
    /// Creates a text sink writing to `writer`.
    pub fn new(writer: W, color: bool) -> Self {
        Self {
            writer,
            renderer: TextRenderer::new(color),
        }
    }

    /// Consumes the sink and returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> OutputSink for TextSink<W> {
    fn write(&mut self, diag: &Diagnostic) {
        let rendered = self.renderer.render(diag);
        if let Err(e) = writeln!(self.writer, "{rendered}") {
            log::warn!("dropping diagnostic output: {e}");
        }
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Buffers diagnostics and writes the JSON report when finished.
pub struct JsonSink<W: Write + Send> {
    writer: W,
    verbose: bool,
    diagnostics: Vec<Diagnostic>,
}

impl<W: Write + Send> JsonSink<W> {
    /// Creates a JSON sink writing to `writer`.
    pub fn new(writer: W, verbose: bool) -> Self {
        Self {
            writer,
            verbose,
            diagnostics: Vec::new(),
        }
    }

    /// Consumes the sink and returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> OutputSink for JsonSink<W> {
    fn write(&mut self, diag: &Diagnostic) {
        self.diagnostics.push(diag.clone());
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        let report = JsonReport::new(&self.diagnostics, self.verbose);
        serde_json::to_writer_pretty(&mut self.writer, &report)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Counts diagnostics and writes a one-line summary when finished.
pub struct SummarySink<W: Write + Send> {
    writer: W,
    counts: SeverityCounts,
}

impl<W: Write + Send> SummarySink<W> {
    /// Creates a summary sink writing to `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            counts: SeverityCounts::default(),
        }
    }

    /// Returns the counts recorded so far.
    pub fn counts(&self) -> SeverityCounts {
        self.counts
    }

    /// Consumes the sink and returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> OutputSink for SummarySink<W> {
    fn write(&mut self, diag: &Diagnostic) {
        self.counts.record(diag.severity);
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        writeln!(self.writer, "{}", self.counts)?;
        self.writer.flush()?;
        Ok(())
    }
}
