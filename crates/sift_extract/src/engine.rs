//! The line-consumption state machine.
//!
//! The `Parser` owns the diagnostic currently being assembled. Each input line
//! is offered to the installed rules in a fixed order of checks:
//!
//! 1. **End**: a rule that owns the current diagnostic calls the line a
//!    boundary. The current diagnostic is flushed and the same line may start
//!    the next one.
//! 2. **Continuation**: any rule claims the line for the current diagnostic;
//!    it is appended verbatim to `related_messages`.
//! 3. **Start**: any rule parses the line as a new diagnostic. The current one
//!    is flushed first, so diagnostics never overwrite each other.
//! 4. **Consensus**: every installed rule calls the line a boundary. The
//!    current diagnostic is flushed.
//!
//! Anything else is dropped and the current diagnostic is left untouched.

use std::io::BufRead;
use std::sync::Arc;

use sift_diagnostics::{Diagnostic, OutputSink, SinkError};

use crate::error::ParseError;
use crate::helpers::is_blank;
use crate::Rule;

/// Counters describing one parse.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// Lines offered to the parser.
    pub lines: usize,
    /// Lines appended to a diagnostic as continuations.
    pub continuation_lines: usize,
    /// Non-blank lines that neither started nor continued a diagnostic and
    /// did not end one that was open.
    pub dropped_lines: usize,
    /// Diagnostics delivered to the sinks.
    pub diagnostics: usize,
}

/// Turns a sequence of log lines into completed diagnostics.
///
/// Rules are consulted in the order given at construction; that order decides
/// which rule wins when several could start a diagnostic on the same line.
/// A parser processes one stream at a time and is not meant to be driven from
/// several threads at once; the rules themselves may be shared freely.
pub struct Parser {
    /// Installed rules, in evaluation order.
    rules: Vec<Arc<dyn Rule>>,
    /// Sinks that receive every completed diagnostic.
    sinks: Vec<Box<dyn OutputSink>>,
    /// The diagnostic being assembled, if any.
    current: Option<Diagnostic>,
    stats: ParseStats,
    finished: bool,
}

impl Parser {
    /// Creates a parser with the given ordered rule list and no sinks.
    pub fn new(rules: Vec<Arc<dyn Rule>>) -> Self {
        log::debug!("parser configured with {} rule(s)", rules.len());
        Self {
            rules,
            sinks: Vec::new(),
            current: None,
            stats: ParseStats::default(),
            finished: false,
        }
    }

    /// Registers an output sink after the existing ones.
    pub fn add_sink(&mut self, sink: Box<dyn OutputSink>) {
        self.sinks.push(sink);
    }

    /// Registers an output sink, builder style.
    pub fn with_sink(mut self, sink: impl OutputSink + 'static) -> Self {
        self.add_sink(Box::new(sink));
        self
    }

    /// Returns the number of installed top-level rules.
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Returns the diagnostic currently being assembled.
    pub fn current(&self) -> Option<&Diagnostic> {
        self.current.as_ref()
    }

    /// Returns the counters accumulated so far.
    pub fn stats(&self) -> ParseStats {
        self.stats
    }

    /// Consumes one line, without its trailing line terminator.
    ///
    /// Lines offered after [`finish`](Self::finish) are ignored.
    pub fn consume_line(&mut self, line: &str) {
        if self.finished {
            log::warn!("ignoring line after the parse finished");
            return;
        }
        self.stats.lines += 1;

        if self.owner_ends(line) {
            let was_open = self.current.is_some();
            self.flush();
            self.current = self.start(line);
            if !was_open && self.current.is_none() {
                self.drop_line(line);
            }
            return;
        }

        let rules = &self.rules;
        if let Some(current) = self.current.as_mut() {
            if rules
                .iter()
                .any(|r| r.match_continuation(line, Some(&*current)))
            {
                current.related_messages.push(line.to_string());
                self.stats.continuation_lines += 1;
                return;
            }
        }

        if let Some(diag) = self.start(line) {
            self.flush();
            self.current = Some(diag);
            return;
        }

        if self.current.is_some() && self.all_end(line) {
            self.flush();
            return;
        }

        self.drop_line(line);
    }

    /// Flushes any open diagnostic and finishes every sink once.
    ///
    /// Every sink is finished even if an earlier one fails; the first failure
    /// is returned. Calling `finish` again has no effect.
    pub fn finish(&mut self) -> Result<ParseStats, SinkError> {
        if self.finished {
            return Ok(self.stats);
        }
        self.finished = true;
        self.flush();

        let mut first_error = None;
        for sink in &mut self.sinks {
            if let Err(e) = sink.finish() {
                log::warn!("output sink failed to finish: {e}");
                first_error.get_or_insert(e);
            }
        }

        log::debug!(
            "parsed {} line(s): {} diagnostic(s), {} continuation line(s), {} dropped",
            self.stats.lines,
            self.stats.diagnostics,
            self.stats.continuation_lines,
            self.stats.dropped_lines
        );

        match first_error {
            Some(e) => Err(e),
            None => Ok(self.stats),
        }
    }

    /// Parses every line from a fallible line source, then finishes.
    ///
    /// If the source fails, parsing stops immediately: the open diagnostic is
    /// discarded and the sinks are not finished. A parser that has already
    /// finished returns [`ParseError::Finished`] without reading the source.
    pub fn parse_lines<I, E>(&mut self, lines: I) -> Result<ParseStats, ParseError>
    where
        I: IntoIterator<Item = Result<String, E>>,
        ParseError: From<E>,
    {
        if self.finished {
            return Err(ParseError::Finished);
        }
        for line in lines {
            let line = line?;
            self.consume_line(&line);
        }
        Ok(self.finish()?)
    }

    /// Parses a buffered reader line by line, then finishes.
    pub fn parse_reader<R: BufRead>(&mut self, reader: R) -> Result<ParseStats, ParseError> {
        self.parse_lines(read_lines(reader))
    }

    /// Parses an in-memory log, then finishes.
    pub fn parse_str(&mut self, input: &str) -> Result<ParseStats, ParseError> {
        self.parse_reader(input.as_bytes())
    }

    /// Returns `true` if the rule that owns the current diagnostic ends it.
    ///
    /// With nothing in progress, any rule may call the line a boundary.
    fn owner_ends(&self, line: &str) -> bool {
        match self.current.as_ref() {
            Some(current) => self
                .rules
                .iter()
                .any(|r| r.owns(current) && r.is_end(line, Some(current))),
            None => self.rules.iter().any(|r| r.is_end(line, None)),
        }
    }

    fn all_end(&self, line: &str) -> bool {
        let current = self.current.as_ref();
        self.rules.iter().all(|r| r.is_end(line, current))
    }

    fn start(&self, line: &str) -> Option<Diagnostic> {
        self.rules.iter().find_map(|r| r.try_start(line))
    }

    fn drop_line(&mut self, line: &str) {
        if !is_blank(line) {
            self.stats.dropped_lines += 1;
        }
    }

    fn flush(&mut self) {
        let Some(diag) = self.current.take() else {
            return;
        };
        log::trace!("flush {} diagnostic: {}", diag.severity, diag.message);
        for sink in &mut self.sinks {
            sink.write(&diag);
        }
        self.stats.diagnostics += 1;
    }
}

/// Splits a byte stream into log lines.
///
/// Lines are split on `\n`; a trailing `\r` is removed as part of the line
/// terminator, including on a final line with no `\n`. Leading and trailing spaces are preserved. A line that is not
/// valid UTF-8 yields [`ParseError::Encoding`].
pub fn read_lines<R: BufRead>(reader: R) -> LogLines<R> {
    LogLines {
        reader,
        line_number: 0,
        buf: Vec::new(),
    }
}

/// Iterator returned by [`read_lines`].
pub struct LogLines<R> {
    reader: R,
    line_number: usize,
    buf: Vec<u8>,
}

impl<R: BufRead> Iterator for LogLines<R> {
    type Item = Result<String, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                self.line_number += 1;
                if self.buf.ends_with(b"\n") {
                    self.buf.pop();
                }
                if self.buf.ends_with(b"\r") {
                    self.buf.pop();
                }
                Some(
                    String::from_utf8(std::mem::take(&mut self.buf)).map_err(|_| {
                        ParseError::Encoding {
                            line: self.line_number,
                        }
                    }),
                )
            }
            Err(e) => Some(Err(ParseError::Io(e))),
        }
    }
}
