//! `sift parse`: diagnostic extraction pipeline.
//!
//! Reads a build log and writes the diagnostics it contains. The full
//! pipeline:
//!
//! 1. Load `sift.toml` (explicit `--config`, else walk up, else defaults)
//! 2. Merge command-line overrides
//! 3. Build the selected rule sets
//! 4. Wire the output sink behind the severity filter
//! 5. Parse the file or standard input line by line
//! 6. Report a summary and choose the exit code

use std::io::{self, BufRead, BufWriter};

use sift_diagnostics::{DiagnosticSink, SeverityCounts, SeverityFilter};
use sift_extract::{build_rule_sets, Parser};

use crate::pipeline::{build_output, load_settings, merge_settings, open_input, Settings};
use crate::{GlobalArgs, ParseArgs};
use sift_config::OutputFormat;

/// Runs the `sift parse` command.
///
/// Returns exit code 1 if any error-severity diagnostic was extracted, 0
/// otherwise. Diagnostics hidden by `--min-severity` still count.
pub fn run(args: &ParseArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    // Steps 1-2: Load config and merge flags
    let config = load_settings(global)?;
    let settings = merge_settings(&config, args, global)?;

    // Open the input before wiring sinks so a missing file writes nothing
    let input = open_input(args.file.as_deref())?;

    let (counts, has_errors) = extract(input, &settings, global.color)?;

    // Step 6: Summary
    if !global.quiet && settings.format == OutputFormat::Text {
        eprintln!("   Result: {counts}");
    }

    Ok(if has_errors { 1 } else { 0 })
}

/// Runs steps 3-5 against `input`, writing to standard output.
fn extract(
    input: Box<dyn BufRead>,
    settings: &Settings,
    color: bool,
) -> Result<(SeverityCounts, bool), Box<dyn std::error::Error>> {
    // Step 3: Build rules
    let rules = build_rule_sets(&settings.sets)?;

    // Step 4: Wire sinks. The tally sees everything; the output is filtered.
    let tally = DiagnosticSink::new();
    let output = build_output(
        settings.format,
        settings.verbose,
        color,
        BufWriter::new(io::stdout()),
    );
    let mut parser = Parser::new(rules).with_sink(tally.clone());
    parser.add_sink(Box::new(SeverityFilter::new(settings.min_severity, output)));

    // Step 5: Parse
    let stats = parser.parse_reader(input)?;
    log::debug!(
        "{} diagnostic(s) from {} line(s) using {} rule set(s)",
        stats.diagnostics,
        stats.lines,
        settings.sets.len()
    );

    let diagnostics = tally.take_all();
    Ok((
        SeverityCounts::from_diagnostics(&diagnostics),
        tally.has_errors(),
    ))
}
