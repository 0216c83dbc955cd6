//! Sift CLI: extracts structured diagnostics from build-tool output.
//!
//! Provides `sift parse` to turn an xcodebuild, swift build, or XCTest log into
//! text, JSON, or a summary line, and `sift rules` to list the built-in rule
//! sets.

#![warn(missing_docs)]

mod parse;
mod pipeline;
mod rules;

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use sift_diagnostics::Severity;

/// Sift: structured diagnostics from build logs.
#[derive(Parser, Debug)]
#[command(name = "sift", version, about = "Extract diagnostics from build logs")]
pub struct Cli {
    /// Suppress all log output except errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Enable debug logging and the verbose JSON fields.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Control colored output.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a `sift.toml` file, or a directory containing one.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse a build log and report the diagnostics it contains.
    Parse(ParseArgs),
    /// List the built-in rule sets and their rules.
    Rules,
}

/// Arguments for the `sift parse` subcommand.
#[derive(Parser, Debug)]
pub struct ParseArgs {
    /// Log file to read. Reads standard input when omitted or `-`.
    pub file: Option<PathBuf>,

    /// Output format (overrides `output.format`).
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,

    /// Minimum severity to report (overrides `output.min_severity`).
    #[arg(long, value_enum)]
    pub min_severity: Option<SeverityLevel>,

    /// Rule sets to run, in order (overrides `rules.sets`). Repeat the flag
    /// or separate names with commas.
    #[arg(short, long, value_delimiter = ',')]
    pub rules: Vec<String>,
}

/// Controls whether colored output is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Color when standard output is a terminal.
    Auto,
    /// Always produce colored output.
    Always,
    /// Never produce colored output.
    Never,
}

/// Diagnostic output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable lines, streamed as diagnostics complete.
    Text,
    /// The JSON interchange report.
    Json,
    /// One line of counts by severity.
    Summary,
}

/// Severity threshold accepted on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SeverityLevel {
    /// Report everything.
    Info,
    /// Notes and above.
    Note,
    /// Warnings and errors.
    Warning,
    /// Errors only.
    Error,
}

impl From<SeverityLevel> for Severity {
    fn from(level: SeverityLevel) -> Self {
        match level {
            SeverityLevel::Info => Severity::Info,
            SeverityLevel::Note => Severity::Note,
            SeverityLevel::Warning => Severity::Warning,
            SeverityLevel::Error => Severity::Error,
        }
    }
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose/debug information.
    pub verbose: bool,
    /// Whether to use colored output.
    pub color: bool,
    /// Optional path to a custom config file or directory.
    pub config: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    let color = match cli.color {
        ColorChoice::Auto => std::io::stdout().is_terminal(),
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    };

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        color,
        config: cli.config,
    };

    let result = match cli.command {
        Command::Parse(ref args) => parse::run(args, &global),
        Command::Rules => rules::run(&global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

/// Initializes `env_logger`; `RUST_LOG` takes precedence over the flags.
fn init_logging(quiet: bool, verbose: bool) {
    let level = log_level(quiet, verbose);
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn log_level(quiet: bool, verbose: bool) -> &'static str {
    if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    }
}
