//! Shared pipeline helpers for CLI commands.
//!
//! Contains configuration discovery, the merge of command-line overrides into
//! the loaded configuration, input opening, and output sink construction.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use sift_config::{resolve_rule_sets, ConfigError, OutputFormat, SiftConfig};
use sift_diagnostics::{JsonSink, OutputSink, Severity, SummarySink, TextSink};
use sift_extract::RuleSet;

use crate::{GlobalArgs, ParseArgs, ReportFormat};

/// Effective settings for one `sift parse` run.
#[derive(Debug, PartialEq, Eq)]
pub struct Settings {
    /// Rule sets in evaluation order.
    pub sets: Vec<RuleSet>,
    /// Output format.
    pub format: OutputFormat,
    /// Whether JSON output carries the per-diagnostic detail fields.
    pub verbose: bool,
    /// Minimum severity written to the output.
    pub min_severity: Severity,
}

/// Loads the configuration selected by the global flags.
///
/// If `--config` is given, that file (or the `sift.toml` inside that
/// directory) must exist. Otherwise walks up from the current directory and
/// falls back to defaults when nothing is found.
pub fn load_settings(global: &GlobalArgs) -> Result<SiftConfig, Box<dyn std::error::Error>> {
    match global.config {
        Some(ref path) => Ok(sift_config::load_config_file(path)?),
        None => Ok(sift_config::load_config(&std::env::current_dir()?)?),
    }
}

/// Merges command-line overrides into the loaded configuration.
///
/// Flags take precedence over the file: `--rules` replaces `rules.sets`,
/// `--format` and `--min-severity` replace their `output` keys, and the global
/// `--verbose` switches the verbose JSON fields on.
pub fn merge_settings(
    config: &SiftConfig,
    args: &ParseArgs,
    global: &GlobalArgs,
) -> Result<Settings, ConfigError> {
    let sets = if args.rules.is_empty() {
        resolve_rule_sets(&config.rules.sets)?
    } else {
        resolve_rule_sets(&args.rules)?
    };
    let format = args
        .format
        .map(OutputFormat::from)
        .unwrap_or(config.output.format);
    let min_severity = args
        .min_severity
        .map(Severity::from)
        .unwrap_or(config.output.min_severity);

    Ok(Settings {
        sets,
        format,
        verbose: global.verbose || config.output.verbose,
        min_severity,
    })
}

impl From<ReportFormat> for OutputFormat {
    fn from(format: ReportFormat) -> Self {
        match format {
            ReportFormat::Text => OutputFormat::Text,
            ReportFormat::Json => OutputFormat::Json,
            ReportFormat::Summary => OutputFormat::Summary,
        }
    }
}

/// Opens the log to parse: the named file, or standard input for `None`/`-`.
pub fn open_input(file: Option<&Path>) -> io::Result<Box<dyn BufRead>> {
    match file {
        Some(path) if path != Path::new("-") => {
            log::debug!("reading {}", path.display());
            Ok(Box::new(BufReader::new(File::open(path)?)))
        }
        _ => {
            log::debug!("reading standard input");
            Ok(Box::new(BufReader::new(io::stdin())))
        }
    }
}

/// Builds the output sink for the chosen format.
pub fn build_output<W>(format: OutputFormat, verbose: bool, color: bool, writer: W) -> Box<dyn OutputSink>
where
    W: Write + Send + 'static,
{
    match format {
        OutputFormat::Text => Box::new(TextSink::new(writer, color)),
        OutputFormat::Json => Box::new(JsonSink::new(writer, verbose)),
        OutputFormat::Summary => Box::new(SummarySink::new(writer)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SeverityLevel;
    use sift_diagnostics::Diagnostic;
    use std::fs;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    fn global(config: Option<&Path>, verbose: bool) -> GlobalArgs {
        GlobalArgs {
            quiet: false,
            verbose,
            color: false,
            config: config.map(Path::to_path_buf),
        }
    }

    fn no_overrides() -> ParseArgs {
        ParseArgs {
            file: None,
            format: None,
            min_severity: None,
            rules: Vec::new(),
        }
    }

    /// A writer whose contents stay readable after the sink is boxed.
    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuf {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    #[test]
    fn config_values_used_without_overrides() {
        let config =
            sift_config::load_config_from_str("[rules]\nsets = [\"xctest\"]\n[output]\nformat = \"json\"\n")
                .unwrap();
        let settings = merge_settings(&config, &no_overrides(), &global(None, false)).unwrap();
        assert_eq!(settings.sets, vec![RuleSet::Xctest]);
        assert_eq!(settings.format, OutputFormat::Json);
        assert!(!settings.verbose);
        assert_eq!(settings.min_severity, Severity::Info);
    }

    #[test]
    fn flags_override_config() {
        let config = sift_config::load_config_from_str(
            "[rules]\nsets = [\"xctest\"]\n[output]\nformat = \"json\"\nmin_severity = \"error\"\n",
        )
        .unwrap();
        let args = ParseArgs {
            file: None,
            format: Some(ReportFormat::Summary),
            min_severity: Some(SeverityLevel::Warning),
            rules: vec!["swift-build".to_string(), "xcodebuild".to_string()],
        };
        let settings = merge_settings(&config, &args, &global(None, true)).unwrap();
        assert_eq!(settings.sets, vec![RuleSet::SwiftBuild, RuleSet::Xcodebuild]);
        assert_eq!(settings.format, OutputFormat::Summary);
        assert_eq!(settings.min_severity, Severity::Warning);
        assert!(settings.verbose);
    }

    #[test]
    fn unknown_rule_flag_errors() {
        let args = ParseArgs {
            rules: vec!["maven".to_string()],
            ..no_overrides()
        };
        let err = merge_settings(&SiftConfig::default(), &args, &global(None, false)).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownRuleSet(_)));
    }

    #[test]
    fn explicit_config_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("ci.toml");
        fs::write(&path, "[output]\nformat = \"summary\"\n").unwrap();
        let config = load_settings(&global(Some(&path), false)).unwrap();
        assert_eq!(config.output.format, OutputFormat::Summary);
    }

    #[test]
    fn explicit_config_directory() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("sift.toml"), "[rules]\nsets = \"xctest\"\n").unwrap();
        let config = load_settings(&global(Some(tmp.path()), false)).unwrap();
        assert_eq!(config.rules.sets, vec!["xctest"]);
    }

    #[test]
    fn explicit_config_missing_errors() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope.toml");
        assert!(load_settings(&global(Some(&missing), false)).is_err());
    }

    #[test]
    fn open_input_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("build.log");
        fs::write(&path, "line one\nline two\n").unwrap();
        let lines: Vec<String> = open_input(Some(&path))
            .unwrap()
            .lines()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(lines, vec!["line one", "line two"]);
    }

    #[test]
    fn open_input_missing_file_errors() {
        let tmp = TempDir::new().unwrap();
        assert!(open_input(Some(&tmp.path().join("absent.log"))).is_err());
    }

    #[test]
    fn output_formats() {
        let diag = Diagnostic::error("boom", "raw").with_file("a.swift").with_line(2);

        let buf = SharedBuf::default();
        let mut sink = build_output(OutputFormat::Text, false, false, buf.clone());
        sink.write(&diag);
        sink.finish().unwrap();
        assert_eq!(buf.contents(), "a.swift:2: error: boom\n");

        let buf = SharedBuf::default();
        let mut sink = build_output(OutputFormat::Summary, false, false, buf.clone());
        sink.write(&diag);
        sink.finish().unwrap();
        assert_eq!(buf.contents(), "1 error(s), 0 warning(s), 0 note(s), 0 info\n");

        let buf = SharedBuf::default();
        let mut sink = build_output(OutputFormat::Json, true, false, buf.clone());
        sink.write(&diag);
        sink.finish().unwrap();
        let json: serde_json::Value = serde_json::from_str(&buf.contents()).unwrap();
        assert_eq!(json["diagnostics"][0]["raw"], "raw");
        assert_eq!(json["metadata"]["verbose"], true);
    }
}
