//! Configuration types deserialized from `sift.toml`.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer};
use sift_diagnostics::Severity;
use std::fmt;

/// The top-level configuration parsed from `sift.toml`.
///
/// Every section is optional; an empty file yields [`SiftConfig::default`].
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SiftConfig {
    /// Which rule sets run, and in which order.
    #[serde(default)]
    pub rules: RulesConfig,
    /// How completed diagnostics are written.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Rule-set selection.
#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RulesConfig {
    /// Rule-set names in evaluation order.
    ///
    /// Accepts either a single name or a list. Defaults to every built-in set.
    #[serde(default = "default_sets", deserialize_with = "deserialize_string_or_vec")]
    pub sets: Vec<String>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            sets: default_sets(),
        }
    }
}

fn default_sets() -> Vec<String> {
    sift_extract::RuleSet::ALL
        .iter()
        .map(|set| set.name().to_string())
        .collect()
}

/// Output settings.
#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// The output format.
    #[serde(default)]
    pub format: OutputFormat,
    /// Whether JSON output carries the per-diagnostic detail fields.
    #[serde(default)]
    pub verbose: bool,
    /// Diagnostics below this severity are not written.
    #[serde(default = "default_min_severity")]
    pub min_severity: Severity,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            verbose: false,
            min_severity: default_min_severity(),
        }
    }
}

fn default_min_severity() -> Severity {
    Severity::Info
}

/// How completed diagnostics are written.
#[derive(Debug, Default, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One rendered diagnostic per line, streamed as they complete (default).
    #[default]
    Text,
    /// The JSON interchange report, written once parsing finishes.
    Json,
    /// A single line of counts by severity.
    Summary,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Summary => "summary",
        })
    }
}

/// Deserializes a field that can be either a single string or a list of strings.
///
/// Allows `sets = "xctest"` as shorthand for `sets = ["xctest"]`.
fn deserialize_string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a rule-set name or a list of rule-set names")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(vec![v.to_string()])
        }

        fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut vec = Vec::new();
            while let Some(val) = seq.next_element::<String>()? {
                vec.push(val);
            }
            Ok(vec)
        }
    }

    deserializer.deserialize_any(StringOrVec)
}
