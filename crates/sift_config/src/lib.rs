//! Parsing and validation of `sift.toml` configuration files.
//!
//! This crate discovers and reads the configuration file and produces a
//! strongly-typed [`SiftConfig`]: which rule sets to run, in which order, and
//! how completed diagnostics are written. A missing file is not an error; the
//! defaults run every built-in rule set and print text.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod resolve;
pub mod types;

pub use error::ConfigError;
pub use loader::{find_config, load_config, load_config_file, load_config_from_str, CONFIG_FILE};
pub use resolve::resolve_rule_sets;
pub use types::*;
