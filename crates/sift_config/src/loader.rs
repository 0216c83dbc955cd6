//! Configuration file discovery, loading, and validation.

use crate::error::ConfigError;
use crate::resolve::resolve_rule_sets;
use crate::types::SiftConfig;
use std::path::{Path, PathBuf};

/// The configuration file name looked up in each directory.
pub const CONFIG_FILE: &str = "sift.toml";

/// Loads the configuration that applies to `start_dir`.
///
/// Walks up from `start_dir` looking for `sift.toml`. If none is found the
/// defaults apply; a missing file is not an error.
pub fn load_config(start_dir: &Path) -> Result<SiftConfig, ConfigError> {
    match find_config(start_dir) {
        Some(path) => load_config_file(&path),
        None => {
            log::debug!("no {CONFIG_FILE} above {}, using defaults", start_dir.display());
            Ok(SiftConfig::default())
        }
    }
}

/// Loads and validates an explicit configuration path.
///
/// `path` may name the file itself or a directory containing `sift.toml`.
pub fn load_config_file(path: &Path) -> Result<SiftConfig, ConfigError> {
    let file = if path.is_dir() {
        path.join(CONFIG_FILE)
    } else {
        path.to_path_buf()
    };
    log::debug!("loading configuration from {}", file.display());
    let content = std::fs::read_to_string(&file)?;
    load_config_from_str(&content)
}

/// Parses and validates a `sift.toml` configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<SiftConfig, ConfigError> {
    let config: SiftConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Walks up from `start` and returns the first `sift.toml` found.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILE))
        .find(|candidate| candidate.is_file())
}

/// Validates that the rule-set list is usable.
fn validate_config(config: &SiftConfig) -> Result<(), ConfigError> {
    resolve_rule_sets(&config.rules.sets).map(|_| ())
}
