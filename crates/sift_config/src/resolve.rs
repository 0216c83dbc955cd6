//! Rule-set resolution: mapping configured names to built-in rule sets.

use crate::error::ConfigError;
use sift_extract::RuleSet;

/// Resolves rule-set names to built-in rule sets, preserving order.
///
/// The list must be non-empty, every name must be known, and no name may
/// appear twice.
pub fn resolve_rule_sets<S: AsRef<str>>(names: &[S]) -> Result<Vec<RuleSet>, ConfigError> {
    if names.is_empty() {
        return Err(ConfigError::ValidationError(
            "rules.sets must name at least one rule set".to_string(),
        ));
    }

    let mut sets = Vec::with_capacity(names.len());
    for name in names {
        let name = name.as_ref();
        let set =
            RuleSet::from_name(name).ok_or_else(|| ConfigError::UnknownRuleSet(name.to_string()))?;
        if sets.contains(&set) {
            return Err(ConfigError::ValidationError(format!(
                "rule set '{name}' is listed more than once"
            )));
        }
        sets.push(set);
    }
    Ok(sets)
}
