//! A rule built by ordered delegation to other rules.

use std::sync::Arc;

use sift_diagnostics::Diagnostic;

use crate::Rule;

/// Presents an ordered list of rules as a single [`Rule`].
///
/// - `could_start` and `match_continuation` are true if any member says so.
/// - `match_start` tries members in order; the first match wins.
/// - `is_end` is answered by the first member that owns the current
///   diagnostic. When no member owns it, the line is an end only if some
///   member explicitly says so; silence means "not an end".
///
/// Member order is part of the configuration: put specific rules before
/// general ones that could match the same line. Composites may be nested.
pub struct CompositeRule {
    name: String,
    description: String,
    rules: Vec<Arc<dyn Rule>>,
}

impl CompositeRule {
    /// Creates a composite from an ordered list of member rules.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        rules: Vec<Arc<dyn Rule>>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            rules,
        }
    }

    /// Appends a member rule after the existing ones.
    pub fn with_rule(mut self, rule: Arc<dyn Rule>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Returns the number of direct members.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if the composite has no members.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    fn owner_of(&self, current: &Diagnostic) -> Option<&Arc<dyn Rule>> {
        self.rules.iter().find(|r| r.owns(current))
    }
}

impl Rule for CompositeRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn could_start(&self, line: &str) -> bool {
        self.rules.iter().any(|r| r.could_start(line))
    }

    fn match_start(&self, line: &str) -> Option<Diagnostic> {
        self.rules.iter().find_map(|r| r.try_start(line))
    }

    fn match_continuation(&self, line: &str, current: Option<&Diagnostic>) -> bool {
        self.rules
            .iter()
            .any(|r| r.match_continuation(line, current))
    }

    fn is_end(&self, line: &str, current: Option<&Diagnostic>) -> bool {
        if let Some(owner) = current.and_then(|c| self.owner_of(c)) {
            return owner.is_end(line, current);
        }
        self.rules.iter().any(|r| r.is_end(line, current))
    }

    fn owns(&self, current: &Diagnostic) -> bool {
        self.owner_of(current).is_some()
    }

    fn members(&self) -> &[Arc<dyn Rule>] {
        &self.rules
    }
}
