//! `sift rules`: lists the built-in rule sets and their member rules.

use std::io::{self, Write};

use sift_extract::{Rule, RuleSet};

use crate::GlobalArgs;

/// Runs the `sift rules` command.
pub fn run(_global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let mut out = io::stdout().lock();
    write_listing(&mut out)?;
    Ok(0)
}

/// Writes each rule set followed by its rules, indented, in evaluation order.
fn write_listing(out: &mut impl Write) -> Result<(), Box<dyn std::error::Error>> {
    for set in RuleSet::ALL {
        let composite = set.build()?;
        writeln!(out, "{:<12} {}", set.name(), set.description())?;
        for rule in composite.members() {
            writeln!(out, "    {:<20} {}", rule.name(), rule.description())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_set_and_rule() {
        let mut out = Vec::new();
        write_listing(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let headers: Vec<&str> = text
            .lines()
            .filter(|l| !l.starts_with(' '))
            .map(|l| l.split_whitespace().next().unwrap())
            .collect();
        assert_eq!(headers, vec!["xcodebuild", "swift-build", "xctest"]);

        assert!(text.contains("    compiler-diagnostic"));
        assert!(text.contains("    test-assertion"));
        assert!(text.contains("    emit-module-failure"));
        assert_eq!(text.lines().filter(|l| l.starts_with("    ")).count(), 12);
    }
}
