/*!
 * Rule application.
 *
 * Literal rules run first, then structural rules, each group in declaration
 * order. Every rule sees the text as rewritten by the rules before it, so
 * overlapping patterns give order-dependent results.
 */

use log::trace;
use serde::{Deserialize, Serialize};

use super::rules::TerminologyRuleSet;

/// Rewritten text with its change log
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Transformation {
    pub text: String,
    /// One entry per rule that matched, in application order
    pub changes: Vec<String>,
}

impl Transformation {
    pub fn is_unchanged(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Applies a rule set to strings. Never fails.
#[derive(Debug, Clone, Copy)]
pub struct TransformationEngine<'a> {
    rules: &'a TerminologyRuleSet,
}

impl<'a> TransformationEngine<'a> {
    pub fn new(rules: &'a TerminologyRuleSet) -> Self {
        Self { rules }
    }

    pub fn apply(&self, text: &str) -> Transformation {
        let mut working = text.to_string();
        let mut changes = Vec::new();

        for rule in self.rules.literal_rules() {
            if rule.is_identity() {
                continue;
            }
            let count = working.matches(rule.pattern.as_str()).count();
            if count == 0 {
                continue;
            }
            working = working.replace(rule.pattern.as_str(), &rule.replacement);
            trace!("Literal rule '{}' applied {} time(s)", rule.pattern, count);
            changes.push(format!("{} → {} ({}x)", rule.pattern, rule.replacement, count));
        }

        for matcher in self.rules.structural_matchers() {
            let replacement = matcher.rule.replacement.as_str();
            // Occurrences already in canonical form are left alone
            let count = matcher
                .regex
                .find_iter(&working)
                .filter(|m| m.as_str() != replacement)
                .count();
            if count == 0 {
                continue;
            }
            working = matcher
                .regex
                .replace_all(&working, |caps: &regex::Captures| {
                    let found = &caps[0];
                    if found == replacement {
                        found.to_string()
                    } else {
                        replacement.to_string()
                    }
                })
                .into_owned();
            trace!("Structural rule '{}' applied {} time(s)", matcher.label, count);
            changes.push(format!("{} → {} (spaced, {}x)", matcher.label, replacement, count));
        }

        Transformation {
            text: working,
            changes,
        }
    }
}
