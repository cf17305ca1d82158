// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule engine for commit validation.

use crate::commit::CommitMessage;
use crate::config::RuleSet;

use super::builtin::{builtin_rules, check_format, Rule};
use super::validator::{ValidationOutcome, Violation};

/// Rule engine for validating commit messages.
#[derive(Debug)]
pub struct RuleEngine {
    rules: RuleSet,
    field_rules: Vec<Box<dyn Rule>>,
}

impl RuleEngine {
    /// Create a new rule engine with the built-in rules.
    pub fn new(rules: RuleSet) -> Self {
        Self {
            rules,
            field_rules: builtin_rules(),
        }
    }

    /// Add a field rule, run after the built-in ones.
    pub fn add_rule(&mut self, rule: Box<dyn Rule>) {
        self.field_rules.push(rule);
    }

    /// Collect violations in check order.
    ///
    /// A format failure short-circuits: the message has no reliable fields,
    /// so ticket and type checks are skipped rather than guessed at.
    pub fn check(&self, message: &CommitMessage) -> Vec<Violation> {
        if let Some(violation) = check_format(message, &self.rules) {
            tracing::debug!("Format check failed, skipping field rules");
            return vec![violation];
        }

        self.field_rules
            .iter()
            .filter_map(|rule| {
                let violation = rule.check(message, &self.rules);
                tracing::trace!(rule = rule.name(), failed = violation.is_some(), "Checked");
                violation
            })
            .collect()
    }

    /// Validate a parsed commit message.
    pub fn validate(&self, message: &CommitMessage) -> ValidationOutcome {
        let violations = self.check(message);
        ValidationOutcome::resolve(message.subject.clone(), violations, &self.rules)
    }

    /// Validate a raw commit message string.
    pub fn validate_str(&self, raw: &str) -> ValidationOutcome {
        let message = CommitMessage::parse(raw, &self.rules);
        self.validate(&message)
    }
}
