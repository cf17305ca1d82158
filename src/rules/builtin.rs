// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Built-in validation rules.

use crate::commit::CommitMessage;
use crate::config::RuleSet;

use super::validator::{Violation, ViolationKind};

/// A check applied to the fields of a message that matched the commit pattern.
pub trait Rule: std::fmt::Debug + Send + Sync {
    /// Check the commit message and return a violation if validation fails.
    fn check(&self, message: &CommitMessage, rules: &RuleSet) -> Option<Violation>;

    /// Get the rule name.
    fn name(&self) -> &str;
}

/// Field rules run after the format check, in this order.
pub fn builtin_rules() -> Vec<Box<dyn Rule>> {
    vec![Box::new(TicketRule), Box::new(TypeRule)]
}

/// Check that the subject matched the commit pattern.
pub fn check_format(message: &CommitMessage, rules: &RuleSet) -> Option<Violation> {
    if message.matched {
        return None;
    }

    let detail = if message.subject.is_empty() {
        "commit message has no subject line".to_string()
    } else {
        format!(
            "subject '{}' does not match commit pattern '{}'{}",
            message.subject,
            rules.commit_pattern(),
            if rules.is_strict() { " (strict)" } else { "" }
        )
    };

    Some(Violation::new(
        ViolationKind::InvalidFormat,
        "commit.pattern",
        detail,
    ))
}

/// Ticket presence, case and pattern.
#[derive(Debug, Clone, Copy)]
pub struct TicketRule;

impl Rule for TicketRule {
    fn check(&self, message: &CommitMessage, rules: &RuleSet) -> Option<Violation> {
        let ticket = match message.ticket.as_deref() {
            Some(ticket) => ticket,
            None => {
                return Some(Violation::new(
                    ViolationKind::MissingTicket,
                    "ticket.pattern",
                    format!("no ticket found in subject '{}'", message.subject),
                ))
            }
        };

        let candidate = if rules.ticket_uppercase() {
            if ticket.chars().any(char::is_lowercase) {
                return Some(Violation::new(
                    ViolationKind::InvalidFormat,
                    "ticket.uppercase",
                    format!("ticket '{}' must be uppercase", ticket),
                ));
            }
            ticket.to_string()
        } else {
            ticket.to_uppercase()
        };

        if rules.ticket_regex().is_match(&candidate) {
            None
        } else {
            Some(Violation::new(
                ViolationKind::InvalidFormat,
                "ticket.pattern",
                format!(
                    "ticket '{}' does not match ticket pattern '{}'",
                    ticket,
                    rules.ticket_pattern()
                ),
            ))
        }
    }

    fn name(&self) -> &str {
        "ticket"
    }
}

/// Type tag whitelist, case-sensitive.
#[derive(Debug, Clone, Copy)]
pub struct TypeRule;

impl Rule for TypeRule {
    fn check(&self, message: &CommitMessage, rules: &RuleSet) -> Option<Violation> {
        let allowed = rules.allowed_types().collect::<Vec<_>>().join(", ");

        match message.commit_type.as_deref() {
            Some(tag) if rules.is_allowed_type(tag) => None,
            Some(tag) => Some(Violation::new(
                ViolationKind::UnknownType,
                "types.allowed",
                format!("type '{}' is not allowed (allowed: {})", tag, allowed),
            )),
            None => Some(Violation::new(
                ViolationKind::UnknownType,
                "types.allowed",
                format!("no type found in subject (allowed: {})", allowed),
            )),
        }
    }

    fn name(&self) -> &str {
        "type"
    }
}
