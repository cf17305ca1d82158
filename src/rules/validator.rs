// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Violations and their resolution into a validation outcome.

use crate::config::{RuleSet, Severity};
use serde::Serialize;

/// Category of a rule violation, used as the key into `[severity]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    InvalidFormat,
    UnknownType,
    MissingTicket,
}

impl ViolationKind {
    /// Get the string representation used in rule files.
    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationKind::InvalidFormat => "invalid_format",
            ViolationKind::UnknownType => "unknown_type",
            ViolationKind::MissingTicket => "missing_ticket",
        }
    }

    /// Get all violation kinds.
    pub fn all() -> &'static [ViolationKind] {
        &[
            ViolationKind::InvalidFormat,
            ViolationKind::UnknownType,
            ViolationKind::MissingTicket,
        ]
    }
}

impl std::fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A detected deviation from the rule set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Violation category.
    pub kind: ViolationKind,
    /// Rule-file key that was broken, e.g. `ticket.pattern`.
    pub rule: &'static str,
    /// Human-readable explanation naming the offending value.
    pub detail: String,
}

impl Violation {
    pub fn new(kind: ViolationKind, rule: &'static str, detail: impl Into<String>) -> Self {
        Self {
            kind,
            rule,
            detail: detail.into(),
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.kind, self.rule, self.detail)
    }
}

/// A violation together with its resolved severity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    #[serde(flatten)]
    pub violation: Violation,
    pub severity: Severity,
}

/// Result of validating one commit message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    /// Subject line that was checked.
    pub subject: String,
    /// Commit SHA when validating an existing commit.
    pub commit_sha: Option<String>,
    /// Every detected violation in check order, ignored ones included.
    pub findings: Vec<Finding>,
}

impl ValidationOutcome {
    /// Resolve each violation's severity against the rule set.
    ///
    /// Kinds missing from `[severity]` resolve to [`Severity::Error`].
    pub fn resolve(subject: impl Into<String>, violations: Vec<Violation>, rules: &RuleSet) -> Self {
        let findings = violations
            .into_iter()
            .map(|violation| {
                let severity = rules.severity_for(violation.kind.as_str());
                tracing::debug!(kind = %violation.kind, %severity, "Resolved violation");
                Finding {
                    violation,
                    severity,
                }
            })
            .collect();

        Self {
            subject: subject.into(),
            commit_sha: None,
            findings,
        }
    }

    /// Whether any finding resolved to an error.
    pub fn is_rejected(&self) -> bool {
        self.findings
            .iter()
            .any(|finding| finding.severity == Severity::Error)
    }

    /// Findings that should be shown to the user.
    pub fn reported(&self) -> impl Iterator<Item = &Finding> {
        self.findings
            .iter()
            .filter(|finding| finding.severity != Severity::Ignore)
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.findings
            .iter()
            .filter(|finding| finding.severity == severity)
            .count()
    }

    /// Whether a violation of this kind was detected, whatever its severity.
    pub fn has_kind(&self, kind: ViolationKind) -> bool {
        self.findings
            .iter()
            .any(|finding| finding.violation.kind == kind)
    }

    /// Get a summary string.
    pub fn summary(&self) -> String {
        let errors = self.count(Severity::Error);
        let warnings = self.count(Severity::Warning);

        if errors > 0 {
            format!("rejected: {} error(s), {} warning(s)", errors, warnings)
        } else if warnings > 0 {
            format!("accepted with {} warning(s)", warnings)
        } else {
            "accepted".to_string()
        }
    }
}
