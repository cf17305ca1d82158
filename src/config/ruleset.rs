// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Compiled, validated rule set.

use crate::error::ConfigError;
use regex::{Regex, RegexBuilder};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use super::schema::RulesDocument;

/// Consequence of a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Ignore,
}

impl Severity {
    /// Get the string representation of the level.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Ignore => "ignore",
        }
    }

    /// Get all levels.
    pub fn all() -> &'static [Severity] {
        &[Severity::Error, Severity::Warning, Severity::Ignore]
    }
}

impl std::str::FromStr for Severity {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "error" => Ok(Severity::Error),
            "warning" => Ok(Severity::Warning),
            "ignore" => Ok(Severity::Ignore),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How the commit pattern exposes the ticket, type and description fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldGroups {
    /// Named groups `ticket`, `type` and `description`.
    Named,
    /// First three positional groups, in that order.
    Positional,
    /// No usable groups. The pattern only decides whether the subject
    /// matches; fields are then split out of the `TICKET | TYPE : description`
    /// shape.
    Delimited,
}

/// An immutable rule set, loaded once per validation run.
#[derive(Debug, Clone)]
pub struct RuleSet {
    commit_pattern: String,
    commit_strict: bool,
    commit_regex: Regex,
    fields: FieldGroups,
    ticket_pattern: String,
    ticket_uppercase: bool,
    ticket_regex: Regex,
    allowed_types: BTreeSet<String>,
    severities: BTreeMap<String, Severity>,
}

impl RuleSet {
    /// Compile and validate a raw rule document.
    pub fn from_document(doc: RulesDocument) -> Result<Self, ConfigError> {
        let commit_pattern = non_empty("commit.pattern", doc.commit.pattern)?;
        let anchored = if doc.commit.strict {
            format!("^(?:{})$", commit_pattern)
        } else {
            format!("^(?:{})", commit_pattern)
        };
        let commit_regex = Regex::new(&anchored)
            .map_err(|e| ConfigError::schema("commit.pattern", e.to_string()))?;
        let fields = field_groups(&commit_regex);

        let ticket_pattern = non_empty("ticket.pattern", doc.ticket.pattern)?;
        let ticket_regex = RegexBuilder::new(&ticket_pattern)
            .case_insensitive(!doc.ticket.uppercase)
            .build()
            .map_err(|e| ConfigError::schema("ticket.pattern", e.to_string()))?;

        let mut allowed_types = BTreeSet::new();
        for allowed in doc.types.allowed {
            if allowed.trim().is_empty() {
                return Err(ConfigError::schema(
                    "types.allowed",
                    "type tags must not be empty",
                ));
            }
            allowed_types.insert(allowed);
        }
        if allowed_types.is_empty() {
            return Err(ConfigError::schema(
                "types.allowed",
                "at least one type must be allowed",
            ));
        }

        let mut severities = BTreeMap::new();
        for (kind, level) in doc.severity {
            let severity = level.parse::<Severity>().map_err(|_| {
                ConfigError::schema(
                    format!("severity.{}", kind),
                    format!(
                        "unknown level '{}' (expected one of: error, warning, ignore)",
                        level
                    ),
                )
            })?;
            severities.insert(kind, severity);
        }

        Ok(Self {
            commit_pattern,
            commit_strict: doc.commit.strict,
            commit_regex,
            fields,
            ticket_pattern,
            ticket_uppercase: doc.ticket.uppercase,
            ticket_regex,
            allowed_types,
            severities,
        })
    }

    /// The commit pattern as written in the rule file.
    pub fn commit_pattern(&self) -> &str {
        &self.commit_pattern
    }

    /// Whether the commit pattern must match the whole subject line.
    pub fn is_strict(&self) -> bool {
        self.commit_strict
    }

    /// The commit pattern, anchored according to [`is_strict`](Self::is_strict).
    pub fn commit_regex(&self) -> &Regex {
        &self.commit_regex
    }

    pub fn fields(&self) -> FieldGroups {
        self.fields
    }

    /// The ticket pattern as written in the rule file.
    pub fn ticket_pattern(&self) -> &str {
        &self.ticket_pattern
    }

    /// Whether tickets must already be upper case.
    pub fn ticket_uppercase(&self) -> bool {
        self.ticket_uppercase
    }

    /// The ticket pattern, case-insensitive when upper case is not enforced.
    pub fn ticket_regex(&self) -> &Regex {
        &self.ticket_regex
    }

    pub fn allowed_types(&self) -> impl Iterator<Item = &str> {
        self.allowed_types.iter().map(String::as_str)
    }

    /// Case-sensitive membership test against the allowed types.
    pub fn is_allowed_type(&self, tag: &str) -> bool {
        self.allowed_types.contains(tag)
    }

    /// Configured level for a violation kind. Unconfigured kinds are errors.
    pub fn severity_for(&self, kind: &str) -> Severity {
        self.severities
            .get(kind)
            .copied()
            .unwrap_or(Severity::Error)
    }

    /// Whether a level was configured for this kind.
    pub fn has_severity(&self, kind: &str) -> bool {
        self.severities.contains_key(kind)
    }
}

impl PartialEq for RuleSet {
    fn eq(&self, other: &Self) -> bool {
        self.commit_pattern == other.commit_pattern
            && self.commit_strict == other.commit_strict
            && self.fields == other.fields
            && self.ticket_pattern == other.ticket_pattern
            && self.ticket_uppercase == other.ticket_uppercase
            && self.allowed_types == other.allowed_types
            && self.severities == other.severities
    }
}

impl Eq for RuleSet {}

fn non_empty(key: &str, pattern: String) -> Result<String, ConfigError> {
    if pattern.trim().is_empty() {
        Err(ConfigError::schema(key, "pattern must not be empty"))
    } else {
        Ok(pattern)
    }
}

fn field_groups(regex: &Regex) -> FieldGroups {
    let names: Vec<&str> = regex.capture_names().flatten().collect();
    if ["ticket", "type", "description"]
        .iter()
        .all(|field| names.contains(field))
    {
        return FieldGroups::Named;
    }

    // captures_len counts the implicit whole-match group.
    if regex.captures_len() > 3 {
        return FieldGroups::Positional;
    }

    FieldGroups::Delimited
}
