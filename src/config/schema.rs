// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Raw rule-file schema.
//!
//! These structs mirror the TOML layout one-to-one. Nothing here is
//! validated beyond its shape; see [`RuleSet`](super::RuleSet) for that.

use serde::Deserialize;
use std::collections::BTreeMap;

/// A rule file as written on disk.
#[derive(Debug, Clone, PartialEq)]
pub struct RulesDocument {
    /// `[commit]` table.
    pub commit: CommitRules,

    /// `[ticket]` table.
    pub ticket: TicketRules,

    /// `[types]` table.
    pub types: TypeRules,

    /// `[severity]` table, violation kind to level name.
    pub severity: BTreeMap<String, String>,
}

/// `[commit]` table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommitRules {
    /// Pattern the subject line must match.
    pub pattern: String,

    /// Whether the pattern must cover the whole subject line.
    pub strict: bool,
}

/// `[ticket]` table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TicketRules {
    /// Pattern a ticket identifier must match.
    pub pattern: String,

    /// Whether tickets must already be written in upper case.
    pub uppercase: bool,
}

/// `[types]` table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeRules {
    /// Accepted type tags, compared case-sensitively.
    pub allowed: Vec<String>,
}
