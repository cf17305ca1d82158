// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Built-in default rules.

use super::loader::parse_rules;
use super::ruleset::RuleSet;

/// The default rule file.
///
/// Ticket and type slots in the commit pattern accept lower case on purpose,
/// so that `jira-1 | feat : x` is reported as a bad ticket and an unknown
/// type rather than as a bare format failure.
pub const DEFAULT_RULES: &str = r#"# devtrace commit rules

[commit]
pattern = '^(?P<ticket>[A-Za-z]+-\d+)\s*\|\s*(?P<type>[A-Za-z]+)\s*:\s*(?P<description>.+)$'
strict = true

[ticket]
pattern = '^[A-Z]+-\d+$'
uppercase = true

[types]
allowed = ["FEAT", "FIX", "INIT", "DOCS", "REFACTOR", "TEST", "CHORE"]

[severity]
invalid_format = "error"
unknown_type = "error"
missing_ticket = "error"
"#;

/// Compile the default rules.
pub fn default_rules() -> crate::error::Result<RuleSet> {
    parse_rules(DEFAULT_RULES)
}
