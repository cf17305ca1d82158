// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule-file configuration.
//!
//! A rule file is read in two steps: the TOML text is mapped onto the raw
//! [`RulesDocument`] shape, then compiled into an immutable [`RuleSet`].
//! Either step failing aborts the load; there is no partial rule set.

pub mod default;
mod loader;
mod ruleset;
mod schema;

pub use default::{default_rules, DEFAULT_RULES};
pub use loader::{
    find_rules_file, find_rules_file_from, load_rules, parse_document, parse_rules,
    resolve_rules_path, RULES_FILE,
};
pub use ruleset::{FieldGroups, RuleSet, Severity};
pub use schema::*;
