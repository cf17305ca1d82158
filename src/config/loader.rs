// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule-file discovery and loading.

use crate::error::{ConfigError, DevtraceError, Result};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::ruleset::RuleSet;
use super::schema::{CommitRules, RulesDocument, TicketRules, TypeRules};

/// Rule file location relative to a project root.
pub const RULES_FILE: &str = ".devtrace/configs/rules.toml";

/// Find the rules file in the current directory or parent directories.
pub fn find_rules_file() -> Option<PathBuf> {
    let current_dir = std::env::current_dir().ok()?;
    find_rules_file_from(&current_dir)
}

/// Find the rules file starting from a specific directory.
pub fn find_rules_file_from(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let candidate = current.join(RULES_FILE);
        if candidate.is_file() {
            return Some(candidate);
        }

        if !current.pop() {
            break;
        }
    }

    // Fall back to the user-wide rules
    let user_rules = dirs::config_dir()?.join("devtrace").join("rules.toml");
    if user_rules.is_file() {
        Some(user_rules)
    } else {
        None
    }
}

/// Pick the rules file for this run.
///
/// An explicit path is returned as-is, even if it does not exist, so that
/// [`load_rules`] reports it by name.
pub fn resolve_rules_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    find_rules_file().ok_or_else(|| {
        DevtraceError::Config(ConfigError::NotFound {
            path: PathBuf::from(RULES_FILE),
        })
    })
}

/// Load a rule set from a specific path.
pub fn load_rules(path: &Path) -> Result<RuleSet> {
    tracing::debug!("Loading rules from: {:?}", path);

    if !path.exists() {
        return Err(DevtraceError::Config(ConfigError::NotFound {
            path: path.to_path_buf(),
        }));
    }

    let content = std::fs::read_to_string(path).map_err(|source| {
        DevtraceError::Config(ConfigError::Unreadable {
            path: path.to_path_buf(),
            source,
        })
    })?;

    parse_rules(&content)
}

/// Parse and compile a rule set from TOML text.
pub fn parse_rules(content: &str) -> Result<RuleSet> {
    let document = parse_document(content)?;
    let rules = RuleSet::from_document(document)?;
    tracing::debug!(
        strict = rules.is_strict(),
        uppercase = rules.ticket_uppercase(),
        "Compiled rule set"
    );
    Ok(rules)
}

/// Parse TOML text into the raw rule document without compiling it.
pub fn parse_document(content: &str) -> Result<RulesDocument> {
    let mut table: toml::Table = content.parse().map_err(|e: toml::de::Error| {
        DevtraceError::Config(ConfigError::ParseError {
            message: e.to_string().trim_end().to_string(),
        })
    })?;

    let commit: CommitRules = required_section(&mut table, "commit")?;
    let ticket: TicketRules = required_section(&mut table, "ticket")?;
    let types: TypeRules = required_section(&mut table, "types")?;
    let severity: BTreeMap<String, String> = match table.remove("severity") {
        Some(value) => section(value, "severity")?,
        None => BTreeMap::new(),
    };

    if let Some(unknown) = table.keys().next() {
        return Err(ConfigError::schema(unknown.as_str(), "unknown table").into());
    }

    Ok(RulesDocument {
        commit,
        ticket,
        types,
        severity,
    })
}

fn required_section<T: DeserializeOwned>(table: &mut toml::Table, name: &str) -> Result<T> {
    let value = table.remove(name).ok_or_else(|| {
        ConfigError::schema(name, format!("missing required table [{}]", name))
    })?;
    section(value, name)
}

fn section<T: DeserializeOwned>(value: toml::Value, name: &str) -> Result<T> {
    value
        .try_into()
        .map_err(|e: toml::de::Error| ConfigError::schema(name, e.message().trim()).into())
}
