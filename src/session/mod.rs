// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Validation sessions.
//!
//! A session loads the rule set, checks one message (or each commit of a
//! range), reports every finding and returns a [`Verdict`]. Operational
//! failures come back as `Err` and never produce partial output.

mod report;

pub use report::Reporter;

use crate::config::load_rules;
use crate::error::{DevtraceError, Result};
use crate::git::Repository;
use crate::rules::{RuleEngine, ValidationOutcome};
use std::io::Write;
use std::path::Path;

/// Final decision of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// No error-level findings; warnings may have been printed.
    Accepted,
    /// At least one error-level finding.
    Rejected,
}

impl Verdict {
    /// Derive the verdict from one or more outcomes.
    pub fn of<'a>(outcomes: impl IntoIterator<Item = &'a ValidationOutcome>) -> Self {
        if outcomes.into_iter().any(ValidationOutcome::is_rejected) {
            Verdict::Rejected
        } else {
            Verdict::Accepted
        }
    }

    /// Process exit code: 0 accepted, 1 rejected.
    pub fn exit_code(&self) -> i32 {
        match self {
            Verdict::Accepted => 0,
            Verdict::Rejected => 1,
        }
    }
}

/// Validate the commit message in `message_path` against `rules_path`.
///
/// This is the commit-msg hook entry point. The rule file is loaded before
/// the message is read, so a broken rule file is reported even when the
/// message path is also bad.
pub fn validate_commit<W: Write>(
    message_path: &Path,
    rules_path: &Path,
    reporter: &mut Reporter<W>,
) -> Result<Verdict> {
    let engine = RuleEngine::new(load_rules(rules_path)?);
    let raw = read_message(message_path)?;

    let outcome = engine.validate_str(&raw);
    tracing::debug!(
        rejected = outcome.is_rejected(),
        findings = outcome.findings.len(),
        "Validated {:?}",
        message_path
    );

    reporter.report(&outcome)?;
    Ok(Verdict::of([&outcome]))
}

/// Validate every commit in `range`, oldest first.
///
/// Each commit is checked independently against the same rule set; the
/// batch is rejected if any single commit is.
pub fn validate_range<W: Write>(
    repo: &Repository,
    range: &str,
    rules_path: &Path,
    reporter: &mut Reporter<W>,
) -> Result<Verdict> {
    let engine = RuleEngine::new(load_rules(rules_path)?);
    let commits = repo.get_commits_in_range(range)?;

    let outcomes: Vec<ValidationOutcome> = commits
        .into_iter()
        .map(|(oid, message)| {
            let mut outcome = engine.validate_str(&message);
            outcome.commit_sha = Some(oid.to_string());
            outcome
        })
        .collect();

    reporter.report_all(&outcomes)?;
    Ok(Verdict::of(&outcomes))
}

fn read_message(path: &Path) -> Result<String> {
    std::fs::read(path)
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .map_err(|source| DevtraceError::MessageRead {
            path: path.to_path_buf(),
            source,
        })
}
