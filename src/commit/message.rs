// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Commit message structure and parsing.

use crate::config::{FieldGroups, RuleSet};
use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    /// Git's scissors line; everything below it is dropped from the message.
    static ref SCISSORS_REGEX: Regex = Regex::new(r"^#\s*-+\s*>8\s*-+\s*$").unwrap();
}

/// A commit message decomposed against the configured commit pattern.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommitMessage {
    /// First non-blank, non-comment line.
    pub subject: String,
    /// Text after the subject line, if any.
    pub body: Option<String>,
    /// Ticket identifier, trimmed.
    pub ticket: Option<String>,
    /// Type tag, trimmed.
    pub commit_type: Option<String>,
    /// Free-text description, trimmed.
    pub description: Option<String>,
    /// Whether the subject matched the commit pattern at all.
    pub matched: bool,
}

impl CommitMessage {
    /// Parse a raw commit message.
    ///
    /// Never fails: a subject that does not match leaves every field empty
    /// and `matched` false. No partial extraction is attempted.
    pub fn parse(raw: &str, rules: &RuleSet) -> Self {
        let (subject, body) = split_message(raw);

        let fields = rules
            .commit_regex()
            .captures(&subject)
            .map(|captures| match rules.fields() {
                FieldGroups::Named => (
                    named(&captures, "ticket"),
                    named(&captures, "type"),
                    named(&captures, "description"),
                ),
                FieldGroups::Positional => (
                    positional(&captures, 1),
                    positional(&captures, 2),
                    positional(&captures, 3),
                ),
                FieldGroups::Delimited => delimited(&subject),
            });

        let (ticket, commit_type, description) = match fields {
            Some(fields) => fields,
            None => {
                tracing::debug!("Subject did not match commit pattern: {:?}", subject);
                return Self {
                    subject,
                    body,
                    ..Self::default()
                };
            }
        };

        tracing::trace!(?ticket, ?commit_type, ?description, "Extracted fields");

        Self {
            subject,
            body,
            ticket,
            commit_type,
            description,
            matched: true,
        }
    }
}

/// Split a raw message into its subject line and body.
///
/// Every line starting with `#` is dropped as a git comment, regardless of
/// the commit's cleanup mode. A subject such as `#12 fix crash` passed with
/// `git commit -m` is therefore discarded, and the message is treated as
/// having no subject line.
fn split_message(raw: &str) -> (String, Option<String>) {
    let mut lines = raw
        .lines()
        .take_while(|line| !SCISSORS_REGEX.is_match(line))
        .filter(|line| !line.starts_with('#'));

    let subject = lines
        .by_ref()
        .find(|line| !line.trim().is_empty())
        .map(|line| line.trim_end().to_string())
        .unwrap_or_default();

    let body = lines.collect::<Vec<_>>().join("\n");
    let body = body.trim();
    let body = if body.is_empty() {
        None
    } else {
        Some(body.to_string())
    };

    (subject, body)
}

fn named(captures: &Captures<'_>, name: &str) -> Option<String> {
    captures.name(name).and_then(|m| trimmed(m.as_str()))
}

fn positional(captures: &Captures<'_>, index: usize) -> Option<String> {
    captures.get(index).and_then(|m| trimmed(m.as_str()))
}

/// Fields of a `TICKET | TYPE : description` subject: split on the first
/// `|`, then on the first `:` after it.
fn delimited(subject: &str) -> (Option<String>, Option<String>, Option<String>) {
    let (ticket, rest) = match subject.split_once('|') {
        Some((ticket, rest)) => (trimmed(ticket), rest),
        None => (None, subject),
    };
    match rest.split_once(':') {
        Some((commit_type, description)) => (ticket, trimmed(commit_type), trimmed(description)),
        None => (ticket, trimmed(rest), None),
    }
}

fn trimmed(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
