// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Error types for devtrace.
//!
//! Only operational failures live here. A commit message that breaks a rule
//! is not an error: it is reported as a violation inside a
//! [`ValidationOutcome`](crate::rules::ValidationOutcome).

use std::path::PathBuf;
use thiserror::Error;

/// Exit status used for every operational failure.
pub const EXIT_FAILURE: i32 = 2;

/// The main error type for devtrace operations.
#[derive(Error, Debug)]
pub enum DevtraceError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to read commit message file {}: {source}", path.display())]
    MessageRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Git error: {0}")]
    Git(#[from] GitError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DevtraceError {
    /// Process exit code for this failure.
    ///
    /// Always 2, so hook callers can tell a broken setup apart from a
    /// rejected message (exit 1).
    pub fn exit_code(&self) -> i32 {
        EXIT_FAILURE
    }
}

/// Rule-file errors. Loading is all-or-nothing, so any of these aborts the run.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Rules file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read rules file {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse rules file: {message}")]
    ParseError { message: String },

    #[error("Invalid rule '{key}': {message}")]
    SchemaError { key: String, message: String },
}

impl ConfigError {
    pub(crate) fn schema(key: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::SchemaError {
            key: key.into(),
            message: message.into(),
        }
    }
}

/// Git-related errors, raised only by range validation.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Not a git repository")]
    NotARepository,

    #[error("Failed to open repository: {message}")]
    OpenFailed { message: String },

    #[error("Invalid commit reference: {reference}")]
    InvalidReference { reference: String },

    #[error("Git command failed: {command} - {message}")]
    CommandFailed { command: String, message: String },
}

/// Result type alias for devtrace operations.
pub type Result<T> = std::result::Result<T, DevtraceError>;
