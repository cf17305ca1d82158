// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! devtrace - commit-message rule enforcement
//!
//! Validates commit messages against a declarative TOML rule file at
//! commit time. A commit-msg hook calls
//! `devtrace validate commit <message-file> --rules-path <rules-file>` and
//! aborts the commit on a non-zero exit.
//!
//! # Pipeline
//!
//! - **Loader** ([`config`]): TOML rule file to a validated [`RuleSet`]
//! - **Parser** ([`commit`]): subject line to ticket, type and description
//! - **Engine** ([`rules`]): format, ticket and type checks
//! - **Resolver** ([`rules::ValidationOutcome`]): violations to severities
//! - **Session** ([`session`]): one message in, one [`Verdict`](session::Verdict) out
//!
//! # Example
//!
//! ```no_run
//! use devtrace::config::load_rules;
//! use devtrace::rules::RuleEngine;
//!
//! let rules = load_rules(".devtrace/configs/rules.toml".as_ref()).unwrap();
//! let engine = RuleEngine::new(rules);
//!
//! let outcome = engine.validate_str("JIRA-123 | FEAT : add widget");
//! assert!(!outcome.is_rejected());
//! ```

// Module declarations
pub mod cli;
pub mod commit;
pub mod config;
pub mod error;
pub mod git;
pub mod rules;
pub mod session;

// Re-exports for convenience
pub use config::RuleSet;
pub use error::{DevtraceError, Result};

/// Version information embedded at compile time.
pub mod version {
    /// The current version of devtrace.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    /// The git SHA at compile time (if available).
    pub const GIT_SHA: Option<&str> = option_env!("VERGEN_GIT_SHA");

    /// The git commit date at compile time (if available).
    pub const GIT_COMMIT_DATE: Option<&str> = option_env!("VERGEN_GIT_COMMIT_DATE");

    /// Get a formatted version string.
    pub fn version_string() -> String {
        match (GIT_SHA, GIT_COMMIT_DATE) {
            (Some(sha), Some(date)) => {
                format!("{} ({} {})", VERSION, &sha[..7.min(sha.len())], date)
            }
            (Some(sha), None) => {
                format!("{} ({})", VERSION, &sha[..7.min(sha.len())])
            }
            _ => VERSION.to_string(),
        }
    }

}
