// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// devtrace - commit-message rule enforcement
///
/// Validates commit messages against a declarative rule file. Meant to be
/// called from a commit-msg hook.
#[derive(Parser, Debug)]
#[command(name = "devtrace")]
#[command(author = "Eshan Roy")]
#[command(version)]
#[command(about = "Commit-message rule enforcement for git hooks", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// The command to run
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Output format for diagnostics
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Output format for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text on stderr (default)
    Text,
    /// JSON on stdout for machine parsing
    Json,
}

/// Available commands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Validate commit messages
    Validate(ValidateArgs),

    /// Inspect rule files
    Rules(RulesArgs),

    /// Print version information
    Version,
}

/// Arguments for the validate command.
#[derive(Parser, Debug, Clone)]
pub struct ValidateArgs {
    /// What to validate
    #[command(subcommand)]
    pub target: ValidateTarget,
}

/// Validation targets.
#[derive(Subcommand, Debug, Clone)]
pub enum ValidateTarget {
    /// Validate a commit message file (commit-msg hook entry point)
    Commit {
        /// Path to the commit message file
        #[arg(value_name = "MESSAGE_FILE")]
        message_file: PathBuf,

        #[command(flatten)]
        rules: RulesPathArg,
    },

    /// Validate the messages of existing commits
    Range {
        /// Revision range (A..B) or a single revision
        #[arg(value_name = "RANGE")]
        range: String,

        #[command(flatten)]
        rules: RulesPathArg,
    },
}

/// Rules file selection shared by validation targets.
#[derive(Args, Debug, Clone, Default)]
pub struct RulesPathArg {
    /// Path to the rules file (default: nearest .devtrace/configs/rules.toml)
    #[arg(long, env = "DEVTRACE_RULES", value_name = "FILE")]
    pub rules_path: Option<PathBuf>,
}

/// Arguments for the rules command.
#[derive(Parser, Debug, Clone)]
pub struct RulesArgs {
    /// Rules action to perform
    #[command(subcommand)]
    pub action: RulesAction,
}

/// Rules actions.
#[derive(Subcommand, Debug, Clone)]
pub enum RulesAction {
    /// Load and validate a rules file without checking any message
    Check {
        /// Rules file (default: nearest .devtrace/configs/rules.toml)
        #[arg(value_name = "FILE")]
        path: Option<PathBuf>,
    },

    /// Print the built-in default rules
    Default,
}

impl Cli {
    /// Get the effective output format, defaulting to text.
    pub fn output_format(&self) -> OutputFormat {
        self.format.unwrap_or(OutputFormat::Text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_debug() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_hook_invocation() {
        let args = Cli::parse_from([
            "devtrace",
            "validate",
            "commit",
            ".git/COMMIT_EDITMSG",
            "--rules-path",
            ".devtrace/configs/rules.toml",
        ]);
        match args.command {
            Commands::Validate(ValidateArgs {
                target: ValidateTarget::Commit { message_file, rules },
            }) => {
                assert_eq!(message_file, PathBuf::from(".git/COMMIT_EDITMSG"));
                assert_eq!(
                    rules.rules_path,
                    Some(PathBuf::from(".devtrace/configs/rules.toml"))
                );
            }
            other => panic!("Expected validate commit, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_range() {
        let args = Cli::parse_from(["devtrace", "validate", "range", "main..HEAD"]);
        assert!(matches!(
            args.command,
            Commands::Validate(ValidateArgs {
                target: ValidateTarget::Range { ref range, .. },
            }) if range == "main..HEAD"
        ));
    }

    #[test]
    fn test_parse_rules_check() {
        let args = Cli::parse_from(["devtrace", "rules", "check", "rules.toml"]);
        assert!(matches!(
            args.command,
            Commands::Rules(RulesArgs {
                action: RulesAction::Check { path: Some(_) },
            })
        ));
    }

    #[test]
    fn test_global_flags() {
        let args = Cli::parse_from(["devtrace", "--format", "json", "rules", "default", "-d"]);
        assert!(args.debug);
        assert_eq!(args.output_format(), OutputFormat::Json);
    }

    #[test]
    fn test_default_format_is_text() {
        let args = Cli::parse_from(["devtrace", "version"]);
        assert_eq!(args.output_format(), OutputFormat::Text);
    }

    #[test]
    fn test_message_file_required() {
        assert!(Cli::try_parse_from(["devtrace", "validate", "commit"]).is_err());
    }
}
