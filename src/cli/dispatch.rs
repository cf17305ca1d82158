// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Command dispatch and execution.

use crate::config::{load_rules, resolve_rules_path, DEFAULT_RULES};
use crate::error::Result;
use crate::git::Repository;
use crate::rules::ViolationKind;
use crate::session::{self, Reporter, Verdict};
use std::io::Write;
use std::path::Path;

use super::args::{Cli, Commands, OutputFormat, RulesAction, ValidateTarget};

/// Run the CLI with the given arguments.
pub fn run(cli: Cli) -> Result<Verdict> {
    let format = cli.output_format();

    match cli.command {
        Commands::Validate(args) => match args.target {
            ValidateTarget::Commit {
                message_file,
                rules,
            } => run_validate_commit(&message_file, rules.rules_path.as_deref(), format),
            ValidateTarget::Range { range, rules } => {
                run_validate_range(&range, rules.rules_path.as_deref(), format)
            }
        },
        Commands::Rules(args) => match args.action {
            RulesAction::Check { path } => run_rules_check(path.as_deref(), format),
            RulesAction::Default => run_rules_default(),
        },
        Commands::Version => run_version(),
    }
}

/// Text diagnostics go to stderr so the hook's output reaches the user;
/// JSON goes to stdout for tooling.
fn reporter(format: OutputFormat) -> Reporter<Box<dyn Write>> {
    let (out, color): (Box<dyn Write>, bool) = match format {
        OutputFormat::Json => (Box::new(std::io::stdout()), false),
        OutputFormat::Text => (
            Box::new(std::io::stderr()),
            console::Term::stderr().features().colors_supported(),
        ),
    };
    Reporter::new(out, format).with_color(color)
}

/// Run the validate commit command.
fn run_validate_commit(
    message_file: &Path,
    rules_path: Option<&Path>,
    format: OutputFormat,
) -> Result<Verdict> {
    tracing::debug!("Validating commit message file {:?}", message_file);

    let rules_path = resolve_rules_path(rules_path)?;
    session::validate_commit(message_file, &rules_path, &mut reporter(format))
}

/// Run the validate range command.
fn run_validate_range(
    range: &str,
    rules_path: Option<&Path>,
    format: OutputFormat,
) -> Result<Verdict> {
    tracing::debug!("Validating commit range {}", range);

    let rules_path = resolve_rules_path(rules_path)?;
    let repo = Repository::open_current()?;
    session::validate_range(&repo, range, &rules_path, &mut reporter(format))
}

/// Run the rules check command.
fn run_rules_check(path: Option<&Path>, format: OutputFormat) -> Result<Verdict> {
    let path = resolve_rules_path(path)?;
    let rules = load_rules(&path)?;

    match format {
        OutputFormat::Json => {
            let severity: serde_json::Map<String, serde_json::Value> = ViolationKind::all()
                .iter()
                .map(|kind| {
                    let level = rules.severity_for(kind.as_str());
                    (kind.to_string(), serde_json::json!(level))
                })
                .collect();
            let report = serde_json::json!({
                "path": path.display().to_string(),
                "strict": rules.is_strict(),
                "allowed_types": rules.allowed_types().collect::<Vec<_>>(),
                "severity": severity,
            });
            println!("{:#}", report);
        }
        OutputFormat::Text => {
            println!(
                "✓ {}: {} allowed type(s), commit pattern {}",
                path.display(),
                rules.allowed_types().count(),
                if rules.is_strict() { "strict" } else { "prefix" }
            );
            for kind in ViolationKind::all() {
                let note = if rules.has_severity(kind.as_str()) {
                    ""
                } else {
                    " (default)"
                };
                println!("  {}: {}{}", kind, rules.severity_for(kind.as_str()), note);
            }
        }
    }

    Ok(Verdict::Accepted)
}

/// Run the rules default command.
fn run_rules_default() -> Result<Verdict> {
    print!("{}", DEFAULT_RULES);
    Ok(Verdict::Accepted)
}

/// Run the version command.
fn run_version() -> Result<Verdict> {
    println!("devtrace {}", crate::version::version_string());

    if let Some(sha) = crate::version::GIT_SHA {
        println!("git commit: {}", sha);
    }
    if let Some(date) = crate::version::GIT_COMMIT_DATE {
        println!("commit date: {}", date);
    }

    Ok(Verdict::Accepted)
}
