// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Diagnostic output for validation outcomes.

use crate::cli::args::OutputFormat;
use crate::config::Severity;
use crate::rules::{Finding, ValidationOutcome};
use console::Style;
use std::io::{self, Write};

/// Writes validation outcomes to an injected sink.
pub struct Reporter<W: Write> {
    out: W,
    format: OutputFormat,
    color: bool,
}

impl<W: Write> Reporter<W> {
    /// Create an uncoloured reporter.
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self {
            out,
            format,
            color: false,
        }
    }

    /// Enable or disable ANSI colours in text output.
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Consume the reporter and return the sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Report a single commit message.
    pub fn report(&mut self, outcome: &ValidationOutcome) -> io::Result<()> {
        match self.format {
            OutputFormat::Json => {
                let json = outcome_json(outcome);
                writeln!(self.out, "{}", pretty(&json))?;
            }
            OutputFormat::Text => {
                for finding in outcome.reported() {
                    let line = self.finding_line(finding);
                    writeln!(self.out, "{}", line)?;
                }
                let summary = self.summary_line(outcome);
                writeln!(self.out, "{}", summary)?;
            }
        }
        self.out.flush()
    }

    /// Report a batch of commits, in the order given.
    pub fn report_all(&mut self, outcomes: &[ValidationOutcome]) -> io::Result<()> {
        match self.format {
            OutputFormat::Json => {
                let json = serde_json::Value::Array(outcomes.iter().map(outcome_json).collect());
                writeln!(self.out, "{}", pretty(&json))?;
            }
            OutputFormat::Text => {
                for outcome in outcomes {
                    let header = self.commit_header(outcome);
                    writeln!(self.out, "{}", header)?;
                    for finding in outcome.reported() {
                        let line = self.finding_line(finding);
                        writeln!(self.out, "  {}", line)?;
                    }
                }

                let rejected = outcomes.iter().filter(|o| o.is_rejected()).count();
                writeln!(
                    self.out,
                    "devtrace: {} commit(s) checked, {} rejected",
                    outcomes.len(),
                    rejected
                )?;
            }
        }
        self.out.flush()
    }

    fn paint(&self, style: Style) -> Style {
        style.force_styling(self.color)
    }

    fn severity_style(&self, severity: Severity) -> Style {
        match severity {
            Severity::Error => self.paint(Style::new().red().bold()),
            Severity::Warning => self.paint(Style::new().yellow().bold()),
            Severity::Ignore => self.paint(Style::new().dim()),
        }
    }

    fn finding_line(&self, finding: &Finding) -> String {
        let violation = &finding.violation;
        format!(
            "{}[{}] {}: {}",
            self.severity_style(finding.severity)
                .apply_to(finding.severity.as_str()),
            violation.kind,
            self.paint(Style::new().cyan()).apply_to(violation.rule),
            violation.detail
        )
    }

    fn summary_line(&self, outcome: &ValidationOutcome) -> String {
        let style = if outcome.is_rejected() {
            self.paint(Style::new().red().bold())
        } else {
            self.paint(Style::new().green())
        };
        format!("devtrace: {}", style.apply_to(outcome.summary()))
    }

    fn commit_header(&self, outcome: &ValidationOutcome) -> String {
        let status = if outcome.is_rejected() {
            self.paint(Style::new().red().bold()).apply_to("✗")
        } else {
            self.paint(Style::new().green().bold()).apply_to("✓")
        };
        let sha = outcome.commit_sha.as_deref().unwrap_or("");
        let short_sha = &sha[..7.min(sha.len())];

        format!(
            "{} {} {}",
            status,
            self.paint(Style::new().cyan()).apply_to(short_sha),
            outcome.subject
        )
    }
}

fn outcome_json(outcome: &ValidationOutcome) -> serde_json::Value {
    serde_json::json!({
        "commit": outcome.commit_sha,
        "subject": outcome.subject,
        "rejected": outcome.is_rejected(),
        "findings": outcome.reported().collect::<Vec<_>>(),
        "ignored": outcome.count(Severity::Ignore),
    })
}

fn pretty(json: &serde_json::Value) -> String {
    serde_json::to_string_pretty(json).unwrap_or_default()
}
