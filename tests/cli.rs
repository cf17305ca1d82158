// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! End-to-end tests for the devtrace binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const RULES: &str = r#"
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

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
        path
    }

    fn devtrace(&self) -> Command {
        let mut cmd = Command::cargo_bin("devtrace").unwrap();
        cmd.current_dir(self.path())
            .env_remove("DEVTRACE_RULES")
            .env_remove("RUST_LOG")
            .env("HOME", self.path())
            .env("XDG_CONFIG_HOME", self.path().join(".config"));
        cmd
    }

    fn validate(&self, message: &str, rules: &str) -> assert_cmd::assert::Assert {
        let message = self.write("COMMIT_EDITMSG", message);
        let rules = self.write("rules.toml", rules);
        self.devtrace()
            .arg("validate")
            .arg("commit")
            .arg(&message)
            .arg("--rules-path")
            .arg(&rules)
            .assert()
    }
}

#[test]
fn test_valid_message_exits_zero() {
    Workspace::new()
        .validate("JIRA-123 | FEAT : add widget\n", RULES)
        .success()
        .stderr(predicate::str::contains("accepted"));
}

#[test]
fn test_unmatched_message_reports_format_only() {
    Workspace::new()
        .validate("no ticket no type\n", RULES)
        .code(1)
        .stderr(predicate::str::contains("error[invalid_format] commit.pattern"))
        .stderr(predicate::str::contains("missing_ticket").not())
        .stderr(predicate::str::contains("unknown_type").not());
}

#[test]
fn test_lowercase_ticket_exits_one() {
    Workspace::new()
        .validate("jira-123 | FEAT : x\n", RULES)
        .code(1)
        .stderr(predicate::str::contains("ticket 'jira-123' must be uppercase"));
}

#[test]
fn test_unknown_type_error_then_warning() {
    Workspace::new()
        .validate("JIRA-123 | WOOPS : x\n", RULES)
        .code(1)
        .stderr(predicate::str::contains("error[unknown_type]"));

    let relaxed = RULES.replace("unknown_type = \"error\"", "unknown_type = \"warning\"");
    Workspace::new()
        .validate("JIRA-123 | WOOPS : x\n", &relaxed)
        .code(0)
        .stderr(predicate::str::contains("warning[unknown_type]"));
}

#[test]
fn test_omitted_severity_fails_closed() {
    let rules = r#"
[commit]
pattern = '^(?:(?P<ticket>[A-Z]+-\d+) )?(?P<type>[A-Z]+): (?P<description>.+)$'
strict = true

[ticket]
pattern = '^[A-Z]+-\d+$'
uppercase = true

[types]
allowed = ["FEAT"]

[severity]
invalid_format = "warning"
unknown_type = "warning"
"#;
    Workspace::new()
        .validate("FEAT: no ticket\n", rules)
        .code(1)
        .stderr(predicate::str::contains("error[missing_ticket]"));
}

#[test]
fn test_malformed_pattern_exits_two() {
    let broken = RULES.replace("pattern = '^[A-Z]+-\\d+$'", "pattern = '^[A-Z+-\\d+$'");
    Workspace::new()
        .validate("JIRA-123 | FEAT : x\n", &broken)
        .code(2)
        .stderr(predicate::str::contains("ticket.pattern"));
}

#[test]
fn test_syntax_error_exits_two() {
    Workspace::new()
        .validate("JIRA-123 | FEAT : x\n", "[commit\n")
        .code(2)
        .stderr(predicate::str::contains("Failed to parse rules file"));
}

#[test]
fn test_missing_message_file_exits_two() {
    let ws = Workspace::new();
    let rules = ws.write("rules.toml", RULES);
    ws.devtrace()
        .args(["validate", "commit", "does-not-exist"])
        .arg("--rules-path")
        .arg(&rules)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("does-not-exist"));
}

#[test]
fn test_missing_rules_file_exits_two() {
    let ws = Workspace::new();
    let message = ws.write("COMMIT_EDITMSG", "JIRA-1 | FEAT : x\n");
    ws.devtrace()
        .arg("validate")
        .arg("commit")
        .arg(&message)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Rules file not found"));
}

#[test]
fn test_rules_discovered_from_project() {
    let ws = Workspace::new();
    ws.write(".devtrace/configs/rules.toml", RULES);
    let message = ws.write("COMMIT_EDITMSG", "JIRA-1 | FIX : found rules\n");
    ws.devtrace()
        .arg("validate")
        .arg("commit")
        .arg(&message)
        .assert()
        .success();
}

#[test]
fn test_rules_path_from_env() {
    let ws = Workspace::new();
    let rules = ws.write("custom/rules.toml", RULES);
    let message = ws.write("COMMIT_EDITMSG", "JIRA-1 | WOOPS : x\n");
    ws.devtrace()
        .env("DEVTRACE_RULES", &rules)
        .arg("validate")
        .arg("commit")
        .arg(&message)
        .assert()
        .code(1);
}

#[test]
fn test_json_output() {
    let ws = Workspace::new();
    let message = ws.write("COMMIT_EDITMSG", "jira-1 | WOOPS : x\n");
    let rules = ws.write("rules.toml", RULES);
    let output = ws
        .devtrace()
        .args(["--format", "json", "validate", "commit"])
        .arg(&message)
        .arg("--rules-path")
        .arg(&rules)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["rejected"], true);
    assert_eq!(json["findings"].as_array().unwrap().len(), 2);
}

#[test]
fn test_rules_check() {
    let ws = Workspace::new();
    let rules = ws.write("rules.toml", RULES);
    ws.devtrace()
        .args(["rules", "check"])
        .arg(&rules)
        .assert()
        .success()
        .stdout(predicate::str::contains("7 allowed type(s)"));

    let bad = ws.write(
        "bad.toml",
        &RULES.replace("unknown_type = \"error\"", "unknown_type = \"loud\""),
    );
    ws.devtrace()
        .args(["rules", "check"])
        .arg(&bad)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("severity.unknown_type"));
}

#[test]
fn test_rules_default_is_loadable() {
    let ws = Workspace::new();
    let output = ws.devtrace().args(["rules", "default"]).output().unwrap();
    assert!(output.status.success());

    let rules = ws.write("default.toml", &String::from_utf8(output.stdout).unwrap());
    ws.devtrace()
        .args(["rules", "check"])
        .arg(&rules)
        .assert()
        .success();
}

#[test]
fn test_usage_error_exits_two() {
    Workspace::new()
        .devtrace()
        .args(["validate", "commit"])
        .assert()
        .code(2);
}

#[test]
fn test_scaffolded_rules_accept_valid_message() {
    let scaffolded = r#"[commit]
pattern = "^[A-Z]+-\\d+\\s\\|\\s[A-Z]+\\s:\\s.+$"
strict = true

[ticket]
pattern = "^[A-Z]+-\\d+$"
uppercase = true

[types]
allowed = [ "FEAT", "FIX", "INIT", "DOCS", "REFACTOR", "TEST", "CHORE",]

[severity]
invalid_format = "error"
unknown_type = "error"
missing_ticket = "error"
"#;
    Workspace::new()
        .validate("JIRA-123 | FEAT : add widget\n", scaffolded)
        .success();

    Workspace::new()
        .validate("JIRA-123 | WOOPS : add widget\n", scaffolded)
        .code(1)
        .stderr(predicate::str::contains("error[unknown_type]"));
}

#[test]
fn test_unreadable_rules_path_exits_two() {
    let ws = Workspace::new();
    let message = ws.write("COMMIT_EDITMSG", "JIRA-1 | FEAT : x\n");
    std::fs::create_dir_all(ws.path().join("rules-dir")).unwrap();
    ws.devtrace()
        .arg("validate")
        .arg("commit")
        .arg(&message)
        .arg("--rules-path")
        .arg(ws.path().join("rules-dir"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to read rules file"));
}

#[test]
fn test_rules_check_json() {
    let ws = Workspace::new();
    let rules = ws.write(
        "rules.toml",
        &RULES.replace("unknown_type = \"error\"\n", ""),
    );
    let output = ws
        .devtrace()
        .args(["--format", "json", "rules", "check"])
        .arg(&rules)
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["strict"], true);
    assert_eq!(json["allowed_types"].as_array().unwrap().len(), 7);
    assert_eq!(json["severity"]["unknown_type"], "error");
}
