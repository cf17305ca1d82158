// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule engine module for commit validation.
//!
//! The engine runs the format check, then the field rules, and hands the
//! collected violations to [`ValidationOutcome::resolve`] for severity
//! resolution.

mod builtin;
mod engine;
mod validator;

pub use builtin::{builtin_rules, check_format, Rule, TicketRule, TypeRule};
pub use engine::RuleEngine;
pub use validator::{Finding, ValidationOutcome, Violation, ViolationKind};
