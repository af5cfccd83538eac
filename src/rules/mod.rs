// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule engine module for commit validation.
//!
//! This module holds the static rule catalogue and the engine that runs it
//! against parsed commit messages.

mod builtin;
mod catalogue;
mod engine;
mod heuristics;
mod validator;

pub use builtin::{builtin_rule, default_severity, BuiltinRule, RuleCheck, BUILTIN_RULES};
pub use catalogue::RuleId;
pub use engine::{evaluate, RuleEngine};
pub use validator::{Diagnostic, Location, Severity, ValidationResult};
