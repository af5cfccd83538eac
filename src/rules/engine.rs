// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule engine for commit validation.

use rayon::prelude::*;

use crate::commit::{self, StructuredMessage};
use crate::config::Configuration;

use super::builtin::BUILTIN_RULES;
use super::validator::{Diagnostic, ValidationResult};

/// Run every enabled rule against a parsed message.
///
/// Merge commits are exempt and always yield no diagnostics.
pub fn evaluate(message: &StructuredMessage, config: &Configuration) -> Vec<Diagnostic> {
    if message.is_merge_commit {
        return Vec::new();
    }

    BUILTIN_RULES
        .iter()
        .filter(|rule| {
            let disabled = config.is_disabled(rule.id);
            if disabled {
                tracing::debug!("Skipping disabled rule {}", rule.id);
            }
            !disabled
        })
        .flat_map(|rule| (rule.check)(message, config))
        .collect()
}

/// Rule engine for validating commit messages.
#[derive(Debug, Clone, Default)]
pub struct RuleEngine {
    config: Configuration,
}

impl RuleEngine {
    /// Create a new rule engine with the given configuration.
    pub fn new(config: Configuration) -> Self {
        Self { config }
    }

    /// The configuration rules are evaluated against.
    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Evaluate a parsed message.
    pub fn evaluate(&self, message: &StructuredMessage) -> Vec<Diagnostic> {
        evaluate(message, &self.config)
    }

    /// Validate a commit message string.
    ///
    /// A grammar failure becomes the single diagnostic of the result.
    pub fn check_message(&self, raw: &str) -> ValidationResult {
        let mut result = ValidationResult::new(raw.to_string());

        match commit::parse(raw) {
            Ok(parsed) => {
                result.diagnostics = self.evaluate(&parsed);
                result.parsed = Some(parsed);
            }
            Err(err) => {
                tracing::debug!("Parse error: {}", err);
                result.diagnostics.push(Diagnostic::from_parse_error(&err));
                result.parse_error = Some(err);
            }
        }

        result
    }

    /// Validate a range of messages in parallel, keeping input order.
    pub fn check_messages<S>(&self, messages: &[S]) -> Vec<ValidationResult>
    where
        S: AsRef<str> + Sync,
    {
        messages
            .par_iter()
            .map(|raw| self.check_message(raw.as_ref()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseErrorKind;
    use crate::rules::{RuleId, Severity};
    use proptest::prelude::*;

    #[test]
    fn test_rule_engine_valid() {
        let engine = RuleEngine::default();
        let result = engine.check_message("feat(core): add new feature");
        assert!(result.is_valid());
        assert!(result.diagnostics.is_empty());
        assert!(result.parsed.is_some());
    }

    #[test]
    fn test_rule_engine_unknown_type() {
        let engine = RuleEngine::default();
        let result = engine.check_message("chnage: typo type");
        assert!(!result.is_valid());
        assert!(result.errors().any(|d| d.rule == RuleId::C004));
    }

    #[test]
    fn test_rule_engine_subject_too_long() {
        let engine = RuleEngine::default();
        let raw = format!(
            "feat(api): {}\n\nExplain the change in the body.\n\nRefs: #42",
            "a".repeat(80)
        );
        let result = engine.check_message(&raw);
        assert!(!result.is_valid());
        let rules: Vec<RuleId> = result.errors().map(|d| d.rule).collect();
        assert_eq!(rules, vec![RuleId::C014]);
    }

    #[test]
    fn test_rule_engine_ticket_warning() {
        let raw = "fix: ABC-123 crash on null input";
        let result = RuleEngine::default().check_message(raw);
        assert!(result.is_valid());
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].rule, RuleId::C019);
        assert_eq!(result.diagnostics[0].severity, Severity::Warning);

        let engine = RuleEngine::new(Configuration::default().with_require_ticket(true));
        assert!(!engine.check_message(raw).is_valid());
    }

    #[test]
    fn test_rule_engine_parse_error() {
        let result = RuleEngine::default().check_message("fix something");
        assert!(!result.is_valid());
        assert!(result.parsed.is_none());
        assert_eq!(
            result.parse_error.as_ref().map(|e| e.kind()),
            Some(ParseErrorKind::MalformedHeader)
        );
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].rule, RuleId::C008);
    }

    #[test]
    fn test_rule_engine_disabled_rules() {
        let config = Configuration::default().disable(RuleId::C004);
        let result = RuleEngine::new(config).check_message("chnage: typo type");
        assert!(result.is_valid());
    }

    #[test]
    fn test_merge_commit_has_no_diagnostics() {
        let message = commit::parse("Merge pull request #12 from org/branch").unwrap();
        assert!(evaluate(&message, &Configuration::default()).is_empty());

        let strict = Configuration::default()
            .with_max_subject_length(5)
            .with_require_ticket(true);
        let message = commit::parse("Merge branch 'ABC-1-feature' into main").unwrap();
        assert!(evaluate(&message, &strict).is_empty());
    }

    #[test]
    fn test_check_messages_preserves_order() {
        let messages: Vec<String> = (0..64)
            .map(|i| {
                if i % 3 == 0 {
                    format!("Bad message {}", i)
                } else {
                    format!("fix: handle case {}", i)
                }
            })
            .collect();
        let results = RuleEngine::default().check_messages(&messages);
        assert_eq!(results.len(), messages.len());
        for (i, result) in results.iter().enumerate() {
            assert_eq!(result.message, messages[i]);
            assert_eq!(result.is_valid(), i % 3 != 0);
        }
    }

    fn conventional_message() -> impl Strategy<Value = String> {
        (
            prop::sample::select(vec!["feat", "fix", "Feat", "FIX", "docs", "chnage", "refactor"]),
            "(\\([a-z ]{0,6}\\))?",
            prop::sample::select(vec!["", "!", " !", "!!"]),
            prop::sample::select(vec![": ", ":", " : ", ":  "]),
            "[A-Za-z][a-z]{1,8}( [a-z]{1,8}){0,4}( ABC-12)?[.!]?",
            "(\n\n[A-Z][a-z]{2,8}( [a-z]{1,8}){0,5}\\.)?",
            prop::sample::select(vec![
                "",
                "\n\nRefs: #12",
                "\n\nBREAKING CHANGE: api removed",
                "\n\nReviewed by: Bob",
                "\n\nAddressed review comments",
            ]),
        )
            .prop_map(|(kind, scope, marker, separator, description, body, footer)| {
                format!("{kind}{scope}{marker}{separator}{description}{body}{footer}")
            })
    }

    proptest! {
        #[test]
        fn prop_evaluate_is_idempotent(description in "[a-z][a-z ]{0,40}[a-z]", scope in "[a-z]{0,6}") {
            let raw = format!("feat({}): {}", scope, description);
            if let Ok(message) = commit::parse(&raw) {
                let config = Configuration::default();
                prop_assert_eq!(evaluate(&message, &config), evaluate(&message, &config));
            }
        }

        #[test]
        fn prop_disabling_rules_is_monotonic(raw in conventional_message(), index in 0usize..20) {
            let parsed = commit::parse(&raw);
            prop_assume!(parsed.is_ok());
            let message = parsed.unwrap();

            let disabled = RuleId::all()[index];
            let config = Configuration::default();
            let full = evaluate(&message, &config);
            let reduced = evaluate(&message, &config.clone().disable(disabled));

            let expected: Vec<_> = full.iter().filter(|d| d.rule != disabled).cloned().collect();
            prop_assert_eq!(reduced, expected);
        }
    }

    #[test]
    fn test_generated_messages_parse_and_fire_rules() {
        use proptest::strategy::ValueTree;
        use proptest::test_runner::TestRunner;

        let mut runner = TestRunner::deterministic();
        let strategy = conventional_message();
        let mut parsed = 0;
        let mut fired = 0;
        for _ in 0..200 {
            let raw = strategy.new_tree(&mut runner).unwrap().current();
            if let Ok(message) = commit::parse(&raw) {
                parsed += 1;
                if !evaluate(&message, &Configuration::default()).is_empty() {
                    fired += 1;
                }
            }
        }
        assert_eq!(parsed, 200);
        assert!(fired > 100);
    }
}
