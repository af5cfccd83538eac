// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Version-bump classification of parsed messages.

use crate::commit::StructuredMessage;
use crate::error::BumpError;
use crate::rules::ValidationResult;

use super::level::BumpLevel;

/// Bump level implied by a single message.
pub fn classify(message: &StructuredMessage) -> BumpLevel {
    if message.breaking {
        BumpLevel::Major
    } else if message.commit_type.eq_ignore_ascii_case("feat") {
        BumpLevel::Minor
    } else if message.commit_type.eq_ignore_ascii_case("fix") {
        BumpLevel::Patch
    } else {
        BumpLevel::None
    }
}

/// Highest bump level over a range. An empty range is [`BumpLevel::None`].
pub fn classify_range<'a, I>(messages: I) -> BumpLevel
where
    I: IntoIterator<Item = &'a StructuredMessage>,
{
    messages
        .into_iter()
        .map(classify)
        .max()
        .unwrap_or(BumpLevel::None)
}

/// Classify checked messages.
///
/// Messages that failed to parse are skipped. With `strict` set, any invalid
/// message invalidates the whole range instead.
pub fn classify_results(results: &[ValidationResult], strict: bool) -> Result<BumpLevel, BumpError> {
    let failures = results.iter().filter(|r| !r.is_valid()).count();
    if strict && failures > 0 {
        return Err(BumpError::InvalidRange { failures });
    }

    let skipped = results.iter().filter(|r| r.parsed.is_none()).count();
    if skipped > 0 {
        tracing::debug!("Skipping {} non-conventional message(s)", skipped);
    }

    Ok(classify_range(results.iter().filter_map(|r| r.parsed.as_ref())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commit::parse;
    use crate::rules::RuleEngine;
    use proptest::prelude::*;

    fn level(raw: &str) -> BumpLevel {
        classify(&parse(raw).unwrap())
    }

    #[test]
    fn test_classify_single() {
        assert_eq!(level("feat: add login flow"), BumpLevel::Minor);
        assert_eq!(level("fix: patch race"), BumpLevel::Patch);
        assert_eq!(level("docs: update readme"), BumpLevel::None);
        assert_eq!(level("perf: cache lookups"), BumpLevel::None);
        assert_eq!(level("Feat: add x"), BumpLevel::Minor);
        assert_eq!(
            level("fix(auth)!: reject expired tokens\n\nBREAKING CHANGE: old tokens rejected"),
            BumpLevel::Major
        );
        assert_eq!(
            level("chore: bump deps\n\nBREAKING-CHANGE: requires rust 1.70"),
            BumpLevel::Major
        );
        assert_eq!(
            level("feat: move config\n\nBREAKING CHANGE: the config file moved.\n\nMigration is described in the docs."),
            BumpLevel::Major
        );
    }

    #[test]
    fn test_ticket_warning_does_not_affect_level() {
        assert_eq!(level("fix: ABC-123 crash on null input"), BumpLevel::Patch);
    }

    #[test]
    fn test_classify_range() {
        let messages: Vec<StructuredMessage> = ["docs: update readme", "fix: patch race"]
            .iter()
            .map(|raw| parse(raw).unwrap())
            .collect();
        assert_eq!(classify_range(&messages), BumpLevel::Patch);
        assert_eq!(classify_range(&Vec::<StructuredMessage>::new()), BumpLevel::None);
    }

    #[test]
    fn test_merge_commits() {
        assert_eq!(
            level("Merge pull request #12 from org/branch"),
            BumpLevel::None
        );
        assert_eq!(
            level("Merge pull request #12 from org/branch\n\nfeat(api): add pagination"),
            BumpLevel::Minor
        );
    }

    #[test]
    fn test_classify_results_skips_unparseable() {
        let engine = RuleEngine::default();
        let results = engine.check_messages(&["not conventional", "feat: add x", "Fix: Oops."]);
        assert_eq!(classify_results(&results, false).unwrap(), BumpLevel::Minor);
    }

    #[test]
    fn test_classify_results_strict() {
        let engine = RuleEngine::default();
        let results = engine.check_messages(&["not conventional", "feat: add x", "Fix: Oops."]);
        assert!(matches!(
            classify_results(&results, true),
            Err(BumpError::InvalidRange { failures: 2 })
        ));

        let results = engine.check_messages(&["feat: add x", "fix: adds warning only"]);
        assert_eq!(classify_results(&results, true).unwrap(), BumpLevel::Minor);
    }

    proptest! {
        #[test]
        fn prop_range_level_follows_strongest_type(
            kinds in proptest::collection::vec(0usize..4, 0..12),
        ) {
            let headers = ["docs: update readme", "fix: patch race", "feat: add login", "chore!: drop node 16"];
            let messages: Vec<StructuredMessage> =
                kinds.iter().map(|&k| parse(headers[k]).unwrap()).collect();

            let expected = if kinds.contains(&3) {
                BumpLevel::Major
            } else if kinds.contains(&2) {
                BumpLevel::Minor
            } else if kinds.contains(&1) {
                BumpLevel::Patch
            } else {
                BumpLevel::None
            };
            prop_assert_eq!(classify_range(&messages), expected);
        }
    }
}
