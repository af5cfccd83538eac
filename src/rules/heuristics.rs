// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Text heuristics shared by the wording rules.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Ticket-style references such as `ABC-123`.
    static ref TICKET_REGEX: Regex = Regex::new(r"\b([A-Z]+)-[0-9]+\b").unwrap();

    /// Anchors pointing at review threads on common hosting platforms.
    static ref THREAD_ANCHOR_REGEX: Regex = Regex::new(
        r"#(?:discussion_r\d+|note_\d+|pullrequestreview-\d+|issuecomment-\d+)"
    ).unwrap();

    static ref URL_REGEX: Regex = Regex::new(r"[A-Za-z][A-Za-z0-9+.-]*://\S+").unwrap();

    static ref WORD_REGEX: Regex = Regex::new(r"[A-Za-z]+").unwrap();
}

/// Prefixes that look like tickets but name standards.
const TICKET_EXCLUSIONS: &[&str] = &["AES", "PEP", "SHA", "UTF", "VT"];

/// Imperative verbs that happen to end in `-ed`, `-ing` or `-s`.
const IMPERATIVE_EXCEPTIONS: &[&str] = &[
    "alias", "bleed", "breed", "bring", "canvas", "embed", "exceed", "feed", "heed", "need",
    "ping", "proceed", "ring", "seed", "shed", "shred", "sing", "speed", "spring", "string",
    "succeed", "swing",
];

const REVIEW_WORDS: &[&str] = &[
    "review",
    "reviews",
    "reviewed",
    "reviewer",
    "reviewers",
    "reviewing",
];

const REVIEW_ACTIONS: &[&str] = &[
    "address",
    "addressed",
    "addresses",
    "addressing",
    "apply",
    "applied",
    "comment",
    "comments",
    "feedback",
    "finding",
    "findings",
    "incorporate",
    "incorporated",
    "per",
    "process",
    "processed",
    "remark",
    "remarks",
    "resolve",
    "resolved",
    "rework",
    "reworked",
    "suggestion",
    "suggestions",
];

const FILLER_WORDS: &[&str] = &[
    "all", "and", "another", "are", "based", "code", "done", "few", "fix", "fixed", "fixes",
    "for", "from", "minor", "more", "other", "see", "some", "the", "this", "with",
];

/// The first word of a description when it is not in imperative mood.
pub fn non_imperative_word(description: &str) -> Option<&str> {
    let word = description
        .split_whitespace()
        .next()?
        .trim_end_matches(|c: char| !c.is_alphanumeric());
    if word.chars().count() <= 3 || !word.chars().all(|c| c.is_alphabetic()) {
        return None;
    }

    let lower = word.to_lowercase();
    if IMPERATIVE_EXCEPTIONS.contains(&lower.as_str())
        || ["ss", "us", "is"].iter().any(|end| lower.ends_with(end))
    {
        return None;
    }

    if lower.ends_with('s') || lower.ends_with("ed") || lower.ends_with("ing") {
        Some(word)
    } else {
        None
    }
}

/// Byte offset and text of the first ticket reference.
pub fn find_ticket(text: &str) -> Option<(usize, &str)> {
    TICKET_REGEX
        .captures_iter(text)
        .find(|c| {
            c.get(1)
                .is_some_and(|prefix| !TICKET_EXCLUSIONS.contains(&prefix.as_str()))
        })
        .and_then(|c| c.get(0))
        .map(|m| (m.start(), m.as_str()))
}

/// Whether the text points at a review comment or thread.
pub fn references_review(text: &str) -> bool {
    if THREAD_ANCHOR_REGEX.is_match(text) {
        return true;
    }
    let words: Vec<String> = WORD_REGEX
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect();
    words.iter().any(|w| REVIEW_WORDS.contains(&w.as_str()))
        && words.iter().any(|w| REVIEW_ACTIONS.contains(&w.as_str()))
}

/// Number of words that explain the change once links and review vocabulary are removed.
pub fn explanatory_word_count(text: &str) -> usize {
    let stripped = URL_REGEX.replace_all(text, " ");
    let stripped = THREAD_ANCHOR_REGEX.replace_all(&stripped, " ");
    WORD_REGEX
        .find_iter(&stripped)
        .map(|m| m.as_str().to_lowercase())
        .filter(|w| w.len() >= 3)
        .filter(|w| {
            let w = w.as_str();
            !REVIEW_WORDS.contains(&w) && !REVIEW_ACTIONS.contains(&w) && !FILLER_WORDS.contains(&w)
        })
        .count()
}

/// A review reference with fewer than three explanatory words.
pub fn is_unexplained_review_reference(text: &str) -> bool {
    references_review(text) && explanatory_word_count(text) < 3
}

/// The known tag closest to `tag`, if any is reasonably similar.
pub fn closest_tag<'a, I>(tag: &str, tags: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let wanted = tag.to_lowercase();
    tags.into_iter()
        .map(|candidate| (similarity(&wanted, candidate), candidate))
        .filter(|(score, _)| *score >= 0.6)
        .fold(None, |best: Option<(f64, &str)>, current| match best {
            Some(b) if b.0 >= current.0 => Some(b),
            _ => Some(current),
        })
        .map(|(_, candidate)| candidate)
}

/// Edit similarity in `[0, 1]`, relative to the combined length.
fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.iter().enumerate() {
        let mut current = vec![i + 1; b.len() + 1];
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            current[j + 1] = (previous[j] + cost)
                .min(previous[j + 1] + 1)
                .min(current[j] + 1);
        }
        previous = current;
    }

    (total - previous[b.len()]) as f64 / total as f64
}
