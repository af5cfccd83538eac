// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Built-in validation rules.

use crate::commit::{is_continuation, parse_trailer, spaced_trailer_token, StructuredMessage};
use crate::config::Configuration;

use super::catalogue::RuleId;
use super::heuristics;
use super::validator::{Diagnostic, Location, Severity};

/// Signature shared by every rule check.
pub type RuleCheck = fn(&StructuredMessage, &Configuration) -> Vec<Diagnostic>;

/// A catalogue entry backed by a check function.
#[derive(Clone, Copy)]
pub struct BuiltinRule {
    pub id: RuleId,
    pub check: RuleCheck,
}

impl std::fmt::Debug for BuiltinRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuiltinRule").field("id", &self.id).finish()
    }
}

/// Rule checks in ascending id order. C012 and C018 are enforced by the parser.
pub static BUILTIN_RULES: &[BuiltinRule] = &[
    BuiltinRule { id: RuleId::C001, check: check_type_case },
    BuiltinRule { id: RuleId::C002, check: check_single_blank_line },
    BuiltinRule { id: RuleId::C003, check: check_description_case },
    BuiltinRule { id: RuleId::C004, check: check_known_type },
    BuiltinRule { id: RuleId::C005, check: check_separator_whitespace },
    BuiltinRule { id: RuleId::C006, check: check_empty_scope },
    BuiltinRule { id: RuleId::C007, check: check_scope_whitespace },
    BuiltinRule { id: RuleId::C008, check: check_separator_space },
    BuiltinRule { id: RuleId::C009, check: check_breaking_footer },
    BuiltinRule { id: RuleId::C010, check: check_marker_whitespace },
    BuiltinRule { id: RuleId::C011, check: check_single_marker },
    BuiltinRule { id: RuleId::C013, check: check_trailing_punctuation },
    BuiltinRule { id: RuleId::C014, check: check_subject_length },
    BuiltinRule { id: RuleId::C015, check: check_repeated_type },
    BuiltinRule { id: RuleId::C016, check: check_imperative_mood },
    BuiltinRule { id: RuleId::C017, check: check_review_references },
    BuiltinRule { id: RuleId::C019, check: check_ticket_reference },
    BuiltinRule { id: RuleId::C020, check: check_footer_grammar },
];

/// Look up the check for a rule id.
pub fn builtin_rule(id: RuleId) -> Option<&'static BuiltinRule> {
    BUILTIN_RULES.iter().find(|rule| rule.id == id)
}

/// Byte offsets of the header parts within `header.subject`.
struct HeaderSpans {
    scope: usize,
    marker: usize,
    separator: usize,
    description: usize,
}

impl HeaderSpans {
    fn of(message: &StructuredMessage) -> Self {
        let type_end = message.commit_type.len();
        let marker = type_end + message.scope.as_ref().map_or(0, |s| s.len() + 2);
        let separator = marker + message.header.breaking_marker.as_ref().map_or(0, String::len);
        let description = separator + message.header.separator.len();
        Self {
            scope: type_end + 1,
            marker,
            separator,
            description,
        }
    }
}

/// Header location for a byte offset into the subject.
fn at(message: &StructuredMessage, offset: usize) -> Location {
    let column = message
        .header
        .subject
        .get(..offset)
        .map_or(1, |prefix| prefix.chars().count() + 1);
    Location::Header {
        column: Some(column),
    }
}

/// C001: the type tag is written in lower case.
fn check_type_case(message: &StructuredMessage, _: &Configuration) -> Vec<Diagnostic> {
    let lower = message.commit_type.to_lowercase();
    if message.commit_type == lower {
        return Vec::new();
    }
    vec![Diagnostic::error(
        RuleId::C001,
        format!("Type tag '{}' should be lower case", message.commit_type),
        at(message, 0),
    )
    .with_suggestion(lower)]
}

/// C002: at most one blank line between subject and body.
fn check_single_blank_line(message: &StructuredMessage, _: &Configuration) -> Vec<Diagnostic> {
    let lines: Vec<&str> = message.lines().collect();
    if lines.len() > 3 && lines[1].is_empty() && lines[2].is_empty() {
        return vec![Diagnostic::error(
            RuleId::C002,
            "Only one empty line allowed between subject and body",
            Location::Body { line: 3 },
        )
        .with_suggestion("Remove the extra empty lines")];
    }
    Vec::new()
}

/// C003: the description starts in lower case, acronyms aside.
fn check_description_case(message: &StructuredMessage, _: &Configuration) -> Vec<Diagnostic> {
    let Some(first) = message.description.chars().next() else {
        return Vec::new();
    };
    if !first.is_uppercase() {
        return Vec::new();
    }

    let first_word = message.description.split_whitespace().next().unwrap_or("");
    let letters = first_word.chars().filter(|c| c.is_alphabetic()).count();
    let is_acronym = letters >= 2 && !first_word.chars().any(char::is_lowercase);
    if is_acronym {
        return Vec::new();
    }

    let rest = &message.description[first.len_utf8()..];
    vec![Diagnostic::error(
        RuleId::C003,
        "Description should not start with a capital letter",
        at(message, HeaderSpans::of(message).description),
    )
    .with_suggestion(format!("{}{}", first.to_lowercase(), rest))]
}

/// C004: the type tag is part of the configured vocabulary.
fn check_known_type(message: &StructuredMessage, config: &Configuration) -> Vec<Diagnostic> {
    if config.has_tag(&message.commit_type) {
        return Vec::new();
    }

    let known: Vec<&str> = config.tags().keys().map(String::as_str).collect();
    let diagnostic = Diagnostic::error(
        RuleId::C004,
        format!(
            "Unknown type tag '{}'. Use one of: {}",
            message.commit_type,
            known.join(", ")
        ),
        at(message, 0),
    );
    match heuristics::closest_tag(&message.commit_type, known.iter().copied()) {
        Some(tag) => vec![diagnostic.with_suggestion(tag)],
        None => vec![diagnostic],
    }
}

/// Split the raw separator around its colon.
fn separator_parts(message: &StructuredMessage) -> (&str, &str) {
    message
        .header
        .separator
        .split_once(':')
        .unwrap_or(("", ""))
}

/// C005: no whitespace before the colon and at most one after it.
fn check_separator_whitespace(message: &StructuredMessage, _: &Configuration) -> Vec<Diagnostic> {
    let (before, after) = separator_parts(message);
    if before.is_empty() && after.chars().count() <= 1 {
        return Vec::new();
    }
    vec![Diagnostic::error(
        RuleId::C005,
        "No whitespace allowed before and only one space allowed after the ':' separator",
        at(message, HeaderSpans::of(message).separator),
    )
    .with_suggestion(": ")]
}

/// C006: a scope, when present, is not empty.
fn check_empty_scope(message: &StructuredMessage, _: &Configuration) -> Vec<Diagnostic> {
    match message.scope {
        Some(ref scope) if scope.trim().is_empty() => vec![Diagnostic::error(
            RuleId::C006,
            "Scope should not be empty",
            at(message, HeaderSpans::of(message).scope),
        )
        .with_suggestion("Remove the parentheses or name a scope")],
        _ => Vec::new(),
    }
}

/// C007: the scope has no surrounding whitespace.
fn check_scope_whitespace(message: &StructuredMessage, _: &Configuration) -> Vec<Diagnostic> {
    match message.scope {
        Some(ref scope) if !scope.trim().is_empty() && scope.trim() != scope => {
            vec![Diagnostic::error(
                RuleId::C007,
                format!("Scope '{}' has leading or trailing whitespace", scope),
                at(message, HeaderSpans::of(message).scope),
            )
            .with_suggestion(scope.trim())]
        }
        _ => Vec::new(),
    }
}

/// C008: the colon is followed by a space.
fn check_separator_space(message: &StructuredMessage, _: &Configuration) -> Vec<Diagnostic> {
    let (_, after) = separator_parts(message);
    if !after.is_empty() {
        return Vec::new();
    }
    vec![Diagnostic::error(
        RuleId::C008,
        "The ':' separator should be followed by a space",
        at(message, HeaderSpans::of(message).description),
    )
    .with_suggestion(": ")]
}

/// C009: a `!` marker comes with a footer describing the breaking change.
fn check_breaking_footer(message: &StructuredMessage, _: &Configuration) -> Vec<Diagnostic> {
    if !message.is_breaking_from_header() || message.breaking_change_footer().is_some() {
        return Vec::new();
    }
    vec![Diagnostic::warning(
        RuleId::C009,
        "Breaking change marker without a BREAKING CHANGE footer describing the impact",
        at(message, HeaderSpans::of(message).marker),
    )
    .with_suggestion("BREAKING CHANGE: <what breaks and how to migrate>")]
}

/// C010: no whitespace around the breaking marker.
fn check_marker_whitespace(message: &StructuredMessage, _: &Configuration) -> Vec<Diagnostic> {
    match message.header.breaking_marker {
        Some(ref marker) if marker.contains(char::is_whitespace) => vec![Diagnostic::error(
            RuleId::C010,
            "No whitespace allowed around the breaking change marker",
            at(message, HeaderSpans::of(message).marker),
        )
        .with_suggestion("!")],
        _ => Vec::new(),
    }
}

/// C011: a single `!` marks a breaking change.
fn check_single_marker(message: &StructuredMessage, _: &Configuration) -> Vec<Diagnostic> {
    let count = message
        .header
        .breaking_marker
        .as_deref()
        .map_or(0, |marker| marker.matches('!').count());
    if count <= 1 {
        return Vec::new();
    }
    vec![Diagnostic::error(
        RuleId::C011,
        format!("Breaking change marker uses {} '!' characters, expected one", count),
        at(message, HeaderSpans::of(message).marker),
    )
    .with_suggestion("!")]
}

/// C013: the description does not end with punctuation.
fn check_trailing_punctuation(message: &StructuredMessage, _: &Configuration) -> Vec<Diagnostic> {
    let trimmed = message.description.trim_end_matches(['.', '!', '?', ',']);
    if trimmed.len() == message.description.len() {
        return Vec::new();
    }
    let offset = HeaderSpans::of(message).description + trimmed.len();
    vec![Diagnostic::error(
        RuleId::C013,
        "Description should not end with punctuation",
        at(message, offset),
    )
    .with_suggestion(trimmed.to_string())]
}

/// C014: the subject fits within the configured limit.
fn check_subject_length(message: &StructuredMessage, config: &Configuration) -> Vec<Diagnostic> {
    let max = config.max_subject_length();
    let len = message.header.subject.chars().count();
    if len <= max {
        return Vec::new();
    }
    vec![Diagnostic::error(
        RuleId::C014,
        format!("Subject is too long: {} characters (max: {})", len, max),
        Location::Header {
            column: Some(max + 1),
        },
    )
    .with_suggestion(format!("Shorten the subject to {} characters or less", max))]
}

/// C015: the description does not repeat the type tag.
fn check_repeated_type(message: &StructuredMessage, _: &Configuration) -> Vec<Diagnostic> {
    let first_word = message
        .description
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .next()
        .unwrap_or("");
    if !first_word.eq_ignore_ascii_case(&message.commit_type) {
        return Vec::new();
    }
    vec![Diagnostic::error(
        RuleId::C015,
        format!(
            "Description should not start with a repetition of the type tag '{}'",
            message.commit_type
        ),
        at(message, HeaderSpans::of(message).description),
    )]
}

/// C016: the description reads as an instruction.
fn check_imperative_mood(message: &StructuredMessage, _: &Configuration) -> Vec<Diagnostic> {
    let Some(word) = heuristics::non_imperative_word(&message.description) else {
        return Vec::new();
    };
    vec![Diagnostic::warning(
        RuleId::C016,
        format!("Description should use imperative mood (found '{}')", word),
        at(message, HeaderSpans::of(message).description),
    )
    .with_suggestion("Complete the sentence 'If applied, this commit will ...'")]
}

/// 1-based starting line of each body paragraph.
fn body_paragraph_lines(message: &StructuredMessage) -> Vec<usize> {
    let mut starts = Vec::new();
    let mut previous_blank = true;
    for (idx, line) in message.lines().enumerate().skip(2) {
        if !line.is_empty() && previous_blank {
            starts.push(idx + 1);
        }
        previous_blank = line.is_empty();
    }
    starts.truncate(message.body.len());
    starts
}

/// C017: review references come with an explanation.
fn check_review_references(message: &StructuredMessage, _: &Configuration) -> Vec<Diagnostic> {
    const MESSAGE: &str = "Describe the change instead of referring to review comments";
    let mut diagnostics = Vec::new();

    if heuristics::is_unexplained_review_reference(&message.description) {
        diagnostics.push(Diagnostic::warning(
            RuleId::C017,
            MESSAGE,
            at(message, HeaderSpans::of(message).description),
        ));
    }

    for (paragraph, line) in message.body.iter().zip(body_paragraph_lines(message)) {
        if heuristics::is_unexplained_review_reference(paragraph) {
            diagnostics.push(Diagnostic::warning(
                RuleId::C017,
                MESSAGE,
                Location::Body { line },
            ));
        }
    }

    for (index, footer) in message.footers.iter().enumerate() {
        if heuristics::is_unexplained_review_reference(&footer.value) {
            diagnostics.push(Diagnostic::warning(
                RuleId::C017,
                MESSAGE,
                Location::Footer {
                    index,
                    line: footer.line,
                },
            ));
        }
    }

    diagnostics
}

/// C019: no ticket references in the subject.
fn check_ticket_reference(message: &StructuredMessage, config: &Configuration) -> Vec<Diagnostic> {
    let Some((offset, ticket)) = heuristics::find_ticket(&message.header.subject) else {
        return Vec::new();
    };
    let text = format!(
        "Subject should not contain a ticket reference ('{}'); move it to a footer",
        ticket
    );
    let location = at(message, offset);
    let diagnostic = if config.require_ticket() {
        Diagnostic::error(RuleId::C019, text, location)
    } else {
        Diagnostic::warning(RuleId::C019, text, location)
    };
    vec![diagnostic.with_suggestion(format!("Refs: {}", ticket))]
}

/// How a line in the final paragraph reads as a trailer.
enum TrailerShape<'a> {
    Trailer,
    Continuation,
    SpacedToken(&'a str),
    Other,
}

fn trailer_shape(line: &str) -> TrailerShape<'_> {
    if parse_trailer(line).is_some() {
        TrailerShape::Trailer
    } else if is_continuation(line) {
        TrailerShape::Continuation
    } else if let Some(token) = spaced_trailer_token(line) {
        TrailerShape::SpacedToken(token)
    } else {
        TrailerShape::Other
    }
}

/// C020: every line of the trailing footer block is a well-formed trailer.
///
/// The final paragraph is a footer block when it ends in a trailer, in which
/// case it starts at its first trailer-like line, or when it consists of
/// nothing but whitespace-token trailers.
fn check_footer_grammar(message: &StructuredMessage, _: &Configuration) -> Vec<Diagnostic> {
    let lines: Vec<&str> = message.lines().collect();
    if lines.len() <= 2 {
        return Vec::new();
    }

    let start = lines
        .iter()
        .rposition(|line| line.is_empty())
        .map_or(2, |idx| idx + 1)
        .max(2);
    let shapes: Vec<(usize, TrailerShape)> = lines[start..]
        .iter()
        .enumerate()
        .map(|(offset, line)| (start + offset + 1, trailer_shape(line)))
        .collect();

    let ends_in_trailer = shapes
        .iter()
        .rev()
        .find(|(_, shape)| !matches!(shape, TrailerShape::Continuation))
        .is_some_and(|(_, shape)| matches!(shape, TrailerShape::Trailer));
    let block = if ends_in_trailer {
        let first = shapes
            .iter()
            .position(|(_, shape)| {
                matches!(shape, TrailerShape::Trailer | TrailerShape::SpacedToken(_))
            })
            .unwrap_or(0);
        &shapes[first..]
    } else if shapes.iter().all(|(_, shape)| {
        matches!(
            shape,
            TrailerShape::SpacedToken(_) | TrailerShape::Continuation
        )
    }) {
        &shapes[..]
    } else {
        return Vec::new();
    };

    block
        .iter()
        .filter_map(|(line, shape)| {
            let location = Location::Body { line: *line };
            match shape {
                TrailerShape::SpacedToken(token) => Some(
                    Diagnostic::error(
                        RuleId::C020,
                        format!("Footer token '{}' contains whitespace", token),
                        location,
                    )
                    .with_suggestion(token.replace(' ', "-")),
                ),
                TrailerShape::Other => Some(
                    Diagnostic::error(
                        RuleId::C020,
                        "Line in the footer section does not match 'Token: value'",
                        location,
                    )
                    .with_suggestion("Separate the body from the footers with an empty line"),
                ),
                TrailerShape::Trailer | TrailerShape::Continuation => None,
            }
        })
        .collect()
}

/// Default severity a rule reports with.
pub fn default_severity(id: RuleId) -> Severity {
    match id {
        RuleId::C009 | RuleId::C016 | RuleId::C017 | RuleId::C019 => Severity::Warning,
        _ => Severity::Error,
    }
}
