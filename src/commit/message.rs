// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Commit message structure and parsing.

use crate::error::{HeaderDefect, ParseError};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use super::cleanup::cleanup;
use super::footer::{paragraphs, split_footers, Footer, FooterSplit};

lazy_static! {
    /// `type[(scope)][!]: description`, permissive about whitespace so the
    /// rules can report it.
    static ref HEADER_REGEX: Regex = Regex::new(
        r"^(?P<type>\w+)(?:\((?P<scope>[^()]*)\))?(?P<breaking>[ \t]*![ \t!]*)?(?P<separator>[ \t]*:[ \t]*)(?P<description>.*)$"
    ).unwrap();

    /// Leading `fixup! ` / `squash! ` prefixes added by `git commit --fixup`.
    static ref AUTOSQUASH_REGEX: Regex = Regex::new(r"^(?:(?:fixup|squash)!\s+)+").unwrap();

    /// Merge subjects produced by git and hosting platforms.
    static ref MERGE_REGEX: Regex =
        Regex::new(r"^Merge (?:branch|tag|pull[ -]request) .+$").unwrap();

    /// Text following the first `: ` of a merge subject.
    static ref MERGE_EMBEDDED_REGEX: Regex = Regex::new(r"^Merge.*?:[ \t]*(?P<rest>\S.*)$").unwrap();
}

/// Raw header pieces kept for whitespace and marker checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Header {
    /// The subject line with any autosquash prefix removed.
    pub subject: String,
    /// The breaking marker as written (`!`, ` !`, `!!`, ...).
    pub breaking_marker: Option<String>,
    /// The separator as written (`: `, ` : `, `:`, ...).
    pub separator: String,
}

/// A parsed Conventional Commits message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructuredMessage {
    /// Commit type (feat, fix, etc.) as written.
    pub commit_type: String,
    /// Optional scope.
    pub scope: Option<String>,
    /// Whether this is a breaking change.
    pub breaking: bool,
    /// Description following the separator.
    pub description: String,
    /// Body paragraphs.
    pub body: Vec<String>,
    /// Footers in message order.
    pub footers: Vec<Footer>,
    /// Whether this is a whitelisted merge commit.
    pub is_merge_commit: bool,
    /// Whether the subject carried `fixup!`/`squash!` prefixes.
    pub autosquash: bool,
    /// Raw header pieces.
    pub header: Header,
    /// The cleaned message text; all locations refer to it.
    pub raw: String,
}

/// Header fields extracted by [`HEADER_REGEX`].
struct ParsedHeader {
    commit_type: String,
    scope: Option<String>,
    breaking_marker: Option<String>,
    separator: String,
    description: String,
}

impl ParsedHeader {
    fn is_breaking(&self) -> bool {
        self.breaking_marker
            .as_deref()
            .is_some_and(|marker| marker.contains('!'))
    }
}

impl StructuredMessage {
    /// Parse a commit message from a string.
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        let text = cleanup(raw);
        let lines: Vec<&str> = text.split('\n').collect();

        let Some((first, rest)) = lines.split_first().filter(|_| !text.is_empty()) else {
            return Err(ParseError::header(HeaderDefect::EmptyMessage));
        };

        let (autosquash, subject) = strip_autosquash(first);

        if MERGE_REGEX.is_match(subject) {
            tracing::debug!("Recognized merge commit: {}", subject);
            return Ok(Self::parse_merge(&text, subject, autosquash, rest));
        }

        let header = parse_header(subject)?;

        if rest.first().is_some_and(|line| !line.is_empty()) {
            return Err(ParseError::MissingSeparator);
        }

        let after = rest.get(1..).unwrap_or_default();
        let split = split_footers(after, 3, true)?;
        let breaking =
            header.is_breaking() || split.footers.iter().any(Footer::is_breaking_change);

        tracing::debug!(
            "Parsed commit: type={} scope={:?} breaking={} footers={}",
            header.commit_type,
            header.scope,
            breaking,
            split.footers.len()
        );

        Ok(Self {
            commit_type: header.commit_type,
            scope: header.scope,
            breaking,
            description: header.description,
            body: paragraphs(&after[..split.body_end]),
            footers: split.footers,
            is_merge_commit: false,
            autosquash,
            header: Header {
                subject: subject.to_string(),
                breaking_marker: header.breaking_marker,
                separator: header.separator,
            },
            raw: text.clone(),
        })
    }

    /// Best-effort extraction for whitelisted merge commits; never fails.
    fn parse_merge(text: &str, subject: &str, autosquash: bool, rest: &[&str]) -> Self {
        let start = rest.iter().position(|l| !l.is_empty()).unwrap_or(rest.len());
        let after = &rest[start..];
        let split = split_footers(after, start + 2, false).unwrap_or(FooterSplit {
            body_end: after.len(),
            footers: Vec::new(),
        });
        let body = paragraphs(&after[..split.body_end]);

        let embedded = MERGE_EMBEDDED_REGEX
            .captures(subject)
            .and_then(|c| c.name("rest"))
            .and_then(|m| parse_header(m.as_str()).ok())
            .or_else(|| {
                body.first()
                    .and_then(|paragraph| paragraph.lines().next())
                    .and_then(|line| parse_header(line).ok())
            });

        match embedded {
            Some(header) => {
                let breaking =
                    header.is_breaking() || split.footers.iter().any(Footer::is_breaking_change);
                Self {
                    commit_type: header.commit_type,
                    scope: header.scope,
                    breaking,
                    description: header.description,
                    body,
                    footers: split.footers,
                    is_merge_commit: true,
                    autosquash,
                    header: Header {
                        subject: subject.to_string(),
                        breaking_marker: header.breaking_marker,
                        separator: header.separator,
                    },
                    raw: text.to_string(),
                }
            }
            None => Self {
                commit_type: "merge".to_string(),
                scope: None,
                breaking: false,
                description: subject.to_string(),
                body,
                footers: split.footers,
                is_merge_commit: true,
                autosquash,
                header: Header {
                    subject: subject.to_string(),
                    breaking_marker: None,
                    separator: String::new(),
                },
                raw: text.to_string(),
            },
        }
    }

    /// Whether the `!` marker is present in the header.
    pub fn is_breaking_from_header(&self) -> bool {
        self.header
            .breaking_marker
            .as_deref()
            .is_some_and(|marker| marker.contains('!'))
    }

    /// The first footer announcing a breaking change, if any.
    pub fn breaking_change_footer(&self) -> Option<&Footer> {
        self.footers.iter().find(|f| f.is_breaking_change())
    }

    /// All values of footers whose token matches `token`, ignoring case.
    ///
    /// `BREAKING-CHANGE` and `BREAKING CHANGE` are treated as the same token.
    pub fn footer_values(&self, token: &str) -> Vec<&str> {
        let wanted = normalize_token(token);
        self.footers
            .iter()
            .filter(|f| normalize_token(&f.token) == wanted)
            .map(|f| f.value.as_str())
            .collect()
    }

    /// Lines of the cleaned message.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.raw.split('\n')
    }
}

fn normalize_token(token: &str) -> String {
    token.to_lowercase().replace('-', " ")
}

/// Remove autosquash prefixes from a subject line.
fn strip_autosquash(line: &str) -> (bool, &str) {
    match AUTOSQUASH_REGEX.find(line) {
        Some(m) => (true, &line[m.end()..]),
        None => (false, line),
    }
}

fn parse_header(subject: &str) -> Result<ParsedHeader, ParseError> {
    let Some(captures) = HEADER_REGEX.captures(subject) else {
        let starts_with_word = subject
            .chars()
            .next()
            .is_some_and(|c| c.is_alphanumeric() || c == '_');
        let defect = if starts_with_word {
            HeaderDefect::MissingColon
        } else {
            HeaderDefect::MissingType
        };
        return Err(ParseError::header(defect));
    };

    let description = captures
        .name("description")
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();
    if description.trim().is_empty() {
        return Err(ParseError::header(HeaderDefect::EmptyDescription));
    }

    Ok(ParsedHeader {
        commit_type: captures
            .name("type")
            .map(|m| m.as_str().to_string())
            .unwrap_or_default(),
        scope: captures.name("scope").map(|m| m.as_str().to_string()),
        breaking_marker: captures.name("breaking").map(|m| m.as_str().to_string()),
        separator: captures
            .name("separator")
            .map(|m| m.as_str().to_string())
            .unwrap_or_default(),
        description,
    })
}
