// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Trailer (footer) grammar and the body/footer boundary scan.

use crate::error::ParseError;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

/// The canonical breaking-change footer token.
pub const BREAKING_CHANGE_TOKEN: &str = "BREAKING CHANGE";

/// The hyphenated synonym of [`BREAKING_CHANGE_TOKEN`].
pub const BREAKING_CHANGE_HYPHEN_TOKEN: &str = "BREAKING-CHANGE";

lazy_static! {
    /// `Token: value` or `Token #value`.
    static ref TRAILER_REGEX: Regex = Regex::new(
        r"^(?P<token>BREAKING CHANGE|[\w][\w-]*)(?:: (?P<value>.+)| (?P<reference>#.+))$"
    ).unwrap();

    /// Any spelling of the breaking-change token followed by a separator.
    static ref BREAKING_TOKEN_REGEX: Regex =
        Regex::new(r"(?i)^(?P<token>breaking[ -]change)(?:: | #)").unwrap();

    /// A would-be trailer whose token contains spaces, e.g. `Reviewed by: x`.
    static ref SPACED_TOKEN_REGEX: Regex =
        Regex::new(r"^(?P<token>[A-Z][\w-]*(?: [\w-]+){1,2}): \S").unwrap();
}

/// A single `Token: value` footer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Footer {
    /// Token as written.
    pub token: String,
    /// Value, with continuation lines joined by newlines.
    pub value: String,
    /// 1-based line of the token in the cleaned message.
    pub line: usize,
}

impl Footer {
    /// Whether this footer announces a breaking change.
    pub fn is_breaking_change(&self) -> bool {
        (self.token == BREAKING_CHANGE_TOKEN || self.token == BREAKING_CHANGE_HYPHEN_TOKEN)
            && !self.value.trim().is_empty()
    }
}

/// Split a trailer line into token and value.
pub fn parse_trailer(line: &str) -> Option<(&str, &str)> {
    let captures = TRAILER_REGEX.captures(line)?;
    let token = captures.name("token")?.as_str();
    let value = captures
        .name("value")
        .or_else(|| captures.name("reference"))?
        .as_str();
    Some((token, value))
}

/// The token of a trailer-looking line whose token contains whitespace.
pub fn spaced_trailer_token(line: &str) -> Option<&str> {
    if line.starts_with(BREAKING_CHANGE_TOKEN) {
        return None;
    }
    SPACED_TOKEN_REGEX
        .captures(line)
        .and_then(|c| c.name("token"))
        .map(|m| m.as_str())
}

/// Whether a line continues the value of the trailer above it.
pub fn is_continuation(line: &str) -> bool {
    line.starts_with([' ', '\t']) && !line.trim().is_empty()
}

/// A breaking-change token spelled in any case other than the canonical ones.
fn misspelled_breaking_token(line: &str) -> Option<&str> {
    let token = BREAKING_TOKEN_REGEX.captures(line)?.name("token")?.as_str();
    if token == BREAKING_CHANGE_TOKEN || token == BREAKING_CHANGE_HYPHEN_TOKEN {
        None
    } else {
        Some(token)
    }
}

/// Result of scanning the lines after the header separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FooterSplit {
    /// Number of leading lines that belong to the body.
    pub body_end: usize,
    /// Footers in encounter order.
    pub footers: Vec<Footer>,
}

/// Collect trailing footers from `lines`, scanning upward.
///
/// `first_line` is the 1-based message line of `lines[0]`. With `strict`
/// set, a misspelled breaking-change token is a [`ParseError`]; otherwise
/// the scan simply stops at it.
///
/// A single prose paragraph may follow a breaking-change footer; it is
/// folded into that footer's value.
pub(crate) fn split_footers(
    lines: &[&str],
    first_line: usize,
    strict: bool,
) -> Result<FooterSplit, ParseError> {
    let split = scan_footers(lines, first_line, strict)?;
    if !split.footers.is_empty() {
        return Ok(split);
    }
    let Some(blank) = lines.iter().rposition(|line| line.is_empty()) else {
        return Ok(split);
    };

    let mut explained = scan_footers(&lines[..blank], first_line, strict)?;
    let Some(footer) = explained
        .footers
        .last_mut()
        .filter(|footer| footer.is_breaking_change())
    else {
        return Ok(split);
    };
    footer.value.push_str("\n\n");
    footer.value.push_str(&lines[blank + 1..].join("\n"));
    Ok(explained)
}

fn scan_footers(
    lines: &[&str],
    first_line: usize,
    strict: bool,
) -> Result<FooterSplit, ParseError> {
    let mut footers = Vec::new();
    let mut pending: Vec<&str> = Vec::new();
    let mut body_end = lines.len();

    for (idx, line) in lines.iter().enumerate().rev() {
        if line.is_empty() {
            // Continuation lines must sit directly under their trailer.
            if !pending.is_empty() {
                break;
            }
            continue;
        }
        if is_continuation(line) {
            pending.push(line.trim());
            continue;
        }
        if let Some(token) = misspelled_breaking_token(line) {
            if strict {
                return Err(ParseError::InvalidFooterToken {
                    token: token.to_string(),
                    line: first_line + idx,
                });
            }
            break;
        }
        let Some((token, value)) = parse_trailer(line) else {
            break;
        };

        let mut value = value.to_string();
        for continuation in pending.drain(..).rev() {
            value.push('\n');
            value.push_str(continuation);
        }
        footers.push(Footer {
            token: token.to_string(),
            value,
            line: first_line + idx,
        });
        body_end = idx;
    }

    footers.reverse();
    Ok(FooterSplit { body_end, footers })
}

/// Group lines into blank-line separated paragraphs.
pub(crate) fn paragraphs(lines: &[&str]) -> Vec<String> {
    lines
        .split(|line| line.is_empty())
        .filter(|chunk| !chunk.is_empty())
        .map(|chunk| chunk.join("\n"))
        .collect()
}
