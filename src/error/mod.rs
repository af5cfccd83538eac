// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Error types for convlint.
//!
//! Grammar failures ([`ParseError`]) are per-message and never abort a
//! range; the remaining types describe application-level failures that the
//! CLI turns into a non-zero exit.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::rules::RuleId;

/// The main error type for convlint operations.
#[derive(Error, Debug)]
pub enum ConvlintError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    // Grammar errors
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    // Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    // Classification errors
    #[error("Bump error: {0}")]
    Bump(#[from] BumpError),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Generic error with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to parse configuration: {message}")]
    ParseError { message: String },

    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    #[error("Unknown rule identifier: '{id}'")]
    UnknownRule { id: String },
}

/// The part of a header that made it unparseable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderDefect {
    /// Nothing was left after cleanup.
    EmptyMessage,
    /// No type tag in front of the separator.
    MissingType,
    /// No `:` after the type/scope prefix.
    MissingColon,
    /// Nothing after the separator.
    EmptyDescription,
}

impl fmt::Display for HeaderDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            HeaderDefect::EmptyMessage => "the commit message is empty",
            HeaderDefect::MissingType => "the subject requires a type tag",
            HeaderDefect::MissingColon => "the subject requires a ': ' separator after the type tag",
            HeaderDefect::EmptyDescription => "the subject requires a description",
        };
        f.write_str(text)
    }
}

/// Coarse classification of grammar failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    MalformedHeader,
    MissingSeparator,
    InvalidFooterToken,
}

/// A commit message that does not follow the Conventional Commits grammar.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Malformed header: {defect}")]
    MalformedHeader { defect: HeaderDefect },

    #[error("Missing blank line between the subject and the body")]
    MissingSeparator,

    #[error("Invalid footer token '{token}' on line {line}: use 'BREAKING CHANGE' or 'BREAKING-CHANGE'")]
    InvalidFooterToken { token: String, line: usize },
}

impl ParseError {
    /// Shorthand for a [`ParseError::MalformedHeader`].
    pub fn header(defect: HeaderDefect) -> Self {
        ParseError::MalformedHeader { defect }
    }

    /// Get the coarse kind of this error.
    pub fn kind(&self) -> ParseErrorKind {
        match self {
            ParseError::MalformedHeader { .. } => ParseErrorKind::MalformedHeader,
            ParseError::MissingSeparator => ParseErrorKind::MissingSeparator,
            ParseError::InvalidFooterToken { .. } => ParseErrorKind::InvalidFooterToken,
        }
    }

    /// The catalogue identifier this failure is reported under.
    pub fn rule_id(&self) -> RuleId {
        match self {
            ParseError::MalformedHeader { defect } => match defect {
                HeaderDefect::EmptyMessage | HeaderDefect::MissingType => RuleId::C012,
                HeaderDefect::MissingColon => RuleId::C008,
                HeaderDefect::EmptyDescription => RuleId::C009,
            },
            ParseError::MissingSeparator => RuleId::C018,
            ParseError::InvalidFooterToken { .. } => RuleId::C020,
        }
    }

    /// The 1-based line of the cleaned message the failure points at.
    pub fn line(&self) -> usize {
        match self {
            ParseError::MalformedHeader { .. } => 1,
            ParseError::MissingSeparator => 2,
            ParseError::InvalidFooterToken { line, .. } => *line,
        }
    }
}

/// Validation-related errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("{count} commit message(s) failed validation")]
    InvalidMessages { count: usize },

    #[error("No commit messages to check")]
    NoMessages,
}

/// Classification-related errors.
#[derive(Error, Debug)]
pub enum BumpError {
    #[error("Strict mode: {failures} commit message(s) are invalid, refusing to report a bump level")]
    InvalidRange { failures: usize },

    #[error("Invalid version '{version}': {message}")]
    InvalidVersion { version: String, message: String },
}

/// Result type alias for convlint operations.
pub type Result<T> = std::result::Result<T, ConvlintError>;

/// Extension trait for adding context to errors.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E: std::error::Error + 'static> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| ConvlintError::WithContext {
            context: context.into(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::NotFound {
            path: PathBuf::from("/path/to/config"),
        };
        assert!(err.to_string().contains("/path/to/config"));
    }

    #[test]
    fn test_parse_error_rule_mapping() {
        assert_eq!(
            ParseError::header(HeaderDefect::MissingColon).rule_id(),
            RuleId::C008
        );
        assert_eq!(
            ParseError::header(HeaderDefect::EmptyDescription).rule_id(),
            RuleId::C009
        );
        assert_eq!(
            ParseError::header(HeaderDefect::MissingType).rule_id(),
            RuleId::C012
        );
        assert_eq!(ParseError::MissingSeparator.rule_id(), RuleId::C018);
        assert_eq!(
            ParseError::InvalidFooterToken {
                token: "Breaking change".to_string(),
                line: 3
            }
            .rule_id(),
            RuleId::C020
        );
    }

    #[test]
    fn test_parse_error_kind_and_line() {
        let err = ParseError::InvalidFooterToken {
            token: "breaking-change".to_string(),
            line: 5,
        };
        assert_eq!(err.kind(), ParseErrorKind::InvalidFooterToken);
        assert_eq!(err.line(), 5);
        assert_eq!(
            ParseError::MissingSeparator.kind(),
            ParseErrorKind::MissingSeparator
        );
        assert_eq!(ParseError::MissingSeparator.line(), 2);
    }

    #[test]
    fn test_convlint_error_from_config_error() {
        let config_err = ConfigError::UnknownRule {
            id: "C999".to_string(),
        };
        let err: ConvlintError = config_err.into();
        assert!(err.to_string().contains("C999"));
    }

    #[test]
    fn test_result_ext_context() {
        let io: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "gone",
        ));
        let err = io.context("reading message").unwrap_err();
        assert_eq!(err.to_string(), "reading message: gone");
    }
}
