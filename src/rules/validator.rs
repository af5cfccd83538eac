// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Diagnostics and validation result types.

use crate::cli::args::OutputFormat;
use crate::commit::StructuredMessage;
use crate::error::ParseError;
use console::{style, Style};
use serde::Serialize;

use super::catalogue::RuleId;

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Reported but never fails validation.
    Warning,
    /// Makes the message invalid.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Where in the cleaned message a diagnostic points. Lines are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Location {
    Header { column: Option<usize> },
    Body { line: usize },
    Footer { index: usize, line: usize },
    Message,
}

impl Location {
    /// The line this location refers to, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            Location::Header { .. } => Some(1),
            Location::Body { line } | Location::Footer { line, .. } => Some(*line),
            Location::Message => None,
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Location::Header { column: Some(col) } => write!(f, "1:{}", col),
            Location::Header { column: None } => write!(f, "1"),
            Location::Body { line } | Location::Footer { line, .. } => write!(f, "{}", line),
            Location::Message => write!(f, "-"),
        }
    }
}

/// A single rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Catalogue id of the rule that fired.
    pub rule: RuleId,
    /// Error or warning.
    pub severity: Severity,
    /// Human-readable explanation.
    pub message: String,
    /// Optional replacement text or hint.
    pub suggestion: Option<String>,
    /// Position in the cleaned message.
    pub location: Location,
}

impl Diagnostic {
    /// Create an error diagnostic.
    pub fn error(rule: RuleId, message: impl Into<String>, location: Location) -> Self {
        Self {
            rule,
            severity: Severity::Error,
            message: message.into(),
            suggestion: None,
            location,
        }
    }

    /// Create a warning diagnostic.
    pub fn warning(rule: RuleId, message: impl Into<String>, location: Location) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(rule, message, location)
        }
    }

    /// Attach a suggestion.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// The single diagnostic a grammar failure is reported as.
    pub fn from_parse_error(err: &ParseError) -> Self {
        let location = match err {
            ParseError::MalformedHeader { .. } => Location::Header { column: None },
            ParseError::MissingSeparator => Location::Body { line: 2 },
            ParseError::InvalidFooterToken { line, .. } => Location::Footer {
                index: 0,
                line: *line,
            },
        };
        let diagnostic = Self::error(err.rule_id(), err.to_string(), location);
        match err {
            ParseError::InvalidFooterToken { .. } => {
                diagnostic.with_suggestion("BREAKING CHANGE: <description>")
            }
            ParseError::MissingSeparator => {
                diagnostic.with_suggestion("Insert an empty line after the subject")
            }
            ParseError::MalformedHeader { .. } => {
                diagnostic.with_suggestion("type(scope): description")
            }
        }
    }

    /// Whether this diagnostic fails validation.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Format the diagnostic for terminal output.
    pub fn format(&self) -> String {
        let prefix = if self.is_error() {
            style("✗").red().bold()
        } else {
            style("⚠").yellow().bold()
        };

        let code_style = if self.is_error() {
            Style::new().red()
        } else {
            Style::new().yellow()
        };

        let mut output = format!(
            "{} {} {} {}",
            prefix,
            code_style.apply_to(self.rule),
            style(self.location).dim(),
            self.message
        );

        if let Some(ref suggestion) = self.suggestion {
            output.push_str(&format!(
                "\n  {} {}",
                style("→").dim(),
                style(suggestion).dim()
            ));
        }

        output
    }
}

/// Outcome of checking one commit message.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// The message as supplied.
    pub message: String,
    /// Where the message came from (file path, `stdin`, `-m`).
    pub source: Option<String>,
    /// The parsed message, when parsing succeeded.
    pub parsed: Option<StructuredMessage>,
    /// The grammar failure, when parsing failed.
    pub parse_error: Option<ParseError>,
    /// Diagnostics in catalogue order.
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationResult {
    /// Create a new validation result.
    pub fn new(message: String) -> Self {
        Self {
            message,
            source: None,
            parsed: None,
            parse_error: None,
            diagnostics: Vec::new(),
        }
    }

    /// Set the source label.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Check if the validation passed (no error diagnostics).
    pub fn is_valid(&self) -> bool {
        self.parse_error.is_none() && !self.diagnostics.iter().any(Diagnostic::is_error)
    }

    /// Error diagnostics.
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_error())
    }

    /// Warning diagnostics.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| !d.is_error())
    }

    /// First line of the message.
    pub fn subject(&self) -> &str {
        self.message
            .lines()
            .find(|l| !l.trim().is_empty() && !l.starts_with('#'))
            .unwrap_or("")
    }

    /// Print the result to stdout.
    pub fn print(&self, format: Option<OutputFormat>) {
        match format {
            Some(OutputFormat::Json) => println!(
                "{}",
                serde_json::to_string_pretty(&self.to_json()).unwrap_or_default()
            ),
            _ => self.print_text(),
        }
    }

    /// Print in text format.
    fn print_text(&self) {
        let status = if self.is_valid() {
            style("✓").green().bold()
        } else {
            style("✗").red().bold()
        };
        match self.source {
            Some(ref source) => println!("{} {} {}", status, style(source).cyan(), self.subject()),
            None => println!("{} {}", status, self.subject()),
        }

        for diagnostic in &self.diagnostics {
            println!("  {}", diagnostic.format());
        }
    }

    /// JSON representation used by `--format json`.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "valid": self.is_valid(),
            "source": self.source,
            "subject": self.subject(),
            "parse_error": self.parse_error.as_ref().map(|e| e.to_string()),
            "breaking": self.parsed.as_ref().map(|m| m.breaking),
            "merge": self.parsed.as_ref().map(|m| m.is_merge_commit),
            "diagnostics": self.diagnostics,
        })
    }

    /// Get a summary string.
    pub fn summary(&self) -> String {
        let errors = self.errors().count();
        let warnings = self.warnings().count();
        if self.is_valid() {
            if warnings == 0 {
                "Valid".to_string()
            } else {
                format!("Valid ({} warnings)", warnings)
            }
        } else {
            format!("Invalid ({} errors, {} warnings)", errors, warnings)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HeaderDefect;

    #[test]
    fn test_validation_result_valid() {
        let result = ValidationResult::new("feat: test".to_string());
        assert!(result.is_valid());
        assert!(result.diagnostics.is_empty());
        assert_eq!(result.summary(), "Valid");
    }

    #[test]
    fn test_warnings_do_not_fail() {
        let mut result = ValidationResult::new("feat: adds x".to_string());
        result.diagnostics.push(Diagnostic::warning(
            RuleId::C016,
            "not imperative",
            Location::Header { column: Some(7) },
        ));
        assert!(result.is_valid());
        assert_eq!(result.summary(), "Valid (1 warnings)");
    }

    #[test]
    fn test_validation_result_with_errors() {
        let mut result = ValidationResult::new("feat: x.".to_string());
        result.diagnostics.push(Diagnostic::error(
            RuleId::C013,
            "ends with punctuation",
            Location::Header { column: Some(8) },
        ));
        assert!(!result.is_valid());
        assert_eq!(result.errors().count(), 1);
        assert_eq!(result.warnings().count(), 0);
        assert_eq!(result.summary(), "Invalid (1 errors, 0 warnings)");
    }

    #[test]
    fn test_diagnostic_from_parse_error() {
        let err = ParseError::header(HeaderDefect::MissingColon);
        let diagnostic = Diagnostic::from_parse_error(&err);
        assert_eq!(diagnostic.rule, RuleId::C008);
        assert_eq!(diagnostic.severity, Severity::Error);
        assert_eq!(diagnostic.location, Location::Header { column: None });

        let diagnostic = Diagnostic::from_parse_error(&ParseError::MissingSeparator);
        assert_eq!(diagnostic.rule, RuleId::C018);
        assert_eq!(diagnostic.location.line(), Some(2));
    }

    #[test]
    fn test_diagnostic_format() {
        let diagnostic = Diagnostic::error(
            RuleId::C004,
            "unknown tag",
            Location::Header { column: Some(1) },
        )
        .with_suggestion("feat");
        let output = diagnostic.format();
        assert!(output.contains("C004"));
        assert!(output.contains("unknown tag"));
        assert!(output.contains("feat"));
    }

    #[test]
    fn test_to_json() {
        let mut result = ValidationResult::new("Feat: x".to_string()).with_source("stdin");
        result.diagnostics.push(Diagnostic::error(
            RuleId::C001,
            "not lower case",
            Location::Header { column: Some(1) },
        ));
        let json = result.to_json();
        assert_eq!(json["valid"], false);
        assert_eq!(json["source"], "stdin");
        assert_eq!(json["diagnostics"][0]["rule"], "C001");
        assert_eq!(json["diagnostics"][0]["severity"], "error");
        assert_eq!(json["diagnostics"][0]["location"]["kind"], "header");
    }
}
