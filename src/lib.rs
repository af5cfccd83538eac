// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! convlint - Conventional Commits linter
//!
//! Parses commit messages into their Conventional Commits structure, checks
//! them against a fixed rule catalogue, and derives the semantic version
//! bump a range of commits implies.
//!
//! # Features
//!
//! - **Grammar Parser**: Header, body and trailer extraction with git-style cleanup
//! - **Rule Engine**: Rules C001 to C020 with per-rule disabling
//! - **Bump Classifier**: Major/minor/patch classification and next-version computation
//!
//! # Example
//!
//! ```
//! use convlint::config::Configuration;
//! use convlint::{classify, evaluate, parse, BumpLevel};
//!
//! let message = parse("feat(api): add pagination").unwrap();
//! assert!(evaluate(&message, &Configuration::default()).is_empty());
//! assert_eq!(classify(&message), BumpLevel::Minor);
//! ```

// Module declarations
pub mod bump;
pub mod cli;
pub mod commit;
pub mod config;
pub mod error;
pub mod rules;

// Re-exports for convenience
pub use bump::{classify, classify_range, BumpLevel};
pub use commit::{parse, StructuredMessage};
pub use config::Configuration;
pub use error::{ConvlintError, ParseError, Result};
pub use rules::{evaluate, Diagnostic, RuleEngine, RuleId, Severity};

/// Version information embedded at compile time.
pub mod version {
    /// The current version of convlint.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    /// The git SHA at compile time (if available).
    pub const GIT_SHA: Option<&str> = option_env!("VERGEN_GIT_SHA");

    /// The git commit date at compile time (if available).
    pub const GIT_COMMIT_DATE: Option<&str> = option_env!("VERGEN_GIT_COMMIT_DATE");

    /// Get a formatted version string.
    pub fn version_string() -> String {
        match (GIT_SHA, GIT_COMMIT_DATE) {
            (Some(sha), Some(date)) => {
                format!("{} ({} {})", VERSION, &sha[..7.min(sha.len())], date)
            }
            (Some(sha), None) => {
                format!("{} ({})", VERSION, &sha[..7.min(sha.len())])
            }
            _ => VERSION.to_string(),
        }
    }
}
