// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::ConfigLayer;

/// convlint - Conventional Commits linter
///
/// Validates commit messages against the Conventional Commits grammar and a
/// catalogue of style rules, and derives the semantic version bump they imply.
#[derive(Parser, Debug)]
#[command(name = "convlint")]
#[command(author = "Eshan Roy")]
#[command(version)]
#[command(about = "Conventional Commits linter and version bump classifier", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// The command to run (defaults to check if not specified)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Output format for machine-readable output
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Maximum subject line length
    #[arg(long, global = true, value_name = "N")]
    pub max_subject_length: Option<usize>,

    /// Accept an additional type tag, optionally with a description
    #[arg(long = "tag", global = true, value_name = "NAME[=DESC]")]
    pub tags: Vec<String>,

    /// Disable a rule by id (e.g. C016)
    #[arg(long = "disable", global = true, value_name = "ID")]
    pub disable: Vec<String>,

    /// Report ticket references in the subject as errors
    #[arg(long, global = true)]
    pub require_ticket: bool,

    /// Refuse to classify ranges that contain invalid messages
    #[arg(long, global = true)]
    pub strict: bool,
}

/// Output format for CI and scripting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text output (default)
    Text,
    /// JSON output for machine parsing
    Json,
}

/// Available commands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Validate commit messages (default command)
    Check(CheckArgs),

    /// Print the version bump implied by commit messages
    Bump(BumpArgs),

    /// List the rule catalogue
    Rules,

    /// Initialize convlint configuration
    Init(InitArgs),

    /// Print version information
    Version,
}

/// Arguments for the check command.
#[derive(Parser, Debug, Default, Clone)]
pub struct CheckArgs {
    /// Files holding NUL-separated messages, or '-' for stdin (default)
    #[arg(value_name = "TARGET")]
    pub targets: Vec<String>,

    /// Check a message given on the command line
    #[arg(short = 'm', long = "message", value_name = "MSG")]
    pub messages: Vec<String>,
}

/// Arguments for the bump command.
#[derive(Parser, Debug, Default, Clone)]
pub struct BumpArgs {
    /// Files holding NUL-separated messages, or '-' for stdin (default)
    #[arg(value_name = "TARGET")]
    pub targets: Vec<String>,

    /// Classify a message given on the command line
    #[arg(short = 'm', long = "message", value_name = "MSG")]
    pub messages: Vec<String>,

    /// Current version; prints the next version instead of the level
    #[arg(long, value_name = "VERSION")]
    pub current: Option<String>,
}

/// Arguments for the init command.
#[derive(Parser, Debug, Default, Clone)]
pub struct InitArgs {
    /// Overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,
}

impl Cli {
    /// Get the effective command, defaulting to Check if none specified.
    pub fn effective_command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or(Commands::Check(CheckArgs::default()))
    }

    /// Configuration overrides given on the command line.
    pub fn overrides(&self) -> ConfigLayer {
        ConfigLayer {
            max_subject_length: self.max_subject_length,
            require_ticket: self.require_ticket.then_some(true),
            strict: self.strict.then_some(true),
            disable: self.disable.clone(),
            tags: self
                .tags
                .iter()
                .map(|entry| match entry.split_once('=') {
                    Some((name, description)) => {
                        (name.trim().to_string(), description.trim().to_string())
                    }
                    None => (entry.trim().to_string(), String::new()),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_debug() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_check() {
        let args = Cli::parse_from(["convlint", "check", "msg.txt", "-m", "feat: add x"]);
        if let Some(Commands::Check(check_args)) = args.command {
            assert_eq!(check_args.targets, vec!["msg.txt"]);
            assert_eq!(check_args.messages, vec!["feat: add x"]);
        } else {
            panic!("Expected Check command");
        }
    }

    #[test]
    fn test_parse_bump() {
        let args = Cli::parse_from(["convlint", "bump", "-", "--current", "v1.2.3", "--strict"]);
        assert!(args.strict);
        if let Some(Commands::Bump(bump_args)) = args.command {
            assert_eq!(bump_args.targets, vec!["-"]);
            assert_eq!(bump_args.current.as_deref(), Some("v1.2.3"));
        } else {
            panic!("Expected Bump command");
        }
    }

    #[test]
    fn test_global_flags() {
        let args = Cli::parse_from([
            "convlint",
            "--max-subject-length",
            "72",
            "--tag",
            "security=Fixes a vulnerability",
            "--tag",
            "deps",
            "--disable",
            "C016",
            "--require-ticket",
            "rules",
        ]);
        let layer = args.overrides();
        assert_eq!(layer.max_subject_length, Some(72));
        assert_eq!(layer.require_ticket, Some(true));
        assert_eq!(layer.strict, None);
        assert_eq!(layer.disable, vec!["C016"]);
        assert_eq!(
            layer.tags.get("security").map(String::as_str),
            Some("Fixes a vulnerability")
        );
        assert_eq!(layer.tags.get("deps").map(String::as_str), Some(""));
    }

    #[test]
    fn test_default_command() {
        let args = Cli::parse_from(["convlint"]);
        assert!(args.command.is_none());
        assert!(matches!(args.effective_command(), Commands::Check(_)));
    }
}
