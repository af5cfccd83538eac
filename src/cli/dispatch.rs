// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Command dispatch and execution.

use console::style;

use crate::bump::{classify_results, parse_version};
use crate::config::{resolve_config, Configuration};
use crate::error::{ConfigError, ConvlintError, Result, ResultExt, ValidationError};
use crate::rules::{builtin_rule, default_severity, RuleEngine, RuleId, ValidationResult};

use super::args::{BumpArgs, CheckArgs, Cli, Commands, InitArgs, OutputFormat};
use super::input::{collect_messages, MessageSource};

/// File written by `convlint init`.
const INIT_FILE: &str = ".convlint.toml";

/// Run the CLI with the given arguments.
pub fn run(cli: Cli) -> Result<()> {
    match cli.effective_command() {
        Commands::Check(args) => run_check(&cli, &load(&cli)?, args),
        Commands::Bump(args) => run_bump(&cli, &load(&cli)?, args),
        Commands::Rules => run_rules(&cli, &load(&cli)?),
        Commands::Init(args) => run_init(args),
        Commands::Version => run_version(),
    }
}

/// Resolve configuration from file and command-line overrides.
fn load(cli: &Cli) -> Result<Configuration> {
    let config = resolve_config(cli.config.as_deref(), &cli.overrides())?;
    tracing::debug!("Effective configuration: {:?}", config);
    Ok(config)
}

/// Parse and evaluate every message, labelling results with their source.
fn check_sources(config: &Configuration, sources: Vec<MessageSource>) -> Vec<ValidationResult> {
    let engine = RuleEngine::new(config.clone());
    let texts: Vec<&str> = sources.iter().map(|s| s.text.as_str()).collect();
    let results = engine.check_messages(&texts);
    results
        .into_iter()
        .zip(sources)
        .map(|(result, source)| result.with_source(source.label))
        .collect()
}

/// Run the check command.
fn run_check(cli: &Cli, config: &Configuration, args: CheckArgs) -> Result<()> {
    tracing::debug!("Running check command with args: {:?}", args);

    let sources = collect_messages(&args.targets, &args.messages)?;
    if sources.is_empty() {
        return Err(ValidationError::NoMessages.into());
    }

    let results = check_sources(config, sources);
    let invalid = results.iter().filter(|r| !r.is_valid()).count();

    match cli.format {
        Some(OutputFormat::Json) => {
            let json = serde_json::json!({
                "valid": invalid == 0,
                "results": results.iter().map(ValidationResult::to_json).collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&json).unwrap_or_default());
        }
        _ => {
            for result in &results {
                result.print(cli.format);
            }
            if results.len() > 1 {
                println!(
                    "\n{} message(s) checked, {} invalid",
                    results.len(),
                    invalid
                );
            }
        }
    }

    if invalid > 0 {
        Err(ValidationError::InvalidMessages { count: invalid }.into())
    } else {
        Ok(())
    }
}

/// Run the bump command.
fn run_bump(cli: &Cli, config: &Configuration, args: BumpArgs) -> Result<()> {
    tracing::debug!("Running bump command with args: {:?}", args);

    let current = args.current.as_deref().map(parse_version).transpose()?;
    let sources = collect_messages(&args.targets, &args.messages)?;
    let results = check_sources(config, sources);

    let level = match classify_results(&results, config.strict()) {
        Ok(level) => level,
        Err(err) => {
            report_failures(cli, &results);
            return Err(err.into());
        }
    };
    let skipped: Vec<&ValidationResult> = results.iter().filter(|r| r.parsed.is_none()).collect();
    let next = current.as_ref().and_then(|version| level.apply(version));

    match cli.format {
        Some(OutputFormat::Json) => {
            let json = serde_json::json!({
                "bump": level,
                "current": current.as_ref().map(ToString::to_string),
                "next": next.as_ref().map(ToString::to_string),
                "messages": results.len(),
                "skipped": skipped.iter().map(|r| r.source.clone()).collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&json).unwrap_or_default());
        }
        _ => {
            for result in &skipped {
                eprintln!(
                    "{} skipping non-conventional message {}: {}",
                    style("⚠").yellow().bold(),
                    result.source.as_deref().unwrap_or("-"),
                    result.subject()
                );
            }
            match (&current, &next) {
                (Some(_), Some(next)) => println!("{}", next),
                (Some(current), None) => println!("{}", current),
                (None, _) => println!("{}", level),
            }
        }
    }

    Ok(())
}

/// Print the invalid messages that made a strict bump refuse.
fn report_failures(cli: &Cli, results: &[ValidationResult]) {
    let failures: Vec<&ValidationResult> = results.iter().filter(|r| !r.is_valid()).collect();

    match cli.format {
        Some(OutputFormat::Json) => {
            let json = serde_json::json!({
                "bump": null,
                "messages": results.len(),
                "failures": failures.iter().map(|r| r.to_json()).collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&json).unwrap_or_default());
        }
        _ => {
            for result in failures {
                result.print(cli.format);
            }
        }
    }
}

/// Run the rules command.
fn run_rules(cli: &Cli, config: &Configuration) -> Result<()> {
    let status = |id: RuleId| {
        if builtin_rule(id).is_none() {
            "parser"
        } else if config.is_disabled(id) {
            "disabled"
        } else {
            "enabled"
        }
    };

    match cli.format {
        Some(OutputFormat::Json) => {
            let rules: Vec<_> = RuleId::all()
                .iter()
                .map(|&id| {
                    serde_json::json!({
                        "id": id,
                        "severity": default_severity(id),
                        "status": status(id),
                        "description": id.description(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rules).unwrap_or_default());
        }
        _ => {
            for &id in RuleId::all() {
                let state = match status(id) {
                    "disabled" => style("disabled").dim(),
                    "parser" => style("parser").cyan(),
                    other => style(other).green(),
                };
                println!(
                    "{} {:<8} {:<9} {}",
                    style(id).bold(),
                    default_severity(id).to_string(),
                    state,
                    id.description()
                );
            }
        }
    }

    Ok(())
}

/// Run the version command.
fn run_version() -> Result<()> {
    println!("convlint {}", crate::version::version_string());

    if let Some(sha) = crate::version::GIT_SHA {
        println!("git commit: {}", sha);
    }
    if let Some(date) = crate::version::GIT_COMMIT_DATE {
        println!("commit date: {}", date);
    }

    Ok(())
}

/// Run the init command.
fn run_init(args: InitArgs) -> Result<()> {
    use crate::config::default::example_config;

    tracing::debug!("Running init command with args: {:?}", args);

    let config_path = std::path::Path::new(INIT_FILE);

    if config_path.exists() && !args.force {
        return Err(ConvlintError::Config(ConfigError::InvalidValue {
            key: INIT_FILE.to_string(),
            message: "Configuration file already exists. Use --force to overwrite.".to_string(),
        }));
    }

    std::fs::write(config_path, example_config()).context("Failed to write configuration")?;

    println!("{} Created {}", style("✓").green().bold(), INIT_FILE);

    Ok(())
}
