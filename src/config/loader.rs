// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration loading and merging.

use crate::error::{ConfigError, ConvlintError, Result};
use std::path::{Path, PathBuf};

use super::schema::{ConfigLayer, Configuration};

/// Configuration file names to search for, in order of priority.
const CONFIG_FILES: &[&str] = &[".convlint.toml", "convlint.toml"];

/// Find the configuration file in the current directory or parent directories.
pub fn find_config_file() -> Option<PathBuf> {
    let current_dir = std::env::current_dir().ok()?;
    find_config_file_from(&current_dir)
}

/// Find the configuration file starting from a specific directory.
pub fn find_config_file_from(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        if let Some(path) = config_file_in(&current) {
            return Some(path);
        }

        // Try parent directory
        if !current.pop() {
            break;
        }
    }

    if let Some(path) = dirs::home_dir().and_then(|home| config_file_in(&home)) {
        return Some(path);
    }

    // XDG config directory
    dirs::config_dir()
        .map(|dir| dir.join("convlint").join("config.toml"))
        .filter(|path| path.exists())
}

fn config_file_in(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Load configuration from a specific path.
pub fn load_config_from(path: &Path) -> Result<Configuration> {
    let layer = load_layer_from(path)?;
    Ok(Configuration::default().apply(&layer)?)
}

/// Read one configuration layer from a file.
pub fn load_layer_from(path: &Path) -> Result<ConfigLayer> {
    tracing::debug!("Loading configuration from: {:?}", path);

    if !path.exists() {
        return Err(ConvlintError::Config(ConfigError::NotFound {
            path: path.to_path_buf(),
        }));
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        ConvlintError::Config(ConfigError::ParseError {
            message: format!("Failed to read config file: {}", e),
        })
    })?;

    parse_layer(&content)
}

/// Parse a configuration layer from a TOML string.
pub fn parse_layer(content: &str) -> Result<ConfigLayer> {
    toml::from_str(content).map_err(|e| {
        ConvlintError::Config(ConfigError::ParseError {
            message: format!("Failed to parse TOML: {}", e),
        })
    })
}

/// Parse a complete configuration from a TOML string.
pub fn parse_config(content: &str) -> Result<Configuration> {
    let layer = parse_layer(content)?;
    Ok(Configuration::default().apply(&layer)?)
}

/// Resolve the effective configuration: defaults, then file, then overrides.
///
/// An explicit `path` must exist; otherwise the usual locations are searched.
pub fn resolve_config(path: Option<&Path>, overrides: &ConfigLayer) -> Result<Configuration> {
    let file_layer = match path {
        Some(path) => load_layer_from(path)?,
        None => match find_config_file() {
            Some(found) => load_layer_from(&found)?,
            None => {
                tracing::debug!("No configuration file found, using defaults");
                ConfigLayer::default()
            }
        },
    };

    let layer = file_layer.merge(overrides.clone());
    Ok(Configuration::default().apply(&layer)?)
}
