// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration module for convlint.
//!
//! This module handles loading, parsing, and merging configuration from
//! files, command-line overrides and defaults.

pub mod default;
mod loader;
mod schema;

pub use default::example_config;
pub use loader::{
    find_config_file, find_config_file_from, load_config_from, load_layer_from,
    parse_config, parse_layer, resolve_config,
};
pub use schema::*;
