// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! CLI module for convlint.
//!
//! This module handles command-line argument parsing, message input and
//! command dispatch.

pub mod args;
mod dispatch;
pub mod input;

pub use args::{Cli, Commands};
pub use dispatch::run;
