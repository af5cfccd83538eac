// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Semantic version bump classification.
//!
//! Breaking changes imply a major release, `feat` a minor one and `fix` a
//! patch. Every other type leaves the version alone.

mod classifier;
mod level;

pub use classifier::{classify, classify_range, classify_results};
pub use level::{parse_version, BumpLevel};
