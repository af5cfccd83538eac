// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Semantic version increments.

use semver::{BuildMetadata, Prerelease, Version};
use serde::Serialize;

use crate::error::BumpError;

/// The semantic-versioning increment implied by a set of commits.
///
/// Ordered `None < Patch < Minor < Major`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BumpLevel {
    #[default]
    None,
    Patch,
    Minor,
    Major,
}

impl BumpLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            BumpLevel::None => "none",
            BumpLevel::Patch => "patch",
            BumpLevel::Minor => "minor",
            BumpLevel::Major => "major",
        }
    }

    /// The version following `current`, or `None` when nothing is released.
    ///
    /// Pre-release and build metadata are cleared.
    pub fn apply(&self, current: &Version) -> Option<Version> {
        let mut next = current.clone();
        match self {
            BumpLevel::None => return None,
            BumpLevel::Major => {
                next.major += 1;
                next.minor = 0;
                next.patch = 0;
            }
            BumpLevel::Minor => {
                next.minor += 1;
                next.patch = 0;
            }
            BumpLevel::Patch => {
                next.patch += 1;
            }
        }
        next.pre = Prerelease::EMPTY;
        next.build = BuildMetadata::EMPTY;
        Some(next)
    }
}

impl std::fmt::Display for BumpLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse a version or tag name such as `v1.2.3`.
pub fn parse_version(tag: &str) -> Result<Version, BumpError> {
    let clean_tag = tag.trim().trim_start_matches(['v', 'V']);
    Version::parse(clean_tag).map_err(|e| BumpError::InvalidVersion {
        version: tag.to_string(),
        message: e.to_string(),
    })
}
