// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration schema definitions.
//!
//! [`Configuration`] is the immutable value the rules see. [`ConfigLayer`]
//! is one partial source of settings (a `convlint.toml` file or the command
//! line) that is merged on top of the defaults.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::error::ConfigError;
use crate::rules::RuleId;

/// Default limit for the subject line.
pub const DEFAULT_MAX_SUBJECT_LENGTH: usize = 80;

/// Tags that can never be removed from the vocabulary.
pub const REQUIRED_TAGS: &[(&str, &str)] = &[("feat", "A new feature"), ("fix", "A bug fix")];

/// The default tag vocabulary with descriptions.
pub fn default_tags() -> BTreeMap<String, String> {
    let extra = [
        ("build", "Build system or dependency changes"),
        ("chore", "Build process or auxiliary tool changes"),
        ("ci", "CI configuration changes"),
        ("docs", "Documentation only changes"),
        ("perf", "Performance improvements"),
        ("refactor", "Code refactoring (no feature/fix)"),
        ("revert", "Reverting a previous commit"),
        ("style", "Code style changes (formatting, whitespace)"),
        ("test", "Adding or updating tests"),
        ("improvement", "Improvement of existing behavior without a new feature"),
    ];
    REQUIRED_TAGS
        .iter()
        .chain(extra.iter())
        .map(|(name, description)| (name.to_string(), description.to_string()))
        .collect()
}

/// Resolved configuration used by the rule engine and classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    tags: BTreeMap<String, String>,
    disabled_rules: BTreeSet<RuleId>,
    max_subject_length: usize,
    require_ticket: bool,
    strict: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            tags: default_tags(),
            disabled_rules: BTreeSet::new(),
            max_subject_length: DEFAULT_MAX_SUBJECT_LENGTH,
            require_ticket: false,
            strict: false,
        }
    }
}

impl Configuration {
    /// Known tags and their descriptions.
    pub fn tags(&self) -> &BTreeMap<String, String> {
        &self.tags
    }

    /// Whether `tag` is part of the vocabulary. Matching is exact.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains_key(tag)
    }

    /// Rules that are skipped.
    pub fn disabled_rules(&self) -> &BTreeSet<RuleId> {
        &self.disabled_rules
    }

    /// Whether a rule is skipped.
    pub fn is_disabled(&self, id: RuleId) -> bool {
        self.disabled_rules.contains(&id)
    }

    pub fn max_subject_length(&self) -> usize {
        self.max_subject_length
    }

    pub fn require_ticket(&self) -> bool {
        self.require_ticket
    }

    pub fn strict(&self) -> bool {
        self.strict
    }

    /// Replace the tag vocabulary. `feat` and `fix` are always kept.
    pub fn with_tags<I, K, V>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.tags = tags
            .into_iter()
            .map(|(name, description)| (name.into(), description.into()))
            .collect();
        for (name, description) in REQUIRED_TAGS {
            self.tags
                .entry(name.to_string())
                .or_insert_with(|| description.to_string());
        }
        self
    }

    /// Add a single tag.
    pub fn with_tag(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.tags.insert(name.into(), description.into());
        self
    }

    /// Skip a rule.
    pub fn disable(mut self, id: RuleId) -> Self {
        self.disabled_rules.insert(id);
        self
    }

    /// Set the subject length limit. Zero is raised to one.
    pub fn with_max_subject_length(mut self, max: usize) -> Self {
        self.max_subject_length = max.max(1);
        self
    }

    pub fn with_require_ticket(mut self, require_ticket: bool) -> Self {
        self.require_ticket = require_ticket;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Merge a layer on top of this configuration.
    ///
    /// Scalars from the layer win; tags and disabled rules are added.
    pub fn apply(mut self, layer: &ConfigLayer) -> Result<Self, ConfigError> {
        if let Some(max) = layer.max_subject_length {
            if max == 0 {
                return Err(ConfigError::InvalidValue {
                    key: "max-subject-length".to_string(),
                    message: "must be a positive integer".to_string(),
                });
            }
            self.max_subject_length = max;
        }
        if let Some(require_ticket) = layer.require_ticket {
            self.require_ticket = require_ticket;
        }
        if let Some(strict) = layer.strict {
            self.strict = strict;
        }

        for id in &layer.disable {
            self.disabled_rules.insert(id.parse::<RuleId>()?);
        }

        for (name, description) in &layer.tags {
            if name.is_empty() || !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
                return Err(ConfigError::InvalidValue {
                    key: "tags".to_string(),
                    message: format!("'{}' is not a valid type tag", name),
                });
            }
            self.tags.insert(name.clone(), description.clone());
        }

        Ok(self)
    }
}

/// One partial configuration source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ConfigLayer {
    /// Maximum subject length.
    pub max_subject_length: Option<usize>,

    /// Escalate ticket references in the subject to errors.
    pub require_ticket: Option<bool>,

    /// Refuse to classify ranges containing invalid messages.
    pub strict: Option<bool>,

    /// Rule ids to skip, e.g. `"C016"`.
    pub disable: Vec<String>,

    /// Extra type tags and their descriptions.
    pub tags: BTreeMap<String, String>,
}

impl ConfigLayer {
    /// Merge two layers, with the overlay taking precedence.
    pub fn merge(self, overlay: ConfigLayer) -> ConfigLayer {
        let mut disable = self.disable;
        for id in overlay.disable {
            if !disable.contains(&id) {
                disable.push(id);
            }
        }
        let mut tags = self.tags;
        tags.extend(overlay.tags);

        ConfigLayer {
            max_subject_length: overlay.max_subject_length.or(self.max_subject_length),
            require_ticket: overlay.require_ticket.or(self.require_ticket),
            strict: overlay.strict.or(self.strict),
            disable,
            tags,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Configuration::default();
        assert_eq!(config.max_subject_length(), 80);
        assert!(!config.require_ticket());
        assert!(!config.strict());
        assert!(config.disabled_rules().is_empty());
        for tag in [
            "feat", "fix", "build", "chore", "ci", "docs", "perf", "refactor", "revert", "style",
            "test", "improvement",
        ] {
            assert!(config.has_tag(tag), "{}", tag);
        }
        assert!(!config.has_tag("Feat"));
    }

    #[test]
    fn test_feat_and_fix_survive_replacement() {
        let config = Configuration::default().with_tags([("docs", "Docs")]);
        assert!(config.has_tag("feat"));
        assert!(config.has_tag("fix"));
        assert!(config.has_tag("docs"));
        assert!(!config.has_tag("chore"));
        assert_eq!(config.tags().len(), 3);
    }

    #[test]
    fn test_apply_layer() {
        let layer = ConfigLayer {
            max_subject_length: Some(72),
            require_ticket: Some(true),
            disable: vec!["C016".to_string(), "c019".to_string()],
            tags: [("security".to_string(), "Security fix".to_string())]
                .into_iter()
                .collect(),
            ..Default::default()
        };
        let config = Configuration::default().apply(&layer).unwrap();
        assert_eq!(config.max_subject_length(), 72);
        assert!(config.require_ticket());
        assert!(!config.strict());
        assert!(config.is_disabled(RuleId::C016));
        assert!(config.is_disabled(RuleId::C019));
        assert!(config.has_tag("security"));
        assert!(config.has_tag("chore"));
    }

    #[test]
    fn test_apply_rejects_invalid_values() {
        let layer = ConfigLayer {
            max_subject_length: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            Configuration::default().apply(&layer),
            Err(ConfigError::InvalidValue { .. })
        ));

        let layer = ConfigLayer {
            disable: vec!["C099".to_string()],
            ..Default::default()
        };
        assert!(matches!(
            Configuration::default().apply(&layer),
            Err(ConfigError::UnknownRule { .. })
        ));

        let layer = ConfigLayer {
            tags: [("bad tag".to_string(), String::new())].into_iter().collect(),
            ..Default::default()
        };
        assert!(Configuration::default().apply(&layer).is_err());
    }

    #[test]
    fn test_layer_merge_is_union() {
        let base = ConfigLayer {
            max_subject_length: Some(60),
            strict: Some(true),
            disable: vec!["C016".to_string()],
            tags: [("security".to_string(), "a".to_string())].into_iter().collect(),
            ..Default::default()
        };
        let overlay = ConfigLayer {
            max_subject_length: Some(72),
            disable: vec!["C019".to_string(), "C016".to_string()],
            tags: [("deps".to_string(), "b".to_string())].into_iter().collect(),
            ..Default::default()
        };
        let merged = base.merge(overlay);
        assert_eq!(merged.max_subject_length, Some(72));
        assert_eq!(merged.strict, Some(true));
        assert_eq!(merged.disable, vec!["C016", "C019"]);
        assert!(merged.tags.contains_key("security"));
        assert!(merged.tags.contains_key("deps"));
    }

    #[test]
    fn test_config_layer_serialization() {
        let layer = ConfigLayer {
            max_subject_length: Some(72),
            ..Default::default()
        };
        let toml_str = toml::to_string(&layer).unwrap();
        assert!(toml_str.contains("max-subject-length = 72"));
    }
}
