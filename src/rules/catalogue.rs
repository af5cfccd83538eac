// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Stable rule identifiers.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Identifier of a catalogue rule, `C001` through `C020`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RuleId {
    C001,
    C002,
    C003,
    C004,
    C005,
    C006,
    C007,
    C008,
    C009,
    C010,
    C011,
    C012,
    C013,
    C014,
    C015,
    C016,
    C017,
    C018,
    C019,
    C020,
}

impl RuleId {
    /// Get the string representation of the rule id.
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleId::C001 => "C001",
            RuleId::C002 => "C002",
            RuleId::C003 => "C003",
            RuleId::C004 => "C004",
            RuleId::C005 => "C005",
            RuleId::C006 => "C006",
            RuleId::C007 => "C007",
            RuleId::C008 => "C008",
            RuleId::C009 => "C009",
            RuleId::C010 => "C010",
            RuleId::C011 => "C011",
            RuleId::C012 => "C012",
            RuleId::C013 => "C013",
            RuleId::C014 => "C014",
            RuleId::C015 => "C015",
            RuleId::C016 => "C016",
            RuleId::C017 => "C017",
            RuleId::C018 => "C018",
            RuleId::C019 => "C019",
            RuleId::C020 => "C020",
        }
    }

    /// Get a one-line description of what the rule checks.
    pub fn description(&self) -> &'static str {
        match self {
            RuleId::C001 => "Type tag should be lower case",
            RuleId::C002 => "Only one empty line between subject and body",
            RuleId::C003 => "Description should not start with a capital letter",
            RuleId::C004 => "Type tag should be a known tag",
            RuleId::C005 => "No whitespace before and one space after the ':' separator",
            RuleId::C006 => "Scope should not be empty",
            RuleId::C007 => "Scope should not have leading or trailing whitespace",
            RuleId::C008 => {
                "Separator ':' should be followed by a space (a missing ':' is a parse error and cannot be disabled)"
            }
            RuleId::C009 => {
                "Breaking changes should be described in a BREAKING CHANGE footer (an empty description is a parse error and cannot be disabled)"
            }
            RuleId::C010 => "No whitespace around the breaking change marker",
            RuleId::C011 => "Only a single '!' as breaking change marker",
            RuleId::C012 => "Subject should start with a type tag",
            RuleId::C013 => "Description should not end with punctuation",
            RuleId::C014 => "Subject should be within the line length limit",
            RuleId::C015 => "Description should not repeat the type tag",
            RuleId::C016 => "Description should be written in imperative mood",
            RuleId::C017 => "Do not refer to review comments without explaining the change",
            RuleId::C018 => "Empty line required between subject and body",
            RuleId::C019 => "Subject should not contain a ticket reference",
            RuleId::C020 => {
                "Footers should follow the 'Token: value' trailer format (a mis-cased BREAKING CHANGE token is a parse error and cannot be disabled)"
            }
        }
    }

    /// Ids whose check lives only in the grammar parser.
    pub fn enforced_by_parser(&self) -> bool {
        matches!(self, RuleId::C012 | RuleId::C018)
    }

    /// Get all rule ids in ascending order.
    pub fn all() -> &'static [RuleId] {
        &[
            RuleId::C001,
            RuleId::C002,
            RuleId::C003,
            RuleId::C004,
            RuleId::C005,
            RuleId::C006,
            RuleId::C007,
            RuleId::C008,
            RuleId::C009,
            RuleId::C010,
            RuleId::C011,
            RuleId::C012,
            RuleId::C013,
            RuleId::C014,
            RuleId::C015,
            RuleId::C016,
            RuleId::C017,
            RuleId::C018,
            RuleId::C019,
            RuleId::C020,
        ]
    }
}

impl std::str::FromStr for RuleId {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_uppercase();
        RuleId::all()
            .iter()
            .copied()
            .find(|id| id.as_str() == wanted)
            .ok_or_else(|| ConfigError::UnknownRule { id: s.to_string() })
    }
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_id_from_str() {
        assert_eq!("C001".parse::<RuleId>().unwrap(), RuleId::C001);
        assert_eq!("c016".parse::<RuleId>().unwrap(), RuleId::C016);
        assert_eq!(" C020 ".parse::<RuleId>().unwrap(), RuleId::C020);
        assert!("C021".parse::<RuleId>().is_err());
        assert!("lint".parse::<RuleId>().is_err());
    }

    #[test]
    fn test_shared_ids_mention_parse_errors() {
        use crate::error::{HeaderDefect, ParseError};

        for defect in [HeaderDefect::MissingColon, HeaderDefect::EmptyDescription] {
            let id = ParseError::header(defect).rule_id();
            assert!(!id.enforced_by_parser());
            assert!(id.description().contains("parse error"));
        }

        let footer = ParseError::InvalidFooterToken {
            token: "Breaking change".to_string(),
            line: 3,
        };
        assert!(footer.rule_id().description().contains("parse error"));
    }

    #[test]
    fn test_rule_id_display() {
        assert_eq!(RuleId::C004.to_string(), "C004");
        assert_eq!(RuleId::C019.to_string(), "C019");
    }

    #[test]
    fn test_rule_id_ordering() {
        let all = RuleId::all();
        assert_eq!(all.len(), 20);
        assert!(all.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_rule_id_serialization() {
        assert_eq!(serde_json::to_string(&RuleId::C014).unwrap(), "\"C014\"");
    }

    #[test]
    fn test_parser_enforced_ids() {
        assert!(RuleId::C012.enforced_by_parser());
        assert!(RuleId::C018.enforced_by_parser());
        assert!(!RuleId::C008.enforced_by_parser());
    }
}
