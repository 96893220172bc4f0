use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::types::{ConstraintId, GuestId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintKind {
    #[serde(alias = "same_table")]
    MustSitTogether,
    #[serde(alias = "different_table")]
    MustNotSitTogether,
    /// Declared but not evaluated yet
    NearFront,
    /// Declared but not evaluated yet
    Accessibility,
}

impl ConstraintKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ConstraintKind::MustSitTogether => "must_sit_together",
            ConstraintKind::MustNotSitTogether => "must_not_sit_together",
            ConstraintKind::NearFront => "near_front",
            ConstraintKind::Accessibility => "accessibility",
        }
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConstraintKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "must_sit_together" | "same_table" | "together" => Ok(ConstraintKind::MustSitTogether),
            "must_not_sit_together" | "different_table" | "apart" => {
                Ok(ConstraintKind::MustNotSitTogether)
            }
            "near_front" => Ok(ConstraintKind::NearFront),
            "accessibility" => Ok(ConstraintKind::Accessibility),
            _ => Err(format!("unknown constraint type '{s}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintPriority {
    #[default]
    Required,
    Preferred,
}

impl fmt::Display for ConstraintPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConstraintPriority::Required => "required",
            ConstraintPriority::Preferred => "preferred",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constraint {
    pub id: ConstraintId,
    pub kind: ConstraintKind,
    #[serde(default)]
    pub priority: ConstraintPriority,
    pub guest_ids: Vec<GuestId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_aliases_deserialize() {
        let kind: ConstraintKind = serde_json::from_str("\"same_table\"").unwrap();
        assert_eq!(kind, ConstraintKind::MustSitTogether);
        let kind: ConstraintKind = serde_json::from_str("\"different_table\"").unwrap();
        assert_eq!(kind, ConstraintKind::MustNotSitTogether);
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!("together".parse::<ConstraintKind>(), Ok(ConstraintKind::MustSitTogether));
        assert_eq!("must-not-sit-together".parse::<ConstraintKind>(), Ok(ConstraintKind::MustNotSitTogether));
        assert!("somewhere".parse::<ConstraintKind>().is_err());
    }
}
