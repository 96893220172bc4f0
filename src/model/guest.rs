use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::types::{GuestId, Point, TableId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RsvpStatus {
    #[default]
    Pending,
    Confirmed,
    Declined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipKind {
    Partner,
    Family,
    Friend,
    Colleague,
    Avoid,
}

impl RelationshipKind {
    pub const ALL: [RelationshipKind; 5] = [
        RelationshipKind::Partner,
        RelationshipKind::Family,
        RelationshipKind::Friend,
        RelationshipKind::Colleague,
        RelationshipKind::Avoid,
    ];

    /// Canonical strength for the kind. `Avoid` is high because it signals
    /// conflict severity, not affinity.
    pub fn default_strength(self) -> u8 {
        match self {
            RelationshipKind::Partner => 5,
            RelationshipKind::Family => 4,
            RelationshipKind::Friend => 3,
            RelationshipKind::Colleague => 2,
            RelationshipKind::Avoid => 5,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RelationshipKind::Partner => "partner",
            RelationshipKind::Family => "family",
            RelationshipKind::Friend => "friend",
            RelationshipKind::Colleague => "colleague",
            RelationshipKind::Avoid => "avoid",
        }
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RelationshipKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        RelationshipKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| format!("unknown relationship type '{s}'"))
    }
}

/// Directed edge from the owning guest to `target`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    pub target: GuestId,
    pub kind: RelationshipKind,
    /// 1..=5
    pub strength: u8,
}

/// Where a guest is on the floor plan. Exactly one state at a time.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Placement {
    Seated {
        table_id: TableId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        seat_index: Option<u32>,
    },
    Floating {
        x: f64,
        y: f64,
    },
    /// No drawable location (fresh guest, or its table was removed)
    #[default]
    Unplaced,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guest {
    pub id: GuestId,
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default)]
    pub rsvp: RsvpStatus,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
    #[serde(default)]
    pub placement: Placement,
}

impl Guest {
    pub fn new(id: GuestId, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            group: None,
            rsvp: RsvpStatus::default(),
            relationships: Vec::new(),
            placement: Placement::Unplaced,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }

    pub fn table_id(&self) -> Option<&TableId> {
        match &self.placement {
            Placement::Seated { table_id, .. } => Some(table_id),
            _ => None,
        }
    }

    pub fn seat_index(&self) -> Option<u32> {
        match self.placement {
            Placement::Seated { seat_index, .. } => seat_index,
            _ => None,
        }
    }

    pub fn floating_position(&self) -> Option<Point> {
        match self.placement {
            Placement::Floating { x, y } => Some(Point::new(x, y)),
            _ => None,
        }
    }

    pub fn is_seated(&self) -> bool {
        self.table_id().is_some()
    }

    pub fn relationship_to(&self, target: &GuestId) -> Option<&Relationship> {
        self.relationships.iter().find(|r| &r.target == target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_strengths() {
        assert_eq!(RelationshipKind::Partner.default_strength(), 5);
        assert_eq!(RelationshipKind::Family.default_strength(), 4);
        assert_eq!(RelationshipKind::Friend.default_strength(), 3);
        assert_eq!(RelationshipKind::Colleague.default_strength(), 2);
        assert_eq!(RelationshipKind::Avoid.default_strength(), 5);
    }

    #[test]
    fn test_full_name_trims_missing_parts() {
        let guest = Guest::new(GuestId::new("g1"), "Ada", "");
        assert_eq!(guest.full_name(), "Ada");
        let guest = Guest::new(GuestId::new("g2"), " Ada ", "Lovelace");
        assert_eq!(guest.full_name(), "Ada Lovelace");
    }

    #[test]
    fn test_placement_accessors() {
        let mut guest = Guest::new(GuestId::new("g1"), "Ada", "Lovelace");
        assert!(guest.table_id().is_none());
        assert!(guest.floating_position().is_none());

        guest.placement = Placement::Seated { table_id: TableId::new("t1"), seat_index: Some(2) };
        assert_eq!(guest.table_id(), Some(&TableId::new("t1")));
        assert_eq!(guest.seat_index(), Some(2));
        assert!(guest.floating_position().is_none());

        guest.placement = Placement::Floating { x: 1.0, y: 2.0 };
        assert!(guest.table_id().is_none());
        assert_eq!(guest.floating_position(), Some(Point::new(1.0, 2.0)));
    }

    #[test]
    fn test_placement_json_is_tagged() {
        let placement = Placement::Floating { x: 10.0, y: 20.0 };
        let json = serde_json::to_value(&placement).unwrap();
        assert_eq!(json["state"], "floating");
        let back: Placement = serde_json::from_value(json).unwrap();
        assert_eq!(back, placement);
    }
}
