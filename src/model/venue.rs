use serde::{Deserialize, Serialize};

use crate::geometry::Rect;
use crate::types::VenueElementId;

/// Non-seating fixtures drawn on the floor plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VenueElementKind {
    Stage,
    DanceFloor,
    Bar,
    Entrance,
    Other,
}

impl VenueElementKind {
    pub fn default_size(self) -> (f64, f64) {
        match self {
            VenueElementKind::Stage => (300.0, 150.0),
            VenueElementKind::DanceFloor => (250.0, 250.0),
            VenueElementKind::Bar => (200.0, 60.0),
            VenueElementKind::Entrance => (100.0, 20.0),
            VenueElementKind::Other => (100.0, 100.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VenueElement {
    pub id: VenueElementId,
    pub kind: VenueElementKind,
    #[serde(default)]
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl VenueElement {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}
