use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::canvas::SEAT_OFFSET;
use crate::geometry::Rect;
use crate::types::{Point, TableId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TableShape {
    Round,
    Rectangle,
    Square,
    Oval,
    HalfRound,
    Serpentine,
}

/// Default footprint and seat count for a freshly placed table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeDefaults {
    pub width: f64,
    pub height: f64,
    pub capacity: u32,
}

impl TableShape {
    pub const ALL: [TableShape; 6] = [
        TableShape::Round,
        TableShape::Rectangle,
        TableShape::Square,
        TableShape::Oval,
        TableShape::HalfRound,
        TableShape::Serpentine,
    ];

    pub fn defaults(self) -> ShapeDefaults {
        let (width, height, capacity) = match self {
            TableShape::Round => (120.0, 120.0, 8),
            TableShape::Rectangle => (200.0, 80.0, 10),
            TableShape::Square => (100.0, 100.0, 4),
            TableShape::Oval => (180.0, 100.0, 10),
            TableShape::HalfRound => (120.0, 60.0, 4),
            // Buffet-style runs, no seating
            TableShape::Serpentine => (300.0, 100.0, 0),
        };
        ShapeDefaults { width, height, capacity }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TableShape::Round => "round",
            TableShape::Rectangle => "rectangle",
            TableShape::Square => "square",
            TableShape::Oval => "oval",
            TableShape::HalfRound => "half-round",
            TableShape::Serpentine => "serpentine",
        }
    }
}

impl fmt::Display for TableShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TableShape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        TableShape::ALL
            .into_iter()
            .find(|shape| shape.as_str() == normalized)
            .ok_or_else(|| format!("unknown table shape '{s}'"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub id: TableId,
    pub name: String,
    pub shape: TableShape,
    /// Top-left corner in canvas units
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Seat count; 0 for non-seating fixtures
    pub capacity: u32,
}

impl Table {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn center(&self) -> Point {
        self.rect().center()
    }

    /// Canvas points of each seat, indexed by seat number.
    ///
    /// Round and oval tables spread seats evenly on an ellipse just outside the
    /// table. Squares use all four sides, other shapes the two long sides.
    pub fn seat_positions(&self) -> Vec<Point> {
        let count = self.capacity as usize;
        if count == 0 {
            return Vec::new();
        }
        let center = self.center();

        match self.shape {
            TableShape::Round | TableShape::Oval => {
                let rx = self.width / 2.0 + SEAT_OFFSET;
                let ry = self.height / 2.0 + SEAT_OFFSET;
                (0..count)
                    .map(|i| {
                        // Seat 0 at twelve o'clock, clockwise
                        let angle = std::f64::consts::TAU * i as f64 / count as f64
                            - std::f64::consts::FRAC_PI_2;
                        Point::new(center.x + rx * angle.cos(), center.y + ry * angle.sin())
                    })
                    .collect()
            }
            TableShape::Square => {
                let rect = self.rect();
                let per_side = count.div_ceil(4);
                (0..count)
                    .map(|i| {
                        let side = i / per_side;
                        let slot = i % per_side;
                        let t = (slot as f64 + 0.5) / per_side as f64;
                        match side {
                            0 => Point::new(rect.left() + t * rect.width, rect.top() - SEAT_OFFSET),
                            1 => Point::new(rect.right() + SEAT_OFFSET, rect.top() + t * rect.height),
                            2 => Point::new(rect.right() - t * rect.width, rect.bottom() + SEAT_OFFSET),
                            _ => Point::new(rect.left() - SEAT_OFFSET, rect.bottom() - t * rect.height),
                        }
                    })
                    .collect()
            }
            _ => {
                let rect = self.rect();
                let top = count.div_ceil(2);
                let bottom = count - top;
                (0..count)
                    .map(|i| {
                        if i < top {
                            let t = (i as f64 + 0.5) / top as f64;
                            Point::new(rect.left() + t * rect.width, rect.top() - SEAT_OFFSET)
                        } else {
                            let t = ((i - top) as f64 + 0.5) / bottom as f64;
                            Point::new(rect.left() + t * rect.width, rect.bottom() + SEAT_OFFSET)
                        }
                    })
                    .collect()
            }
        }
    }

    /// Point where a guest at `seat_index` is drawn; the table centre when the
    /// guest has no seat slot or the slot is out of range.
    pub fn seat_anchor(&self, seat_index: Option<u32>) -> Point {
        seat_index
            .and_then(|index| self.seat_positions().get(index as usize).copied())
            .unwrap_or_else(|| self.center())
    }
}
