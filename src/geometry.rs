//! Pure geometry helpers for the floor plan: grid snapping, distance from a
//! point to a table, proximity lookup and alignment guides.

use serde::{Deserialize, Serialize};

use crate::constants::canvas::GUIDE_PADDING;
use crate::model::{Table, TableShape};
use crate::types::Point;

/// Axis-aligned rectangle in canvas units, origin at top-left
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Orientation of an alignment guide line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuideKind {
    /// Line of constant y (tables share a y coordinate)
    Horizontal,
    /// Line of constant x (tables share an x coordinate)
    Vertical,
}

/// Transient guide line shown while a table is dragged
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlignmentGuide {
    pub kind: GuideKind,
    /// The aligned coordinate (y for horizontal, x for vertical)
    pub position: f64,
    /// Visible extent along the other axis
    pub start: f64,
    pub end: f64,
}

/// Round `value` to the nearest multiple of `grid_size` when enabled
pub fn snap_to_grid(value: f64, grid_size: f64, enabled: bool) -> f64 {
    if !enabled || grid_size <= 0.0 {
        return value;
    }
    (value / grid_size).round() * grid_size
}

/// Distance from `point` to the outline of `table`.
///
/// Zero or negative means the point lies inside the table. Round tables use the
/// true circle; every other shape uses its bounding box, which is exact for
/// rectangles and close enough for the rest.
pub fn distance_to_table(point: Point, table: &Table) -> f64 {
    let rect = table.rect();
    let center = rect.center();

    match table.shape {
        TableShape::Round => point.distance_to(center) - table.width / 2.0,
        _ => {
            let dx = ((point.x - center.x).abs() - rect.width / 2.0).max(0.0);
            let dy = ((point.y - center.y).abs() - rect.height / 2.0).max(0.0);
            dx.hypot(dy)
        }
    }
}

/// First table (in iteration order) closer than `threshold` to `point`.
///
/// This is first-match, not nearest-match: when two tables both fall within the
/// threshold, the one that comes first wins even if the other is closer.
pub fn find_nearby_table<'a, I>(point: Point, tables: I, threshold: f64) -> Option<&'a Table>
where
    I: IntoIterator<Item = &'a Table>,
{
    tables
        .into_iter()
        .find(|table| distance_to_table(point, table) < threshold)
}

/// Alignment guides for `moving` placed at (`new_x`, `new_y`) against `others`.
///
/// Centre, left and right of the moving table are compared with the same
/// features of each other table (vertical guides); centre, top and bottom give
/// horizontal guides. Every match within `threshold` produces its own guide, so
/// equally sized tables that line up emit three guides on that axis.
pub fn find_alignment_guides<'a, I>(
    moving: &Table,
    new_x: f64,
    new_y: f64,
    others: I,
    threshold: f64,
) -> Vec<AlignmentGuide>
where
    I: IntoIterator<Item = &'a Table>,
{
    let dragged = Rect::new(new_x, new_y, moving.width, moving.height);
    let mut guides = Vec::new();

    for other in others {
        if other.id == moving.id {
            continue;
        }
        let target = other.rect();

        // x features -> vertical guides spanning both tables vertically
        let x_pairs = [
            (dragged.center().x, target.center().x),
            (dragged.left(), target.left()),
            (dragged.right(), target.right()),
        ];
        for (edge, reference) in x_pairs {
            if (edge - reference).abs() < threshold {
                guides.push(AlignmentGuide {
                    kind: GuideKind::Vertical,
                    position: reference,
                    start: dragged.top().min(target.top()) - GUIDE_PADDING,
                    end: dragged.bottom().max(target.bottom()) + GUIDE_PADDING,
                });
            }
        }

        // y features -> horizontal guides spanning both tables horizontally
        let y_pairs = [
            (dragged.center().y, target.center().y),
            (dragged.top(), target.top()),
            (dragged.bottom(), target.bottom()),
        ];
        for (edge, reference) in y_pairs {
            if (edge - reference).abs() < threshold {
                guides.push(AlignmentGuide {
                    kind: GuideKind::Horizontal,
                    position: reference,
                    start: dragged.left().min(target.left()) - GUIDE_PADDING,
                    end: dragged.right().max(target.right()) + GUIDE_PADDING,
                });
            }
        }
    }

    guides
}
