//! Canvas viewport: zoom, pan and the single selected entity

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::canvas::{DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH, MAX_ZOOM, MIN_ZOOM};
use crate::types::{GuestId, Point, TableId, VenueElementId};

/// The one selected thing on the canvas. Selecting anything replaces the
/// previous selection, whatever its kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Selection {
    Table(TableId),
    Guest(GuestId),
    VenueElement(VenueElementId),
}

/// Screen position = canvas position * zoom + pan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasView {
    zoom: f64,
    pub pan_x: f64,
    pub pan_y: f64,
    pub viewport_width: f64,
    pub viewport_height: f64,
    selection: Option<Selection>,
}

impl Default for CanvasView {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
            selection: None,
        }
    }
}

impl CanvasView {
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Set zoom, clamped to [MIN_ZOOM, MAX_ZOOM]
    pub fn set_zoom(&mut self, zoom: f64) {
        let clamped = if zoom.is_nan() {
            1.0
        } else {
            zoom.clamp(MIN_ZOOM, MAX_ZOOM)
        };
        if clamped != zoom {
            debug!(requested = zoom, zoom = clamped, "Clamped zoom");
        }
        self.zoom = clamped;
    }

    /// Multiply zoom by `factor` keeping the canvas point under `focal`
    /// (screen space) where it is
    pub fn zoom_at(&mut self, factor: f64, focal: Point) {
        let anchor = self.screen_to_canvas(focal);
        self.set_zoom(self.zoom * factor);
        self.pan_x = focal.x - anchor.x * self.zoom;
        self.pan_y = focal.y - anchor.y * self.zoom;
    }

    pub fn set_pan(&mut self, pan_x: f64, pan_y: f64) {
        self.pan_x = pan_x;
        self.pan_y = pan_y;
    }

    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport_width = width;
        self.viewport_height = height;
    }

    pub fn screen_to_canvas(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.pan_x) / self.zoom,
            (screen.y - self.pan_y) / self.zoom,
        )
    }

    pub fn canvas_to_screen(&self, canvas: Point) -> Point {
        Point::new(
            canvas.x * self.zoom + self.pan_x,
            canvas.y * self.zoom + self.pan_y,
        )
    }

    /// Convert a screen-space drag delta into canvas units
    pub fn scale_delta(&self, dx: f64, dy: f64) -> (f64, f64) {
        (dx / self.zoom, dy / self.zoom)
    }

    /// Pan so `point` (canvas space) lands in the middle of the viewport
    pub fn center_on(&mut self, point: Point) {
        self.pan_x = self.viewport_width / 2.0 - point.x * self.zoom;
        self.pan_y = self.viewport_height / 2.0 - point.y * self.zoom;
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn select(&mut self, selection: Selection) {
        self.selection = Some(selection);
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    pub fn is_selected(&self, selection: &Selection) -> bool {
        self.selection.as_ref() == Some(selection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_zoom_clamped() {
        let mut view = CanvasView::default();
        view.set_zoom(5.0);
        assert_eq!(view.zoom(), 2.0);
        view.set_zoom(-1.0);
        assert_eq!(view.zoom(), 0.25);
        view.set_zoom(f64::NAN);
        assert_eq!(view.zoom(), 1.0);
    }

    #[test]
    fn test_selection_is_radio() {
        let mut view = CanvasView::default();
        let table = Selection::Table(TableId::new("t1"));
        let guest = Selection::Guest(GuestId::new("g1"));
        view.select(table.clone());
        view.select(guest.clone());
        assert!(view.is_selected(&guest));
        assert!(!view.is_selected(&table));
        view.select(Selection::VenueElement(VenueElementId::new("e1")));
        assert!(!view.is_selected(&guest));
        view.clear_selection();
        assert!(view.selection().is_none());
    }

    #[test]
    fn test_center_on_puts_point_mid_viewport() {
        let mut view = CanvasView::default();
        view.set_viewport(1000.0, 600.0);
        view.set_zoom(2.0);
        view.center_on(Point::new(100.0, 50.0));
        assert_eq!(view.canvas_to_screen(Point::new(100.0, 50.0)), Point::new(500.0, 300.0));
    }

    #[test]
    fn test_zoom_at_keeps_focal_point() {
        let mut view = CanvasView::default();
        view.set_pan(30.0, -40.0);
        let focal = Point::new(400.0, 300.0);
        let before = view.screen_to_canvas(focal);
        view.zoom_at(1.5, focal);
        let after = view.screen_to_canvas(focal);
        assert!((before.x - after.x).abs() < 1e-9);
        assert!((before.y - after.y).abs() < 1e-9);
    }

    #[test]
    fn test_scale_delta_inverse_zoom() {
        let mut view = CanvasView::default();
        view.set_zoom(0.5);
        assert_eq!(view.scale_delta(10.0, -20.0), (20.0, -40.0));
    }

    proptest! {
        #[test]
        fn zoom_always_within_bounds(zoom in -100.0f64..100.0) {
            let mut view = CanvasView::default();
            view.set_zoom(zoom);
            prop_assert!(view.zoom() >= MIN_ZOOM && view.zoom() <= MAX_ZOOM);
        }
    }
}
