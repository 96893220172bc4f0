//! Drag and drop state machine for tables and guests
//!
//! A press starts a pending drag. It only becomes a real drag once the pointer
//! has travelled `drag_activation_distance` screen units; releasing before that
//! is a click and changes nothing. Deltas arrive in screen space and are scaled
//! by the inverse zoom before touching canvas coordinates.
//!
//! The engine keeps only ephemeral state (the active drag, live guides, live
//! snap target). All of it is cleared when a drag ends, whichever way it ends.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::canvas::CanvasView;
use crate::config::CanvasSettings;
use crate::constants::sidebar::{STACK_ROW_HEIGHT, STACK_START_Y, STACK_X};
use crate::geometry::{find_alignment_guides, find_nearby_table, snap_to_grid, AlignmentGuide};
use crate::model::{Placement, SeatingPlan};
use crate::types::{GuestId, Point, TableId};

/// What is being dragged, with exactly the data each kind needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DragPayload {
    Table { table_id: TableId },
    /// An unplaced guest pulled in from the guest list
    SidebarGuest { guest_id: GuestId },
    FloatingGuest { guest_id: GuestId },
    /// Seated guests have no stored coordinates, so the drag carries the point
    /// the guest was drawn at when the press started
    SeatedGuest { guest_id: GuestId, anchor: Point },
}

impl DragPayload {
    /// Payload for dragging `guest_id` given where it currently is
    pub fn for_guest(plan: &SeatingPlan, guest_id: &GuestId) -> Option<Self> {
        let guest = plan.guest(guest_id)?;
        let guest_id = guest_id.clone();
        Some(match guest.placement {
            Placement::Seated { .. } => DragPayload::SeatedGuest {
                anchor: plan.guest_anchor(&guest_id)?,
                guest_id,
            },
            Placement::Floating { .. } => DragPayload::FloatingGuest { guest_id },
            Placement::Unplaced => DragPayload::SidebarGuest { guest_id },
        })
    }
}

/// What the pointer was over when released. Only sidebar drops use it; canvas
/// drags decide by proximity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    Table(TableId),
    Canvas,
    Nothing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    /// Pressed but not moved far enough yet
    Pending,
    /// This update crossed the activation distance
    Started,
    Moving,
}

/// Result of ending a drag
#[derive(Debug, Clone, PartialEq)]
pub enum DragOutcome {
    /// Released before activation
    Click(DragPayload),
    TableMoved { table_id: TableId, x: f64, y: f64 },
    GuestSeated { guest_id: GuestId, table_id: TableId },
    GuestFloated { guest_id: GuestId, x: f64, y: f64 },
    GuestDetached { guest_id: GuestId, x: f64, y: f64 },
    Cancelled,
    /// Nothing to commit (no drag, or dropped over nothing)
    NoOp,
}

impl DragOutcome {
    pub fn is_commit(&self) -> bool {
        matches!(
            self,
            DragOutcome::TableMoved { .. }
                | DragOutcome::GuestSeated { .. }
                | DragOutcome::GuestFloated { .. }
                | DragOutcome::GuestDetached { .. }
        )
    }
}

#[derive(Debug, Clone)]
struct ActiveDrag {
    payload: DragPayload,
    /// Canvas position of the subject at press time; none for sidebar guests
    origin: Option<Point>,
    /// Cumulative movement in canvas units
    delta: (f64, f64),
    activated: bool,
}

impl ActiveDrag {
    fn position(&self) -> Option<Point> {
        self.origin.map(|o| o.offset(self.delta.0, self.delta.1))
    }
}

#[derive(Debug, Default)]
pub struct DragEngine {
    active: Option<ActiveDrag>,
    guides: Vec<AlignmentGuide>,
    snap_target: Option<TableId>,
}

impl DragEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.active.as_ref().is_some_and(|d| d.activated)
    }

    pub fn phase(&self) -> DragPhase {
        match &self.active {
            None => DragPhase::Idle,
            Some(d) if d.activated => DragPhase::Moving,
            Some(_) => DragPhase::Pending,
        }
    }

    pub fn payload(&self) -> Option<&DragPayload> {
        self.active.as_ref().map(|d| &d.payload)
    }

    /// Guides to render for the current table drag
    pub fn guides(&self) -> &[AlignmentGuide] {
        &self.guides
    }

    /// Table a dragged guest would be seated at if released now
    pub fn snap_target(&self) -> Option<&TableId> {
        self.snap_target.as_ref()
    }

    /// Live canvas position of the dragged subject, for rendering
    pub fn preview_position(&self) -> Option<Point> {
        self.active.as_ref().filter(|d| d.activated)?.position()
    }

    /// Pointer-down on a draggable subject.
    ///
    /// Returns false (and stays idle) when the subject is missing or has no
    /// position to drag from.
    pub fn begin(&mut self, plan: &SeatingPlan, payload: DragPayload) -> bool {
        self.clear();

        let origin = match &payload {
            DragPayload::Table { table_id } => match plan.table(table_id) {
                Some(table) => Some(table.position()),
                None => {
                    debug!(table = %table_id, "Drag of unknown table ignored");
                    return false;
                }
            },
            DragPayload::SidebarGuest { guest_id } => {
                if plan.guest(guest_id).is_none() {
                    debug!(guest = %guest_id, "Drag of unknown guest ignored");
                    return false;
                }
                None
            }
            DragPayload::FloatingGuest { guest_id } => {
                match plan.guest(guest_id).and_then(|g| g.floating_position()) {
                    Some(position) => Some(position),
                    None => {
                        debug!(guest = %guest_id, "Floating drag without a position ignored");
                        return false;
                    }
                }
            }
            DragPayload::SeatedGuest { guest_id, anchor } => {
                if plan.guest(guest_id).is_none() {
                    debug!(guest = %guest_id, "Drag of unknown guest ignored");
                    return false;
                }
                Some(*anchor)
            }
        };

        debug!(payload = ?payload, "Drag pressed");
        self.active = Some(ActiveDrag {
            payload,
            origin,
            delta: (0.0, 0.0),
            activated: false,
        });
        true
    }

    /// Pointer-move. `screen_dx`/`screen_dy` are the total movement since the
    /// press, in screen units.
    pub fn update(
        &mut self,
        plan: &SeatingPlan,
        view: &CanvasView,
        settings: &CanvasSettings,
        screen_dx: f64,
        screen_dy: f64,
    ) -> DragPhase {
        let Some(drag) = self.active.as_mut() else {
            return DragPhase::Idle;
        };

        let mut phase = DragPhase::Moving;
        if !drag.activated {
            if screen_dx.hypot(screen_dy) < settings.drag_activation_distance {
                return DragPhase::Pending;
            }
            drag.activated = true;
            phase = DragPhase::Started;
            info!(payload = ?drag.payload, "Drag started");
        }
        drag.delta = view.scale_delta(screen_dx, screen_dy);

        let position = drag.position();
        match (&drag.payload, position) {
            (DragPayload::Table { table_id }, Some(position)) => {
                self.guides = match plan.table(table_id) {
                    Some(table) if settings.show_alignment_guides => find_alignment_guides(
                        table,
                        position.x,
                        position.y,
                        plan.tables.iter().filter(|t| &t.id != table_id),
                        settings.alignment_threshold,
                    ),
                    _ => Vec::new(),
                };
                debug!(table = %table_id, x = position.x, y = position.y, guides = self.guides.len(), "Table drag move");
            }
            (DragPayload::FloatingGuest { guest_id }, Some(position))
            | (DragPayload::SeatedGuest { guest_id, .. }, Some(position)) => {
                self.snap_target = find_nearby_table(position, &plan.tables, settings.guest_snap_threshold)
                    .map(|t| t.id.clone());
                debug!(guest = %guest_id, x = position.x, y = position.y, snap = ?self.snap_target, "Guest drag move");
            }
            _ => {}
        }
        phase
    }

    /// Pointer-up: commit the drag to the plan
    pub fn end(
        &mut self,
        plan: &mut SeatingPlan,
        settings: &CanvasSettings,
        drop: DropTarget,
    ) -> DragOutcome {
        let active = self.active.take();
        self.clear();

        let Some(drag) = active else {
            return DragOutcome::NoOp;
        };
        if !drag.activated {
            debug!(payload = ?drag.payload, "Released before activation, treating as click");
            return DragOutcome::Click(drag.payload);
        }
        let position = drag.position();

        let outcome = match (drag.payload, position) {
            (DragPayload::Table { table_id }, Some(position)) => {
                let x = snap_to_grid(position.x, settings.grid_size, settings.snap_to_grid);
                let y = snap_to_grid(position.y, settings.grid_size, settings.snap_to_grid);
                plan.move_table(&table_id, x, y);
                DragOutcome::TableMoved { table_id, x, y }
            }
            (DragPayload::SidebarGuest { guest_id }, _) => drop_sidebar_guest(plan, guest_id, drop),
            (DragPayload::FloatingGuest { guest_id }, Some(position)) => {
                match find_nearby_table(position, &plan.tables, settings.guest_snap_threshold) {
                    Some(table) => {
                        let table_id = table.id.clone();
                        plan.assign_guest_to_table(&guest_id, Some(&table_id), None);
                        DragOutcome::GuestSeated { guest_id, table_id }
                    }
                    None => {
                        plan.move_guest_on_canvas(&guest_id, position.x, position.y);
                        DragOutcome::GuestFloated { guest_id, x: position.x, y: position.y }
                    }
                }
            }
            (DragPayload::SeatedGuest { guest_id, .. }, Some(position)) => {
                match find_nearby_table(position, &plan.tables, settings.guest_snap_threshold) {
                    Some(table) => {
                        let table_id = table.id.clone();
                        plan.assign_guest_to_table(&guest_id, Some(&table_id), None);
                        DragOutcome::GuestSeated { guest_id, table_id }
                    }
                    None => {
                        plan.detach_guest_from_table(&guest_id, position.x, position.y);
                        DragOutcome::GuestDetached { guest_id, x: position.x, y: position.y }
                    }
                }
            }
            _ => DragOutcome::NoOp,
        };
        info!(outcome = ?outcome, "Drag ended");
        outcome
    }

    /// Pointer-cancel: forget the drag without touching the plan
    pub fn cancel(&mut self) -> DragOutcome {
        let was_active = self.active.is_some();
        self.active = None;
        self.clear();
        if was_active {
            debug!("Drag cancelled");
            DragOutcome::Cancelled
        } else {
            DragOutcome::NoOp
        }
    }

    fn clear(&mut self) {
        self.guides.clear();
        self.snap_target = None;
    }
}

/// Drop of a list guest: onto a table seats it, onto empty canvas floats it at
/// its existing coordinates or the next slot of the default stack
fn drop_sidebar_guest(plan: &mut SeatingPlan, guest_id: GuestId, drop: DropTarget) -> DragOutcome {
    match drop {
        DropTarget::Table(table_id) => {
            if plan.table(&table_id).is_none() {
                return DragOutcome::NoOp;
            }
            plan.assign_guest_to_table(&guest_id, Some(&table_id), None);
            DragOutcome::GuestSeated { guest_id, table_id }
        }
        DropTarget::Canvas => {
            let existing = plan.guest(&guest_id).and_then(|g| g.floating_position());
            let position = existing.unwrap_or_else(|| default_stack_position(plan, &guest_id));
            // Floating replaces any table reference
            plan.move_guest_on_canvas(&guest_id, position.x, position.y);
            DragOutcome::GuestFloated { guest_id, x: position.x, y: position.y }
        }
        DropTarget::Nothing => DragOutcome::NoOp,
    }
}

/// Default spot for a list guest dropped on empty canvas: one row down the
/// stack for every other guest still without a table
pub fn default_stack_position(plan: &SeatingPlan, guest_id: &GuestId) -> Point {
    let unassigned = plan
        .unassigned_guests()
        .filter(|g| &g.id != guest_id)
        .count();
    Point::new(STACK_X, STACK_START_Y + STACK_ROW_HEIGHT * unassigned as f64)
}
