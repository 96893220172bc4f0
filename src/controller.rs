//! Single owner of the seating plan and the interactive state around it
//!
//! Every mutation goes through [`PlanController`], which records one undo step
//! per user action. A drag counts as one action: the checkpoint is taken when
//! the press turns into a real drag and discarded if nothing gets committed.

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::canvas::{
    CanvasView, DragEngine, DragOutcome, DragPayload, DragPhase, DropTarget, History, Selection,
};
use crate::config::CanvasSettings;
use crate::model::{
    ConstraintKind, ConstraintPriority, RelationshipKind, RsvpStatus, SeatingPlan, TableShape,
    VenueElementKind,
};
use crate::persistence::PlanStore;
use crate::relationships::RelationshipMatrix;
use crate::search::{self, SearchResult, SearchTarget};
use crate::types::{ConstraintId, GuestId, TableId, VenueElementId};
use crate::violations::{self, ConstraintViolation};

/// Result of running a seating optimizer over the plan
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationOutcome {
    /// New table for each listed guest; `None` unseats the guest
    pub assignments: Vec<(GuestId, Option<TableId>)>,
    pub score: f64,
}

/// Pluggable arrangement strategy. The controller only applies what it returns.
pub trait SeatingOptimizer {
    fn optimize(&self, plan: &SeatingPlan) -> OptimizationOutcome;
}

pub struct PlanController<S: PlanStore> {
    plan: SeatingPlan,
    settings: CanvasSettings,
    view: CanvasView,
    history: History,
    drag: DragEngine,
    drag_checkpointed: bool,
    store: S,
}

impl<S: PlanStore> PlanController<S> {
    /// Load the plan from `store`
    pub fn new(settings: CanvasSettings, store: S) -> Result<Self> {
        let plan = store.load()?;
        Ok(Self::with_plan(settings, store, plan))
    }

    pub fn with_plan(settings: CanvasSettings, store: S, mut plan: SeatingPlan) -> Self {
        plan.reconcile_counters();
        let history = History::new(settings.history_limit);
        Self {
            plan,
            settings,
            view: CanvasView::default(),
            history,
            drag: DragEngine::new(),
            drag_checkpointed: false,
            store,
        }
    }

    pub fn plan(&self) -> &SeatingPlan {
        &self.plan
    }

    pub fn settings(&self) -> &CanvasSettings {
        &self.settings
    }

    pub fn view(&self) -> &CanvasView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut CanvasView {
        &mut self.view
    }

    pub fn drag(&self) -> &DragEngine {
        &self.drag
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Apply `f` as one undoable step. Steps that leave the plan unchanged are
    /// not recorded.
    fn mutate<R>(&mut self, f: impl FnOnce(&mut SeatingPlan) -> R) -> R {
        self.history.checkpoint(&self.plan);
        let result = f(&mut self.plan);
        if self.history.last_checkpoint() == Some(&self.plan) {
            debug!("Mutation left plan unchanged, dropping checkpoint");
            self.history.discard_checkpoint();
        }
        result
    }

    // ---------------------------------------------------------------------
    // Tables
    // ---------------------------------------------------------------------

    pub fn add_table(&mut self, shape: TableShape, x: f64, y: f64) -> TableId {
        self.mutate(|plan| plan.add_table(shape, x, y))
    }

    pub fn move_table(&mut self, id: &TableId, x: f64, y: f64) {
        self.mutate(|plan| plan.move_table(id, x, y));
    }

    pub fn update_table(&mut self, id: &TableId, name: Option<String>, capacity: Option<u32>) {
        self.mutate(|plan| plan.update_table(id, name, capacity));
    }

    pub fn resize_table(&mut self, id: &TableId, width: f64, height: f64) {
        self.mutate(|plan| plan.resize_table(id, width, height));
    }

    pub fn remove_table(&mut self, id: &TableId) -> bool {
        let removed = self.mutate(|plan| plan.remove_table(id)).is_some();
        if removed && self.view.is_selected(&Selection::Table(id.clone())) {
            self.view.clear_selection();
        }
        removed
    }

    // ---------------------------------------------------------------------
    // Guests
    // ---------------------------------------------------------------------

    pub fn add_guest(&mut self, first_name: &str, last_name: &str) -> GuestId {
        self.mutate(|plan| plan.add_guest(first_name, last_name))
    }

    pub fn remove_guest(&mut self, id: &GuestId) -> bool {
        let removed = self.mutate(|plan| plan.remove_guest(id)).is_some();
        if removed && self.view.is_selected(&Selection::Guest(id.clone())) {
            self.view.clear_selection();
        }
        removed
    }

    pub fn set_rsvp(&mut self, id: &GuestId, status: RsvpStatus) {
        self.mutate(|plan| plan.set_rsvp(id, status));
    }

    pub fn set_group(&mut self, id: &GuestId, group: Option<String>) {
        self.mutate(|plan| plan.set_group(id, group));
    }

    pub fn assign_guest_to_table(&mut self, guest_id: &GuestId, table_id: Option<&TableId>, seat_index: Option<u32>) {
        self.mutate(|plan| plan.assign_guest_to_table(guest_id, table_id, seat_index));
    }

    pub fn move_guest_on_canvas(&mut self, guest_id: &GuestId, x: f64, y: f64) {
        self.mutate(|plan| plan.move_guest_on_canvas(guest_id, x, y));
    }

    pub fn detach_guest_from_table(&mut self, guest_id: &GuestId, x: f64, y: f64) {
        self.mutate(|plan| plan.detach_guest_from_table(guest_id, x, y));
    }

    /// Set a relationship, mirrored when `bidirectional_relationships` is on
    pub fn relate(&mut self, from: &GuestId, to: &GuestId, kind: RelationshipKind, strength: Option<u8>) {
        let bidirectional = self.settings.bidirectional_relationships;
        self.mutate(|plan| {
            let mut matrix = RelationshipMatrix::new(plan);
            match strength {
                Some(strength) => matrix.set_with_strength(from, to, kind, strength, bidirectional),
                None => matrix.set(from, to, kind, bidirectional),
            }
        });
    }

    pub fn clear_relationship(&mut self, from: &GuestId, to: &GuestId) {
        let bidirectional = self.settings.bidirectional_relationships;
        self.mutate(|plan| RelationshipMatrix::new(plan).clear(from, to, bidirectional));
    }

    // ---------------------------------------------------------------------
    // Constraints and venue elements
    // ---------------------------------------------------------------------

    pub fn add_constraint(
        &mut self,
        kind: ConstraintKind,
        priority: ConstraintPriority,
        guest_ids: Vec<GuestId>,
        description: Option<String>,
    ) -> Option<ConstraintId> {
        self.mutate(|plan| plan.add_constraint(kind, priority, guest_ids, description))
    }

    pub fn remove_constraint(&mut self, id: &ConstraintId) -> bool {
        self.mutate(|plan| plan.remove_constraint(id)).is_some()
    }

    pub fn add_venue_element(&mut self, kind: VenueElementKind, x: f64, y: f64) -> VenueElementId {
        self.mutate(|plan| plan.add_venue_element(kind, x, y))
    }

    pub fn move_venue_element(&mut self, id: &VenueElementId, x: f64, y: f64) {
        self.mutate(|plan| plan.move_venue_element(id, x, y));
    }

    pub fn remove_venue_element(&mut self, id: &VenueElementId) -> bool {
        let removed = self.mutate(|plan| plan.remove_venue_element(id)).is_some();
        if removed && self.view.is_selected(&Selection::VenueElement(id.clone())) {
            self.view.clear_selection();
        }
        removed
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    pub fn detect_violations(&self) -> Vec<ConstraintViolation> {
        violations::detect_violations(&self.plan.guests, &self.plan.tables, &self.plan.constraints)
    }

    pub fn violations_for_table(&self, table_id: &TableId) -> Vec<ConstraintViolation> {
        violations::violations_for_table(
            &self.plan.guests,
            &self.plan.tables,
            &self.plan.constraints,
            table_id,
        )
    }

    pub fn search(&self, query: &str) -> Vec<SearchResult> {
        search::search(&self.plan, query)
    }

    pub fn select_search_result(&mut self, target: &SearchTarget) {
        search::select_result(&self.plan, &mut self.view, target);
    }

    // ---------------------------------------------------------------------
    // History and storage
    // ---------------------------------------------------------------------

    pub fn undo(&mut self) -> bool {
        if self.drag.phase() != DragPhase::Idle {
            debug!("Undo ignored during drag");
            return false;
        }
        let undone = self.history.undo(&mut self.plan);
        if undone {
            info!("Undo");
        }
        undone
    }

    pub fn redo(&mut self) -> bool {
        if self.drag.phase() != DragPhase::Idle {
            debug!("Redo ignored during drag");
            return false;
        }
        let redone = self.history.redo(&mut self.plan);
        if redone {
            info!("Redo");
        }
        redone
    }

    pub fn save(&mut self) -> Result<()> {
        self.store.save(&self.plan)
    }

    // ---------------------------------------------------------------------
    // Dragging
    // ---------------------------------------------------------------------

    pub fn begin_drag(&mut self, payload: DragPayload) -> bool {
        self.drag_checkpointed = false;
        self.drag.begin(&self.plan, payload)
    }

    /// Total screen movement since the press
    pub fn drag_move(&mut self, screen_dx: f64, screen_dy: f64) -> DragPhase {
        let phase = self
            .drag
            .update(&self.plan, &self.view, &self.settings, screen_dx, screen_dy);
        if phase == DragPhase::Started {
            self.history.checkpoint(&self.plan);
            self.drag_checkpointed = true;
        }
        phase
    }

    /// Commit the drag. A click selects its subject instead.
    pub fn end_drag(&mut self, drop: DropTarget) -> DragOutcome {
        let outcome = self.drag.end(&mut self.plan, &self.settings, drop);
        if self.drag_checkpointed
            && (!outcome.is_commit() || self.history.last_checkpoint() == Some(&self.plan))
        {
            debug!(outcome = ?outcome, "Drag committed no change, dropping checkpoint");
            self.history.discard_checkpoint();
        }
        self.drag_checkpointed = false;

        if let DragOutcome::Click(payload) = &outcome {
            self.view.select(match payload {
                DragPayload::Table { table_id } => Selection::Table(table_id.clone()),
                DragPayload::SidebarGuest { guest_id }
                | DragPayload::FloatingGuest { guest_id }
                | DragPayload::SeatedGuest { guest_id, .. } => Selection::Guest(guest_id.clone()),
            });
        }
        outcome
    }

    pub fn cancel_drag(&mut self) -> DragOutcome {
        if self.drag_checkpointed {
            self.history.discard_checkpoint();
            self.drag_checkpointed = false;
        }
        self.drag.cancel()
    }

    // ---------------------------------------------------------------------
    // Optimizer
    // ---------------------------------------------------------------------

    /// Run `optimizer` and apply its assignments as one undoable step.
    /// Returns the reported score.
    pub fn apply_optimizer(&mut self, optimizer: &dyn SeatingOptimizer) -> f64 {
        let outcome = optimizer.optimize(&self.plan);
        let applied = self.mutate(|plan| {
            let mut applied = 0usize;
            for (guest_id, table_id) in &outcome.assignments {
                if plan.guest(guest_id).is_none() {
                    warn!(guest = %guest_id, "Optimizer assigned unknown guest, skipping");
                    continue;
                }
                if let Some(table_id) = table_id
                    && plan.table(table_id).is_none()
                {
                    warn!(guest = %guest_id, table = %table_id, "Optimizer used unknown table, skipping");
                    continue;
                }
                plan.assign_guest_to_table(guest_id, table_id.as_ref(), None);
                applied += 1;
            }
            applied
        });
        info!(applied = applied, score = outcome.score, "Applied optimizer result");
        outcome.score
    }
}
