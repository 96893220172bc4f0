//! The seating plan: one event's tables, guests, constraints and fixtures,
//! plus every mutation the canvas is allowed to make on them.
//!
//! Ids handed to mutations are expected to exist. Unknown ids are logged and
//! ignored so a stale UI reference can never corrupt the plan.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::model::{
    Constraint, ConstraintKind, ConstraintPriority, Guest, Placement, RsvpStatus, Table,
    TableShape, VenueElement, VenueElementKind,
};
use crate::types::{ConstraintId, GuestId, Point, TableId, VenueElementId};

/// Monotonic counters so removed ids and table numbers are never reused
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdCounters {
    #[serde(default)]
    pub table: u64,
    #[serde(default)]
    pub guest: u64,
    #[serde(default)]
    pub constraint: u64,
    #[serde(default)]
    pub venue_element: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeatingPlan {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tables: Vec<Table>,
    #[serde(default)]
    pub guests: Vec<Guest>,
    #[serde(default)]
    pub constraints: Vec<Constraint>,
    #[serde(default)]
    pub venue_elements: Vec<VenueElement>,
    #[serde(default)]
    pub counters: IdCounters,
}

impl SeatingPlan {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Raise each id counter to at least the highest `prefix-N` id in use,
    /// for plans loaded without (or with stale) counters
    pub fn reconcile_counters(&mut self) {
        fn highest<'a>(ids: impl Iterator<Item = &'a str>, prefix: &str) -> u64 {
            ids.filter_map(|id| id.strip_prefix(prefix)?.parse::<u64>().ok())
                .max()
                .unwrap_or(0)
        }

        let table = highest(self.tables.iter().map(|t| t.id.as_str()), "table-");
        let guest = highest(self.guests.iter().map(|g| g.id.as_str()), "guest-");
        let constraint = highest(self.constraints.iter().map(|c| c.id.as_str()), "constraint-");
        let venue_element = highest(self.venue_elements.iter().map(|v| v.id.as_str()), "element-");

        let before = self.counters.clone();
        self.counters.table = self.counters.table.max(table);
        self.counters.guest = self.counters.guest.max(guest);
        self.counters.constraint = self.counters.constraint.max(constraint);
        self.counters.venue_element = self.counters.venue_element.max(venue_element);
        if self.counters != before {
            warn!(before = ?before, after = ?self.counters, "Id counters behind existing ids, raised");
        }
    }

    // ---------------------------------------------------------------------
    // Lookups
    // ---------------------------------------------------------------------

    pub fn table(&self, id: &TableId) -> Option<&Table> {
        self.tables.iter().find(|t| &t.id == id)
    }

    fn table_mut(&mut self, id: &TableId) -> Option<&mut Table> {
        self.tables.iter_mut().find(|t| &t.id == id)
    }

    pub fn guest(&self, id: &GuestId) -> Option<&Guest> {
        self.guests.iter().find(|g| &g.id == id)
    }

    pub(crate) fn guest_mut(&mut self, id: &GuestId) -> Option<&mut Guest> {
        self.guests.iter_mut().find(|g| &g.id == id)
    }

    pub fn venue_element(&self, id: &VenueElementId) -> Option<&VenueElement> {
        self.venue_elements.iter().find(|v| &v.id == id)
    }

    /// Guests seated at `table_id`, in guest order
    pub fn guests_at<'a>(&'a self, table_id: &'a TableId) -> impl Iterator<Item = &'a Guest> + 'a {
        self.guests
            .iter()
            .filter(move |g| g.table_id() == Some(table_id))
    }

    pub fn occupancy(&self, table_id: &TableId) -> usize {
        self.guests_at(table_id).count()
    }

    pub fn is_over_capacity(&self, table_id: &TableId) -> bool {
        self.table(table_id)
            .is_some_and(|t| self.occupancy(table_id) > t.capacity as usize)
    }

    /// Guests without a table, floating or not
    pub fn unassigned_guests(&self) -> impl Iterator<Item = &Guest> {
        self.guests.iter().filter(|g| !g.is_seated())
    }

    /// Where a guest is drawn: its table's seat if seated, its own coordinates
    /// if floating, nothing if unplaced.
    pub fn guest_anchor(&self, guest_id: &GuestId) -> Option<Point> {
        let guest = self.guest(guest_id)?;
        match &guest.placement {
            Placement::Seated { table_id, seat_index } => {
                self.table(table_id).map(|t| t.seat_anchor(*seat_index))
            }
            Placement::Floating { x, y } => Some(Point::new(*x, *y)),
            Placement::Unplaced => None,
        }
    }

    // ---------------------------------------------------------------------
    // Tables
    // ---------------------------------------------------------------------

    /// Place a new table at (x, y) with the shape's default size and seats
    pub fn add_table(&mut self, shape: TableShape, x: f64, y: f64) -> TableId {
        self.counters.table += 1;
        let number = self.counters.table;
        let id = TableId::new(format!("table-{number}"));
        let defaults = shape.defaults();

        self.tables.push(Table {
            id: id.clone(),
            name: format!("Table {number}"),
            shape,
            x,
            y,
            width: defaults.width,
            height: defaults.height,
            capacity: defaults.capacity,
        });
        info!(table = %id, shape = %shape, x = x, y = y, "Added table");
        id
    }

    /// Unconditional move; tables may sit outside the visible viewport
    pub fn move_table(&mut self, id: &TableId, x: f64, y: f64) {
        match self.table_mut(id) {
            Some(table) => {
                table.x = x;
                table.y = y;
                info!(table = %id, x = x, y = y, "Moved table");
            }
            None => warn!(table = %id, "move_table on unknown table ignored"),
        }
    }

    pub fn update_table(&mut self, id: &TableId, name: Option<String>, capacity: Option<u32>) {
        let Some(table) = self.table_mut(id) else {
            warn!(table = %id, "update_table on unknown table ignored");
            return;
        };
        if let Some(name) = name {
            table.name = name;
        }
        if let Some(capacity) = capacity {
            table.capacity = capacity;
        }
        info!(table = %id, name = %table.name, capacity = table.capacity, "Updated table");
    }

    /// Resize a table; non-positive dimensions are rejected
    pub fn resize_table(&mut self, id: &TableId, width: f64, height: f64) {
        if !(width > 0.0 && height > 0.0) {
            warn!(table = %id, width = width, height = height, "Ignoring non-positive table size");
            return;
        }
        match self.table_mut(id) {
            Some(table) => {
                table.width = width;
                table.height = height;
                info!(table = %id, width = width, height = height, "Resized table");
            }
            None => warn!(table = %id, "resize_table on unknown table ignored"),
        }
    }

    /// Delete a table. Guests seated there become unplaced, not deleted.
    pub fn remove_table(&mut self, id: &TableId) -> Option<Table> {
        let index = self.tables.iter().position(|t| &t.id == id)?;
        let table = self.tables.remove(index);

        let mut unseated = 0;
        for guest in self.guests.iter_mut() {
            if guest.table_id() == Some(id) {
                guest.placement = Placement::Unplaced;
                unseated += 1;
            }
        }
        info!(table = %id, unseated = unseated, "Removed table");
        Some(table)
    }

    // ---------------------------------------------------------------------
    // Guests
    // ---------------------------------------------------------------------

    pub fn add_guest(&mut self, first_name: &str, last_name: &str) -> GuestId {
        self.counters.guest += 1;
        let id = GuestId::new(format!("guest-{}", self.counters.guest));
        self.guests.push(Guest::new(id.clone(), first_name, last_name));
        info!(guest = %id, first_name = %first_name, last_name = %last_name, "Added guest");
        id
    }

    /// Delete a guest and every relationship edge pointing at it
    pub fn remove_guest(&mut self, id: &GuestId) -> Option<Guest> {
        let index = self.guests.iter().position(|g| &g.id == id)?;
        let guest = self.guests.remove(index);

        let mut edges = 0;
        for other in self.guests.iter_mut() {
            let before = other.relationships.len();
            other.relationships.retain(|r| &r.target != id);
            edges += before - other.relationships.len();
        }
        info!(guest = %id, removed_edges = edges, "Removed guest");
        Some(guest)
    }

    pub fn set_rsvp(&mut self, id: &GuestId, status: RsvpStatus) {
        match self.guest_mut(id) {
            Some(guest) => guest.rsvp = status,
            None => warn!(guest = %id, "set_rsvp on unknown guest ignored"),
        }
    }

    pub fn set_group(&mut self, id: &GuestId, group: Option<String>) {
        match self.guest_mut(id) {
            Some(guest) => guest.group = group.filter(|g| !g.trim().is_empty()),
            None => warn!(guest = %id, "set_group on unknown guest ignored"),
        }
    }

    /// Seat a guest, dropping any floating coordinates.
    ///
    /// `None` for the table detaches without giving the guest a position; it
    /// stays unplaced until a canvas move or detach places it.
    pub fn assign_guest_to_table(
        &mut self,
        guest_id: &GuestId,
        table_id: Option<&TableId>,
        seat_index: Option<u32>,
    ) {
        if let Some(table_id) = table_id
            && self.table(table_id).is_none()
        {
            warn!(guest = %guest_id, table = %table_id, "Assignment to unknown table ignored");
            return;
        }
        let Some(guest) = self.guest_mut(guest_id) else {
            warn!(guest = %guest_id, "Assignment of unknown guest ignored");
            return;
        };

        guest.placement = match table_id {
            Some(table_id) => Placement::Seated {
                table_id: table_id.clone(),
                seat_index,
            },
            None => Placement::Unplaced,
        };
        match table_id {
            Some(table_id) => info!(guest = %guest_id, table = %table_id, seat = ?seat_index, "Seated guest"),
            None => info!(guest = %guest_id, "Cleared guest table assignment"),
        }
    }

    /// Float a guest at (x, y)
    pub fn move_guest_on_canvas(&mut self, guest_id: &GuestId, x: f64, y: f64) {
        let Some(guest) = self.guest_mut(guest_id) else {
            warn!(guest = %guest_id, "move_guest_on_canvas on unknown guest ignored");
            return;
        };
        if guest.is_seated() {
            debug!(guest = %guest_id, "Canvas move replaces table assignment");
        }
        guest.placement = Placement::Floating { x, y };
        info!(guest = %guest_id, x = x, y = y, "Moved guest on canvas");
    }

    /// Take a guest off its table and float it at (x, y) in one step
    pub fn detach_guest_from_table(&mut self, guest_id: &GuestId, x: f64, y: f64) {
        let Some(guest) = self.guest_mut(guest_id) else {
            warn!(guest = %guest_id, "detach on unknown guest ignored");
            return;
        };
        let previous = guest.table_id().cloned();
        guest.placement = Placement::Floating { x, y };
        info!(guest = %guest_id, from = ?previous, x = x, y = y, "Detached guest from table");
    }

    // ---------------------------------------------------------------------
    // Constraints
    // ---------------------------------------------------------------------

    /// Declare a constraint. Duplicate guest ids are collapsed; an empty guest
    /// list is rejected.
    pub fn add_constraint(
        &mut self,
        kind: ConstraintKind,
        priority: ConstraintPriority,
        guest_ids: Vec<GuestId>,
        description: Option<String>,
    ) -> Option<ConstraintId> {
        let mut unique: Vec<GuestId> = Vec::with_capacity(guest_ids.len());
        for id in guest_ids {
            if !unique.contains(&id) {
                unique.push(id);
            }
        }
        if unique.is_empty() {
            warn!(kind = %kind, "Constraint without guests ignored");
            return None;
        }

        self.counters.constraint += 1;
        let id = ConstraintId::new(format!("constraint-{}", self.counters.constraint));
        info!(constraint = %id, kind = %kind, guests = unique.len(), "Added constraint");
        self.constraints.push(Constraint {
            id: id.clone(),
            kind,
            priority,
            guest_ids: unique,
            description: description.filter(|d| !d.trim().is_empty()),
        });
        Some(id)
    }

    pub fn remove_constraint(&mut self, id: &ConstraintId) -> Option<Constraint> {
        let index = self.constraints.iter().position(|c| &c.id == id)?;
        info!(constraint = %id, "Removed constraint");
        Some(self.constraints.remove(index))
    }

    // ---------------------------------------------------------------------
    // Venue elements
    // ---------------------------------------------------------------------

    pub fn add_venue_element(&mut self, kind: VenueElementKind, x: f64, y: f64) -> VenueElementId {
        self.counters.venue_element += 1;
        let id = VenueElementId::new(format!("element-{}", self.counters.venue_element));
        let (width, height) = kind.default_size();
        self.venue_elements.push(VenueElement {
            id: id.clone(),
            kind,
            label: String::new(),
            x,
            y,
            width,
            height,
        });
        info!(element = %id, kind = ?kind, "Added venue element");
        id
    }

    pub fn move_venue_element(&mut self, id: &VenueElementId, x: f64, y: f64) {
        match self.venue_elements.iter_mut().find(|v| &v.id == id) {
            Some(element) => {
                element.x = x;
                element.y = y;
            }
            None => warn!(element = %id, "move_venue_element on unknown element ignored"),
        }
    }

    pub fn remove_venue_element(&mut self, id: &VenueElementId) -> Option<VenueElement> {
        let index = self.venue_elements.iter().position(|v| &v.id == id)?;
        Some(self.venue_elements.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RelationshipKind;
    use crate::relationships::RelationshipMatrix;
    use proptest::prelude::*;

    fn placement_is_exclusive(guest: &Guest) -> bool {
        // The enum makes a double placement unrepresentable; check the
        // accessors agree with that.
        !(guest.table_id().is_some() && guest.floating_position().is_some())
    }

    #[test]
    fn test_add_table_uses_shape_defaults_and_numbering() {
        let mut plan = SeatingPlan::new("Wedding");
        let a = plan.add_table(TableShape::Round, 10.0, 20.0);
        let b = plan.add_table(TableShape::Rectangle, 0.0, 0.0);

        let ta = plan.table(&a).unwrap();
        assert_eq!(ta.name, "Table 1");
        assert_eq!((ta.width, ta.height, ta.capacity), (120.0, 120.0, 8));
        assert_eq!(ta.position(), Point::new(10.0, 20.0));

        let tb = plan.table(&b).unwrap();
        assert_eq!(tb.name, "Table 2");
        assert_eq!((tb.width, tb.height, tb.capacity), (200.0, 80.0, 10));
    }

    #[test]
    fn test_table_numbers_not_reused_after_removal() {
        let mut plan = SeatingPlan::default();
        let a = plan.add_table(TableShape::Round, 0.0, 0.0);
        plan.remove_table(&a);
        let b = plan.add_table(TableShape::Round, 0.0, 0.0);
        assert_ne!(a, b);
        assert_eq!(plan.table(&b).unwrap().name, "Table 2");
    }

    #[test]
    fn test_move_table_allows_negative_coordinates() {
        let mut plan = SeatingPlan::default();
        let t = plan.add_table(TableShape::Square, 0.0, 0.0);
        plan.move_table(&t, -5000.0, 12000.0);
        assert_eq!(plan.table(&t).unwrap().position(), Point::new(-5000.0, 12000.0));
    }

    #[test]
    fn test_remove_table_unseats_guests_without_deleting_them() {
        let mut plan = SeatingPlan::default();
        let t = plan.add_table(TableShape::Round, 0.0, 0.0);
        let other = plan.add_table(TableShape::Round, 500.0, 0.0);
        let guests: Vec<GuestId> = ["A", "B", "C"]
            .iter()
            .map(|n| plan.add_guest(n, "Guest"))
            .collect();
        for (i, g) in guests.iter().enumerate() {
            plan.assign_guest_to_table(g, Some(&t), Some(i as u32));
        }
        let bystander = plan.add_guest("D", "Guest");
        plan.assign_guest_to_table(&bystander, Some(&other), None);

        let removed = plan.remove_table(&t);
        assert!(removed.is_some());
        assert_eq!(plan.guests.len(), 4);
        for g in &guests {
            let guest = plan.guest(g).unwrap();
            assert_eq!(guest.placement, Placement::Unplaced);
            assert_eq!(guest.seat_index(), None);
        }
        assert_eq!(plan.guest(&bystander).unwrap().table_id(), Some(&other));
    }

    #[test]
    fn test_remove_unknown_table_is_noop() {
        let mut plan = SeatingPlan::default();
        plan.add_table(TableShape::Round, 0.0, 0.0);
        assert!(plan.remove_table(&TableId::new("nope")).is_none());
        assert_eq!(plan.tables.len(), 1);
    }

    #[test]
    fn test_remove_guest_cascades_relationship_edges() {
        let mut plan = SeatingPlan::default();
        let a = plan.add_guest("Ann", "A");
        let b = plan.add_guest("Bob", "B");
        let c = plan.add_guest("Cid", "C");
        let mut matrix = RelationshipMatrix::new(&mut plan);
        matrix.set(&a, &b, RelationshipKind::Friend, true);
        matrix.set(&c, &b, RelationshipKind::Avoid, false);
        matrix.set(&c, &a, RelationshipKind::Family, false);

        plan.remove_guest(&b);
        assert!(plan.guest(&b).is_none());
        assert!(plan.guest(&a).unwrap().relationships.is_empty());
        let c_edges = &plan.guest(&c).unwrap().relationships;
        assert_eq!(c_edges.len(), 1);
        assert_eq!(c_edges[0].target, a);
    }

    #[test]
    fn test_assign_clears_floating_position() {
        let mut plan = SeatingPlan::default();
        let t = plan.add_table(TableShape::Round, 0.0, 0.0);
        let g = plan.add_guest("Ann", "A");
        plan.move_guest_on_canvas(&g, 300.0, 300.0);
        plan.assign_guest_to_table(&g, Some(&t), Some(1));

        let guest = plan.guest(&g).unwrap();
        assert_eq!(guest.table_id(), Some(&t));
        assert_eq!(guest.seat_index(), Some(1));
        assert!(guest.floating_position().is_none());
    }

    #[test]
    fn test_assign_to_none_leaves_guest_unplaced() {
        let mut plan = SeatingPlan::default();
        let t = plan.add_table(TableShape::Round, 0.0, 0.0);
        let g = plan.add_guest("Ann", "A");
        plan.assign_guest_to_table(&g, Some(&t), None);
        plan.assign_guest_to_table(&g, None, None);

        let guest = plan.guest(&g).unwrap();
        assert_eq!(guest.placement, Placement::Unplaced);
        assert!(plan.guest_anchor(&g).is_none());
    }

    #[test]
    fn test_assign_to_unknown_table_is_ignored() {
        let mut plan = SeatingPlan::default();
        let g = plan.add_guest("Ann", "A");
        plan.move_guest_on_canvas(&g, 5.0, 5.0);
        plan.assign_guest_to_table(&g, Some(&TableId::new("ghost")), None);
        assert_eq!(plan.guest(&g).unwrap().floating_position(), Some(Point::new(5.0, 5.0)));
    }

    #[test]
    fn test_detach_moves_seated_guest_to_floating() {
        let mut plan = SeatingPlan::default();
        let t = plan.add_table(TableShape::Round, 0.0, 0.0);
        let g = plan.add_guest("Ann", "A");
        plan.assign_guest_to_table(&g, Some(&t), Some(3));
        plan.detach_guest_from_table(&g, 400.0, 90.0);

        let guest = plan.guest(&g).unwrap();
        assert!(guest.table_id().is_none());
        assert_eq!(guest.seat_index(), None);
        assert_eq!(guest.floating_position(), Some(Point::new(400.0, 90.0)));
    }

    #[test]
    fn test_occupancy_and_capacity() {
        let mut plan = SeatingPlan::default();
        let t = plan.add_table(TableShape::HalfRound, 0.0, 0.0);
        for i in 0..5 {
            let g = plan.add_guest(&format!("G{i}"), "");
            plan.assign_guest_to_table(&g, Some(&t), None);
        }
        assert_eq!(plan.occupancy(&t), 5);
        assert!(plan.is_over_capacity(&t));
        assert_eq!(plan.unassigned_guests().count(), 0);
    }

    #[test]
    fn test_add_constraint_dedups_and_rejects_empty() {
        let mut plan = SeatingPlan::default();
        let a = plan.add_guest("Ann", "A");
        let id = plan
            .add_constraint(
                ConstraintKind::MustSitTogether,
                ConstraintPriority::Required,
                vec![a.clone(), a.clone()],
                Some("  ".to_string()),
            )
            .unwrap();
        let constraint = plan.constraints.iter().find(|c| c.id == id).unwrap();
        assert_eq!(constraint.guest_ids, vec![a]);
        assert_eq!(constraint.description, None);

        assert!(plan
            .add_constraint(ConstraintKind::MustNotSitTogether, ConstraintPriority::Preferred, vec![], None)
            .is_none());
    }

    #[test]
    fn test_reconcile_counters_avoids_id_reuse() {
        let json = r#"{
            "name": "Hand written",
            "tables": [{"id": "table-4", "name": "Head", "shape": "round",
                        "x": 0, "y": 0, "width": 120, "height": 120, "capacity": 8}],
            "guests": [{"id": "guest-2", "first_name": "Ada"},
                       {"id": "vip", "first_name": "Grace"}]
        }"#;
        let mut plan: SeatingPlan = serde_json::from_str(json).unwrap();
        assert_eq!(plan.counters, IdCounters::default());

        plan.reconcile_counters();
        assert_eq!(plan.add_table(TableShape::Square, 0.0, 0.0), TableId::new("table-5"));
        assert_eq!(plan.add_guest("Bob", "B"), GuestId::new("guest-3"));
        let ids: Vec<&TableId> = plan.tables.iter().map(|t| &t.id).collect();
        assert_eq!(ids.len(), 2);
        assert_ne!(ids[0], ids[1]);
    }

    #[test]
    fn test_reconcile_counters_never_lowers() {
        let mut plan = SeatingPlan::default();
        let t = plan.add_table(TableShape::Round, 0.0, 0.0);
        plan.add_table(TableShape::Round, 0.0, 0.0);
        plan.remove_table(&t);
        plan.reconcile_counters();
        assert_eq!(plan.counters.table, 2);
    }

    #[test]
    fn test_resize_rejects_non_positive() {
        let mut plan = SeatingPlan::default();
        let t = plan.add_table(TableShape::Round, 0.0, 0.0);
        plan.resize_table(&t, 0.0, 50.0);
        assert_eq!(plan.table(&t).unwrap().width, 120.0);
        plan.resize_table(&t, 150.0, 150.0);
        assert_eq!(plan.table(&t).unwrap().width, 150.0);
    }

    #[derive(Debug, Clone)]
    enum Op {
        AddTable,
        RemoveTable(usize),
        Assign(usize, Option<usize>),
        Move(usize, f64, f64),
        Detach(usize, f64, f64),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            Just(Op::AddTable),
            (0usize..4).prop_map(Op::RemoveTable),
            (0usize..6, proptest::option::of(0usize..4)).prop_map(|(g, t)| Op::Assign(g, t)),
            (0usize..6, -500.0f64..500.0, -500.0f64..500.0).prop_map(|(g, x, y)| Op::Move(g, x, y)),
            (0usize..6, -500.0f64..500.0, -500.0f64..500.0).prop_map(|(g, x, y)| Op::Detach(g, x, y)),
        ]
    }

    proptest! {
        #[test]
        fn placement_stays_exclusive_and_references_valid(ops in prop::collection::vec(op_strategy(), 1..60)) {
            let mut plan = SeatingPlan::default();
            let guests: Vec<GuestId> = (0..6).map(|i| plan.add_guest(&format!("G{i}"), "")).collect();
            plan.add_table(TableShape::Round, 0.0, 0.0);

            for op in ops {
                let table_at = |plan: &SeatingPlan, i: usize| plan.tables.get(i).map(|t| t.id.clone());
                match op {
                    Op::AddTable => { plan.add_table(TableShape::Rectangle, 100.0, 100.0); }
                    Op::RemoveTable(i) => {
                        if let Some(id) = table_at(&plan, i) { plan.remove_table(&id); }
                    }
                    Op::Assign(g, t) => {
                        let table = t.and_then(|i| table_at(&plan, i));
                        plan.assign_guest_to_table(&guests[g], table.as_ref(), None);
                    }
                    Op::Move(g, x, y) => plan.move_guest_on_canvas(&guests[g], x, y),
                    Op::Detach(g, x, y) => plan.detach_guest_from_table(&guests[g], x, y),
                }
            }

            for guest in &plan.guests {
                prop_assert!(placement_is_exclusive(guest));
                if let Some(table_id) = guest.table_id() {
                    prop_assert!(plan.table(table_id).is_some());
                }
            }
        }
    }
}
