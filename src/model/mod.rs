//! Placement model: tables, guests, constraints and venue fixtures
//!
//! A guest's placement is a single tagged value (`Placement`), so a guest can
//! never be both seated and floating.

mod constraint;
mod guest;
mod plan;
mod table;
mod venue;

pub use constraint::{Constraint, ConstraintKind, ConstraintPriority};
pub use guest::{Guest, Placement, Relationship, RelationshipKind, RsvpStatus};
pub use plan::{IdCounters, SeatingPlan};
pub use table::{ShapeDefaults, Table, TableShape};
pub use venue::{VenueElement, VenueElementKind};
