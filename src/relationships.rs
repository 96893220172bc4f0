//! Relationship graph editing
//!
//! Edges live on the source guest (`Guest::relationships`) and are directed.
//! The matrix editor can mirror an edit onto the reverse edge; with mirroring
//! off the two directions are independent and may disagree.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::model::{Relationship, RelationshipKind, SeatingPlan};
use crate::types::GuestId;

/// One cell of the rendered matrix
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatrixCell {
    pub target: GuestId,
    pub relationship: Option<Relationship>,
}

/// One row of the rendered matrix (edges leaving `guest`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatrixRow {
    pub guest: GuestId,
    pub name: String,
    pub cells: Vec<MatrixCell>,
}

/// Editor over the relationship edges of a plan
pub struct RelationshipMatrix<'a> {
    plan: &'a mut SeatingPlan,
}

impl<'a> RelationshipMatrix<'a> {
    pub fn new(plan: &'a mut SeatingPlan) -> Self {
        Self { plan }
    }

    /// Set the edge `from -> to` with the kind's canonical strength
    pub fn set(&mut self, from: &GuestId, to: &GuestId, kind: RelationshipKind, bidirectional: bool) {
        self.set_with_strength(from, to, kind, kind.default_strength(), bidirectional);
    }

    /// Set the edge `from -> to` with an explicit strength (clamped to 1..=5)
    pub fn set_with_strength(
        &mut self,
        from: &GuestId,
        to: &GuestId,
        kind: RelationshipKind,
        strength: u8,
        bidirectional: bool,
    ) {
        if from == to {
            debug!(guest = %from, "Ignoring self relationship");
            return;
        }
        if self.plan.guest(from).is_none() || self.plan.guest(to).is_none() {
            warn!(from = %from, to = %to, "Relationship between unknown guests ignored");
            return;
        }
        let strength = strength.clamp(1, 5);

        self.upsert(from, to, kind, strength);
        if bidirectional {
            self.upsert(to, from, kind, strength);
        }
        info!(from = %from, to = %to, kind = %kind, strength = strength, bidirectional = bidirectional, "Set relationship");
    }

    /// Remove the edge `from -> to` (and `to -> from` when bidirectional)
    pub fn clear(&mut self, from: &GuestId, to: &GuestId, bidirectional: bool) {
        self.remove(from, to);
        if bidirectional {
            self.remove(to, from);
        }
        info!(from = %from, to = %to, bidirectional = bidirectional, "Cleared relationship");
    }

    pub fn get(&self, from: &GuestId, to: &GuestId) -> Option<&Relationship> {
        self.plan.guest(from)?.relationship_to(to)
    }

    pub fn rows(&self) -> Vec<MatrixRow> {
        matrix_rows(&self.plan)
    }

    fn upsert(&mut self, from: &GuestId, to: &GuestId, kind: RelationshipKind, strength: u8) {
        let Some(guest) = self.plan.guest_mut(from) else {
            return;
        };
        match guest.relationships.iter_mut().find(|r| &r.target == to) {
            Some(edge) => {
                edge.kind = kind;
                edge.strength = strength;
            }
            None => guest.relationships.push(Relationship {
                target: to.clone(),
                kind,
                strength,
            }),
        }
    }

    fn remove(&mut self, from: &GuestId, to: &GuestId) {
        if let Some(guest) = self.plan.guest_mut(from) {
            guest.relationships.retain(|r| &r.target != to);
        }
    }
}

/// Full guest-by-guest matrix in guest order; the diagonal is always empty
pub fn matrix_rows(plan: &SeatingPlan) -> Vec<MatrixRow> {
    plan.guests
        .iter()
        .map(|guest| MatrixRow {
            guest: guest.id.clone(),
            name: guest.full_name(),
            cells: plan
                .guests
                .iter()
                .map(|target| MatrixCell {
                    target: target.id.clone(),
                    relationship: guest.relationship_to(&target.id).cloned(),
                })
                .collect(),
        })
        .collect()
}
