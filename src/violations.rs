//! Constraint violation detection
//!
//! `detect_violations` is a pure projection of the current plan. Nothing is
//! cached: callers re-run it whenever they need the current state, and the
//! same input always yields the same output in the same order.

use serde::Serialize;
use tracing::trace;

use crate::model::{Constraint, ConstraintKind, ConstraintPriority, Guest, Table};
use crate::types::{ConstraintId, GuestId, TableId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstraintViolation {
    pub constraint_id: ConstraintId,
    pub constraint_kind: ConstraintKind,
    pub priority: ConstraintPriority,
    pub description: String,
    pub guest_ids: Vec<GuestId>,
    pub table_ids: Vec<TableId>,
}

/// Every violation of `constraints` given the current seating.
///
/// Unknown guest ids are ignored, and constraints with fewer than two known
/// guests cannot be violated. Violations come out in constraint order.
pub fn detect_violations(
    guests: &[Guest],
    _tables: &[Table],
    constraints: &[Constraint],
) -> Vec<ConstraintViolation> {
    let mut violations = Vec::new();

    for constraint in constraints {
        let members: Vec<&Guest> = constraint
            .guest_ids
            .iter()
            .filter_map(|id| guests.iter().find(|g| &g.id == id))
            .collect();
        if members.len() < 2 {
            continue;
        }

        match constraint.kind {
            ConstraintKind::MustSitTogether => {
                if let Some(v) = check_together(constraint, &members) {
                    violations.push(v);
                }
            }
            ConstraintKind::MustNotSitTogether => {
                violations.extend(check_apart(constraint, &members));
            }
            ConstraintKind::NearFront | ConstraintKind::Accessibility => {
                trace!(constraint = %constraint.id, kind = %constraint.kind, "Constraint kind not evaluated");
            }
        }
    }

    violations
}

/// Violations touching `table_id`
pub fn violations_for_table(
    guests: &[Guest],
    tables: &[Table],
    constraints: &[Constraint],
    table_id: &TableId,
) -> Vec<ConstraintViolation> {
    detect_violations(guests, tables, constraints)
        .into_iter()
        .filter(|v| v.table_ids.contains(table_id))
        .collect()
}

fn check_together(constraint: &Constraint, members: &[&Guest]) -> Option<ConstraintViolation> {
    let tables = distinct_tables(members.iter().filter_map(|g| g.table_id()));
    if tables.len() <= 1 {
        return None;
    }

    Some(ConstraintViolation {
        constraint_id: constraint.id.clone(),
        constraint_kind: constraint.kind,
        priority: constraint.priority,
        description: describe(constraint, members, ", ", "should be seated together"),
        // Every constrained guest is listed, seated or not
        guest_ids: members.iter().map(|g| g.id.clone()).collect(),
        table_ids: tables,
    })
}

fn check_apart(constraint: &Constraint, members: &[&Guest]) -> Vec<ConstraintViolation> {
    let seated = members.iter().filter_map(|g| g.table_id());
    let tables = distinct_tables(seated);

    tables
        .into_iter()
        .filter_map(|table_id| {
            let colocated: Vec<&Guest> = members
                .iter()
                .copied()
                .filter(|g| g.table_id() == Some(&table_id))
                .collect();
            if colocated.len() < 2 {
                return None;
            }
            Some(ConstraintViolation {
                constraint_id: constraint.id.clone(),
                constraint_kind: constraint.kind,
                priority: constraint.priority,
                description: describe(constraint, &colocated, " and ", "should not be seated together"),
                guest_ids: colocated.iter().map(|g| g.id.clone()).collect(),
                table_ids: vec![table_id],
            })
        })
        .collect()
}

/// Distinct table ids in first-seen order
fn distinct_tables<'a>(ids: impl Iterator<Item = &'a TableId>) -> Vec<TableId> {
    let mut out: Vec<TableId> = Vec::new();
    for id in ids {
        if !out.contains(id) {
            out.push(id.clone());
        }
    }
    out
}

fn describe(constraint: &Constraint, guests: &[&Guest], separator: &str, suffix: &str) -> String {
    if let Some(description) = &constraint.description {
        return description.clone();
    }
    let names: Vec<String> = guests.iter().map(|g| g.full_name()).collect();
    format!("{} {}", names.join(separator), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SeatingPlan, TableShape};
    use proptest::prelude::*;

    struct Fixture {
        plan: SeatingPlan,
        a: TableId,
        b: TableId,
        g: Vec<GuestId>,
    }

    fn fixture() -> Fixture {
        let mut plan = SeatingPlan::default();
        let a = plan.add_table(TableShape::Round, 0.0, 0.0);
        let b = plan.add_table(TableShape::Round, 400.0, 0.0);
        let g = ["Ann", "Bob", "Cid", "Dee"]
            .iter()
            .map(|n| plan.add_guest(n, "Smith"))
            .collect();
        Fixture { plan, a, b, g }
    }

    fn run(plan: &SeatingPlan) -> Vec<ConstraintViolation> {
        detect_violations(&plan.guests, &plan.tables, &plan.constraints)
    }

    #[test]
    fn test_together_split_across_tables() {
        let Fixture { mut plan, a, b, g } = fixture();
        plan.assign_guest_to_table(&g[0], Some(&a), None);
        plan.assign_guest_to_table(&g[1], Some(&b), None);
        plan.add_constraint(
            ConstraintKind::MustSitTogether,
            ConstraintPriority::Required,
            vec![g[0].clone(), g[1].clone()],
            None,
        );

        let violations = run(&plan);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].guest_ids, vec![g[0].clone(), g[1].clone()]);
        assert_eq!(violations[0].table_ids, vec![a, b]);
        assert_eq!(violations[0].description, "Ann Smith, Bob Smith should be seated together");
    }

    #[test]
    fn test_together_ignores_unseated_but_lists_them() {
        let Fixture { mut plan, a, b, g } = fixture();
        plan.assign_guest_to_table(&g[0], Some(&a), None);
        plan.assign_guest_to_table(&g[1], Some(&a), None);
        plan.move_guest_on_canvas(&g[2], 10.0, 10.0);
        plan.add_constraint(
            ConstraintKind::MustSitTogether,
            ConstraintPriority::Preferred,
            g[..3].to_vec(),
            None,
        );
        assert!(run(&plan).is_empty());

        plan.assign_guest_to_table(&g[1], Some(&b), None);
        let violations = run(&plan);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].guest_ids, g[..3].to_vec());
        assert_eq!(violations[0].priority, ConstraintPriority::Preferred);
    }

    #[test]
    fn test_apart_all_at_one_table() {
        let Fixture { mut plan, a, g, .. } = fixture();
        for guest in &g[..3] {
            plan.assign_guest_to_table(guest, Some(&a), None);
        }
        plan.add_constraint(
            ConstraintKind::MustNotSitTogether,
            ConstraintPriority::Required,
            g[..3].to_vec(),
            None,
        );

        let violations = run(&plan);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].guest_ids, g[..3].to_vec());
        assert_eq!(violations[0].table_ids, vec![a]);
        assert_eq!(
            violations[0].description,
            "Ann Smith and Bob Smith and Cid Smith should not be seated together"
        );
    }

    #[test]
    fn test_apart_one_violation_per_offending_table() {
        let Fixture { mut plan, a, b, g } = fixture();
        plan.assign_guest_to_table(&g[0], Some(&a), None);
        plan.assign_guest_to_table(&g[1], Some(&b), None);
        plan.assign_guest_to_table(&g[2], Some(&a), None);
        plan.assign_guest_to_table(&g[3], Some(&b), None);
        plan.add_constraint(
            ConstraintKind::MustNotSitTogether,
            ConstraintPriority::Required,
            g.clone(),
            Some("Feuding cousins".to_string()),
        );

        let violations = run(&plan);
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].table_ids, vec![a]);
        assert_eq!(violations[0].guest_ids, vec![g[0].clone(), g[2].clone()]);
        assert_eq!(violations[1].table_ids, vec![b]);
        assert_eq!(violations[1].guest_ids, vec![g[1].clone(), g[3].clone()]);
        assert!(violations.iter().all(|v| v.description == "Feuding cousins"));
    }

    #[test]
    fn test_unresolvable_ids_skip_constraint() {
        let Fixture { mut plan, a, b, g } = fixture();
        plan.assign_guest_to_table(&g[0], Some(&a), None);
        plan.assign_guest_to_table(&g[1], Some(&b), None);
        plan.add_constraint(
            ConstraintKind::MustSitTogether,
            ConstraintPriority::Required,
            vec![g[0].clone(), GuestId::new("removed")],
            None,
        );
        assert!(run(&plan).is_empty());
    }

    #[test]
    fn test_declared_only_kinds_never_fire() {
        let Fixture { mut plan, a, g, .. } = fixture();
        plan.assign_guest_to_table(&g[0], Some(&a), None);
        plan.assign_guest_to_table(&g[1], Some(&a), None);
        plan.add_constraint(ConstraintKind::NearFront, ConstraintPriority::Required, g[..2].to_vec(), None);
        plan.add_constraint(ConstraintKind::Accessibility, ConstraintPriority::Required, g[..2].to_vec(), None);
        assert!(run(&plan).is_empty());
    }

    #[test]
    fn test_violations_for_table_filters() {
        let Fixture { mut plan, a, b, g } = fixture();
        plan.assign_guest_to_table(&g[0], Some(&a), None);
        plan.assign_guest_to_table(&g[1], Some(&a), None);
        plan.add_constraint(
            ConstraintKind::MustNotSitTogether,
            ConstraintPriority::Required,
            g[..2].to_vec(),
            None,
        );
        let at_a = violations_for_table(&plan.guests, &plan.tables, &plan.constraints, &a);
        let at_b = violations_for_table(&plan.guests, &plan.tables, &plan.constraints, &b);
        assert_eq!(at_a.len(), 1);
        assert!(at_b.is_empty());
    }

    #[test]
    fn test_empty_inputs() {
        assert!(detect_violations(&[], &[], &[]).is_empty());
    }

    proptest! {
        #[test]
        fn detection_is_deterministic(seats in prop::collection::vec(proptest::option::of(0usize..2), 4)) {
            let Fixture { mut plan, a, b, g } = fixture();
            for (guest, seat) in g.iter().zip(seats) {
                let table = seat.map(|i| if i == 0 { a.clone() } else { b.clone() });
                plan.assign_guest_to_table(guest, table.as_ref(), None);
            }
            plan.add_constraint(ConstraintKind::MustSitTogether, ConstraintPriority::Required, g.clone(), None);
            plan.add_constraint(ConstraintKind::MustNotSitTogether, ConstraintPriority::Preferred, g.clone(), None);

            let first = run(&plan);
            let second = run(&plan);
            prop_assert_eq!(first, second);
        }
    }
}
