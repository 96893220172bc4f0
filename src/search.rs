//! Fuzzy search over guests and tables on the canvas

use serde::Serialize;
use tracing::debug;

use crate::canvas::{CanvasView, Selection};
use crate::constants::search::{GROUP_WEIGHT, MAX_GUESTS, MAX_RESULTS, MAX_TABLES, MIN_SCORE};
use crate::model::{Placement, SeatingPlan};
use crate::types::{GuestId, Point, TableId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum SearchTarget {
    Guest(GuestId),
    Table(TableId),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub target: SearchTarget,
    pub label: String,
    /// Where the guest sits, for display next to the label
    pub detail: Option<String>,
    pub score: f64,
}

fn normalize(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Match quality of `query` against `target` in [0, 1].
///
/// 1.0 for an exact match, 0.9 when the target contains the query, otherwise
/// 0.5 + 0.4 * (share of query tokens that prefix some target token), or 0 when
/// no token matches at all.
pub fn score(query: &str, target: &str) -> f64 {
    let query = normalize(query);
    let target = normalize(target);
    if query.is_empty() || target.is_empty() {
        return 0.0;
    }
    if query == target {
        return 1.0;
    }
    if target.contains(&query) {
        return 0.9;
    }

    let target_tokens: Vec<&str> = target.split(' ').collect();
    let query_tokens: Vec<&str> = query.split(' ').collect();
    let matched = query_tokens
        .iter()
        .filter(|q| target_tokens.iter().any(|t| t.starts_with(**q)))
        .count();
    if matched == 0 {
        return 0.0;
    }
    0.5 + 0.4 * (matched as f64 / query_tokens.len() as f64)
}

fn sort_by_score(results: &mut [SearchResult]) {
    results.sort_by(|a, b| b.score.total_cmp(&a.score));
}

/// Guests (by name, or group at reduced weight) and tables (by name) matching
/// `query`, best first.
pub fn search(plan: &SeatingPlan, query: &str) -> Vec<SearchResult> {
    if query.trim().is_empty() {
        return Vec::new();
    }

    let mut guests: Vec<SearchResult> = plan
        .guests
        .iter()
        .filter_map(|guest| {
            let name = guest.full_name();
            let by_name = score(query, &name);
            let by_group = guest
                .group
                .as_deref()
                .map(|group| score(query, group) * GROUP_WEIGHT)
                .unwrap_or(0.0);
            let best = by_name.max(by_group);
            if best < MIN_SCORE {
                return None;
            }
            let detail = match &guest.placement {
                Placement::Seated { table_id, .. } => plan.table(table_id).map(|t| t.name.clone()),
                Placement::Floating { .. } => Some("Floating".to_string()),
                Placement::Unplaced => None,
            };
            Some(SearchResult {
                target: SearchTarget::Guest(guest.id.clone()),
                label: name,
                detail,
                score: best,
            })
        })
        .collect();
    sort_by_score(&mut guests);
    guests.truncate(MAX_GUESTS);

    let mut tables: Vec<SearchResult> = plan
        .tables
        .iter()
        .filter_map(|table| {
            let s = score(query, &table.name);
            (s >= MIN_SCORE).then(|| SearchResult {
                target: SearchTarget::Table(table.id.clone()),
                label: table.name.clone(),
                detail: Some(format!("{} seats", table.capacity)),
                score: s,
            })
        })
        .collect();
    sort_by_score(&mut tables);
    tables.truncate(MAX_TABLES);

    let mut results = guests;
    results.extend(tables);
    sort_by_score(&mut results);
    results.truncate(MAX_RESULTS);
    debug!(query = %query, results = results.len(), "Canvas search");
    results
}

/// Canvas point that represents a search target: a table's centre, or a
/// guest's table centre when seated and own coordinates when floating
pub fn target_point(plan: &SeatingPlan, target: &SearchTarget) -> Option<Point> {
    match target {
        SearchTarget::Table(id) => plan.table(id).map(|t| t.center()),
        SearchTarget::Guest(id) => match &plan.guest(id)?.placement {
            Placement::Seated { table_id, .. } => plan.table(table_id).map(|t| t.center()),
            Placement::Floating { x, y } => Some(Point::new(*x, *y)),
            Placement::Unplaced => None,
        },
    }
}

/// Recentre the view on a result and select it. Unplaced guests are selected
/// without moving the view.
pub fn select_result(plan: &SeatingPlan, view: &mut CanvasView, target: &SearchTarget) {
    if let Some(point) = target_point(plan, target) {
        view.center_on(point);
    }
    view.select(match target {
        SearchTarget::Guest(id) => Selection::Guest(id.clone()),
        SearchTarget::Table(id) => Selection::Table(id.clone()),
    });
}
