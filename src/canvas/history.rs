use std::collections::VecDeque;
use tracing::debug;

use crate::model::SeatingPlan;

/// Bounded undo/redo of whole-plan snapshots
#[derive(Debug, Clone)]
pub struct History {
    undo: VecDeque<SeatingPlan>,
    redo: Vec<SeatingPlan>,
    limit: usize,
}

impl History {
    pub fn new(limit: usize) -> Self {
        Self {
            undo: VecDeque::new(),
            redo: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Record `plan` as the state to return to on the next undo
    pub fn checkpoint(&mut self, plan: &SeatingPlan) {
        self.undo.push_back(plan.clone());
        while self.undo.len() > self.limit {
            self.undo.pop_front();
        }
        self.redo.clear();
        debug!(depth = self.undo.len(), "History checkpoint");
    }

    /// Drop the most recent checkpoint (an interaction that never committed)
    pub fn discard_checkpoint(&mut self) {
        self.undo.pop_back();
    }

    /// State the next undo would restore
    pub fn last_checkpoint(&self) -> Option<&SeatingPlan> {
        self.undo.back()
    }

    pub fn undo(&mut self, plan: &mut SeatingPlan) -> bool {
        let Some(previous) = self.undo.pop_back() else {
            return false;
        };
        self.redo.push(std::mem::replace(plan, previous));
        true
    }

    pub fn redo(&mut self, plan: &mut SeatingPlan) -> bool {
        let Some(next) = self.redo.pop() else {
            return false;
        };
        self.undo.push_back(std::mem::replace(plan, next));
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }
}
