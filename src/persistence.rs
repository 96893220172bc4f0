use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::model::SeatingPlan;

/// Where seating plans are read from and written to
pub trait PlanStore {
    fn load(&self) -> Result<SeatingPlan>;
    fn save(&mut self, plan: &SeatingPlan) -> Result<()>;
}

/// Plan stored as pretty-printed JSON in a single file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PlanStore for JsonFileStore {
    /// A missing file is an empty plan, not an error
    fn load(&self) -> Result<SeatingPlan> {
        if !self.path.exists() {
            info!(path = %self.path.display(), "Plan file not found, starting empty plan");
            return Ok(SeatingPlan::default());
        }
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read plan from {}", self.path.display()))?;
        let mut plan: SeatingPlan = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse plan JSON from {}", self.path.display()))?;
        plan.reconcile_counters();
        info!(
            path = %self.path.display(),
            tables = plan.tables.len(),
            guests = plan.guests.len(),
            "Loaded plan"
        );
        Ok(plan)
    }

    fn save(&mut self, plan: &SeatingPlan) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create plan directory {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(plan).context("Failed to serialize plan to JSON")?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write plan to {}", self.path.display()))?;
        info!(path = %self.path.display(), "Saved plan");
        Ok(())
    }
}

/// In-process store, used by tests and as a scratch backend
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    plan: Option<SeatingPlan>,
    pub saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_plan(plan: SeatingPlan) -> Self {
        Self {
            plan: Some(plan),
            saves: 0,
        }
    }

    pub fn stored(&self) -> Option<&SeatingPlan> {
        self.plan.as_ref()
    }
}

impl PlanStore for MemoryStore {
    fn load(&self) -> Result<SeatingPlan> {
        Ok(self.plan.clone().unwrap_or_default())
    }

    fn save(&mut self, plan: &SeatingPlan) -> Result<()> {
        self.plan = Some(plan.clone());
        self.saves += 1;
        Ok(())
    }
}
