//! Canvas behaviour settings
//!
//! Stored as JSON in the platform config directory. Missing keys fall back to
//! defaults so older files keep loading as new settings are added.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::constants::validation::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasSettings {
    /// Grid spacing in canvas units
    #[serde(default = "default_grid_size")]
    pub grid_size: f64,

    /// Snap dropped tables to the grid
    #[serde(default = "default_true")]
    pub snap_to_grid: bool,

    /// Show alignment guides while dragging tables
    #[serde(default = "default_true")]
    pub show_alignment_guides: bool,

    /// Max distance from a table outline at which a dragged guest is seated
    #[serde(default = "default_guest_snap_threshold")]
    pub guest_snap_threshold: f64,

    /// Max distance between aligned table features for a guide to show
    #[serde(default = "default_alignment_threshold")]
    pub alignment_threshold: f64,

    /// Pointer travel (screen units) before a press becomes a drag
    #[serde(default = "default_drag_activation_distance")]
    pub drag_activation_distance: f64,

    /// Mirror relationship edits onto the reverse edge
    #[serde(default = "default_true")]
    pub bidirectional_relationships: bool,

    /// Undo depth
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_grid_size() -> f64 {
    20.0
}

fn default_true() -> bool {
    true
}

fn default_guest_snap_threshold() -> f64 {
    80.0
}

fn default_alignment_threshold() -> f64 {
    10.0
}

fn default_drag_activation_distance() -> f64 {
    5.0
}

fn default_history_limit() -> usize {
    50
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            grid_size: default_grid_size(),
            snap_to_grid: true,
            show_alignment_guides: true,
            guest_snap_threshold: default_guest_snap_threshold(),
            alignment_threshold: default_alignment_threshold(),
            drag_activation_distance: default_drag_activation_distance(),
            bidirectional_relationships: true,
            history_limit: default_history_limit(),
            log_level: default_log_level(),
        }
    }
}

impl CanvasSettings {
    pub fn default_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(crate::constants::config::APP_DIR);
        path.push(crate::constants::config::FILENAME);
        path
    }

    /// Load settings from `path`, writing a default file if none exists
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!(path = %path.display(), "Config file not found, creating default");
            let settings = Self::default();
            settings.save_to(path)?;
            return Ok(settings);
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let mut settings: CanvasSettings = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config JSON from {}", path.display()))?;
        settings.validate_and_clamp();
        info!(path = %path.display(), "Loaded config");
        Ok(settings)
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self).context("Failed to serialize config to JSON")?;
        fs::write(path, json).with_context(|| format!("Failed to write config to {}", path.display()))?;
        info!(path = %path.display(), "Saved config");
        Ok(())
    }

    /// Clamp out-of-range values, logging each correction
    pub fn validate_and_clamp(&mut self) {
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&self.grid_size) {
            let clamped = if self.grid_size.is_nan() {
                default_grid_size()
            } else {
                self.grid_size.clamp(MIN_GRID_SIZE, MAX_GRID_SIZE)
            };
            warn!(grid_size = self.grid_size, using = clamped, "grid_size out of range, clamping");
            self.grid_size = clamped;
        }

        for (name, value, fallback) in [
            ("guest_snap_threshold", &mut self.guest_snap_threshold, default_guest_snap_threshold()),
            ("alignment_threshold", &mut self.alignment_threshold, default_alignment_threshold()),
            ("drag_activation_distance", &mut self.drag_activation_distance, default_drag_activation_distance()),
        ] {
            let current = *value;
            if !(0.0..=MAX_THRESHOLD).contains(&current) {
                let clamped = if current.is_nan() {
                    fallback
                } else {
                    current.clamp(0.0, MAX_THRESHOLD)
                };
                warn!(setting = name, value = current, using = clamped, "Threshold out of range, clamping");
                *value = clamped;
            }
        }

        if !(MIN_HISTORY_LIMIT..=MAX_HISTORY_LIMIT).contains(&self.history_limit) {
            let clamped = self.history_limit.clamp(MIN_HISTORY_LIMIT, MAX_HISTORY_LIMIT);
            warn!(history_limit = self.history_limit, using = clamped, "history_limit out of range, clamping");
            self.history_limit = clamped;
        }
    }
}
