//! Application-wide constants
//!
//! This module contains all magic numbers and string literals used throughout
//! the application, providing a single source of truth for constant values.

/// Canvas geometry constants
pub mod canvas {
    /// Minimum zoom factor
    pub const MIN_ZOOM: f64 = 0.25;

    /// Maximum zoom factor
    pub const MAX_ZOOM: f64 = 2.0;

    /// Padding added on each side of an alignment guide beyond both tables
    pub const GUIDE_PADDING: f64 = 20.0;

    /// Distance between a table edge and the seats drawn around it
    pub const SEAT_OFFSET: f64 = 20.0;

    /// Default viewport size used before the UI reports a real one
    pub const DEFAULT_VIEWPORT_WIDTH: f64 = 1200.0;
    pub const DEFAULT_VIEWPORT_HEIGHT: f64 = 800.0;
}

/// Placement of guests dropped from the sidebar onto empty canvas
pub mod sidebar {
    /// X coordinate of the stacked column
    pub const STACK_X: f64 = 50.0;

    /// Y coordinate of the first stacked guest
    pub const STACK_START_Y: f64 = 50.0;

    /// Vertical distance between stacked guests
    pub const STACK_ROW_HEIGHT: f64 = 40.0;
}

/// Canvas search limits
pub mod search {
    /// Results scoring below this are discarded
    pub const MIN_SCORE: f64 = 0.3;

    /// Maximum guest results before merging
    pub const MAX_GUESTS: usize = 5;

    /// Maximum table results before merging
    pub const MAX_TABLES: usize = 5;

    /// Maximum merged results
    pub const MAX_RESULTS: usize = 10;

    /// Weight applied to a guest's group score
    pub const GROUP_WEIGHT: f64 = 0.8;
}

/// Config file location
pub mod config {
    /// Directory under the platform config dir
    pub const APP_DIR: &str = "seat-planner";

    /// Config file name
    pub const FILENAME: &str = "config.json";
}

/// Bounds applied by `CanvasSettings::validate_and_clamp`
pub mod validation {
    pub const MIN_GRID_SIZE: f64 = 1.0;
    pub const MAX_GRID_SIZE: f64 = 200.0;
    pub const MAX_THRESHOLD: f64 = 500.0;
    pub const MIN_HISTORY_LIMIT: usize = 1;
    pub const MAX_HISTORY_LIMIT: usize = 500;
}
