//! Configuration management for the seating planner

pub mod settings;

pub use settings::CanvasSettings;
