#![forbid(unsafe_code)]

//! Seating plan core: tables and guests on a 2D floor plan, drag and drop
//! placement with proximity snapping, alignment guides, relationship editing,
//! canvas search, and on-demand seating constraint checks.

pub mod canvas;
pub mod config;
pub mod constants;
pub mod controller;
pub mod geometry;
pub mod model;
pub mod persistence;
pub mod relationships;
pub mod search;
pub mod types;
pub mod violations;

pub use controller::{OptimizationOutcome, PlanController, SeatingOptimizer};
