//! Simulation engine for HOLDOUT.
//!
//! Owns the world state, runs systems in a fixed order once per tick,
//! and produces `GameStateSnapshot`s for presentation.

pub mod engine;
pub mod geometry;
pub mod systems;
pub mod world;
pub mod world_setup;

pub use engine::{SimConfig, SimulationEngine};
pub use holdout_core as core;
