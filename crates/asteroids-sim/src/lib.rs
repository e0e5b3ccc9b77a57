//! Simulation engine for the asteroids game.
//!
//! Owns the hecs ECS world, runs systems once per frame,
//! and produces GameStateSnapshots for whatever draws them.

pub mod engine;
pub mod particles;
pub mod systems;
pub mod timer;
pub mod world_setup;

pub use asteroids_core as core;
pub use engine::{SimConfig, SimulationEngine};
