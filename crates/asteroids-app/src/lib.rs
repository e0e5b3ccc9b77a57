//! Asteroids application layer.
//!
//! Wires the simulation to a fixed-rate game loop thread, loads runtime
//! configuration, and renders snapshots onto a drawing surface.

pub mod config;
pub mod error;
pub mod game_loop;
pub mod render;
pub mod state;

pub use asteroids_core as core;
pub use config::AppConfig;
pub use error::{AppError, AppResult};
