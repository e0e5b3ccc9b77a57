//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are plain functions over `&mut World` (or `&World` for read-only).
//! They do not own state; all state lives in components.

pub mod asteroid;
pub mod bullets;
pub mod cleanup;
pub mod collision;
pub mod movement;
pub mod ship;
pub mod snapshot;
