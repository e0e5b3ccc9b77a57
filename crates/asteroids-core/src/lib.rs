//! Core types and definitions for the asteroids simulation.
//!
//! This crate defines the vocabulary shared across the other crates:
//! components, input, commands, state snapshots, events, and constants.
//! It has no dependency on a windowing or runtime framework.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod input;
pub mod state;
pub mod types;
