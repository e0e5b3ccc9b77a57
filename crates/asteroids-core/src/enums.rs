//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Top-level game phase.
///
/// `Splash` only leads to `Playing`; `GameOver` only leads back to `Playing`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for the first key press.
    #[default]
    Splash,
    /// A round is in progress.
    Playing,
    /// The ship ran out of lives; waiting for a confirm to restart.
    GameOver,
}

/// Keys the simulation polls each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    Space,
    Enter,
    /// Any key the game has no binding for. Still counts as "any key".
    Other,
}
