//! Events emitted by the simulation for UI feedback.

use serde::{Deserialize, Serialize};

use crate::types::Position;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A new round began.
    RoundStarted { lives: u32 },
    /// The ship fired a bullet.
    ShotFired { bullets_remaining: u8 },
    /// A bullet destroyed an asteroid.
    AsteroidDestroyed {
        position: Position,
        size: f32,
        /// Number of fragments left behind (0 or 2).
        fragments: usize,
        points: u32,
    },
    /// The ship hit an asteroid.
    ShipDestroyed {
        position: Position,
        lives_remaining: u32,
    },
    /// The magazine was reloaded.
    AmmoRefilled,
    /// The round ended.
    GameOver { score: u32, high_score: u32 },
}
