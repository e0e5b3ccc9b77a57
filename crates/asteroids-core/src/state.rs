//! Game state snapshot: the complete visible state handed to the renderer each tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::GamePhase;
use crate::events::GameEvent;
use crate::types::{CanvasBounds, Color, Position, SimTime};

/// Complete game state produced after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub canvas: CanvasBounds,
    pub hud: HudView,
    /// Absent before the first round and once the last life is lost.
    pub ship: Option<ShipView>,
    pub bullets: Vec<BulletView>,
    pub asteroids: Vec<AsteroidView>,
    pub particles: Vec<ParticleView>,
    pub events: Vec<GameEvent>,
}

/// Read-only values for the score/lives display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HudView {
    pub score: u32,
    pub high_score: u32,
    pub lives: u32,
    pub bullets_remaining: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipView {
    pub position: Position,
    pub rotation: f32,
    pub size: f32,
    pub thrusting: bool,
    pub invulnerable: bool,
    /// False on the "off" beats of the invulnerability blink.
    pub visible: bool,
    /// Hull outline in world space: nose, wing, notch, wing.
    pub hull: [Vec2; 4],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulletView {
    pub position: Position,
    pub lifespan: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AsteroidView {
    pub position: Position,
    pub size: f32,
    /// Outline in world space.
    pub outline: Vec<Vec2>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleView {
    pub position: Position,
    pub color: Color,
    /// Remaining fraction of the particle's lifespan, 0.0..=1.0.
    pub alpha: f32,
}
