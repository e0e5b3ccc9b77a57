//! ECS components for hecs entities.
//!
//! Components are plain data. The kind of an entity is the component it
//! carries: exactly one of `Ship`, `Bullet`, or `Asteroid`, each paired with
//! a `Position` and `Velocity`. Game logic lives in systems.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::*;

/// The player's ship. One per round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    /// Heading in radians, kept in [0, 2π).
    pub rotation: f32,
    pub size: f32,
    pub thrust: f32,
    pub rotation_speed: f32,
    pub friction: f32,
    pub is_thrusting: bool,
    /// Ammo left in the magazine, 0..=SHIP_MAX_AMMO.
    pub bullets_remaining: u8,
    /// Fire latch: cleared on a shot, re-armed when the fire key is released.
    pub can_shoot: bool,
    pub is_invulnerable: bool,
    pub invulnerable_time: u32,
    pub lives: u32,
    /// Out of lives; frozen and hidden while the game-over delay runs.
    pub destroyed: bool,
}

impl Ship {
    pub fn new(lives: u32) -> Self {
        Self {
            rotation: 0.0,
            size: SHIP_SIZE,
            thrust: SHIP_THRUST,
            rotation_speed: SHIP_ROTATION_SPEED,
            friction: SHIP_FRICTION,
            is_thrusting: false,
            bullets_remaining: SHIP_MAX_AMMO,
            can_shoot: true,
            is_invulnerable: false,
            invulnerable_time: 0,
            lives,
            destroyed: false,
        }
    }
}

/// A shot fired by the ship.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    /// Heading at the moment of firing.
    pub rotation: f32,
    pub speed: f32,
    /// Ticks left before the bullet expires.
    pub lifespan: u32,
}

impl Bullet {
    pub fn new(rotation: f32) -> Self {
        Self {
            rotation,
            speed: BULLET_SPEED,
            lifespan: BULLET_LIFESPAN,
        }
    }
}

/// An irregular rock drifting across the canvas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    /// Nominal radius.
    pub size: f32,
    pub rotation: f32,
    pub rotation_speed: f32,
    /// Polygon outline in the unrotated local frame, centered on the origin.
    pub vertices: Vec<Vec2>,
}

impl Asteroid {
    /// Whether a hit breaks this asteroid into fragments.
    pub fn is_splittable(&self) -> bool {
        self.size >= ASTEROID_MIN_SPLIT_SIZE
    }

    /// Outline rotated and translated into world space.
    pub fn world_vertices(&self, center: Vec2) -> Vec<Vec2> {
        let rot = Vec2::from_angle(self.rotation);
        self.vertices
            .iter()
            .map(|v| center + rot.rotate(*v))
            .collect()
    }
}
