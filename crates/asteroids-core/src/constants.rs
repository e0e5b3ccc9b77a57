//! Simulation constants and tuning parameters.
//!
//! Distances are canvas pixels, speeds are pixels per tick, and angles are
//! radians (0 = +x, increasing clockwise on a y-down canvas).

use std::time::Duration;

/// Nominal frame rate the per-tick tuning below was balanced for (Hz).
pub const TICK_RATE: u32 = 60;

// --- Canvas ---

pub const CANVAS_WIDTH: f32 = 960.0;
pub const CANVAS_HEIGHT: f32 = 720.0;

// --- Ship ---

/// Distance from ship center to nose.
pub const SHIP_SIZE: f32 = 15.0;

/// Velocity added per tick while thrusting.
pub const SHIP_THRUST: f32 = 0.1;

/// Angular step per tick while a turn key is held.
pub const SHIP_ROTATION_SPEED: f32 = 0.1;

/// Velocity multiplier applied every tick.
pub const SHIP_FRICTION: f32 = 0.99;

/// Magazine size; refilled only once empty and no bullet is alive.
pub const SHIP_MAX_AMMO: u8 = 5;

/// Invulnerability window after a respawn.
pub const SHIP_INVULNERABLE_TICKS: u32 = 120;

/// Visibility toggles every this many ticks while invulnerable.
pub const SHIP_BLINK_TICKS: u32 = 4;

pub const STARTING_LIVES: u32 = 3;

/// Particles in the burst left by a destroyed ship.
pub const SHIP_EXPLOSION_PARTICLES: usize = 20;

/// Delay between losing the last life and the game-over screen.
pub const GAME_OVER_DELAY: Duration = Duration::from_millis(1000);

// --- Bullets ---

pub const BULLET_SPEED: f32 = 10.0;
pub const BULLET_LIFESPAN: u32 = 50;
pub const BULLET_RADIUS: f32 = 2.0;

// --- Asteroids ---

pub const ASTEROID_VERTEX_COUNT: usize = 10;

/// Per-vertex radius varies by up to this fraction of the size.
pub const ASTEROID_JAGGEDNESS: f32 = 0.25;

/// Asteroids at least this big split in two; smaller ones just vanish.
pub const ASTEROID_MIN_SPLIT_SIZE: f32 = 20.0;

pub const ASTEROID_INITIAL_SIZE: f32 = 40.0;
pub const INITIAL_ASTEROID_COUNT: usize = 4;

/// Minimum distance between the ship and a freshly seeded asteroid.
pub const ASTEROID_SPAWN_CLEARANCE: f32 = 200.0;

pub const ASTEROID_MIN_SPEED: f32 = 1.0;
pub const ASTEROID_MAX_SPEED: f32 = 3.0;
pub const ASTEROID_MAX_ROTATION_SPEED: f32 = 0.02;

/// Fragment offset from the parent center, as a fraction of the fragment size.
pub const ASTEROID_FRAGMENT_SPREAD: f32 = 0.5;

/// Maximum per-axis velocity kick a fragment gets on top of its parent's.
pub const ASTEROID_FRAGMENT_VELOCITY_JITTER: f32 = 1.0;

/// Points per asteroid destroyed by a bullet.
pub const ASTEROID_SCORE: u32 = 100;

pub const ASTEROID_EXPLOSION_PARTICLES: usize = 10;

// --- Particles ---

pub const PARTICLE_MIN_SPEED: f32 = 1.0;
pub const PARTICLE_MAX_SPEED: f32 = 4.0;
pub const PARTICLE_MIN_LIFESPAN: u32 = 30;
pub const PARTICLE_MAX_LIFESPAN: u32 = 60;

/// Maximum angular deviation from the evenly spaced burst direction.
pub const PARTICLE_ANGLE_JITTER: f32 = 0.2;

pub const PARTICLE_RADIUS: f32 = 1.5;
