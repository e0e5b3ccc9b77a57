//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! This system is read-only: it never modifies the world.

use hecs::World;

use asteroids_core::components::{Asteroid, Bullet, Ship};
use asteroids_core::constants::SHIP_BLINK_TICKS;
use asteroids_core::enums::GamePhase;
use asteroids_core::events::GameEvent;
use asteroids_core::state::*;
use asteroids_core::types::{CanvasBounds, Position, SimTime};

use crate::engine::ScoreState;
use crate::particles::ParticleSystem;
use crate::systems::ship;

/// Build a complete GameStateSnapshot from the current world state.
#[allow(clippy::too_many_arguments)]
pub fn build_snapshot(
    world: &World,
    particles: &ParticleSystem,
    time: &SimTime,
    phase: GamePhase,
    canvas: CanvasBounds,
    score: &ScoreState,
    idle_lives: u32,
    events: Vec<GameEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        phase,
        canvas,
        hud: build_hud(world, score, idle_lives),
        ship: build_ship(world),
        bullets: build_bullets(world),
        asteroids: build_asteroids(world),
        particles: build_particles(particles),
        events,
    }
}

/// Score and lives. Before the first round there is no ship, so the
/// configured starting lives are shown instead.
fn build_hud(world: &World, score: &ScoreState, idle_lives: u32) -> HudView {
    let ship = world
        .query::<&Ship>()
        .iter()
        .next()
        .map(|(_, s)| (s.lives, s.bullets_remaining));
    let (lives, bullets_remaining) = ship.unwrap_or((idle_lives, 0));

    HudView {
        score: score.score,
        high_score: score.high_score,
        lives,
        bullets_remaining,
    }
}

fn build_ship(world: &World) -> Option<ShipView> {
    world
        .query::<(&Ship, &Position)>()
        .iter()
        .find(|(_, (s, _))| !s.destroyed)
        .map(|(_, (s, pos))| ShipView {
            position: *pos,
            rotation: s.rotation,
            size: s.size,
            thrusting: s.is_thrusting,
            invulnerable: s.is_invulnerable,
            visible: blink_visible(s),
            hull: ship::world_hull(pos.0, s.rotation, s.size),
        })
}

/// Visibility flips every SHIP_BLINK_TICKS ticks while invulnerable.
pub fn blink_visible(ship: &Ship) -> bool {
    !ship.is_invulnerable || (ship.invulnerable_time / SHIP_BLINK_TICKS) % 2 == 0
}

fn build_bullets(world: &World) -> Vec<BulletView> {
    world
        .query::<(&Bullet, &Position)>()
        .iter()
        .map(|(_, (b, pos))| BulletView {
            position: *pos,
            lifespan: b.lifespan,
        })
        .collect()
}

fn build_asteroids(world: &World) -> Vec<AsteroidView> {
    world
        .query::<(&Asteroid, &Position)>()
        .iter()
        .map(|(_, (a, pos))| AsteroidView {
            position: *pos,
            size: a.size,
            outline: a.world_vertices(pos.0),
        })
        .collect()
}

fn build_particles(particles: &ParticleSystem) -> Vec<ParticleView> {
    particles
        .particles()
        .iter()
        .map(|p| ParticleView {
            position: p.position,
            color: p.color,
            alpha: p.alpha(),
        })
        .collect()
}
