//! Collision resolution: bullets against asteroids, then the ship against asteroids.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use asteroids_core::components::{Asteroid, Bullet, Ship};
use asteroids_core::constants::*;
use asteroids_core::events::GameEvent;
use asteroids_core::types::{CanvasBounds, Color, Position, Velocity};

use crate::particles::ParticleSystem;
use crate::systems::{asteroid, ship};

/// Outcome of the bullet pass.
#[derive(Debug, Default)]
pub struct BulletHits {
    pub asteroids_destroyed: u32,
    pub points: u32,
}

/// Outcome of the ship pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShipHit {
    /// Lost a life and respawned at the center.
    Respawned { lives_remaining: u32 },
    /// Lost the last life.
    OutOfLives,
}

/// Resolve bullet × asteroid pairs.
///
/// Pairs are visited bullet-major. A bullet is spent by its first hit and an
/// asteroid can only be destroyed once, so one bullet never scores twice even
/// where rocks overlap.
pub fn bullets_vs_asteroids(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    particles: &mut ParticleSystem,
    events: &mut Vec<GameEvent>,
) -> BulletHits {
    let bullets: Vec<(Entity, Position)> = world
        .query::<(&Bullet, &Position)>()
        .iter()
        .map(|(e, (_, pos))| (e, *pos))
        .collect();

    let rocks: Vec<(Entity, Asteroid, Position, Velocity)> = world
        .query::<(&Asteroid, &Position, &Velocity)>()
        .iter()
        .map(|(e, (rock, pos, vel))| (e, rock.clone(), *pos, *vel))
        .collect();

    let mut rock_consumed = vec![false; rocks.len()];
    let mut hits: Vec<(Entity, usize)> = Vec::new();

    for (bullet_entity, bullet_pos) in &bullets {
        let hit = rocks.iter().enumerate().position(|(idx, (_, rock, rock_pos, _))| {
            !rock_consumed[idx] && asteroid::contains_point(rock, rock_pos, bullet_pos.0)
        });
        if let Some(idx) = hit {
            rock_consumed[idx] = true;
            hits.push((*bullet_entity, idx));
        }
    }

    let mut result = BulletHits::default();

    for (bullet_entity, idx) in hits {
        let (rock_entity, rock, rock_pos, rock_vel) = &rocks[idx];
        let _ = world.despawn(bullet_entity);
        let _ = world.despawn(*rock_entity);

        let fragments = asteroid::split(rock, rock_pos, rock_vel, rng);
        let fragment_count = fragments.len();
        debug!(size = rock.size, fragments = fragment_count, "asteroid destroyed");
        for fragment in fragments {
            world.spawn(fragment);
        }

        particles.create_explosion(rock_pos.0, ASTEROID_EXPLOSION_PARTICLES, Color::GREY, rng);

        result.asteroids_destroyed += 1;
        result.points += ASTEROID_SCORE;
        events.push(GameEvent::AsteroidDestroyed {
            position: *rock_pos,
            size: rock.size,
            fragments: fragment_count,
            points: ASTEROID_SCORE,
        });
    }

    result
}

/// Resolve the ship against every asteroid. At most one hit per tick.
pub fn ship_vs_asteroids(
    world: &mut World,
    bounds: &CanvasBounds,
    rng: &mut ChaCha8Rng,
    particles: &mut ParticleSystem,
    events: &mut Vec<GameEvent>,
) -> Option<ShipHit> {
    let rocks: Vec<(Asteroid, Position)> = world
        .query::<(&Asteroid, &Position)>()
        .iter()
        .map(|(_, (rock, pos))| (rock.clone(), *pos))
        .collect();

    for (_entity, (craft, pos, vel)) in world.query_mut::<(&mut Ship, &mut Position, &mut Velocity)>() {
        let hit = rocks
            .iter()
            .any(|(rock, rock_pos)| ship::collides_with(craft, pos, rock, rock_pos));
        if !hit {
            continue;
        }

        let wreck = *pos;
        craft.lives = craft.lives.saturating_sub(1);
        particles.create_explosion(wreck.0, SHIP_EXPLOSION_PARTICLES, Color::WHITE, rng);
        events.push(GameEvent::ShipDestroyed {
            position: wreck,
            lives_remaining: craft.lives,
        });
        info!(lives_remaining = craft.lives, "ship destroyed");

        if craft.lives > 0 {
            ship::respawn(craft, pos, vel, bounds);
            return Some(ShipHit::Respawned {
                lives_remaining: craft.lives,
            });
        }

        craft.destroyed = true;
        craft.is_thrusting = false;
        return Some(ShipHit::OutOfLives);
    }

    None
}
