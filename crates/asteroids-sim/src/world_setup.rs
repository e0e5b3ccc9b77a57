//! Entity spawn factories for setting up a round.
//!
//! Creates the ship at the canvas center and seeds the opening asteroid field
//! away from it.

use glam::Vec2;
use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use asteroids_core::components::Ship;
use asteroids_core::constants::*;
use asteroids_core::types::{CanvasBounds, Position, Velocity};

use crate::systems::asteroid;

/// Attempts at finding a clear spot before falling back to a corner.
const PLACEMENT_ATTEMPTS: usize = 64;

/// Populate an empty world with a fresh round.
pub fn setup_round(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    bounds: &CanvasBounds,
    lives: u32,
    asteroid_count: usize,
) -> hecs::Entity {
    let ship = spawn_ship(world, bounds, lives);
    seed_asteroids(world, rng, bounds, asteroid_count, bounds.center());
    ship
}

/// Spawn the ship at rest in the canvas center, heading along +x.
pub fn spawn_ship(world: &mut World, bounds: &CanvasBounds, lives: u32) -> hecs::Entity {
    world.spawn((
        Ship::new(lives),
        Position(bounds.center()),
        Velocity::default(),
    ))
}

/// Seed `count` full-size asteroids at least ASTEROID_SPAWN_CLEARANCE from `avoid`.
pub fn seed_asteroids(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    bounds: &CanvasBounds,
    count: usize,
    avoid: Vec2,
) {
    for _ in 0..count {
        let at = clear_spot(rng, bounds, avoid);
        spawn_asteroid(world, rng, at, ASTEROID_INITIAL_SIZE);
    }
}

/// Spawn one asteroid with a random outline, drift, and spin.
pub fn spawn_asteroid(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    at: Vec2,
    size: f32,
) -> hecs::Entity {
    let (rock, velocity) = asteroid::generate(size, rng);
    world.spawn((rock, Position(at), velocity))
}

/// Random point on the canvas far enough from `avoid`. On a canvas too small
/// to have one, the corner farthest from `avoid` is used.
fn clear_spot(rng: &mut ChaCha8Rng, bounds: &CanvasBounds, avoid: Vec2) -> Vec2 {
    for _ in 0..PLACEMENT_ATTEMPTS {
        let candidate = Vec2::new(
            rng.gen_range(0.0..bounds.width),
            rng.gen_range(0.0..bounds.height),
        );
        if candidate.distance(avoid) >= ASTEROID_SPAWN_CLEARANCE {
            return candidate;
        }
    }

    [
        Vec2::ZERO,
        Vec2::new(bounds.width, 0.0),
        Vec2::new(0.0, bounds.height),
        bounds.size(),
    ]
    .into_iter()
    .max_by(|a, b| a.distance(avoid).total_cmp(&b.distance(avoid)))
    .unwrap_or(Vec2::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use asteroids_core::components::Asteroid;
    use rand::SeedableRng;

    #[test]
    fn test_round_setup() {
        let mut world = World::new();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let bounds = CanvasBounds::default();
        setup_round(&mut world, &mut rng, &bounds, 3, 4);

        assert_eq!(world.query::<&Ship>().iter().count(), 1);
        let center = bounds.center();
        let rocks: Vec<(f32, f32)> = world
            .query::<(&Asteroid, &Position)>()
            .iter()
            .map(|(_, (a, p))| (a.size, p.0.distance(center)))
            .collect();
        assert_eq!(rocks.len(), 4);
        for (size, distance) in rocks {
            assert_eq!(size, ASTEROID_INITIAL_SIZE);
            assert!(distance >= ASTEROID_SPAWN_CLEARANCE);
        }
    }

    #[test]
    fn test_tiny_canvas_falls_back_to_corner() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let bounds = CanvasBounds::new(100.0, 100.0);
        let spot = clear_spot(&mut rng, &bounds, Vec2::new(10.0, 10.0));
        assert_eq!(spot, Vec2::new(100.0, 100.0));
    }
}
