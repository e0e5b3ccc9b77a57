//! Asteroid geometry and drift: outline generation, point containment,
//! fragmentation, and the per-tick drift/spin system.

use std::f32::consts::TAU;

use glam::Vec2;
use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use asteroids_core::components::Asteroid;
use asteroids_core::constants::*;
use asteroids_core::types::{CanvasBounds, Position, Velocity};

use crate::systems::movement;

/// Drift and spin every asteroid; wrap once fully off-screen.
pub fn run(world: &mut World, bounds: &CanvasBounds) {
    for (_entity, (rock, pos, vel)) in
        world.query_mut::<(&mut Asteroid, &mut Position, &Velocity)>()
    {
        movement::step(pos, vel, bounds, rock.size);
        rock.rotation = movement::normalize_angle(rock.rotation + rock.rotation_speed);
    }
}

/// Build a fresh asteroid of the given size with a random drift and spin.
pub fn generate(size: f32, rng: &mut ChaCha8Rng) -> (Asteroid, Velocity) {
    let speed = rng.gen_range(ASTEROID_MIN_SPEED..ASTEROID_MAX_SPEED);
    let heading = rng.gen_range(0.0..TAU);
    let rotation_speed = rng.gen_range(-ASTEROID_MAX_ROTATION_SPEED..ASTEROID_MAX_ROTATION_SPEED);

    let asteroid = Asteroid {
        size,
        rotation: 0.0,
        rotation_speed,
        vertices: generate_outline(size, rng),
    };
    (asteroid, Velocity::from_heading(heading, speed))
}

/// Irregular closed outline: evenly spaced angles, jittered radius per vertex.
pub fn generate_outline(size: f32, rng: &mut ChaCha8Rng) -> Vec<Vec2> {
    (0..ASTEROID_VERTEX_COUNT)
        .map(|i| {
            let angle = i as f32 * TAU / ASTEROID_VERTEX_COUNT as f32;
            let jitter = rng.gen_range(-ASTEROID_JAGGEDNESS..=ASTEROID_JAGGEDNESS);
            Vec2::from_angle(angle) * size * (1.0 + jitter)
        })
        .collect()
}

/// Even-odd containment test of a world point against the asteroid outline.
///
/// The point is moved into the asteroid's unrotated local frame first, so the
/// stored outline never has to be re-rotated.
pub fn contains_point(asteroid: &Asteroid, position: &Position, point: Vec2) -> bool {
    let inverse = Vec2::from_angle(-asteroid.rotation);
    let local = inverse.rotate(point - position.0);
    point_in_polygon(local, &asteroid.vertices)
}

/// Ray cast toward +x, toggling on every edge that straddles the point's y.
pub fn point_in_polygon(point: Vec2, vertices: &[Vec2]) -> bool {
    let Some(mut j) = vertices.len().checked_sub(1) else {
        return false;
    };
    let mut inside = false;
    for (i, vi) in vertices.iter().enumerate() {
        let vj = vertices[j];
        if (vi.y > point.y) != (vj.y > point.y) {
            let x_cross = (vj.x - vi.x) * (point.y - vi.y) / (vj.y - vi.y) + vi.x;
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Fragments left by a destructive hit: none below the split threshold,
/// otherwise two half-size rocks near the parent that inherit its drift
/// plus an independent kick.
pub fn split(
    asteroid: &Asteroid,
    position: &Position,
    velocity: &Velocity,
    rng: &mut ChaCha8Rng,
) -> Vec<(Asteroid, Position, Velocity)> {
    if !asteroid.is_splittable() {
        return Vec::new();
    }

    let child_size = asteroid.size / 2.0;
    let spread = child_size * ASTEROID_FRAGMENT_SPREAD;
    let kick = ASTEROID_FRAGMENT_VELOCITY_JITTER;

    (0..2)
        .map(|_| {
            let (mut child, _) = generate(child_size, rng);
            child.rotation = asteroid.rotation;
            let offset = Vec2::new(rng.gen_range(-spread..spread), rng.gen_range(-spread..spread));
            let perturbation = Vec2::new(rng.gen_range(-kick..kick), rng.gen_range(-kick..kick));
            (
                child,
                Position(position.0 + offset),
                Velocity(velocity.0 + perturbation),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    #[test]
    fn test_generate_outline_shape() {
        let mut rng = rng();
        let (rock, vel) = generate(40.0, &mut rng);
        assert_eq!(rock.vertices.len(), ASTEROID_VERTEX_COUNT);
        for v in &rock.vertices {
            let r = v.length();
            assert!((30.0 - 1e-3..=50.0 + 1e-3).contains(&r), "radius {r}");
        }
        assert!(vel.speed() >= ASTEROID_MIN_SPEED - 1e-4);
        assert!(vel.speed() < ASTEROID_MAX_SPEED + 1e-4);
        assert!(rock.rotation_speed.abs() <= ASTEROID_MAX_ROTATION_SPEED);
    }

    #[test]
    fn test_center_always_inside() {
        let mut rng = rng();
        for i in 0..200 {
            let (mut rock, _) = generate(10.0 + (i % 40) as f32, &mut rng);
            rock.rotation = i as f32 * 0.13;
            let pos = Position::new(300.0, 200.0);
            assert!(contains_point(&rock, &pos, pos.0), "center outside for rock {i}");
        }
    }

    #[test]
    fn test_far_point_outside() {
        let mut rng = rng();
        for i in 0..200 {
            let (mut rock, _) = generate(40.0, &mut rng);
            rock.rotation = i as f32 * 0.21;
            let pos = Position::new(300.0, 200.0);
            let far = pos.0 + Vec2::from_angle(i as f32 * 0.5) * 40.0 * 1.26;
            assert!(!contains_point(&rock, &pos, far));
        }
    }

    #[test]
    fn test_containment_respects_rotation() {
        // Long thin diamond along local +x.
        let rock = Asteroid {
            size: 50.0,
            rotation: std::f32::consts::FRAC_PI_2,
            rotation_speed: 0.0,
            vertices: vec![
                Vec2::new(50.0, 0.0),
                Vec2::new(0.0, 5.0),
                Vec2::new(-50.0, 0.0),
                Vec2::new(0.0, -5.0),
            ],
        };
        let pos = Position::new(0.0, 0.0);
        // Rotated a quarter turn, the long axis now points along world y.
        assert!(contains_point(&rock, &pos, Vec2::new(0.0, 40.0)));
        assert!(!contains_point(&rock, &pos, Vec2::new(40.0, 0.0)));
    }

    #[test]
    fn test_degenerate_polygon_contains_nothing() {
        assert!(!point_in_polygon(Vec2::ZERO, &[]));
        assert!(!point_in_polygon(Vec2::ZERO, &[Vec2::X]));
    }

    #[test]
    fn test_split_large_yields_two_halves() {
        let mut rng = rng();
        let (rock, _) = generate(40.0, &mut rng);
        let pos = Position::new(100.0, 100.0);
        let vel = Velocity::new(1.5, -0.5);
        let children = split(&rock, &pos, &vel, &mut rng);
        assert_eq!(children.len(), 2);
        for (child, child_pos, child_vel) in &children {
            assert_eq!(child.size, 20.0);
            assert_eq!(child.vertices.len(), ASTEROID_VERTEX_COUNT);
            assert!(child_pos.distance_to(&pos) <= 20.0 * ASTEROID_FRAGMENT_SPREAD * 1.5);
            assert!((child_vel.0 - vel.0).abs().max_element() <= ASTEROID_FRAGMENT_VELOCITY_JITTER);
        }
    }

    #[test]
    fn test_split_threshold() {
        let mut rng = rng();
        let pos = Position::default();
        let vel = Velocity::default();

        let (at_threshold, _) = generate(ASTEROID_MIN_SPLIT_SIZE, &mut rng);
        let children = split(&at_threshold, &pos, &vel, &mut rng);
        assert_eq!(children.len(), 2);
        assert!(children.iter().all(|(c, _, _)| c.size == 10.0));

        let (small, _) = generate(10.0, &mut rng);
        assert!(split(&small, &pos, &vel, &mut rng).is_empty());

        let (just_under, _) = generate(19.9, &mut rng);
        assert!(split(&just_under, &pos, &vel, &mut rng).is_empty());
    }

    #[test]
    fn test_run_drifts_and_spins() {
        let mut world = World::new();
        let bounds = CanvasBounds::default();
        let rock = Asteroid {
            size: 40.0,
            rotation: 0.0,
            rotation_speed: 0.01,
            vertices: Vec::new(),
        };
        let e = world.spawn((rock, Position::new(100.0, 100.0), Velocity::new(2.0, 1.0)));
        run(&mut world, &bounds);

        let mut query = world.query_one::<(&Asteroid, &Position)>(e).unwrap();
        let (rock, pos) = query.get().unwrap();
        assert_eq!(*pos, Position::new(102.0, 101.0));
        assert!((rock.rotation - 0.01).abs() < 1e-6);
    }

    #[test]
    fn test_spin_stays_in_half_open_range() {
        let mut world = World::new();
        let bounds = CanvasBounds::default();
        let speeds = [-ASTEROID_MAX_ROTATION_SPEED, -0.0137, 0.0093, ASTEROID_MAX_ROTATION_SPEED];
        let rocks: Vec<_> = speeds
            .iter()
            .map(|&rotation_speed| {
                let rock = Asteroid {
                    size: 40.0,
                    rotation: 0.0,
                    rotation_speed,
                    vertices: Vec::new(),
                };
                world.spawn((rock, Position::new(100.0, 100.0), Velocity::default()))
            })
            .collect();

        for _ in 0..20_000 {
            run(&mut world, &bounds);
            for &e in &rocks {
                let rock = world.get::<&Asteroid>(e).unwrap();
                assert!((0.0..TAU).contains(&rock.rotation), "rotation {}", rock.rotation);
            }
        }
    }
}
