//! Ship control: turning, thrust with friction, the fire latch, ammo refill,
//! invulnerability countdown, and the hull geometry used for collisions.

use glam::Vec2;
use hecs::World;
use tracing::debug;

use asteroids_core::components::{Asteroid, Bullet, Ship};
use asteroids_core::constants::{SHIP_INVULNERABLE_TICKS, SHIP_MAX_AMMO};
use asteroids_core::events::GameEvent;
use asteroids_core::input::InputState;
use asteroids_core::types::{CanvasBounds, Position, Velocity};

use crate::systems::asteroid;
use crate::systems::movement;

/// A bullet the ship asked to spawn this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shot {
    /// World position of the ship's nose.
    pub origin: Vec2,
    pub heading: f32,
}

/// Run ship control for the tick. Returns the shots fired; the caller spawns them.
pub fn run(
    world: &mut World,
    input: &InputState,
    bounds: &CanvasBounds,
    events: &mut Vec<GameEvent>,
) -> Vec<Shot> {
    let mut shots = Vec::new();

    for (_entity, (ship, pos, vel)) in
        world.query_mut::<(&mut Ship, &mut Position, &mut Velocity)>()
    {
        if ship.destroyed {
            continue;
        }

        apply_input(ship, vel, input);
        integrate(ship, pos, vel, bounds);

        if let Some(shot) = try_fire(ship, pos, input.fire()) {
            events.push(GameEvent::ShotFired {
                bullets_remaining: ship.bullets_remaining,
            });
            shots.push(shot);
        }

        tick_invulnerability(ship);
    }

    shots
}

/// Turn and thrust from held keys.
pub fn apply_input(ship: &mut Ship, vel: &mut Velocity, input: &InputState) {
    if input.turn_left() {
        ship.rotation = movement::normalize_angle(ship.rotation - ship.rotation_speed);
    }
    if input.turn_right() {
        ship.rotation = movement::normalize_angle(ship.rotation + ship.rotation_speed);
    }

    ship.is_thrusting = input.thrust();
    if ship.is_thrusting {
        vel.0 += Vec2::from_angle(ship.rotation) * ship.thrust;
    }
}

/// Friction decay, then move and wrap at the canvas edge.
pub fn integrate(ship: &Ship, pos: &mut Position, vel: &mut Velocity, bounds: &CanvasBounds) {
    vel.0 *= ship.friction;
    movement::step(pos, vel, bounds, 0.0);
}

/// Edge-triggered fire. The latch drops on any press while armed, whether or
/// not there is ammo, and re-arms only once the key is released.
pub fn try_fire(ship: &mut Ship, pos: &Position, fire_held: bool) -> Option<Shot> {
    if !fire_held {
        ship.can_shoot = true;
        return None;
    }
    if !ship.can_shoot {
        return None;
    }
    ship.can_shoot = false;

    if ship.bullets_remaining == 0 {
        return None;
    }
    ship.bullets_remaining -= 1;

    Some(Shot {
        origin: nose(pos.0, ship.rotation, ship.size),
        heading: ship.rotation,
    })
}

/// Refill the magazine once it is empty and every earlier shot is gone.
pub fn refill_ammo(world: &mut World, events: &mut Vec<GameEvent>) {
    let live_bullets = world.query::<&Bullet>().iter().count();
    if live_bullets > 0 {
        return;
    }
    for (_entity, ship) in world.query_mut::<&mut Ship>() {
        if ship.bullets_remaining == 0 && !ship.destroyed {
            ship.bullets_remaining = SHIP_MAX_AMMO;
            debug!("magazine refilled");
            events.push(GameEvent::AmmoRefilled);
        }
    }
}

/// Count the invulnerability window down by one tick.
pub fn tick_invulnerability(ship: &mut Ship) {
    if !ship.is_invulnerable {
        return;
    }
    ship.invulnerable_time = ship.invulnerable_time.saturating_sub(1);
    if ship.invulnerable_time == 0 {
        ship.is_invulnerable = false;
    }
}

/// Put the ship back at the canvas center, at rest, with a fresh invulnerability window.
pub fn respawn(ship: &mut Ship, pos: &mut Position, vel: &mut Velocity, bounds: &CanvasBounds) {
    pos.0 = bounds.center();
    vel.0 = Vec2::ZERO;
    ship.rotation = 0.0;
    ship.is_thrusting = false;
    ship.is_invulnerable = true;
    ship.invulnerable_time = SHIP_INVULNERABLE_TICKS;
}

/// World position of the nose.
pub fn nose(center: Vec2, rotation: f32, size: f32) -> Vec2 {
    center + Vec2::from_angle(rotation) * size
}

/// Hull outline in the local frame, heading along +x: nose, wing, notch, wing.
pub fn local_hull(size: f32) -> [Vec2; 4] {
    [
        Vec2::new(size, 0.0),
        Vec2::new(-size * 0.7, -size * 0.6),
        Vec2::new(-size * 0.4, 0.0),
        Vec2::new(-size * 0.7, size * 0.6),
    ]
}

/// Hull outline rotated and translated into world space.
pub fn world_hull(center: Vec2, rotation: f32, size: f32) -> [Vec2; 4] {
    let rot = Vec2::from_angle(rotation);
    local_hull(size).map(|v| center + rot.rotate(v))
}

/// Exhaust flame outline in world space, drawn behind the notch.
pub fn world_flame(center: Vec2, rotation: f32, size: f32) -> [Vec2; 3] {
    let rot = Vec2::from_angle(rotation);
    [
        Vec2::new(-size * 0.55, -size * 0.3),
        Vec2::new(-size * 1.2, 0.0),
        Vec2::new(-size * 0.55, size * 0.3),
    ]
    .map(|v| center + rot.rotate(v))
}

/// True when a hull vertex lies inside the asteroid and the ship can be hit.
pub fn collides_with(
    ship: &Ship,
    ship_pos: &Position,
    rock: &Asteroid,
    rock_pos: &Position,
) -> bool {
    if ship.is_invulnerable || ship.destroyed {
        return false;
    }
    world_hull(ship_pos.0, ship.rotation, ship.size)
        .iter()
        .any(|vertex| asteroid::contains_point(rock, rock_pos, *vertex))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::TAU;
    use asteroids_core::constants::*;
    use asteroids_core::enums::Key;

    fn ship_at_center() -> (Ship, Position, Velocity) {
        (
            Ship::new(STARTING_LIVES),
            Position::new(480.0, 360.0),
            Velocity::default(),
        )
    }

    #[test]
    fn test_rotation_normalized() {
        let (mut ship, _, mut vel) = ship_at_center();
        let left = InputState::with_keys([Key::ArrowLeft]);
        apply_input(&mut ship, &mut vel, &left);
        assert!(ship.rotation >= 0.0 && ship.rotation < TAU);
        assert!((ship.rotation - (TAU - SHIP_ROTATION_SPEED)).abs() < 1e-5);

        let right = InputState::with_keys([Key::ArrowRight]);
        for _ in 0..200 {
            apply_input(&mut ship, &mut vel, &right);
            assert!(ship.rotation >= 0.0 && ship.rotation < TAU);
        }
    }

    #[test]
    fn test_rotation_normalized_under_mixed_turning() {
        use rand::{Rng, SeedableRng};
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(3);
        let left = InputState::with_keys([Key::ArrowLeft]);
        let right = InputState::with_keys([Key::ArrowRight]);

        for _ in 0..200 {
            let (mut ship, _, mut vel) = ship_at_center();
            for _ in 0..2000 {
                let input = if rng.gen_bool(0.5) { &left } else { &right };
                apply_input(&mut ship, &mut vel, input);
                assert!(
                    (0.0..TAU).contains(&ship.rotation),
                    "rotation out of range: {}",
                    ship.rotation
                );
            }
        }
    }

    #[test]
    fn test_thrust_accumulates_and_friction_decays() {
        let (mut ship, mut pos, mut vel) = ship_at_center();
        let bounds = CanvasBounds::default();
        let up = InputState::with_keys([Key::ArrowUp]);

        apply_input(&mut ship, &mut vel, &up);
        assert!(ship.is_thrusting);
        assert!((vel.0.x - SHIP_THRUST).abs() < 1e-6);
        integrate(&ship, &mut pos, &mut vel, &bounds);
        assert!((vel.0.x - SHIP_THRUST * SHIP_FRICTION).abs() < 1e-6);

        let idle = InputState::new();
        let mut last = vel.speed();
        for _ in 0..100 {
            apply_input(&mut ship, &mut vel, &idle);
            integrate(&ship, &mut pos, &mut vel, &bounds);
            assert!(vel.speed() < last);
            assert!(vel.speed() > 0.0);
            last = vel.speed();
        }
        assert!(!ship.is_thrusting);
    }

    #[test]
    fn test_fire_is_edge_triggered() {
        let (mut ship, pos, _) = ship_at_center();

        let shot = try_fire(&mut ship, &pos, true).expect("first press fires");
        assert_eq!(ship.bullets_remaining, 4);
        assert!((shot.origin - Vec2::new(495.0, 360.0)).length() < 1e-4);
        assert_eq!(shot.heading, 0.0);

        // Holding the key does not fire again.
        for _ in 0..10 {
            assert!(try_fire(&mut ship, &pos, true).is_none());
        }
        assert_eq!(ship.bullets_remaining, 4);

        // Release, press again.
        assert!(try_fire(&mut ship, &pos, false).is_none());
        assert!(try_fire(&mut ship, &pos, true).is_some());
        assert_eq!(ship.bullets_remaining, 3);
    }

    #[test]
    fn test_fire_without_ammo_is_silent() {
        let (mut ship, pos, _) = ship_at_center();
        ship.bullets_remaining = 0;
        assert!(try_fire(&mut ship, &pos, true).is_none());
        assert_eq!(ship.bullets_remaining, 0);
        assert!(!ship.can_shoot);
    }

    #[test]
    fn test_invulnerability_counts_down_to_zero() {
        let (mut ship, mut pos, mut vel) = ship_at_center();
        respawn(&mut ship, &mut pos, &mut vel, &CanvasBounds::default());
        assert!(ship.is_invulnerable);

        let mut last = ship.invulnerable_time;
        while ship.is_invulnerable {
            tick_invulnerability(&mut ship);
            assert!(ship.invulnerable_time < last);
            last = ship.invulnerable_time;
        }
        assert_eq!(ship.invulnerable_time, 0);

        tick_invulnerability(&mut ship);
        assert!(!ship.is_invulnerable);
        assert_eq!(ship.invulnerable_time, 0);
    }

    #[test]
    fn test_respawn_resets_motion() {
        let (mut ship, mut pos, mut vel) = ship_at_center();
        pos = Position::new(10.0, 10.0);
        vel = Velocity::new(3.0, -2.0);
        ship.rotation = 2.0;
        respawn(&mut ship, &mut pos, &mut vel, &CanvasBounds::new(800.0, 600.0));
        assert_eq!(pos, Position::new(400.0, 300.0));
        assert_eq!(vel.0, Vec2::ZERO);
        assert_eq!(ship.rotation, 0.0);
        assert_eq!(ship.invulnerable_time, SHIP_INVULNERABLE_TICKS);
    }

    #[test]
    fn test_world_hull_nose_leads() {
        let hull = world_hull(Vec2::new(100.0, 100.0), std::f32::consts::FRAC_PI_2, 10.0);
        assert!((hull[0] - Vec2::new(100.0, 110.0)).length() < 1e-4);
        // Notch sits behind the center.
        assert!(hull[2].y < 100.0);
    }

    #[test]
    fn test_collision_suppressed_while_invulnerable() {
        let (mut ship, pos, _) = ship_at_center();
        let rock = Asteroid {
            size: 40.0,
            rotation: 0.0,
            rotation_speed: 0.0,
            vertices: (0..10)
                .map(|i| Vec2::from_angle(i as f32 * TAU / 10.0) * 40.0)
                .collect(),
        };
        assert!(collides_with(&ship, &pos, &rock, &pos));

        ship.is_invulnerable = true;
        ship.invulnerable_time = 10;
        assert!(!collides_with(&ship, &pos, &rock, &pos));

        let far = Position::new(100.0, 100.0);
        ship.is_invulnerable = false;
        assert!(!collides_with(&ship, &pos, &rock, &far));
    }
}
