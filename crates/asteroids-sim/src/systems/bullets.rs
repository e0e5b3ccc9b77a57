//! Bullet flight: straight line along the firing heading, edge wrap,
//! one tick off the lifespan per step.

use hecs::World;

use asteroids_core::components::Bullet;
use asteroids_core::types::{CanvasBounds, Position, Velocity};

use crate::systems::movement;
use crate::systems::ship::Shot;

/// Advance every bullet one tick.
pub fn run(world: &mut World, bounds: &CanvasBounds) {
    for (_entity, (bullet, pos, vel)) in
        world.query_mut::<(&mut Bullet, &mut Position, &Velocity)>()
    {
        movement::step(pos, vel, bounds, 0.0);
        bullet.lifespan = bullet.lifespan.saturating_sub(1);
    }
}

/// Spawn a bullet for a shot. Its velocity is fixed for life.
pub fn spawn(world: &mut World, shot: Shot) -> hecs::Entity {
    let bullet = Bullet::new(shot.heading);
    let velocity = Velocity::from_heading(shot.heading, bullet.speed);
    world.spawn((bullet, Position(shot.origin), velocity))
}
