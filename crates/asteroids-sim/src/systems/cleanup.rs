//! Cleanup system: removes bullets whose lifespan has run out.

use hecs::{Entity, World};

use asteroids_core::components::Bullet;

/// Despawn expired bullets. Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, bullet) in world.query_mut::<&Bullet>() {
        if bullet.lifespan == 0 {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
