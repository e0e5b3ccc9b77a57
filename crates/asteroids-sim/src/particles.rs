//! Cosmetic particle bursts.
//!
//! Particles move ballistically, fade linearly over their lifespan, and never
//! take part in collisions. They live outside the ECS world in a plain vector.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use asteroids_core::constants::*;
use asteroids_core::types::{Color, Position, Velocity};

#[derive(Debug, Clone)]
pub struct Particle {
    pub position: Position,
    pub velocity: Velocity,
    pub color: Color,
    /// Ticks left.
    pub lifespan: u32,
    /// Lifespan at spawn, for the fade.
    pub max_lifespan: u32,
}

impl Particle {
    /// Fade factor: 1.0 at spawn, 0.0 when expired.
    pub fn alpha(&self) -> f32 {
        if self.max_lifespan == 0 {
            return 0.0;
        }
        self.lifespan as f32 / self.max_lifespan as f32
    }
}

#[derive(Debug, Clone, Default)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
}

impl ParticleSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Burst `count` particles out of `center`, evenly spread around the
    /// circle with a little angular jitter.
    pub fn create_explosion(
        &mut self,
        center: Vec2,
        count: usize,
        color: Color,
        rng: &mut ChaCha8Rng,
    ) {
        self.particles.reserve(count);
        for i in 0..count {
            let angle = i as f32 / count as f32 * TAU
                + rng.gen_range(-PARTICLE_ANGLE_JITTER..PARTICLE_ANGLE_JITTER);
            let speed = rng.gen_range(PARTICLE_MIN_SPEED..PARTICLE_MAX_SPEED);
            let lifespan = rng.gen_range(PARTICLE_MIN_LIFESPAN..PARTICLE_MAX_LIFESPAN);
            self.particles.push(Particle {
                position: Position(center),
                velocity: Velocity::from_heading(angle, speed),
                color,
                lifespan,
                max_lifespan: lifespan,
            });
        }
    }

    /// Move every particle, age it, and drop the expired ones.
    pub fn update(&mut self) {
        for particle in &mut self.particles {
            particle.position.0 += particle.velocity.0;
            particle.lifespan = particle.lifespan.saturating_sub(1);
        }
        self.particles.retain(|p| p.lifespan > 0);
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
