//! Render pass: turns a snapshot into draw calls on any 2D surface.

use glam::Vec2;

use asteroids_core::constants::{BULLET_RADIUS, PARTICLE_RADIUS};
use asteroids_core::state::GameStateSnapshot;
use asteroids_core::types::{CanvasBounds, Color};
use asteroids_sim::systems::ship::world_flame;

/// Minimal drawing backend the frame is painted onto.
pub trait DrawSurface {
    fn clear(&mut self, color: Color);
    fn stroke_polyline(&mut self, points: &[Vec2], closed: bool, color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, alpha: f32);
}

/// Paint one frame: background, ship, bullets, asteroids, then particles.
pub fn draw_frame<S: DrawSurface>(snapshot: &GameStateSnapshot, surface: &mut S) {
    surface.clear(Color::BLACK);

    if let Some(ship) = snapshot.ship.as_ref().filter(|ship| ship.visible) {
        surface.stroke_polyline(&ship.hull, true, Color::WHITE);
        if ship.thrusting {
            let flame = world_flame(ship.position.0, ship.rotation, ship.size);
            surface.stroke_polyline(&flame, false, Color::ORANGE);
        }
    }

    for bullet in &snapshot.bullets {
        surface.fill_circle(bullet.position.0, BULLET_RADIUS, Color::WHITE, 1.0);
    }

    for rock in &snapshot.asteroids {
        surface.stroke_polyline(&rock.outline, true, Color::WHITE);
    }

    for particle in &snapshot.particles {
        surface.fill_circle(particle.position.0, PARTICLE_RADIUS, particle.color, particle.alpha);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Polyline {
        points: Vec<Vec2>,
        closed: bool,
        color: Color,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
        alpha: f32,
    },
}

/// Surface that records every call instead of drawing.
#[derive(Debug, Default)]
pub struct CommandRecorder {
    pub canvas: CanvasBounds,
    pub commands: Vec<DrawCommand>,
}

impl CommandRecorder {
    pub fn new(canvas: CanvasBounds) -> Self {
        Self {
            canvas,
            commands: Vec::new(),
        }
    }

    pub fn reset(&mut self) {
        self.commands.clear();
    }

    pub fn polyline_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Polyline { .. }))
            .count()
    }

    pub fn circle_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count()
    }
}

impl DrawSurface for CommandRecorder {
    fn clear(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn stroke_polyline(&mut self, points: &[Vec2], closed: bool, color: Color) {
        self.commands.push(DrawCommand::Polyline {
            points: points.to_vec(),
            closed,
            color,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, alpha: f32) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
            alpha,
        });
    }
}
