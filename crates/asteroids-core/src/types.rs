//! Fundamental geometric and simulation types.

use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// World-space position in canvas pixels. x grows right, y grows down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position(pub Vec2);

/// Per-tick displacement in canvas pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity(pub Vec2);

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }

    pub fn distance_to(&self, other: &Position) -> f32 {
        self.0.distance(other.0)
    }
}

impl Velocity {
    pub fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }

    /// Velocity of the given magnitude along a heading (radians, 0 = +x).
    pub fn from_heading(heading: f32, speed: f32) -> Self {
        Self(Vec2::from_angle(heading) * speed)
    }

    pub fn speed(&self) -> f32 {
        self.0.length()
    }
}

/// Fixed drawing-surface dimensions for a session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasBounds {
    pub width: f32,
    pub height: f32,
}

impl CanvasBounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

impl Default for CanvasBounds {
    fn default() -> Self {
        Self::new(
            crate::constants::CANVAS_WIDTH,
            crate::constants::CANVAS_HEIGHT,
        )
    }
}

/// Opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const GREY: Color = Color::rgb(170, 170, 170);
    pub const ORANGE: Color = Color::rgb(255, 140, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Wall-clock time fed into the simulation so far.
    pub elapsed: Duration,
}

impl SimTime {
    /// Advance by one tick that took `dt` of real time.
    pub fn advance(&mut self, dt: Duration) {
        self.tick += 1;
        self.elapsed += dt;
    }
}
