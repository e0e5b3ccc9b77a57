//! Kinematic integration with screen wrap.
//!
//! position += velocity each tick, then each axis wraps independently:
//! a coordinate below the low bound jumps to the high bound and vice versa.
//! Ships and bullets wrap at the canvas edge; asteroids wrap at an outset of
//! their own size so they leave the screen completely first.

use std::f32::consts::TAU;

use glam::Vec2;

use asteroids_core::types::{CanvasBounds, Position, Velocity};

/// Wrap one coordinate. Teleports to the opposite bound rather than clamping.
pub fn wrap_axis(value: f32, low: f32, high: f32) -> f32 {
    if value < low {
        high
    } else if value > high {
        low
    } else {
        value
    }
}

/// Wrap a point into the canvas expanded by `margin` on every side.
pub fn wrap(point: Vec2, bounds: &CanvasBounds, margin: f32) -> Vec2 {
    Vec2::new(
        wrap_axis(point.x, -margin, bounds.width + margin),
        wrap_axis(point.y, -margin, bounds.height + margin),
    )
}

/// Apply one tick of velocity to a position, then wrap.
pub fn step(position: &mut Position, velocity: &Velocity, bounds: &CanvasBounds, margin: f32) {
    position.0 = wrap(position.0 + velocity.0, bounds, margin);
}

/// Bring an angle into [0, 2π). `rem_euclid` alone can round a tiny negative
/// remainder up to exactly 2π in f32.
pub fn normalize_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}
