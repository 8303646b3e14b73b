//! Per-frame motion integration.
//!
//! One call to [`step`] advances a body by a single frame. The order of the
//! operations is fixed:
//!
//! 1. gravity is added to the vertical velocity
//! 2. friction scales the velocity
//! 3. the speed is clamped to `max_speed`
//! 4. the position is integrated
//! 5. the rotation advances
//! 6. the body bounces off the surface edges, losing 20% of its speed
//!
//! Time is measured in frames, not seconds, so every quantity is "per frame".

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Fraction of velocity kept (with the sign flipped) after hitting a wall.
pub const WALL_RESTITUTION: f32 = 0.8;

/// Size of the drawing surface in surface units (pixels).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Whether a body of radius `margin` centered at `p` lies fully inside.
    pub fn contains(&self, p: Vec2, margin: f32) -> bool {
        p.x >= margin && p.x <= self.width - margin && p.y >= margin && p.y <= self.height - margin
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// Mutable motion state of a particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Radians. Accumulates without wrapping.
    pub rotation: f32,
    /// Radians per frame.
    pub rotation_speed: f32,
    /// Radius used for rendering and as the wall margin.
    pub size: f32,
}

/// Immutable physical parameters of a particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Physics {
    /// Velocity multiplier per frame, in `(0, 1]`.
    pub friction: f32,
    /// Added to the vertical velocity every frame.
    pub gravity: f32,
    /// Upper bound on the velocity magnitude.
    pub max_speed: f32,
}

impl Default for Physics {
    fn default() -> Self {
        Self {
            friction: 0.98,
            gravity: 0.0,
            max_speed: 5.0,
        }
    }
}

/// Advance `body` by one frame inside `bounds`.
pub fn step(body: &mut Body, physics: &Physics, bounds: Bounds) {
    body.velocity.y += physics.gravity;
    body.velocity *= physics.friction;
    body.velocity = clamp_speed(body.velocity, physics.max_speed);

    body.position += body.velocity;
    body.rotation += body.rotation_speed;

    reflect(body, bounds);
}

/// Rescale `v` to `max_speed` if it is faster. A zero vector is returned as is.
#[inline]
pub fn clamp_speed(v: Vec2, max_speed: f32) -> Vec2 {
    let max_speed = max_speed.max(0.0);
    let speed = v.length();
    if speed > max_speed && speed > 0.0 {
        v / speed * max_speed
    } else {
        v
    }
}

fn reflect(body: &mut Body, bounds: Bounds) {
    let size = body.size;

    if body.position.x < size || body.position.x > bounds.width - size {
        body.velocity.x *= -WALL_RESTITUTION;
        body.position.x = clamp_axis(body.position.x, size, bounds.width - size);
    }
    if body.position.y < size || body.position.y > bounds.height - size {
        body.velocity.y *= -WALL_RESTITUTION;
        body.position.y = clamp_axis(body.position.y, size, bounds.height - size);
    }
}

// Unlike f32::clamp this never panics: on a surface narrower than the body
// the lower bound wins.
#[inline]
fn clamp_axis(v: f32, lo: f32, hi: f32) -> f32 {
    v.min(hi).max(lo)
}
