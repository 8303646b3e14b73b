//! Spawn helpers for the sticker board.
//!
//! [`SpawnContext`] wraps a seedable RNG and the surface size, and knows the
//! presets the board uses for its stickers, titles and click spawns.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::color::Color;
use crate::kinematics::Bounds;
use crate::particle::{Particle, ParticleOptions, ShapeKind};

/// Emoji used by glyph stickers.
pub const STICKER_GLYPHS: [&str; 8] = ["🎨", "✨", "🌟", "💫", "🎭", "🎪", "🎨", "🖼️"];

/// Words floating above the stickers, with their colors.
pub const TITLES: [(&str, Color); 3] = [
    ("CREATIVE", Color::rgb(0xff, 0x6b, 0x6b)),
    ("DESIGN", Color::rgb(0x4e, 0xcd, 0xc4)),
    ("STUDIO", Color::rgb(0xf7, 0xb7, 0x31)),
];

const TITLE_SIZE: f32 = 40.0;

/// Random source plus surface size for spawning particles.
#[derive(Debug, Clone)]
pub struct SpawnContext {
    pub bounds: Bounds,
    rng: SmallRng,
}

impl SpawnContext {
    /// Context with a fixed seed, for reproducible boards.
    pub fn seeded(seed: u64, bounds: Bounds) -> Self {
        Self {
            bounds,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Context seeded from OS entropy.
    pub fn from_entropy(bounds: Bounds) -> Self {
        Self {
            bounds,
            rng: SmallRng::from_entropy(),
        }
    }

    /// The underlying RNG, for particle defaults.
    pub fn rng(&mut self) -> &mut SmallRng {
        &mut self.rng
    }

    // ========== Random primitives ==========

    /// Random f32 in `[min, max)`. Returns `min` for an empty range.
    #[inline]
    pub fn random_range(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..max)
    }

    /// Random f32 in `[-half, half)`.
    #[inline]
    pub fn random_signed(&mut self, half: f32) -> f32 {
        self.random_range(-half, half)
    }

    /// Random vector with each axis in `[-half, half)`.
    pub fn random_velocity(&mut self, half: f32) -> Vec2 {
        Vec2::new(self.random_signed(half), self.random_signed(half))
    }

    /// Random point on the surface.
    pub fn random_in_bounds(&mut self) -> Vec2 {
        Vec2::new(
            self.random_range(0.0, self.bounds.width),
            self.random_range(0.0, self.bounds.height),
        )
    }

    /// Random angle in `[0, 2π)`.
    pub fn random_angle(&mut self) -> f32 {
        self.random_range(0.0, TAU)
    }

    /// Pick one element uniformly. `items` must not be empty.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.rng.gen_range(0..items.len())]
    }

    // ========== Presets ==========

    /// Options for an initial sticker: any shape, glyphs get an emoji.
    pub fn sticker_options(&mut self) -> ParticleOptions {
        let shape = *self.pick(&ShapeKind::ALL);
        if shape == ShapeKind::Glyph {
            let glyph = *self.pick(&STICKER_GLYPHS);
            ParticleOptions::new()
                .with_text(glyph)
                .with_size(self.random_range(30.0, 50.0))
                .with_rotation_speed(self.random_signed(0.025))
                .with_spring_strength(0.005)
        } else {
            ParticleOptions::new()
                .with_shape(shape)
                .with_size(self.random_range(20.0, 50.0))
                .with_rotation_speed(self.random_signed(0.04))
                .with_spring_strength(0.008)
                .with_friction(0.95)
        }
    }

    /// Options for a particle spawned by a click or tap: a geometric shape
    /// flung out with a random velocity.
    pub fn click_options(&mut self) -> ParticleOptions {
        let shape = *self.pick(&ShapeKind::GEOMETRIC);
        ParticleOptions::new()
            .with_shape(shape)
            .with_size(self.random_range(15.0, 40.0))
            .with_velocity(self.random_velocity(4.0))
            .with_rotation_speed(self.random_signed(0.05))
            .with_spring_strength(0.01)
    }

    /// Options for a floating title word.
    pub fn title_options(&mut self, text: &str, color: Color) -> ParticleOptions {
        ParticleOptions::new()
            .with_text(text)
            .with_size(TITLE_SIZE)
            .with_color(color)
            .with_velocity(self.random_velocity(0.25))
            .with_rotation_speed(self.random_signed(0.01))
            .with_spring_strength(0.003)
            .with_friction(0.98)
            .with_max_speed(2.0)
    }

    /// Where the `index`-th title sits: spread across the width, alternating
    /// between the upper and lower quarter.
    pub fn title_position(&self, index: usize) -> Vec2 {
        let Bounds { width, height } = self.bounds;
        Vec2::new(
            width / 4.0 * (index + 1) as f32,
            height / 4.0 + (index % 2) as f32 * (height / 2.0),
        )
    }

    /// Build a particle at `position` from `options`.
    pub fn particle(&mut self, position: Vec2, options: &ParticleOptions) -> Particle {
        Particle::new(position, options, &mut self.rng)
    }
}
