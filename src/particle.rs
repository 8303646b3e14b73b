//! Particles: the animated stickers.
//!
//! A [`Particle`] is built from [`ParticleOptions`]. Every option is
//! overridable; anything left unset is filled from a caller-supplied RNG or a
//! fixed default, so a seeded RNG gives a reproducible particle.
//!
//! ```ignore
//! let mut rng = SmallRng::seed_from_u64(1);
//! let star = Particle::new(
//!     Vec2::new(200.0, 150.0),
//!     &ParticleOptions::new().with_shape(ShapeKind::Star).with_size(24.0),
//!     &mut rng,
//! );
//! ```

use std::f32::consts::TAU;
use std::fmt;
use std::str::FromStr;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::color::{random_palette_color, Color};
use crate::error::{Error, Result};
use crate::kinematics::{self, Body, Bounds, Physics};
use crate::pointer::{field_impulse, PointerState};

/// Default spring strength toward the pointer.
pub const DEFAULT_SPRING_STRENGTH: f32 = 0.01;

/// The visual form of a particle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// Filled disc (default).
    #[default]
    Circle,
    /// Axis-aligned square before rotation.
    Square,
    /// Isoceles triangle, apex up.
    Triangle,
    /// 5-pointed star.
    Star,
    /// A text string, usually an emoji or a word.
    #[serde(alias = "text")]
    Glyph,
}

impl ShapeKind {
    /// All shape kinds.
    pub const ALL: [ShapeKind; 5] = [
        ShapeKind::Circle,
        ShapeKind::Square,
        ShapeKind::Triangle,
        ShapeKind::Star,
        ShapeKind::Glyph,
    ];

    /// The shapes that need no text.
    pub const GEOMETRIC: [ShapeKind; 4] = [
        ShapeKind::Circle,
        ShapeKind::Square,
        ShapeKind::Triangle,
        ShapeKind::Star,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Circle => "circle",
            ShapeKind::Square => "square",
            ShapeKind::Triangle => "triangle",
            ShapeKind::Star => "star",
            ShapeKind::Glyph => "glyph",
        }
    }

    /// Parse a shape name, falling back to [`ShapeKind::Circle`] for anything
    /// unrecognized.
    pub fn parse_lenient(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            log::debug!("unknown shape {name:?}, drawing as circle");
            ShapeKind::Circle
        })
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShapeKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "circle" => Ok(ShapeKind::Circle),
            "square" => Ok(ShapeKind::Square),
            "triangle" => Ok(ShapeKind::Triangle),
            "star" => Ok(ShapeKind::Star),
            "glyph" | "text" => Ok(ShapeKind::Glyph),
            _ => Err(Error::UnknownShape(s.to_string())),
        }
    }
}

/// Construction options for a [`Particle`]. `None` means "pick a default".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleOptions {
    /// Initial velocity. Default: each axis uniform in `[-1, 1)`.
    pub velocity: Option<Vec2>,
    /// Radius. Default: uniform in `[10, 30)`.
    pub size: Option<f32>,
    /// Fill color. Default: a random palette color.
    pub color: Option<Color>,
    /// Default: 0.98.
    pub friction: Option<f32>,
    /// Default: 0.
    pub gravity: Option<f32>,
    /// Initial angle. Default: uniform in `[0, 2π)`.
    pub rotation: Option<f32>,
    /// Default: uniform in `[-0.05, 0.05)`.
    pub rotation_speed: Option<f32>,
    /// Default: circle.
    pub shape: Option<ShapeKind>,
    /// Text for glyph particles. Default: empty.
    pub text: Option<String>,
    /// Default: 0.01.
    pub spring_strength: Option<f32>,
    /// Default: 5.
    pub max_speed: Option<f32>,
}

impl ParticleOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = Some(velocity);
        self
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = Some(friction);
        self
    }

    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = Some(gravity);
        self
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = Some(rotation);
        self
    }

    pub fn with_rotation_speed(mut self, rotation_speed: f32) -> Self {
        self.rotation_speed = Some(rotation_speed);
        self
    }

    pub fn with_shape(mut self, shape: ShapeKind) -> Self {
        self.shape = Some(shape);
        self
    }

    /// Glyph text. Also switches the shape to [`ShapeKind::Glyph`].
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self.shape = Some(ShapeKind::Glyph);
        self
    }

    pub fn with_spring_strength(mut self, spring_strength: f32) -> Self {
        self.spring_strength = Some(spring_strength);
        self
    }

    pub fn with_max_speed(mut self, max_speed: f32) -> Self {
        self.max_speed = Some(max_speed);
        self
    }

    /// Check the explicitly set values.
    pub fn validate(&self) -> Result<()> {
        if let Some(friction) = self.friction {
            if !(friction > 0.0 && friction <= 1.0) {
                return Err(Error::InvalidConfig(format!(
                    "friction must be in (0, 1], got {friction}"
                )));
            }
        }
        if let Some(size) = self.size {
            if !(size > 0.0) {
                return Err(Error::InvalidConfig(format!("size must be positive, got {size}")));
            }
        }
        if let Some(max_speed) = self.max_speed {
            if !(max_speed >= 0.0) {
                return Err(Error::InvalidConfig(format!(
                    "max_speed must not be negative, got {max_speed}"
                )));
            }
        }
        Ok(())
    }
}

/// A single animated shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    body: Body,
    physics: Physics,
    spring_strength: f32,
    shape: ShapeKind,
    color: Color,
    text: String,
}

impl Particle {
    /// Build a particle at `position`, drawing unset options from `rng`.
    ///
    /// Explicit values that fail [`ParticleOptions::validate`] are treated as
    /// unset.
    pub fn new<R: Rng + ?Sized>(position: Vec2, options: &ParticleOptions, rng: &mut R) -> Self {
        if let Err(e) = options.validate() {
            log::warn!("{e}, using the default instead");
        }

        let velocity = options.velocity.unwrap_or_else(|| {
            Vec2::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0))
        });
        let size = options
            .size
            .filter(|size| *size > 0.0)
            .unwrap_or_else(|| rng.gen_range(10.0..30.0));
        let color = options.color.unwrap_or_else(|| random_palette_color(rng));
        let rotation = options.rotation.unwrap_or_else(|| rng.gen_range(0.0..TAU));
        let rotation_speed = options
            .rotation_speed
            .unwrap_or_else(|| rng.gen_range(-0.05..0.05));

        let defaults = Physics::default();
        Self {
            body: Body {
                position,
                velocity,
                rotation,
                rotation_speed,
                size,
            },
            physics: Physics {
                friction: options
                    .friction
                    .filter(|friction| *friction > 0.0 && *friction <= 1.0)
                    .unwrap_or(defaults.friction),
                gravity: options.gravity.unwrap_or(defaults.gravity),
                max_speed: options
                    .max_speed
                    .filter(|max_speed| *max_speed >= 0.0)
                    .unwrap_or(defaults.max_speed),
            },
            spring_strength: options.spring_strength.unwrap_or(DEFAULT_SPRING_STRENGTH),
            shape: options.shape.unwrap_or_default(),
            color,
            text: options.text.clone().unwrap_or_default(),
        }
    }

    /// Advance one frame: pointer field first, then the kinematics step.
    pub fn update(&mut self, pointer: &PointerState, bounds: Bounds) {
        self.body.velocity += field_impulse(pointer, self.body.position, self.spring_strength);
        kinematics::step(&mut self.body, &self.physics, bounds);
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.body.velocity
    }

    #[inline]
    pub fn size(&self) -> f32 {
        self.body.size
    }

    #[inline]
    pub fn rotation(&self) -> f32 {
        self.body.rotation
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn physics(&self) -> &Physics {
        &self.physics
    }

    pub fn spring_strength(&self) -> f32 {
        self.spring_strength
    }

    pub fn shape(&self) -> ShapeKind {
        self.shape
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Glyph text; empty for geometric shapes.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Move the particle so it keeps its relative place when the surface
    /// changes size.
    pub fn rescale_position(&mut self, from: Bounds, to: Bounds) {
        if from.width > 0.0 {
            self.body.position.x = self.body.position.x / from.width * to.width;
        }
        if from.height > 0.0 {
            self.body.position.y = self.body.position.y / from.height * to.height;
        }
    }
}
