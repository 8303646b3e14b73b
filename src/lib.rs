//! # kinetic-canvas
//!
//! Animated 2D stickers that drift, spin, bounce off the edges of the
//! surface, shy away from the pointer and link up with faint lines when they
//! come close.
//!
//! The crate is the simulation and drawing core. It does not open windows or
//! talk to a GPU: drawing goes through the [`DrawContext`] trait and frames are
//! requested through the [`FrameScheduler`] trait, so any canvas-like backend
//! can host it.
//!
//! ## Quick Start
//!
//! ```ignore
//! use kinetic_canvas::prelude::*;
//!
//! let mut board = StickerBoard::new(&Config::new().with_seed(7), Bounds::new(1280.0, 720.0))?;
//! let mut driver = AnimationDriver::new(SimulatedScheduler::new(60));
//! let mut ctx = RecordingContext::new();
//!
//! driver.start();
//! board.input_mut().tap(Vec2::new(640.0, 360.0));
//! driver.run_for(Duration::from_secs(2), &mut board, &mut ctx);
//! driver.stop();
//! ```
//!
//! ## Core Concepts
//!
//! ### Particles
//!
//! A [`Particle`] is a shape (circle, square, triangle, star or glyph) with a
//! position, velocity, size, color and spin. Each frame it:
//!
//! 1. feels the pointer field: pushed away inside 150 units, pulled in
//!    between 150 and 300 ([`pointer`])
//! 2. falls under gravity, slows by friction, is clamped to its max speed,
//!    moves, spins and bounces off the walls ([`kinematics`])
//!
//! ### Scene
//!
//! A [`Scene`] is an ordered list of entities: particles and
//! [`ProximityLinker`]s. Later entities draw on top. A linker owns a
//! population of particle ids, draws lines between the close ones and, with
//! a cap, evicts the oldest member when a new one is enrolled.
//!
//! ### Driver
//!
//! The [`AnimationDriver`] runs clear → update → draw once per display
//! refresh while started. Stopping cancels the pending frame.

pub mod board;
pub mod color;
pub mod config;
pub mod driver;
mod error;
pub mod input;
pub mod kinematics;
pub mod linker;
pub mod particle;
pub mod pointer;
pub mod render;
pub mod scene;
pub mod spawn;
pub mod time;

pub use board::StickerBoard;
pub use color::{Color, STICKER_PALETTE};
pub use config::{Config, LinkConfig};
pub use driver::{AnimationDriver, Animated, DriverState, FrameHandle, FrameScheduler, SimulatedScheduler, Stage};
pub use error::{Error, Result};
pub use glam::Vec2;
pub use input::Input;
pub use kinematics::{Body, Bounds, Physics};
pub use linker::{Link, ProximityLinker};
pub use particle::{Particle, ParticleOptions, ShapeKind};
pub use pointer::PointerState;
pub use render::{draw_particle, DrawCommand, DrawContext, RecordingContext, TextAlign, TextBaseline};
pub use scene::{DrawStats, Entity, EntityId, Scene, Spawned};
pub use spawn::SpawnContext;
pub use time::FrameClock;

/// Prelude module for convenient imports.
///
/// ```ignore
/// use kinetic_canvas::prelude::*;
/// ```
pub mod prelude {
    pub use crate::board::StickerBoard;
    pub use crate::color::Color;
    pub use crate::config::Config;
    pub use crate::driver::{AnimationDriver, Animated, FrameScheduler, SimulatedScheduler, Stage};
    pub use crate::kinematics::Bounds;
    pub use crate::linker::ProximityLinker;
    pub use crate::particle::{Particle, ParticleOptions, ShapeKind};
    pub use crate::pointer::PointerState;
    pub use crate::render::{DrawContext, RecordingContext};
    pub use crate::scene::{Entity, EntityId, Scene};
    pub use glam::Vec2;
    pub use std::time::Duration;
}
