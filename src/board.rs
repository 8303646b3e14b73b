//! The sticker board: a ready-made scene of linked stickers.
//!
//! On creation the board places a handful of random stickers, links them
//! with a [`ProximityLinker`] and floats a few title words on top. Clicks and
//! taps fling new shapes in at the pointer; once the linked population
//! reaches the cap the oldest sticker makes room.
//!
//! The board is [`Animated`], so an [`AnimationDriver`](crate::driver::AnimationDriver)
//! can run it directly. Window events go to [`StickerBoard::handle_event`];
//! they are applied at the start of the next frame.

use glam::Vec2;
use winit::event::WindowEvent;

use crate::config::Config;
use crate::driver::{Animated, Stage};
use crate::error::Result;
use crate::input::Input;
use crate::kinematics::Bounds;
use crate::linker::ProximityLinker;
use crate::render::DrawContext;
use crate::scene::{DrawStats, EntityId, Scene, Spawned};
use crate::spawn::{SpawnContext, TITLES};

/// Interactive scene of linked stickers.
#[derive(Debug, Clone)]
pub struct StickerBoard {
    stage: Stage,
    linker: EntityId,
    spawner: SpawnContext,
    input: Input,
}

impl StickerBoard {
    /// Build and populate a board for a surface of size `surface`.
    pub fn new(config: &Config, surface: Bounds) -> Result<Self> {
        config.validate()?;

        let mut spawner = match config.seed {
            Some(seed) => SpawnContext::seeded(seed, surface),
            None => SpawnContext::from_entropy(surface),
        };
        let mut scene = Scene::new(config.background);

        let stickers: Vec<EntityId> = (0..config.initial_stickers)
            .map(|_| {
                let at = spawner.random_in_bounds();
                let options = spawner.sticker_options();
                scene.add(spawner.particle(at, &options))
            })
            .collect();

        let linker = scene.add(
            ProximityLinker::new(config.link.max_distance)
                .with_color(config.link.color)
                .with_line_width(config.link.line_width)
                .with_cap(config.particle_cap),
        );
        for id in stickers {
            scene.enrol(linker, id);
        }

        if config.titles {
            for (index, (text, color)) in TITLES.iter().enumerate() {
                let at = spawner.title_position(index);
                let options = spawner.title_options(text, *color);
                scene.add(spawner.particle(at, &options));
            }
        }

        log::info!(
            "board ready: {} entities on a {}x{} surface",
            scene.len(),
            surface.width,
            surface.height
        );

        Ok(Self {
            stage: Stage::new(scene, surface),
            linker,
            spawner,
            input: Input::new(surface),
        })
    }

    pub fn scene(&self) -> &Scene {
        &self.stage.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.stage.scene
    }

    /// Id of the linker entity that owns the sticker population.
    pub fn linker_id(&self) -> EntityId {
        self.linker
    }

    /// Number of linked (evictable) stickers.
    pub fn linked_count(&self) -> usize {
        self.stage.scene.linker(self.linker).map_or(0, ProximityLinker::len)
    }

    pub fn bounds(&self) -> Bounds {
        self.stage.bounds
    }

    pub fn input(&self) -> &Input {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut Input {
        &mut self.input
    }

    /// Feed a window event. Takes effect at the start of the next frame.
    pub fn handle_event(&mut self, event: &WindowEvent) {
        self.input.handle_event(event);
    }

    /// Fling a new sticker in at `at`, evicting the oldest if needed.
    pub fn spawn_at(&mut self, at: Vec2) -> Spawned {
        let options = self.spawner.click_options();
        let particle = self.spawner.particle(at, &options);
        self.stage.scene.spawn_linked(self.linker, particle)
    }

    /// Move linked stickers so they keep their relative place on a resized
    /// surface. Titles stay where they are and are pushed back in by the
    /// walls.
    pub fn resize(&mut self, from: Bounds, to: Bounds) {
        let linked: Vec<EntityId> = self
            .stage
            .scene
            .linker(self.linker)
            .map(|l| l.members().collect())
            .unwrap_or_default();

        for id in linked {
            if let Some(p) = self.stage.scene.particle_mut(id) {
                p.rescale_position(from, to);
            }
        }
        self.stage.bounds = to;
        self.spawner.bounds = to;
        log::debug!("resized {}x{} -> {}x{}", from.width, from.height, to.width, to.height);
    }

    /// Apply the input collected since the last frame.
    pub fn apply_input(&mut self) {
        if let Some((from, to)) = self.input.take_resize() {
            self.resize(from, to);
        }
        for at in self.input.drain_taps() {
            self.spawn_at(at);
        }
        self.stage.pointer = *self.input.pointer();
    }

    /// Run one whole frame: clear, update and draw.
    pub fn frame<C: DrawContext + ?Sized>(&mut self, ctx: &mut C) -> DrawStats {
        self.clear(ctx);
        self.update();
        self.draw(ctx)
    }
}

impl Animated for StickerBoard {
    fn clear<C: DrawContext + ?Sized>(&mut self, ctx: &mut C) {
        self.stage.clear(ctx);
    }

    fn update(&mut self) {
        self.apply_input();
        self.stage.update();
    }

    fn draw<C: DrawContext + ?Sized>(&mut self, ctx: &mut C) -> DrawStats {
        self.stage.draw(ctx)
    }
}
