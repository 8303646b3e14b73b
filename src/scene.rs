//! The scene: an ordered list of entities updated and drawn each frame.
//!
//! Insertion order is draw order (painter's algorithm): later entities are
//! drawn on top of earlier ones. Entities are addressed by the [`EntityId`]
//! handed out by [`Scene::add`].
//!
//! Adding and removing need `&mut Scene`, while a pass borrows the whole
//! list, so nothing can be added or removed halfway through an update or
//! draw pass.

use glam::Vec2;

use crate::color::Color;
use crate::kinematics::Bounds;
use crate::linker::ProximityLinker;
use crate::particle::Particle;
use crate::pointer::PointerState;
use crate::render::{draw_particle, DrawContext};

/// Handle to an entity in a [`Scene`]. Ids are never reused within a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub(crate) u64);

/// Anything that lives in a scene.
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    /// Updated and drawn.
    Particle(Particle),
    /// Drawn only: links between its member particles.
    Links(ProximityLinker),
}

impl Entity {
    /// Whether [`update`](Self::update) does anything for this entity.
    pub fn is_updatable(&self) -> bool {
        matches!(self, Entity::Particle(_))
    }

    /// Advance one frame.
    pub fn update(&mut self, pointer: &PointerState, bounds: Bounds) {
        match self {
            Entity::Particle(p) => p.update(pointer, bounds),
            Entity::Links(_) => {}
        }
    }

    pub fn as_particle(&self) -> Option<&Particle> {
        match self {
            Entity::Particle(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_particle_mut(&mut self) -> Option<&mut Particle> {
        match self {
            Entity::Particle(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_linker(&self) -> Option<&ProximityLinker> {
        match self {
            Entity::Links(l) => Some(l),
            _ => None,
        }
    }

    fn as_linker_mut(&mut self) -> Option<&mut ProximityLinker> {
        match self {
            Entity::Links(l) => Some(l),
            _ => None,
        }
    }
}

impl From<Particle> for Entity {
    fn from(p: Particle) -> Self {
        Entity::Particle(p)
    }
}

impl From<ProximityLinker> for Entity {
    fn from(l: ProximityLinker) -> Self {
        Entity::Links(l)
    }
}

/// Result of [`Scene::spawn_linked`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spawned {
    /// Id of the new particle.
    pub id: EntityId,
    /// The oldest linked particle, removed because the cap was exceeded.
    pub evicted: Option<EntityId>,
}

/// What a draw pass produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawStats {
    pub shapes: usize,
    pub links: usize,
}

/// Ordered collection of entities.
#[derive(Debug, Clone)]
pub struct Scene {
    entities: Vec<(EntityId, Entity)>,
    next_id: u64,
    background: Color,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(Color::rgb(0x0a, 0x0a, 0x0a))
    }
}

impl Scene {
    /// Empty scene painted with `background` every frame.
    pub fn new(background: Color) -> Self {
        Self {
            entities: Vec::new(),
            next_id: 0,
            background,
        }
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn set_background(&mut self, background: Color) {
        self.background = background;
    }

    // ========== Membership ==========

    /// Append an entity, drawn on top of everything added before it.
    pub fn add(&mut self, entity: impl Into<Entity>) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.entities.push((id, entity.into()));
        id
    }

    /// Remove an entity. Removing an id that is not in the scene is a no-op.
    ///
    /// A removed particle is also dropped from every linker's population.
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let index = self.entities.iter().position(|(eid, _)| *eid == id)?;
        let (_, entity) = self.entities.remove(index);

        for (_, other) in self.entities.iter_mut() {
            if let Some(linker) = other.as_linker_mut() {
                linker.forget(id);
            }
        }
        Some(entity)
    }

    /// Add `particle` and enrol it in the population of the linker `linker`.
    ///
    /// When the linker's cap is exceeded the oldest member is removed from
    /// the scene. If `linker` is not a linker in this scene the particle is
    /// still added, just not linked.
    pub fn spawn_linked(&mut self, linker: EntityId, particle: Particle) -> Spawned {
        let id = self.add(particle);
        let evicted = self.enrol(linker, id);
        Spawned { id, evicted }
    }

    /// Enrol the particle `id`, already in the scene, in the population of
    /// `linker`. Returns the evicted oldest member, if the cap was exceeded.
    pub fn enrol(&mut self, linker: EntityId, id: EntityId) -> Option<EntityId> {
        if self.particle(id).is_none() {
            log::warn!("{id:?} is not a particle in this scene, not linking it");
            return None;
        }

        let evicted = match self.get_mut(linker).and_then(Entity::as_linker_mut) {
            Some(l) => l.enrol(id),
            None => {
                log::warn!("{linker:?} is not a linker, {id:?} will not be linked");
                None
            }
        };

        if let Some(old) = evicted {
            log::debug!("population cap reached, evicting {old:?}");
            self.remove(old);
        }
        evicted
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    /// Ids in draw order.
    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.iter().map(|(id, _)| *id)
    }

    /// Entities in draw order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.entities.iter().map(|(id, e)| (*id, e))
    }

    /// Particles in draw order.
    pub fn particles(&self) -> impl Iterator<Item = (EntityId, &Particle)> {
        self.entities
            .iter()
            .filter_map(|(id, e)| e.as_particle().map(|p| (*id, p)))
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|(eid, _)| *eid == id).map(|(_, e)| e)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities
            .iter_mut()
            .find(|(eid, _)| *eid == id)
            .map(|(_, e)| e)
    }

    pub fn particle(&self, id: EntityId) -> Option<&Particle> {
        self.get(id).and_then(Entity::as_particle)
    }

    pub fn particle_mut(&mut self, id: EntityId) -> Option<&mut Particle> {
        self.get_mut(id).and_then(Entity::as_particle_mut)
    }

    pub fn linker(&self, id: EntityId) -> Option<&ProximityLinker> {
        self.get(id).and_then(Entity::as_linker)
    }

    // ========== Frame passes ==========

    /// Update every entity in insertion order.
    pub fn update(&mut self, pointer: &PointerState, bounds: Bounds) {
        for (_, entity) in self.entities.iter_mut() {
            entity.update(pointer, bounds);
        }
    }

    /// Paint the whole surface with the background color.
    pub fn clear<C: DrawContext + ?Sized>(&self, ctx: &mut C, bounds: Bounds) {
        ctx.set_fill_style(self.background);
        ctx.fill_rect(0.0, 0.0, bounds.width, bounds.height);
    }

    /// Draw every entity in insertion order, without clearing first.
    pub fn draw_entities<C: DrawContext + ?Sized>(&self, ctx: &mut C) -> DrawStats {
        let mut stats = DrawStats::default();
        for (_, entity) in &self.entities {
            match entity {
                Entity::Particle(p) => {
                    draw_particle(ctx, p);
                    stats.shapes += 1;
                }
                Entity::Links(linker) => {
                    let positions = self.member_positions(linker);
                    stats.links += linker.draw(ctx, &positions);
                }
            }
        }
        stats
    }

    /// Clear, then draw every entity.
    pub fn draw<C: DrawContext + ?Sized>(&self, ctx: &mut C, bounds: Bounds) -> DrawStats {
        self.clear(ctx, bounds);
        self.draw_entities(ctx)
    }

    fn member_positions(&self, linker: &ProximityLinker) -> Vec<Vec2> {
        linker
            .members()
            .filter_map(|id| self.particle(id).map(Particle::position))
            .collect()
    }
}
