//! Proximity links between nearby particles.
//!
//! Every frame each unordered pair of linked particles closer than
//! `max_distance` gets a line whose opacity fades linearly with distance,
//! from [`LINK_ALPHA_SCALE`] when touching down to zero at the threshold.
//!
//! This is a brute-force O(n²) pass over the current positions. It is meant
//! for a few dozen particles; nothing is cached between frames.

use std::collections::VecDeque;

use glam::Vec2;

use crate::color::Color;
use crate::render::DrawContext;
use crate::scene::EntityId;

/// Opacity of a link between two coincident particles.
pub const LINK_ALPHA_SCALE: f32 = 0.2;

/// A pair of positions close enough to be linked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    /// Index of the first position (always `< b`).
    pub a: usize,
    pub b: usize,
    pub distance: f32,
    /// Line opacity in `(0, LINK_ALPHA_SCALE]`.
    pub weight: f32,
}

/// Opacity of a link spanning `distance`, or `None` if the pair is too far
/// apart to be linked.
#[inline]
pub fn link_opacity(distance: f32, max_distance: f32) -> Option<f32> {
    if max_distance <= 0.0 || distance >= max_distance {
        return None;
    }
    Some((1.0 - distance / max_distance) * LINK_ALPHA_SCALE)
}

/// All pairs `(i, j)` with `i < j` closer than `max_distance`, in row-major
/// order.
pub fn links(positions: &[Vec2], max_distance: f32) -> Vec<Link> {
    let mut out = Vec::new();
    for (a, pa) in positions.iter().enumerate() {
        for (b, pb) in positions.iter().enumerate().skip(a + 1) {
            let distance = pa.distance(*pb);
            if let Some(weight) = link_opacity(distance, max_distance) {
                out.push(Link { a, b, distance, weight });
            }
        }
    }
    out
}

/// Stroke every link between `positions`.
pub fn draw_links<C: DrawContext + ?Sized>(
    ctx: &mut C,
    positions: &[Vec2],
    max_distance: f32,
    color: Color,
    line_width: f32,
) -> usize {
    ctx.set_stroke_style(color);
    ctx.set_line_width(line_width);

    let found = links(positions, max_distance);
    for link in &found {
        let (p1, p2) = (positions[link.a], positions[link.b]);
        ctx.set_stroke_style(color.with_alpha(link.weight));
        ctx.begin_path();
        ctx.move_to(p1.x, p1.y);
        ctx.line_to(p2.x, p2.y);
        ctx.stroke();
    }
    found.len()
}

/// Scene entity that links a population of particles.
///
/// The linker owns the ordered list of particle ids it links. With a cap set,
/// the list doubles as the spawn history: enrolling past the cap evicts the
/// oldest member, see [`Scene::spawn_linked`](crate::scene::Scene::spawn_linked).
#[derive(Debug, Clone, PartialEq)]
pub struct ProximityLinker {
    members: VecDeque<EntityId>,
    cap: Option<usize>,
    max_distance: f32,
    color: Color,
    line_width: f32,
}

impl ProximityLinker {
    /// Linker with a white base color, line width 1 and no population cap.
    pub fn new(max_distance: f32) -> Self {
        Self {
            members: VecDeque::new(),
            cap: None,
            max_distance,
            color: Color::WHITE.with_alpha(0.1),
            line_width: 1.0,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_line_width(mut self, line_width: f32) -> Self {
        self.line_width = line_width;
        self
    }

    /// Limit the population. `0` is treated as no cap.
    pub fn with_cap(mut self, cap: usize) -> Self {
        self.cap = (cap > 0).then_some(cap);
        self
    }

    pub fn max_distance(&self) -> f32 {
        self.max_distance
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn line_width(&self) -> f32 {
        self.line_width
    }

    pub fn cap(&self) -> Option<usize> {
        self.cap
    }

    /// Linked ids, oldest first.
    pub fn members(&self) -> impl ExactSizeIterator<Item = EntityId> + '_ {
        self.members.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.members.contains(&id)
    }

    /// Append `id`. Returns the oldest member if this pushed the population
    /// over the cap.
    pub(crate) fn enrol(&mut self, id: EntityId) -> Option<EntityId> {
        self.members.push_back(id);
        match self.cap {
            Some(cap) if self.members.len() > cap => self.members.pop_front(),
            _ => None,
        }
    }

    /// Drop `id` from the population. Returns whether it was a member.
    pub(crate) fn forget(&mut self, id: EntityId) -> bool {
        match self.members.iter().position(|m| *m == id) {
            Some(index) => {
                self.members.remove(index);
                true
            }
            None => false,
        }
    }

    /// Draw links between `positions` with this linker's style.
    pub fn draw<C: DrawContext + ?Sized>(&self, ctx: &mut C, positions: &[Vec2]) -> usize {
        draw_links(ctx, positions, self.max_distance, self.color, self.line_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DrawCommand, RecordingContext};

    #[test]
    fn test_opacity_at_zero_distance_is_max() {
        assert_eq!(link_opacity(0.0, 150.0), Some(0.2));
    }

    #[test]
    fn test_no_link_at_or_beyond_threshold() {
        assert_eq!(link_opacity(150.0, 150.0), None);
        assert_eq!(link_opacity(151.0, 150.0), None);
        assert_eq!(link_opacity(0.0, 0.0), None);
    }

    #[test]
    fn test_opacity_fades_linearly() {
        let half = link_opacity(100.0, 200.0).unwrap();
        assert!((half - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_links_are_symmetric() {
        let a = Vec2::new(10.0, 20.0);
        let b = Vec2::new(70.0, 100.0);
        let ab = links(&[a, b], 200.0);
        let ba = links(&[b, a], 200.0);
        assert_eq!(ab.len(), 1);
        assert_eq!(ba.len(), 1);
        assert_eq!(ab[0].distance, ba[0].distance);
        assert_eq!(ab[0].weight, ba[0].weight);
    }

    #[test]
    fn test_links_enumerates_unordered_pairs() {
        let positions = [
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(20.0, 0.0),
            Vec2::new(1000.0, 0.0),
        ];
        let found = links(&positions, 50.0);
        let pairs: Vec<(usize, usize)> = found.iter().map(|l| (l.a, l.b)).collect();
        assert_eq!(pairs, vec![(0, 1), (0, 2), (1, 2)]);
        assert!(found.iter().all(|l| l.a < l.b));
    }

    #[test]
    fn test_draw_links_strokes_each_pair() {
        let mut ctx = RecordingContext::new();
        let positions = [Vec2::new(0.0, 0.0), Vec2::new(0.0, 0.0), Vec2::new(500.0, 0.0)];
        let n = draw_links(&mut ctx, &positions, 150.0, Color::WHITE.with_alpha(0.1), 1.0);

        assert_eq!(n, 1);
        assert_eq!(ctx.stroke_count(), 1);
        assert!(ctx.commands().contains(&DrawCommand::StrokeStyle(Color::WHITE.with_alpha(0.2))));
        assert!(ctx.commands().contains(&DrawCommand::LineWidth(1.0)));
    }

    #[test]
    fn test_enrol_evicts_past_cap() {
        let mut linker = ProximityLinker::new(100.0).with_cap(2);
        assert_eq!(linker.enrol(EntityId(1)), None);
        assert_eq!(linker.enrol(EntityId(2)), None);
        assert_eq!(linker.enrol(EntityId(3)), Some(EntityId(1)));
        assert_eq!(linker.members().collect::<Vec<_>>(), vec![EntityId(2), EntityId(3)]);
    }

    #[test]
    fn test_forget() {
        let mut linker = ProximityLinker::new(100.0);
        linker.enrol(EntityId(1));
        linker.enrol(EntityId(2));
        assert!(linker.forget(EntityId(1)));
        assert!(!linker.forget(EntityId(1)));
        assert_eq!(linker.len(), 1);
    }

    #[test]
    fn test_zero_cap_means_uncapped() {
        let mut linker = ProximityLinker::new(100.0).with_cap(0);
        for i in 0..100 {
            assert_eq!(linker.enrol(EntityId(i)), None);
        }
        assert_eq!(linker.cap(), None);
    }
}
