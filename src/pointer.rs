//! The pointer field: how a particle reacts to the pointer.
//!
//! Close to the pointer a particle is pushed away, further out it is gently
//! pulled in, and beyond that it is unaffected:
//!
//! | distance           | effect                                        |
//! |--------------------|-----------------------------------------------|
//! | `0`                | none (no direction to push along)             |
//! | `(0, 150)`         | repel, up to 2 units/frame at the pointer     |
//! | `[150, 300)`       | attract, proportional to the offset           |
//! | `>= 300`           | none                                          |

use glam::Vec2;

/// Inside this distance particles are pushed away.
pub const REPEL_RADIUS: f32 = 150.0;

/// Inside this distance (and outside [`REPEL_RADIUS`]) particles are pulled in.
pub const ATTRACT_RADIUS: f32 = 300.0;

/// Strongest push, reached right next to the pointer.
pub const REPEL_STRENGTH: f32 = 2.0;

/// Last known pointer position, in surface coordinates.
///
/// `None` until the first pointer event arrives. Updates are last-write-wins.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    position: Option<Vec2>,
}

impl PointerState {
    /// A pointer at `position`.
    pub fn at(position: Vec2) -> Self {
        Self {
            position: Some(position),
        }
    }

    /// No pointer: particles feel no field.
    pub fn absent() -> Self {
        Self::default()
    }

    #[inline]
    pub fn position(&self) -> Option<Vec2> {
        self.position
    }

    pub fn set(&mut self, position: Vec2) {
        self.position = Some(position);
    }

    pub fn clear(&mut self) {
        self.position = None;
    }
}

/// Velocity change for a particle at `position` with the given spring strength.
pub fn field_impulse(pointer: &PointerState, position: Vec2, spring_strength: f32) -> Vec2 {
    let Some(pointer) = pointer.position() else {
        return Vec2::ZERO;
    };

    let offset = pointer - position;
    let distance = offset.length();

    if distance < REPEL_RADIUS {
        if distance <= 0.0 {
            return Vec2::ZERO;
        }
        let force = (REPEL_RADIUS - distance) / REPEL_RADIUS;
        -(offset / distance) * force * REPEL_STRENGTH
    } else if distance < ATTRACT_RADIUS {
        offset * spring_strength
    } else {
        Vec2::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_pointer_has_no_effect() {
        let impulse = field_impulse(&PointerState::absent(), Vec2::new(10.0, 10.0), 0.01);
        assert_eq!(impulse, Vec2::ZERO);
    }

    #[test]
    fn test_zero_distance_has_no_effect() {
        let p = Vec2::new(100.0, 100.0);
        assert_eq!(field_impulse(&PointerState::at(p), p, 0.01), Vec2::ZERO);
    }

    #[test]
    fn test_repel_pushes_away() {
        // Pointer left of particle by 75: half strength, pushed to the right
        let impulse = field_impulse(
            &PointerState::at(Vec2::new(25.0, 100.0)),
            Vec2::new(100.0, 100.0),
            0.01,
        );
        assert!((impulse.x - 1.0).abs() < 1e-6);
        assert!(impulse.y.abs() < 1e-6);
    }

    #[test]
    fn test_repel_near_pointer_approaches_max() {
        let impulse = field_impulse(
            &PointerState::at(Vec2::new(100.0, 100.0)),
            Vec2::new(100.0, 100.001),
            0.01,
        );
        assert!(impulse.length() <= REPEL_STRENGTH);
        assert!(impulse.length() > 1.99);
        assert!(impulse.y > 0.0);
    }

    #[test]
    fn test_attract_pulls_toward_pointer() {
        let impulse = field_impulse(
            &PointerState::at(Vec2::new(300.0, 100.0)),
            Vec2::new(100.0, 100.0),
            0.01,
        );
        assert!((impulse.x - 2.0).abs() < 1e-6);
        assert_eq!(impulse.y, 0.0);
    }

    #[test]
    fn test_attract_boundary_is_exclusive() {
        let at_150 = field_impulse(&PointerState::at(Vec2::new(150.0, 0.0)), Vec2::ZERO, 0.01);
        assert!((at_150.x - 1.5).abs() < 1e-6, "150 is in the attract band");

        let at_300 = field_impulse(&PointerState::at(Vec2::new(300.0, 0.0)), Vec2::ZERO, 0.01);
        assert_eq!(at_300, Vec2::ZERO);
    }

    #[test]
    fn test_pointer_state_last_write_wins() {
        let mut pointer = PointerState::default();
        assert_eq!(pointer.position(), None);
        pointer.set(Vec2::new(1.0, 2.0));
        pointer.set(Vec2::new(3.0, 4.0));
        assert_eq!(pointer.position(), Some(Vec2::new(3.0, 4.0)));
        pointer.clear();
        assert_eq!(pointer.position(), None);
    }
}
