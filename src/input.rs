//! Pointer input from winit window events.
//!
//! [`Input`] folds raw window events into the little state the animation
//! needs: the latest pointer position (mouse or touch, last write wins), the
//! taps/clicks since the last frame, and the surface size.
//!
//! ```ignore
//! // In the window event handler:
//! input.handle_event(&event);
//!
//! // Once per frame:
//! for at in input.drain_taps() {
//!     board.spawn_at(at);
//! }
//! ```

use glam::Vec2;
use winit::event::{ElementState, MouseButton, TouchPhase, WindowEvent};

use crate::kinematics::Bounds;
use crate::pointer::PointerState;

/// Pointer and surface state collected from window events.
#[derive(Debug, Clone, Default)]
pub struct Input {
    pointer: PointerState,
    /// Taps and primary clicks since the last drain, oldest first.
    taps: Vec<Vec2>,
    surface: Bounds,
    /// Surface size before the last unacknowledged resize.
    resized_from: Option<Bounds>,
}

impl Input {
    /// Input tracker for a surface of the given size.
    pub fn new(surface: Bounds) -> Self {
        Self {
            surface,
            ..Default::default()
        }
    }

    // ========== Queries ==========

    /// Latest pointer position.
    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    /// Current surface size.
    pub fn surface(&self) -> Bounds {
        self.surface
    }

    /// Taps recorded since the last [`drain_taps`](Self::drain_taps).
    pub fn taps(&self) -> &[Vec2] {
        &self.taps
    }

    /// Take the recorded taps.
    pub fn drain_taps(&mut self) -> Vec<Vec2> {
        std::mem::take(&mut self.taps)
    }

    /// If the surface was resized since the last call, the `(old, new)` sizes.
    pub fn take_resize(&mut self) -> Option<(Bounds, Bounds)> {
        self.resized_from.take().map(|old| (old, self.surface))
    }

    // ========== Updates ==========

    /// Move the pointer.
    pub fn pointer_moved(&mut self, at: Vec2) {
        self.pointer.set(at);
    }

    /// A click or touch start at `at`. Also moves the pointer there.
    pub fn tap(&mut self, at: Vec2) {
        self.pointer.set(at);
        self.taps.push(at);
    }

    /// The surface changed size.
    pub fn resize(&mut self, surface: Bounds) {
        if surface == self.surface {
            return;
        }
        // Keep the oldest size so several resizes between frames collapse
        // into one.
        self.resized_from.get_or_insert(self.surface);
        self.surface = surface;
    }

    /// Process a winit window event.
    pub fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.pointer_moved(Vec2::new(position.x as f32, position.y as f32));
            }

            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                if let Some(at) = self.pointer.position() {
                    self.tap(at);
                }
            }

            WindowEvent::Touch(touch) => {
                let at = Vec2::new(touch.location.x as f32, touch.location.y as f32);
                match touch.phase {
                    TouchPhase::Started => self.tap(at),
                    TouchPhase::Moved => self.pointer_moved(at),
                    TouchPhase::Ended | TouchPhase::Cancelled => {}
                }
            }

            WindowEvent::Resized(size) => {
                self.resize(Bounds::new(size.width as f32, size.height as f32));
            }

            _ => {}
        }
    }
}
