//! Drawing.
//!
//! The crate never talks to a window or GPU directly. Everything is drawn
//! through [`DrawContext`], a small immediate-mode command surface shaped like
//! an HTML canvas 2D context: a transform stack, fill/stroke styles, paths,
//! and text with a shadow/glow.
//!
//! Backends implement [`DrawContext`]. [`RecordingContext`] records the
//! calls as [`DrawCommand`]s, which is what the tests and the headless binary
//! use.

mod recording;
mod shapes;

pub use recording::{DrawCommand, RecordingContext};
pub use shapes::{draw_particle, OUTLINE_COLOR, OUTLINE_WIDTH};

use crate::color::Color;

/// Horizontal anchor for [`DrawContext::fill_text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Start,
    Center,
    End,
}

/// Vertical anchor for [`DrawContext::fill_text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextBaseline {
    #[default]
    Alphabetic,
    Middle,
    Top,
    Bottom,
}

/// A 2D immediate-mode drawing surface.
///
/// Coordinates are in surface units with the origin top-left and y pointing
/// down. Angles are radians, clockwise on screen.
pub trait DrawContext {
    // ========== Transform stack ==========

    /// Push the current transform and styles.
    fn save(&mut self);
    /// Pop the transform and styles pushed by the matching [`save`](Self::save).
    fn restore(&mut self);
    fn translate(&mut self, x: f32, y: f32);
    fn rotate(&mut self, angle: f32);

    // ========== Styles ==========

    fn set_fill_style(&mut self, color: Color);
    fn set_stroke_style(&mut self, color: Color);
    fn set_line_width(&mut self, width: f32);

    // ========== Rectangles ==========

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32);
    fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32);

    // ========== Paths ==========

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f32, y: f32);
    fn line_to(&mut self, x: f32, y: f32);
    fn arc(&mut self, x: f32, y: f32, radius: f32, start_angle: f32, end_angle: f32);
    fn close_path(&mut self);
    fn fill(&mut self);
    fn stroke(&mut self);

    // ========== Text ==========

    /// CSS font shorthand, e.g. `"bold 30px sans-serif"`.
    fn set_font(&mut self, font: &str);
    fn set_text_align(&mut self, align: TextAlign);
    fn set_text_baseline(&mut self, baseline: TextBaseline);
    fn fill_text(&mut self, text: &str, x: f32, y: f32);

    // ========== Shadow ==========

    /// Blur radius of the shadow drawn under fills. `0` disables it.
    fn set_shadow_blur(&mut self, blur: f32);
    fn set_shadow_color(&mut self, color: Color);
}
