use std::f32::consts::{PI, TAU};

use super::{DrawContext, TextAlign, TextBaseline};
use crate::color::Color;
use crate::particle::{Particle, ShapeKind};

/// Translucent white outline around every geometric shape.
pub const OUTLINE_COLOR: Color = Color::rgba(255, 255, 255, 0.3);
pub const OUTLINE_WIDTH: f32 = 2.0;

const STAR_POINTS: usize = 5;
const GLYPH_GLOW_BLUR: f32 = 10.0;

/// Draw one particle. The context's transform and styles are restored
/// afterwards; the particle is not touched.
pub fn draw_particle<C: DrawContext + ?Sized>(ctx: &mut C, particle: &Particle) {
    let pos = particle.position();

    ctx.save();
    ctx.translate(pos.x, pos.y);
    ctx.rotate(particle.rotation());

    let size = particle.size();
    let color = particle.color();
    match particle.shape() {
        ShapeKind::Circle => draw_circle(ctx, size, color),
        ShapeKind::Square => draw_square(ctx, size, color),
        ShapeKind::Triangle => draw_triangle(ctx, size, color),
        ShapeKind::Star => draw_star(ctx, size, color),
        ShapeKind::Glyph => draw_glyph(ctx, size, color, particle.text()),
    }

    ctx.restore();
}

fn outline<C: DrawContext + ?Sized>(ctx: &mut C) {
    ctx.set_stroke_style(OUTLINE_COLOR);
    ctx.set_line_width(OUTLINE_WIDTH);
    ctx.stroke();
}

fn draw_circle<C: DrawContext + ?Sized>(ctx: &mut C, size: f32, color: Color) {
    ctx.begin_path();
    ctx.arc(0.0, 0.0, size, 0.0, TAU);
    ctx.set_fill_style(color);
    ctx.fill();
    outline(ctx);
}

fn draw_square<C: DrawContext + ?Sized>(ctx: &mut C, size: f32, color: Color) {
    ctx.set_fill_style(color);
    ctx.fill_rect(-size, -size, size * 2.0, size * 2.0);
    ctx.set_stroke_style(OUTLINE_COLOR);
    ctx.set_line_width(OUTLINE_WIDTH);
    ctx.stroke_rect(-size, -size, size * 2.0, size * 2.0);
}

fn draw_triangle<C: DrawContext + ?Sized>(ctx: &mut C, size: f32, color: Color) {
    ctx.begin_path();
    ctx.move_to(0.0, -size);
    ctx.line_to(size, size);
    ctx.line_to(-size, size);
    ctx.close_path();
    ctx.set_fill_style(color);
    ctx.fill();
    outline(ctx);
}

fn draw_star<C: DrawContext + ?Sized>(ctx: &mut C, size: f32, color: Color) {
    let outer = size;
    let inner = size / 2.0;
    let step = PI / STAR_POINTS as f32;

    ctx.begin_path();
    for i in 0..STAR_POINTS * 2 {
        let radius = if i % 2 == 0 { outer } else { inner };
        let angle = step * i as f32;
        let (x, y) = (angle.cos() * radius, angle.sin() * radius);
        if i == 0 {
            ctx.move_to(x, y);
        } else {
            ctx.line_to(x, y);
        }
    }
    ctx.close_path();
    ctx.set_fill_style(color);
    ctx.fill();
    outline(ctx);
}

fn draw_glyph<C: DrawContext + ?Sized>(ctx: &mut C, size: f32, color: Color, text: &str) {
    ctx.set_font(&format!("bold {size}px sans-serif"));
    ctx.set_fill_style(color);
    ctx.set_text_align(TextAlign::Center);
    ctx.set_text_baseline(TextBaseline::Middle);
    ctx.fill_text(text, 0.0, 0.0);

    // Glow pass
    ctx.set_shadow_blur(GLYPH_GLOW_BLUR);
    ctx.set_shadow_color(color);
    ctx.fill_text(text, 0.0, 0.0);
    ctx.set_shadow_blur(0.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::ParticleOptions;
    use crate::render::{DrawCommand, RecordingContext};
    use glam::Vec2;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn particle(shape: ShapeKind) -> Particle {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut opts = ParticleOptions::new()
            .with_shape(shape)
            .with_size(20.0)
            .with_rotation(0.5)
            .with_color(Color::rgb(0x4e, 0xcd, 0xc4));
        if shape == ShapeKind::Glyph {
            opts = opts.with_text("🌟");
        }
        Particle::new(Vec2::new(50.0, 60.0), &opts, &mut rng)
    }

    fn record(shape: ShapeKind) -> Vec<DrawCommand> {
        let mut ctx = RecordingContext::new();
        draw_particle(&mut ctx, &particle(shape));
        ctx.take()
    }

    #[test]
    fn test_transform_prologue_and_restore() {
        for shape in ShapeKind::ALL {
            let cmds = record(shape);
            assert_eq!(cmds[0], DrawCommand::Save);
            assert_eq!(cmds[1], DrawCommand::Translate { x: 50.0, y: 60.0 });
            assert_eq!(cmds[2], DrawCommand::Rotate(0.5));
            assert_eq!(cmds.last(), Some(&DrawCommand::Restore), "{shape}");
        }
    }

    #[test]
    fn test_circle_commands() {
        let cmds = record(ShapeKind::Circle);
        assert!(cmds.contains(&DrawCommand::Arc {
            x: 0.0,
            y: 0.0,
            radius: 20.0,
            start_angle: 0.0,
            end_angle: TAU,
        }));
        assert!(cmds.contains(&DrawCommand::StrokeStyle(OUTLINE_COLOR)));
        assert!(cmds.contains(&DrawCommand::LineWidth(2.0)));
        assert!(cmds.contains(&DrawCommand::Fill));
        assert!(cmds.contains(&DrawCommand::Stroke));
    }

    #[test]
    fn test_square_extent() {
        let cmds = record(ShapeKind::Square);
        let rect = DrawCommand::FillRect { x: -20.0, y: -20.0, width: 40.0, height: 40.0 };
        assert!(cmds.contains(&rect));
        assert!(cmds.contains(&DrawCommand::StrokeRect { x: -20.0, y: -20.0, width: 40.0, height: 40.0 }));
    }

    #[test]
    fn test_triangle_vertices() {
        let cmds = record(ShapeKind::Triangle);
        let path: Vec<_> = cmds
            .iter()
            .filter(|c| matches!(c, DrawCommand::MoveTo { .. } | DrawCommand::LineTo { .. }))
            .cloned()
            .collect();
        assert_eq!(
            path,
            vec![
                DrawCommand::MoveTo { x: 0.0, y: -20.0 },
                DrawCommand::LineTo { x: 20.0, y: 20.0 },
                DrawCommand::LineTo { x: -20.0, y: 20.0 },
            ]
        );
        assert!(cmds.contains(&DrawCommand::ClosePath));
    }

    #[test]
    fn test_star_alternates_radii() {
        let cmds = record(ShapeKind::Star);
        let points: Vec<Vec2> = cmds
            .iter()
            .filter_map(|c| match c {
                DrawCommand::MoveTo { x, y } | DrawCommand::LineTo { x, y } => Some(Vec2::new(*x, *y)),
                _ => None,
            })
            .collect();
        assert_eq!(points.len(), 10);
        for (i, p) in points.iter().enumerate() {
            let expected = if i % 2 == 0 { 20.0 } else { 10.0 };
            assert!((p.length() - expected).abs() < 1e-4, "vertex {i}");
        }
        // First vertex is the outer point on the +x axis
        assert!((points[0].x - 20.0).abs() < 1e-6);
        assert!(points[0].y.abs() < 1e-6);
    }

    #[test]
    fn test_glyph_two_passes_with_glow() {
        let cmds = record(ShapeKind::Glyph);
        let color = Color::rgb(0x4e, 0xcd, 0xc4);

        let texts = cmds
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillText { text, .. } if text == "🌟"))
            .count();
        assert_eq!(texts, 2);
        assert!(cmds.contains(&DrawCommand::Font("bold 20px sans-serif".into())));
        assert!(cmds.contains(&DrawCommand::TextAlign(TextAlign::Center)));
        assert!(cmds.contains(&DrawCommand::ShadowColor(color)));

        // Glow is switched on between the passes and off afterwards
        let blur_on = cmds.iter().position(|c| *c == DrawCommand::ShadowBlur(10.0)).unwrap();
        let blur_off = cmds.iter().position(|c| *c == DrawCommand::ShadowBlur(0.0)).unwrap();
        assert!(blur_on < blur_off);
        assert!(!cmds.contains(&DrawCommand::Stroke));
    }

    #[test]
    fn test_unknown_shape_name_draws_as_circle() {
        let mut rng = SmallRng::seed_from_u64(3);
        let opts = ParticleOptions::new().with_shape(ShapeKind::parse_lenient("blob"));
        let p = Particle::new(Vec2::new(50.0, 60.0), &opts, &mut rng);

        let mut ctx = RecordingContext::new();
        draw_particle(&mut ctx, &p);
        assert_eq!(ctx.count(|c| matches!(c, DrawCommand::Arc { .. })), 1);
    }
}
