//! Canvas2D presentation sink
//!
//! Read-only consumer of `RoundState`: draws the playfield, the falling
//! items, and the catcher once per frame. Nothing here writes back into
//! the simulation.

use glam::Vec2;
use web_sys::CanvasRenderingContext2d;

use crate::sim::{FallingItem, KindClass, RoundPhase, RoundState};

/// Glyph sizing relative to item radius
const GLYPH_SCALE: f32 = 1.5;
/// Pixel amplitude of the shake offset per second of remaining shake timer
const SHAKE_AMPLITUDE: f32 = 10.0;

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    /// Logical (CSS pixel) size
    size: Vec2,
}

impl CanvasRenderer {
    pub fn new(ctx: CanvasRenderingContext2d, width: f32, height: f32) -> Self {
        Self {
            ctx,
            size: Vec2::new(width, height),
        }
    }

    /// Adopt a new canvas size. Changing the backing store resets the
    /// context transform, so the DPR scale has to be applied again.
    pub fn resize(&mut self, width: f32, height: f32, dpr: f64) {
        self.size = Vec2::new(width, height);
        let _ = self.ctx.scale(dpr, dpr);
    }

    /// Draw one frame of the given round
    pub fn render(&self, state: &RoundState, shake_enabled: bool) {
        let ctx = &self.ctx;
        ctx.clear_rect(0.0, 0.0, self.size.x as f64, self.size.y as f64);

        ctx.save();

        // Transient shake offset; cosmetic, so plain Math.random is fine here
        if shake_enabled && state.shake > 0.0 {
            let amp = (state.shake * SHAKE_AMPLITUDE) as f64;
            let dx = (js_sys::Math::random() - 0.5) * amp;
            let dy = (js_sys::Math::random() - 0.5) * amp;
            let _ = ctx.translate(dx, dy);
        }

        self.draw_background();

        for item in &state.items {
            self.draw_item(item);
        }

        self.draw_banner(state);
        self.draw_catcher(state);

        ctx.restore();
    }

    /// Faint notebook-paper rules so the playfield isn't a void
    fn draw_background(&self) {
        let ctx = &self.ctx;
        ctx.save();
        ctx.set_global_alpha(0.08);
        ctx.set_stroke_style_str("#ffffff");
        ctx.set_line_width(1.0);

        let spacing = 40.0;
        let mut y = spacing;
        while y < self.size.y as f64 {
            ctx.begin_path();
            ctx.move_to(0.0, y);
            ctx.line_to(self.size.x as f64, y);
            ctx.stroke();
            y += spacing;
        }
        ctx.restore();
    }

    fn draw_item(&self, item: &FallingItem) {
        let ctx = &self.ctx;
        let profile = item.kind.profile();

        ctx.save();
        let _ = ctx.translate(item.pos.x as f64, item.pos.y as f64);
        let _ = ctx.rotate(item.rotation as f64);

        ctx.set_font(&format!("{}px Arial", item.radius * GLYPH_SCALE));
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");

        // The bonus kind gets a golden glow
        if profile.class == KindClass::Bonus {
            ctx.set_shadow_color("#FFD700");
            ctx.set_shadow_blur(10.0);
        }

        ctx.set_fill_style_str("#ffffff");
        let _ = ctx.fill_text(profile.glyph, 0.0, 0.0);

        ctx.restore();
    }

    fn draw_banner(&self, state: &RoundState) {
        let ctx = &self.ctx;
        let text = match state.phase {
            RoundPhase::NotStarted => "Press Space to start!",
            _ => "Help Colin collect school supplies!",
        };

        ctx.save();
        ctx.set_fill_style_str("#ffffff");
        ctx.set_font("bold 32px \"Comic Sans MS\", cursive, sans-serif");
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        ctx.set_shadow_color("rgba(0, 0, 0, 0.5)");
        ctx.set_shadow_blur(4.0);
        ctx.set_shadow_offset_x(2.0);
        ctx.set_shadow_offset_y(2.0);
        let _ = ctx.fill_text(text, self.size.x as f64 / 2.0, 50.0);
        ctx.restore();
    }

    fn draw_catcher(&self, state: &RoundState) {
        let ctx = &self.ctx;
        let catcher = &state.catcher;

        ctx.save();
        ctx.set_fill_style_str("#4ecdc4");
        ctx.fill_rect(
            catcher.pos.x as f64,
            catcher.pos.y as f64,
            catcher.size.x as f64,
            catcher.size.y as f64,
        );

        ctx.set_fill_style_str("#ffffff");
        ctx.set_font("32px Arial");
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        let center = catcher.pos + catcher.size / 2.0;
        let _ = ctx.fill_text("\u{1F392}", center.x as f64, center.y as f64);
        ctx.restore();
    }
}
