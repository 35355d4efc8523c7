//! Per-character transforms.
//!
//! Each transform mutates only the surface's transient state (fill, alpha, transform, blur) and
//! issues one or more `fill_text` calls. Distances are expressed in font sizes or canvas sizes so
//! an effect looks the same at any resolution.

use std::f64::consts::PI;

use crate::animation::ease::Ease;
use crate::foundation::core::{Canvas, Point, Rgba8};
use crate::foundation::math::Rng64;
use crate::surface::Surface;

const GLITCH_RED: Rgba8 = Rgba8::opaque(0xff, 0x00, 0x3c);
const GLITCH_CYAN: Rgba8 = Rgba8::opaque(0x00, 0xf0, 0xff);
/// Horizontal split, in pixels, of the glitch color ghosts.
const GLITCH_SPLIT_PX: f64 = 4.0;

/// Everything a transform knows about the character it draws.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CharFrame<'a> {
    pub text: &'a str,
    pub anchor: Point,
    /// Staggered progress of this character.
    pub local: f64,
    /// Un-staggered progress of the whole text.
    pub global: f64,
    pub font_size_px: f64,
    pub text_color: Rgba8,
    pub canvas: Canvas,
    pub index_in_text: usize,
    pub index_in_line: usize,
    pub line_len: usize,
}

impl CharFrame<'_> {
    fn draw_at(&self, surface: &mut dyn Surface, x: f64, y: f64) {
        surface.fill_text(self.text, x, y);
    }

    fn draw(&self, surface: &mut dyn Surface) {
        self.draw_at(surface, self.anchor.x, self.anchor.y);
    }

    /// Move the origin to the anchor and draw there, so scale/rotate pivot on the glyph center.
    fn draw_pivoted(&self, surface: &mut dyn Surface, transform: impl FnOnce(&mut dyn Surface)) {
        surface.translate(self.anchor.x, self.anchor.y);
        transform(surface);
        self.draw_at(surface, 0.0, 0.0);
    }
}

pub(crate) fn typewriter(surface: &mut dyn Surface, f: &CharFrame<'_>) {
    surface.set_alpha(if f.local > 0.0 { 1.0 } else { 0.0 });
    f.draw(surface);
}

pub(crate) fn fade(surface: &mut dyn Surface, f: &CharFrame<'_>) {
    surface.set_alpha(f.local);
    f.draw(surface);
}

pub(crate) fn slide_up(surface: &mut dyn Surface, f: &CharFrame<'_>) {
    let e = Ease::OutCubic.apply(f.local);
    surface.set_alpha(f.local);
    f.draw_at(
        surface,
        f.anchor.x,
        f.anchor.y + (1.0 - e) * f.font_size_px * 0.8,
    );
}

pub(crate) fn pop_in(surface: &mut dyn Surface, f: &CharFrame<'_>) {
    let s = Ease::OutBack.apply(f.local).max(0.0);
    surface.set_alpha(f.local);
    f.draw_pivoted(surface, |sf| sf.scale(s, s));
}

pub(crate) fn blur(surface: &mut dyn Surface, f: &CharFrame<'_>) {
    surface.set_blur((1.0 - f.local) * f.font_size_px * 0.2);
    surface.set_alpha(f.local);
    f.draw(surface);
}

/// Jittered, flickering draw with occasional red/cyan ghosts until the character settles.
pub(crate) fn glitch(surface: &mut dyn Surface, f: &CharFrame<'_>, rng: &mut Rng64) {
    if f.local >= 1.0 {
        f.draw(surface);
        return;
    }

    let noise = rng.next_f64_01();
    let x = f.anchor.x + (rng.next_f64_01() - 0.5) * f.font_size_px * 0.3;
    let y = f.anchor.y + (rng.next_f64_01() - 0.5) * f.font_size_px * 0.1;

    if noise > 0.7 {
        surface.set_fill(GLITCH_RED);
        f.draw_at(surface, x + GLITCH_SPLIT_PX, y);
        surface.set_fill(GLITCH_CYAN);
        f.draw_at(surface, x - GLITCH_SPLIT_PX, y);
    }
    surface.set_fill(f.text_color);
    surface.set_alpha(rng.next_f64_01() * 0.5 + 0.5);
    f.draw_at(surface, x, y);
}

pub(crate) fn elastic_drop(surface: &mut dyn Surface, f: &CharFrame<'_>) {
    let e = Ease::OutElastic.apply(f.local);
    surface.set_alpha((f.local * 3.0).min(1.0));
    let drop = f64::from(f.canvas.height) / 2.0 * (1.0 - e);
    f.draw_at(surface, f.anchor.x, f.anchor.y - drop);
}

/// Characters start spread away from the canvas center and blurred, then converge.
pub(crate) fn tracking_in(surface: &mut dyn Surface, f: &CharFrame<'_>) {
    let e = Ease::OutQuart.apply(f.local);
    let cx = f.canvas.center().x;
    let x = cx + (f.anchor.x - cx) * (1.0 + (1.0 - e) * 3.0);
    surface.set_alpha(f.local);
    surface.set_blur((1.0 - e) * 8.0);
    f.draw_at(surface, x, f.anchor.y);
}

pub(crate) fn focus_blur(surface: &mut dyn Surface, f: &CharFrame<'_>) {
    let e = Ease::OutCubic.apply(f.local);
    surface.set_alpha(f.local);
    surface.set_blur((1.0 - e) * 20.0);
    let s = 1.0 + (1.0 - e) * 2.0;
    f.draw_pivoted(surface, |sf| sf.scale(s, s));
}

/// Vertical sine ripple driven by global progress, damped as each character settles.
pub(crate) fn wave(surface: &mut dyn Surface, f: &CharFrame<'_>) {
    let e = Ease::OutCubic.apply(f.local);
    surface.set_alpha(f.local);
    let phase = f.index_in_text as f64 * 0.5 + f.global * PI * 10.0;
    let dy = phase.sin() * f.font_size_px * 0.5 * (1.0 - e);
    f.draw_at(surface, f.anchor.x, f.anchor.y + dy);
}

/// Pseudo-random fraction in `[0, 1)` derived from a character index; stable across frames.
pub(crate) fn index_hash(index: usize, freq: f64, wave: fn(f64) -> f64) -> f64 {
    (wave(index as f64 * freq) * 43758.5453).abs().fract()
}

/// Characters fly in from scattered, rotated positions.
pub(crate) fn shatter_in(surface: &mut dyn Surface, f: &CharFrame<'_>) {
    let e = Ease::OutCubic.apply(f.local);
    let rest = 1.0 - e;
    let i = f.index_in_text;
    let ox = (index_hash(i, 12.9898, f64::sin) - 0.5) * f64::from(f.canvas.width);
    let oy = (index_hash(i, 78.233, f64::cos) - 0.5) * f64::from(f.canvas.height);
    let rot = (index_hash(i, 45.123, f64::sin) - 0.5) * PI * 4.0;

    surface.set_alpha(f.local);
    surface.translate(f.anchor.x + ox * rest, f.anchor.y + oy * rest);
    surface.rotate(rot * rest);
    f.draw_at(surface, 0.0, 0.0);
}

/// Random on/off flicker with a glow while revealing, then a steady soft glow.
pub(crate) fn neon_flicker(surface: &mut dyn Surface, f: &CharFrame<'_>, rng: &mut Rng64) {
    let (alpha, glow_px) = if f.local < 1.0 {
        let lit = rng.next_f64_01() > 0.5;
        if lit {
            (f.local, 20.0)
        } else {
            (0.2 * f.local, 0.0)
        }
    } else {
        (1.0, 10.0)
    };

    surface.set_alpha(alpha);
    if glow_px > 0.0 {
        // Glow radius is a shadow blur; sigma is half of it.
        surface.save();
        surface.set_fill(f.text_color);
        surface.set_blur(glow_px / 2.0);
        f.draw(surface);
        surface.restore();
    }
    f.draw(surface);
}

pub(crate) fn stretch_snap(surface: &mut dyn Surface, f: &CharFrame<'_>) {
    let e = Ease::OutQuart.apply(f.local);
    surface.set_alpha(f.local);
    let sx = 1.0 - (1.0 - e) * 0.5;
    let sy = 1.0 + (1.0 - e) * 4.0;
    f.draw_pivoted(surface, |sf| sf.scale(sx, sy));
}

/// Letters spread apart from each line's center over the whole animation.
pub(crate) fn increase_tracking(surface: &mut dyn Surface, f: &CharFrame<'_>) {
    let fade = (f.local / 0.9).min(1.0);
    let tracking = Ease::OutCubic.apply(f.global);
    let center = (f.line_len as f64 - 1.0) / 2.0;
    let step = f.font_size_px * 0.14;
    let dx = (f.index_in_line as f64 - center) * step * tracking;
    surface.set_alpha(fade);
    f.draw_at(surface, f.anchor.x + dx, f.anchor.y);
}

#[cfg(test)]
#[path = "../../tests/unit/effects/transforms.rs"]
mod tests;
