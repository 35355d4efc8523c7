//! Raster surface contract and implementations.
//!
//! The renderer only talks to [`Surface`]; it never creates or destroys one. Every transient
//! drawing property (fill, alpha, transform, blur, font) lives in a [`StateStack`] so callers can
//! scope changes with `save`/`restore` exactly like a 2D canvas context.

pub(crate) mod cpu;
pub(crate) mod font;
pub(crate) mod raster;
pub(crate) mod record;
pub(crate) mod state;
pub(crate) mod text;

use crate::foundation::core::{Canvas, Rect, Rgba8};
use crate::surface::state::{FontSpec, StateStack};

/// A 2D drawing surface with text metrics.
///
/// Implementors provide the state stack plus the four primitive draw/measure operations; all
/// state setters are provided methods that write into the stack.
pub trait Surface {
    /// Surface size in pixels.
    fn canvas(&self) -> Canvas;

    fn state(&self) -> &StateStack;

    fn state_mut(&mut self) -> &mut StateStack;

    /// Reset every pixel to transparent.
    fn clear(&mut self);

    /// Fill `rect` (in user space) with the current fill color, alpha and transform.
    fn fill_rect(&mut self, rect: Rect);

    /// Advance width in pixels of `text` shaped with the current font.
    ///
    /// Shaping is applied to the whole string, so the width of a prefix reflects kerning and
    /// ligatures rather than a sum of isolated glyph widths.
    fn measure_text(&mut self, text: &str) -> f64;

    /// Draw `text` horizontally centered on `x` with its vertical middle on `y`.
    fn fill_text(&mut self, text: &str, x: f64, y: f64);

    fn save(&mut self) {
        self.state_mut().save();
    }

    fn restore(&mut self) {
        self.state_mut().restore();
    }

    fn set_fill(&mut self, color: Rgba8) {
        self.state_mut().set_fill(color);
    }

    fn set_alpha(&mut self, alpha: f64) {
        self.state_mut().set_alpha(alpha);
    }

    fn set_blur(&mut self, px: f64) {
        self.state_mut().set_blur(px);
    }

    fn set_font(&mut self, font: FontSpec) {
        self.state_mut().set_font(font);
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.state_mut().translate(dx, dy);
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.state_mut().scale(sx, sy);
    }

    fn rotate(&mut self, radians: f64) {
        self.state_mut().rotate(radians);
    }
}

/// A rendered frame as RGBA8 pixels.
///
/// Frames read back from a [`RasterSurface`] are **premultiplied**; the flag makes that explicit
/// at API boundaries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Return straight-alpha RGBA8 bytes, the layout image encoders expect.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        if !self.premultiplied {
            return out;
        }
        for px in out.chunks_exact_mut(4) {
            let a = u32::from(px[3]);
            if a == 0 {
                px[0] = 0;
                px[1] = 0;
                px[2] = 0;
                continue;
            }
            if a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }
}

/// A surface whose pixels can be read back, as needed for export.
pub trait RasterSurface: Surface {
    fn snapshot(&self) -> FrameRGBA;
}

#[cfg(test)]
#[path = "../../tests/unit/surface/frame.rs"]
mod tests;
