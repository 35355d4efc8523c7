use crate::foundation::core::{Affine, Canvas, Rect, Rgba8Premul, Vec2};
use crate::foundation::error::{KinetypeError, KinetypeResult};
use crate::surface::font::{FontSource, LoadedFont};
use crate::surface::raster::{
    Tile, blur_radius_for_sigma, blur_rgba8_premul, fill_solid, over_tile_in_place,
};
use crate::surface::state::{DrawState, StateStack};
use crate::surface::text::TextShaper;
use crate::surface::{FrameRGBA, RasterSurface, Surface};

/// CPU raster surface: premultiplied RGBA8 pixels, Parley shaping, `vello_cpu` glyph fills.
///
/// Each draw call is rasterized into a tile covering its device-space bounds, blurred when the
/// current state carries a blur filter, and composited source-over with the global alpha.
pub struct CpuSurface {
    canvas: Canvas,
    pixels: Vec<u8>,
    state: StateStack,
    shaper: TextShaper,
    font: vello_cpu::peniko::FontData,
}

impl CpuSurface {
    pub fn new(canvas: Canvas, font: &LoadedFont) -> KinetypeResult<Self> {
        if canvas.width == 0 || canvas.height == 0 {
            return Err(KinetypeError::validation("canvas must be at least 1x1"));
        }
        if u16::try_from(canvas.width).is_err() || u16::try_from(canvas.height).is_err() {
            return Err(KinetypeError::validation(format!(
                "canvas {}x{} exceeds {}px per side",
                canvas.width,
                canvas.height,
                u16::MAX
            )));
        }

        let shaper = TextShaper::new(font)?;
        tracing::debug!(
            width = canvas.width,
            height = canvas.height,
            family = shaper.family_name(),
            "created cpu surface"
        );
        Ok(Self {
            canvas,
            pixels: vec![0u8; canvas.width as usize * canvas.height as usize * 4],
            state: StateStack::default(),
            shaper,
            font: vello_cpu::peniko::FontData::new(
                vello_cpu::peniko::Blob::from(font.bytes.as_ref().clone()),
                font.index,
            ),
        })
    }

    pub fn from_source(canvas: Canvas, source: &FontSource) -> KinetypeResult<Self> {
        Self::new(canvas, &source.load()?)
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

impl Surface for CpuSurface {
    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn state(&self) -> &StateStack {
        &self.state
    }

    fn state_mut(&mut self) -> &mut StateStack {
        &mut self.state
    }

    fn clear(&mut self) {
        fill_solid(&mut self.pixels, Rgba8Premul::transparent().to_array());
    }

    fn fill_rect(&mut self, rect: Rect) {
        let state = self.state.current().clone();
        let cpu_rect = vello_cpu::kurbo::Rect::new(rect.x0, rect.y0, rect.x1, rect.y1);
        let res = paint_tile(
            &mut self.pixels,
            self.canvas,
            &state,
            state.transform,
            rect,
            |ctx| ctx.fill_rect(&cpu_rect),
        );
        if let Err(e) = res {
            tracing::warn!(error = %e, "fill_rect skipped");
        }
    }

    fn measure_text(&mut self, text: &str) -> f64 {
        let font = self.state.current().font;
        f64::from(
            self.shaper
                .shape_line(text, font.size_px as f32, font.bold)
                .width,
        )
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        let state = self.state.current().clone();
        let size = state.font.size_px as f32;
        let shaped = self.shaper.shape_line(text, size, state.font.bold);
        if shaped.glyphs.is_empty() {
            return;
        }

        let width = f64::from(shaped.width);
        let top_of_middle = f64::from(shaped.baseline - shaped.middle_above_baseline());
        let placement = state.transform * Affine::translate(Vec2::new(x - width / 2.0, y - top_of_middle));

        // Generous margins: italic/bold overhang and accents can leave the advance box.
        let margin = f64::from(size) * 0.25;
        let bounds = Rect::new(
            -margin,
            f64::from(shaped.baseline - shaped.ascent) - margin,
            width + margin,
            f64::from(shaped.baseline + shaped.descent) + margin,
        );

        let font = self.font.clone();
        let res = paint_tile(&mut self.pixels, self.canvas, &state, placement, bounds, |ctx| {
            let glyphs = shaped.glyphs.iter().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            ctx.glyph_run(&font).font_size(size).fill_glyphs(glyphs);
        });
        if let Err(e) = res {
            tracing::warn!(error = %e, "fill_text skipped");
        }
    }
}

impl RasterSurface for CpuSurface {
    fn snapshot(&self) -> FrameRGBA {
        FrameRGBA {
            width: self.canvas.width,
            height: self.canvas.height,
            data: self.pixels.clone(),
            premultiplied: true,
        }
    }
}

/// Rasterize one draw into a device-space tile and composite it onto `pixels`.
///
/// `local_bounds` must contain everything `draw` paints in the space `transform` maps from.
fn paint_tile(
    pixels: &mut [u8],
    canvas: Canvas,
    state: &DrawState,
    transform: Affine,
    local_bounds: Rect,
    draw: impl FnOnce(&mut vello_cpu::RenderContext),
) -> KinetypeResult<()> {
    if state.alpha <= 0.0 || state.fill.a == 0 {
        return Ok(());
    }

    let sigma = state.blur_px as f32;
    let pad = f64::from(blur_radius_for_sigma(sigma)) + 1.0;
    let device = transform
        .transform_rect_bbox(local_bounds)
        .inflate(pad, pad);
    let clipped = device.intersect(Rect::new(
        0.0,
        0.0,
        f64::from(canvas.width),
        f64::from(canvas.height),
    ));
    if !clipped.is_finite() || clipped.width() <= 0.0 || clipped.height() <= 0.0 {
        return Ok(());
    }

    let x0 = clipped.x0.floor();
    let y0 = clipped.y0.floor();
    let w = (clipped.x1.ceil() - x0) as u32;
    let h = (clipped.y1.ceil() - y0) as u32;
    let (w16, h16) = match (u16::try_from(w), u16::try_from(h)) {
        (Ok(w16), Ok(h16)) if w16 > 0 && h16 > 0 => (w16, h16),
        _ => return Ok(()),
    };

    let mut ctx = vello_cpu::RenderContext::new(w16, h16);
    let to_tile = Affine::translate(Vec2::new(-x0, -y0)) * transform;
    ctx.set_transform(affine_to_cpu(to_tile));
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
        state.fill.r,
        state.fill.g,
        state.fill.b,
        state.fill.a,
    ));
    draw(&mut ctx);
    ctx.flush();

    let mut pixmap = vello_cpu::Pixmap::new(w16, h16);
    ctx.render_to_pixmap(&mut pixmap);

    let blurred;
    let data = if sigma > 0.0 {
        blurred = blur_rgba8_premul(pixmap.data_as_u8_slice(), w, h, sigma)?;
        blurred.as_slice()
    } else {
        pixmap.data_as_u8_slice()
    };

    over_tile_in_place(
        pixels,
        canvas.width,
        canvas.height,
        &Tile {
            data,
            width: w,
            height: h,
            x: x0 as i64,
            y: y0 as i64,
        },
        state.alpha as f32,
    )
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

#[cfg(test)]
#[path = "../../tests/unit/surface/cpu.rs"]
mod tests;
