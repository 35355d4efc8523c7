use std::borrow::Cow;

use crate::foundation::error::{KinetypeError, KinetypeResult};
use crate::surface::font::LoadedFont;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ShapedGlyph {
    pub id: u32,
    pub x: f32,
    pub y: f32,
}

/// A single shaped line in layout space (origin at the top-left of the line box).
#[derive(Clone, Debug, Default)]
pub(crate) struct ShapedLine {
    /// Advance width including trailing whitespace.
    pub width: f32,
    pub ascent: f32,
    pub descent: f32,
    /// Alphabetic baseline, measured down from the top of the line box.
    pub baseline: f32,
    pub glyphs: Vec<ShapedGlyph>,
}

impl ShapedLine {
    /// Offset from the alphabetic baseline up to the middle of the em box.
    pub fn middle_above_baseline(&self) -> f32 {
        (self.ascent - self.descent) / 2.0
    }
}

/// Stateful helper for shaping single lines with Parley against one registered font.
pub(crate) struct TextShaper {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    family_name: String,
}

impl TextShaper {
    pub fn new(font: &LoadedFont) -> KinetypeResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx.collection.register_fonts(
            parley::fontique::Blob::from(font.bytes.as_ref().clone()),
            None,
        );
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            KinetypeError::validation("no font families registered from font bytes")
        })?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| KinetypeError::validation("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
        })
    }

    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    pub fn shape_line(&mut self, text: &str, size_px: f32, bold: bool) -> ShapedLine {
        if text.is_empty() || !size_px.is_finite() || size_px <= 0.0 {
            return ShapedLine::default();
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::FontWeight(if bold {
            parley::style::FontWeight::BOLD
        } else {
            parley::style::FontWeight::NORMAL
        }));

        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);

        let mut out = ShapedLine {
            width: layout.full_width(),
            ..ShapedLine::default()
        };
        for (i, line) in layout.lines().enumerate() {
            if i == 0 {
                let m = line.metrics();
                out.ascent = m.ascent;
                out.descent = m.descent;
                out.baseline = m.baseline;
            }
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                out.glyphs
                    .extend(run.positioned_glyphs().map(|g| ShapedGlyph {
                        id: g.id,
                        x: g.x,
                        y: g.y,
                    }));
            }
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/text.rs"]
mod tests;
