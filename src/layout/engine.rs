use crate::foundation::core::{Canvas, HorizontalAlign, Point, StyleParams};
use crate::surface::Surface;
use crate::surface::state::FontSpec;

/// Line height as a multiple of the font size.
pub const LINE_HEIGHT_EM: f64 = 1.2;

/// Horizontal inset, in font sizes, of left/right aligned lines.
pub const EDGE_PADDING_EM: f64 = 1.0;

/// Placement of one line of the text block.
#[derive(Clone, Debug, PartialEq)]
pub struct LineLayout {
    pub index: usize,
    pub text: String,
    /// Shaped advance width of the whole line.
    pub width: f64,
    pub start_x: f64,
    /// Vertical middle of the line; characters are drawn centered on it.
    pub baseline_y: f64,
    /// Number of characters on the line.
    pub len: usize,
}

/// Placement of one character.
#[derive(Clone, Debug, PartialEq)]
pub struct CharLayout {
    pub ch: char,
    pub line_index: usize,
    pub index_in_line: usize,
    /// Reading-order index across the whole block; drives stagger timing.
    pub index_in_text: usize,
    /// Horizontal center of the glyph and the line's middle baseline.
    pub anchor: Point,
    pub width_px: f64,
}

/// Layout of a text block on a canvas, recomputed for every frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextLayout {
    pub lines: Vec<LineLayout>,
    pub chars: Vec<CharLayout>,
    pub line_height: f64,
    pub total_height: f64,
}

impl TextLayout {
    pub fn char_count(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn line_len(&self, line_index: usize) -> usize {
        self.lines.get(line_index).map_or(0, |l| l.len)
    }
}

/// Split `text` into lines on `\n`, tolerating `\r\n`; empty lines are kept.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

/// Lay out `text` with the bold text font at `style.font_size_px`.
///
/// Character anchors come from shaped prefix widths: the center of character `i` sits halfway
/// between the advance of `line[..i]` and the advance of `line[..=i]`, so kerning and ligature
/// adjustments move anchors exactly as they move the shaped glyphs. The surface's drawing state
/// is left as it was found.
pub fn layout_text<S: Surface + ?Sized>(
    surface: &mut S,
    text: &str,
    style: &StyleParams,
    canvas: Canvas,
) -> TextLayout {
    let fs = style.font_size_px;
    let line_height = fs * LINE_HEIGHT_EM;
    let lines = split_lines(text);
    let total_height = lines.len() as f64 * line_height;

    if text.is_empty() {
        return TextLayout {
            lines: Vec::new(),
            chars: Vec::new(),
            line_height,
            total_height: 0.0,
        };
    }

    surface.save();
    surface.set_font(FontSpec {
        size_px: fs,
        bold: true,
    });

    let width = f64::from(canvas.width);
    let padding = fs * EDGE_PADDING_EM;
    let mut y = (f64::from(canvas.height) - total_height) / 2.0 + line_height / 2.0;
    let mut out = TextLayout {
        lines: Vec::with_capacity(lines.len()),
        chars: Vec::new(),
        line_height,
        total_height,
    };

    for (line_index, line) in lines.into_iter().enumerate() {
        let line_width = if line.is_empty() {
            0.0
        } else {
            surface.measure_text(line)
        };
        let start_x = match style.align {
            HorizontalAlign::Center => (width - line_width) / 2.0,
            HorizontalAlign::Left => padding,
            HorizontalAlign::Right => width - padding - line_width,
        };

        let mut before = 0.0;
        let mut len = 0usize;
        for (index_in_line, (offset, ch)) in line.char_indices().enumerate() {
            let after = surface.measure_text(&line[..offset + ch.len_utf8()]);
            out.chars.push(CharLayout {
                ch,
                line_index,
                index_in_line,
                index_in_text: out.chars.len(),
                anchor: Point::new(start_x + (before + after) / 2.0, y),
                width_px: after - before,
            });
            before = after;
            len += 1;
        }

        out.lines.push(LineLayout {
            index: line_index,
            text: line.to_string(),
            width: line_width,
            start_x,
            baseline_y: y,
            len,
        });
        y += line_height;
    }

    surface.restore();
    out
}

#[cfg(test)]
#[path = "../../tests/unit/layout/engine.rs"]
mod tests;
