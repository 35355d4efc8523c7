use crate::foundation::core::{Canvas, Point, Rect};
use crate::surface::Surface;
use crate::surface::state::{DrawState, StateStack};

/// One recorded drawing operation with the state it was issued under.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCmd {
    Clear,
    FillRect { rect: Rect, state: DrawState },
    FillText {
        text: String,
        at: Point,
        state: DrawState,
    },
}

/// Fixed-advance text metrics with an optional pair-kerning table.
///
/// Widths are expressed in em units and scaled by the current font size.
#[derive(Clone, Debug)]
pub struct FixedMetrics {
    pub advance_em: f64,
    pub kerning_em: Vec<(char, char, f64)>,
}

impl Default for FixedMetrics {
    fn default() -> Self {
        Self {
            advance_em: 0.5,
            kerning_em: Vec::new(),
        }
    }
}

impl FixedMetrics {
    pub fn with_kerning(mut self, left: char, right: char, em: f64) -> Self {
        self.kerning_em.push((left, right, em));
        self
    }

    pub fn width(&self, text: &str, size_px: f64) -> f64 {
        let mut em = 0.0;
        let mut prev: Option<char> = None;
        for c in text.chars() {
            em += self.advance_em;
            if let Some(p) = prev {
                em += self
                    .kerning_em
                    .iter()
                    .filter(|(l, r, _)| *l == p && *r == c)
                    .map(|(_, _, k)| *k)
                    .sum::<f64>();
            }
            prev = Some(c);
        }
        em * size_px
    }
}

/// A display-list surface: it rasterizes nothing and records every draw call.
///
/// Two renders are equivalent exactly when their recorded command lists are equal, which makes
/// this the reference surface for determinism checks that must not depend on installed fonts.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    canvas: Canvas,
    metrics: FixedMetrics,
    state: StateStack,
    commands: Vec<DrawCmd>,
    measure_calls: usize,
}

impl RecordingSurface {
    pub fn new(canvas: Canvas) -> Self {
        Self::with_metrics(canvas, FixedMetrics::default())
    }

    pub fn with_metrics(canvas: Canvas, metrics: FixedMetrics) -> Self {
        Self {
            canvas,
            metrics,
            state: StateStack::default(),
            commands: Vec::new(),
            measure_calls: 0,
        }
    }

    pub fn commands(&self) -> &[DrawCmd] {
        &self.commands
    }

    /// Drain the recorded commands, leaving the surface ready for the next frame.
    pub fn take_commands(&mut self) -> Vec<DrawCmd> {
        std::mem::take(&mut self.commands)
    }

    pub fn measure_calls(&self) -> usize {
        self.measure_calls
    }

    /// Texts of every recorded `FillText`, in draw order.
    pub fn drawn_texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCmd::FillText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn state(&self) -> &StateStack {
        &self.state
    }

    fn state_mut(&mut self) -> &mut StateStack {
        &mut self.state
    }

    /// Starts a new display list: earlier commands are dropped, then `Clear` is recorded.
    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCmd::Clear);
    }

    fn fill_rect(&mut self, rect: Rect) {
        self.commands.push(DrawCmd::FillRect {
            rect,
            state: self.state.current().clone(),
        });
    }

    fn measure_text(&mut self, text: &str) -> f64 {
        self.measure_calls += 1;
        self.metrics.width(text, self.state.current().font.size_px)
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.commands.push(DrawCmd::FillText {
            text: text.to_string(),
            at: Point::new(x, y),
            state: self.state.current().clone(),
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/record.rs"]
mod tests;
