use crate::foundation::core::{Affine, Rgba8, Vec2};

/// Font selection for text drawing. The family itself is fixed when the surface is built.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FontSpec {
    pub size_px: f64,
    pub bold: bool,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            size_px: 16.0,
            bold: false,
        }
    }
}

/// Transient drawing state saved and restored by [`StateStack`].
#[derive(Clone, Debug, PartialEq)]
pub struct DrawState {
    pub transform: Affine,
    pub fill: Rgba8,
    /// Global alpha in `[0, 1]`.
    pub alpha: f64,
    /// Gaussian blur standard deviation in pixels; `0` disables the filter.
    pub blur_px: f64,
    pub font: FontSpec,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            transform: Affine::IDENTITY,
            fill: Rgba8::BLACK,
            alpha: 1.0,
            blur_px: 0.0,
            font: FontSpec::default(),
        }
    }
}

/// Current drawing state plus the stack of saved states.
#[derive(Clone, Debug, Default)]
pub struct StateStack {
    current: DrawState,
    saved: Vec<DrawState>,
}

impl StateStack {
    pub fn current(&self) -> &DrawState {
        &self.current
    }

    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    pub fn save(&mut self) {
        self.saved.push(self.current.clone());
    }

    /// Pop the last saved state. Unbalanced restores are ignored.
    pub fn restore(&mut self) {
        if let Some(s) = self.saved.pop() {
            self.current = s;
        }
    }

    /// Drop every saved state and return to defaults.
    pub fn reset(&mut self) {
        self.saved.clear();
        self.current = DrawState::default();
    }

    pub fn set_fill(&mut self, color: Rgba8) {
        self.current.fill = color;
    }

    pub fn set_alpha(&mut self, alpha: f64) {
        if alpha.is_finite() {
            self.current.alpha = alpha.clamp(0.0, 1.0);
        }
    }

    pub fn set_blur(&mut self, px: f64) {
        if px.is_finite() {
            self.current.blur_px = px.max(0.0);
        }
    }

    pub fn set_font(&mut self, font: FontSpec) {
        self.current.font = font;
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.current.transform *= Affine::translate(Vec2::new(dx, dy));
    }

    pub fn scale(&mut self, sx: f64, sy: f64) {
        self.current.transform *= Affine::scale_non_uniform(sx, sy);
    }

    pub fn rotate(&mut self, radians: f64) {
        self.current.transform *= Affine::rotate(radians);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/state.rs"]
mod tests;
