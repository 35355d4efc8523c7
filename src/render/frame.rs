use crate::animation::stagger::local_progress;
use crate::effects::catalog::EffectKind;
use crate::effects::transforms::CharFrame;
use crate::foundation::core::{Rect, StyleParams};
use crate::foundation::math::Rng64;
use crate::layout::engine::layout_text;
use crate::surface::Surface;
use crate::surface::state::FontSpec;

/// Render one frame of `text` animated with the effect named `effect_id`.
///
/// Unknown effect ids fall back to [`EffectKind::DEFAULT`]. See [`render_effect_frame`].
pub fn render_frame(
    surface: &mut dyn Surface,
    progress: f64,
    text: &str,
    effect_id: &str,
    style: &StyleParams,
    rng: &mut Rng64,
) {
    let effect = EffectKind::from_id(effect_id).unwrap_or_else(|| {
        tracing::debug!(effect_id, fallback = %EffectKind::DEFAULT, "unknown effect id");
        EffectKind::DEFAULT
    });
    render_effect_frame(surface, progress, text, effect, style, rng);
}

/// Render one frame at global `progress` onto `surface`.
///
/// The output depends only on the arguments: drawing state is reset first, layout is recomputed,
/// and all randomness is drawn from `rng`. Progress outside `[0, 1]` is clamped and NaN counts as
/// zero.
pub fn render_effect_frame(
    surface: &mut dyn Surface,
    progress: f64,
    text: &str,
    effect: EffectKind,
    style: &StyleParams,
    rng: &mut Rng64,
) {
    let global = if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    };
    let canvas = surface.canvas();

    surface.state_mut().reset();
    surface.clear();
    if !style.transparent_background {
        surface.save();
        surface.set_fill(style.background_color);
        surface.fill_rect(Rect::new(
            0.0,
            0.0,
            f64::from(canvas.width),
            f64::from(canvas.height),
        ));
        surface.restore();
    }

    surface.set_font(FontSpec {
        size_px: style.font_size_px,
        bold: true,
    });

    let layout = layout_text(surface, text, style, canvas);
    let total = layout.char_count();
    let mut buf = [0u8; 4];

    for ch in &layout.chars {
        let local = local_progress(global, ch.index_in_text, total);
        if local <= 0.0 && !effect.draws_when_hidden() {
            continue;
        }

        let frame = CharFrame {
            text: ch.ch.encode_utf8(&mut buf),
            anchor: ch.anchor,
            local,
            global,
            font_size_px: style.font_size_px,
            text_color: style.text_color,
            canvas,
            index_in_text: ch.index_in_text,
            index_in_line: ch.index_in_line,
            line_len: layout.line_len(ch.line_index),
        };

        surface.save();
        surface.set_fill(style.text_color);
        effect.render(surface, &frame, rng);
        surface.restore();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
