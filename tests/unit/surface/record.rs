use super::*;
use crate::foundation::core::Rgba8;
use crate::surface::state::FontSpec;

#[test]
fn fixed_metrics_apply_pair_kerning() {
    let m = FixedMetrics::default().with_kerning('A', 'V', -0.25);
    assert_eq!(m.width("A", 100.0), 50.0);
    assert_eq!(m.width("AV", 100.0), 75.0);
    assert_eq!(m.width("VA", 100.0), 100.0);
}

#[test]
fn records_draws_with_resolved_state() {
    let mut s = RecordingSurface::new(Canvas::new(100, 100));
    s.set_font(FontSpec {
        size_px: 20.0,
        bold: true,
    });
    s.save();
    s.set_fill(Rgba8::WHITE);
    s.set_alpha(0.5);
    s.fill_text("a", 10.0, 20.0);
    s.restore();
    s.fill_text("b", 30.0, 20.0);

    let cmds = s.commands();
    assert_eq!(cmds.len(), 2);
    let DrawCmd::FillText { state, .. } = &cmds[0] else {
        panic!("expected text command");
    };
    assert_eq!(state.alpha, 0.5);
    assert_eq!(state.fill, Rgba8::WHITE);
    assert!(state.font.bold);

    let DrawCmd::FillText { state, .. } = &cmds[1] else {
        panic!("expected text command");
    };
    assert_eq!(state.alpha, 1.0);
    assert_eq!(s.drawn_texts(), vec!["a", "b"]);
}

#[test]
fn measure_uses_current_font_size_and_counts_calls() {
    let mut s = RecordingSurface::new(Canvas::new(10, 10));
    s.set_font(FontSpec {
        size_px: 50.0,
        bold: true,
    });
    assert_eq!(s.measure_text("abc"), 75.0);
    assert_eq!(s.measure_calls(), 1);
}

#[test]
fn take_commands_drains() {
    let mut s = RecordingSurface::new(Canvas::new(10, 10));
    s.clear();
    assert_eq!(s.take_commands(), vec![DrawCmd::Clear]);
    assert!(s.commands().is_empty());
}

#[test]
fn clear_starts_a_fresh_display_list() {
    let mut s = RecordingSurface::new(Canvas::new(10, 10));
    s.clear();
    s.fill_text("a", 1.0, 2.0);
    s.clear();
    s.fill_text("b", 3.0, 4.0);

    assert_eq!(s.commands().len(), 2);
    assert_eq!(s.commands()[0], DrawCmd::Clear);
    assert_eq!(s.drawn_texts(), vec!["b"]);
}
