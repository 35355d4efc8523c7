use super::*;
use crate::surface::record::{FixedMetrics, RecordingSurface};

const CANVAS: Canvas = Canvas {
    width: 1000,
    height: 600,
};

fn style(align: HorizontalAlign) -> StyleParams {
    StyleParams {
        font_size_px: 100.0,
        align,
        ..StyleParams::default()
    }
}

fn xs(layout: &TextLayout) -> Vec<f64> {
    layout.chars.iter().map(|c| c.anchor.x).collect()
}

#[test]
fn single_char_is_centered_on_canvas() {
    for size in [12.0, 100.0, 160.0] {
        let mut s = RecordingSurface::new(CANVAS);
        let st = StyleParams {
            font_size_px: size,
            ..StyleParams::default()
        };
        let layout = layout_text(&mut s, "A", &st, CANVAS);
        assert_eq!(layout.chars.len(), 1);
        assert_eq!(layout.chars[0].anchor, Point::new(500.0, 300.0));
    }
}

#[test]
fn anchors_follow_kerned_prefix_widths() {
    let mut s = RecordingSurface::with_metrics(
        CANVAS,
        FixedMetrics::default().with_kerning('A', 'V', -0.25),
    );
    let layout = layout_text(&mut s, "AV", &style(HorizontalAlign::Center), CANVAS);

    assert_eq!(layout.lines[0].width, 75.0);
    assert_eq!(layout.lines[0].start_x, 462.5);
    assert_eq!(xs(&layout), vec![487.5, 525.0]);
    assert_eq!(layout.chars[0].width_px, 50.0);
    assert_eq!(layout.chars[1].width_px, 25.0);
}

#[test]
fn lines_stack_around_vertical_center() {
    let mut s = RecordingSurface::new(CANVAS);
    let layout = layout_text(&mut s, "HI\nA", &style(HorizontalAlign::Center), CANVAS);

    assert_eq!(layout.line_height, 120.0);
    assert_eq!(layout.total_height, 240.0);
    assert_eq!(layout.lines[0].baseline_y, 240.0);
    assert_eq!(layout.lines[1].baseline_y, 360.0);

    let idx: Vec<(usize, usize, usize)> = layout
        .chars
        .iter()
        .map(|c| (c.line_index, c.index_in_line, c.index_in_text))
        .collect();
    assert_eq!(idx, vec![(0, 0, 0), (0, 1, 1), (1, 0, 2)]);
    assert_eq!(layout.line_len(0), 2);
    assert_eq!(layout.line_len(1), 1);
    assert_eq!(layout.line_len(7), 0);
}

#[test]
fn left_alignment_starts_at_edge_padding() {
    let mut s = RecordingSurface::new(CANVAS);
    let layout = layout_text(&mut s, "AB", &style(HorizontalAlign::Left), CANVAS);
    assert_eq!(layout.lines[0].start_x, 100.0);
    assert_eq!(xs(&layout), vec![125.0, 175.0]);
}

#[test]
fn right_alignment_ends_at_edge_padding() {
    let mut s = RecordingSurface::new(CANVAS);
    let layout = layout_text(&mut s, "AB\nC", &style(HorizontalAlign::Right), CANVAS);
    assert_eq!(xs(&layout), vec![825.0, 875.0, 875.0]);
    for line in &layout.lines {
        assert_eq!(line.start_x + line.width, 900.0);
    }
}

#[test]
fn empty_text_has_no_characters() {
    let mut s = RecordingSurface::new(CANVAS);
    let layout = layout_text(&mut s, "", &style(HorizontalAlign::Center), CANVAS);
    assert!(layout.is_empty());
    assert!(layout.lines.is_empty());
    assert_eq!(s.measure_calls(), 0);
}

#[test]
fn empty_lines_keep_their_slot() {
    let mut s = RecordingSurface::new(CANVAS);
    let layout = layout_text(&mut s, "A\n\nB", &style(HorizontalAlign::Center), CANVAS);
    assert_eq!(layout.lines.len(), 3);
    assert_eq!(layout.lines[1].len, 0);
    assert_eq!(layout.char_count(), 2);
    let dy = layout.chars[1].anchor.y - layout.chars[0].anchor.y;
    assert_eq!(dy, 2.0 * layout.line_height);
}

#[test]
fn crlf_line_breaks_are_normalized() {
    assert_eq!(split_lines("A\r\nB\n"), vec!["A", "B", ""]);
    let mut s = RecordingSurface::new(CANVAS);
    let layout = layout_text(&mut s, "A\r\nB", &style(HorizontalAlign::Center), CANVAS);
    let chars: String = layout.chars.iter().map(|c| c.ch).collect();
    assert_eq!(chars, "AB");
}

#[test]
fn characters_are_code_points() {
    let mut s = RecordingSurface::new(CANVAS);
    let layout = layout_text(&mut s, "héllo", &style(HorizontalAlign::Center), CANVAS);
    assert_eq!(layout.char_count(), 5);
    assert_eq!(layout.chars[1].ch, 'é');
    assert!(xs(&layout).windows(2).all(|w| w[1] > w[0]));
}

#[test]
fn surface_state_is_left_untouched() {
    let mut s = RecordingSurface::new(CANVAS);
    let before = s.state().current().clone();
    let _ = layout_text(&mut s, "HELLO\nWORLD", &style(HorizontalAlign::Center), CANVAS);
    assert_eq!(s.state().current(), &before);
    assert_eq!(s.state().depth(), 0);
    assert!(s.commands().is_empty());
}

#[test]
fn layout_uses_bold_font_at_style_size() {
    let mut s = RecordingSurface::new(CANVAS);
    let st = StyleParams {
        font_size_px: 40.0,
        ..StyleParams::default()
    };
    let layout = layout_text(&mut s, "AB", &st, CANVAS);
    assert_eq!(layout.lines[0].width, 40.0);
}
