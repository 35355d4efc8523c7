use super::*;
use crate::foundation::core::Rgba8;
use crate::surface::state::FontSpec;

fn system_font() -> Option<LoadedFont> {
    FontSource::system("Inter").load().ok()
}

fn pixel(frame: &FrameRGBA, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * frame.width + x) * 4) as usize;
    [
        frame.data[i],
        frame.data[i + 1],
        frame.data[i + 2],
        frame.data[i + 3],
    ]
}

fn alpha_sum(frame: &FrameRGBA) -> u64 {
    frame.data.chunks_exact(4).map(|px| u64::from(px[3])).sum()
}

#[test]
fn rejects_degenerate_canvas() {
    let Some(font) = system_font() else {
        return;
    };
    assert!(CpuSurface::new(Canvas::new(0, 10), &font).is_err());
    assert!(CpuSurface::new(Canvas::new(70_000, 10), &font).is_err());
}

#[test]
fn fill_rect_covers_pixels_with_fill_color() {
    let Some(font) = system_font() else {
        return;
    };
    let mut s = CpuSurface::new(Canvas::new(16, 16), &font).unwrap();
    s.set_fill(Rgba8::opaque(255, 0, 0));
    s.fill_rect(Rect::new(0.0, 0.0, 8.0, 16.0));

    let frame = s.snapshot();
    assert!(frame.premultiplied);
    assert_eq!(pixel(&frame, 2, 8), [255, 0, 0, 255]);
    assert_eq!(pixel(&frame, 12, 8), [0, 0, 0, 0]);
}

#[test]
fn alpha_scales_coverage() {
    let Some(font) = system_font() else {
        return;
    };
    let mut s = CpuSurface::new(Canvas::new(8, 8), &font).unwrap();
    s.set_fill(Rgba8::WHITE);
    s.set_alpha(0.5);
    s.fill_rect(Rect::new(0.0, 0.0, 8.0, 8.0));

    let a = pixel(&s.snapshot(), 4, 4)[3];
    assert!((126..=129).contains(&a), "alpha {a}");
}

#[test]
fn clear_resets_to_transparent() {
    let Some(font) = system_font() else {
        return;
    };
    let mut s = CpuSurface::new(Canvas::new(8, 8), &font).unwrap();
    s.fill_rect(Rect::new(0.0, 0.0, 8.0, 8.0));
    s.clear();
    assert!(s.pixels().iter().all(|b| *b == 0));
}

#[test]
fn fill_text_paints_near_anchor() {
    let Some(font) = system_font() else {
        return;
    };
    let mut s = CpuSurface::new(Canvas::new(200, 100), &font).unwrap();
    s.set_font(FontSpec {
        size_px: 48.0,
        bold: true,
    });
    s.set_fill(Rgba8::WHITE);
    s.fill_text("H", 100.0, 50.0);

    let frame = s.snapshot();
    assert!(alpha_sum(&frame) > 0);

    // Ink stays in a box around the anchor; the far corners remain untouched.
    assert_eq!(pixel(&frame, 2, 2)[3], 0);
    assert_eq!(pixel(&frame, 197, 97)[3], 0);
    let mut cx = 0u64;
    let mut total = 0u64;
    for y in 0..frame.height {
        for x in 0..frame.width {
            let a = u64::from(pixel(&frame, x, y)[3]);
            cx += u64::from(x) * a;
            total += a;
        }
    }
    let centroid = cx as f64 / total as f64;
    assert!((centroid - 100.0).abs() < 6.0, "centroid {centroid}");
}

#[test]
fn blur_spreads_text_ink() {
    let Some(font) = system_font() else {
        return;
    };
    let draw = |blur: f64| {
        let mut s = CpuSurface::new(Canvas::new(160, 120), &font).unwrap();
        s.set_font(FontSpec {
            size_px: 40.0,
            bold: true,
        });
        s.set_blur(blur);
        s.fill_text("I", 80.0, 60.0);
        s.snapshot()
    };

    let sharp = draw(0.0);
    let soft = draw(6.0);
    let covered = |f: &FrameRGBA| f.data.chunks_exact(4).filter(|px| px[3] > 0).count();
    assert!(covered(&soft) > covered(&sharp));
}

#[test]
fn measure_text_grows_with_content() {
    let Some(font) = system_font() else {
        return;
    };
    let mut s = CpuSurface::new(Canvas::new(10, 10), &font).unwrap();
    s.set_font(FontSpec {
        size_px: 32.0,
        bold: false,
    });
    assert_eq!(s.measure_text(""), 0.0);
    let one = s.measure_text("W");
    let two = s.measure_text("WW");
    assert!(one > 0.0);
    assert!(two > one);
}
