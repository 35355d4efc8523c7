use super::*;

#[test]
fn blur_sigma_0_is_identity() {
    let src = vec![1u8, 2, 3, 4, 5, 6, 7, 8];
    let out = blur_rgba8_premul(&src, 1, 2, 0.0).unwrap();
    assert_eq!(out, src);
}

#[test]
fn blur_rejects_mismatched_buffers() {
    assert!(blur_rgba8_premul(&[0u8; 12], 2, 2, 1.0).is_err());
}

#[test]
fn blur_spreads_energy_from_single_pixel() {
    let (w, h) = (9u32, 9u32);
    let mut src = vec![0u8; (w * h * 4) as usize];
    let center = ((4 * w + 4) * 4) as usize;
    src[center..center + 4].copy_from_slice(&[255, 255, 255, 255]);

    let out = blur_rgba8_premul(&src, w, h, 1.0).unwrap();

    let nonzero = out.chunks_exact(4).filter(|px| px[3] != 0).count();
    assert!(nonzero > 1);
    assert!(out[center + 3] < 255);

    let sum_a: u32 = out.chunks_exact(4).map(|px| u32::from(px[3])).sum();
    assert!((sum_a as i32 - 255).abs() <= 8);
}

#[test]
fn radius_covers_three_sigma() {
    assert_eq!(blur_radius_for_sigma(0.0), 0);
    assert_eq!(blur_radius_for_sigma(f32::NAN), 0);
    assert_eq!(blur_radius_for_sigma(1.0), 3);
    assert_eq!(blur_radius_for_sigma(2.5), 8);
}

#[test]
fn over_endpoints() {
    let dst = [10, 20, 30, 255];
    let src = [255, 0, 0, 255];
    assert_eq!(over(dst, src, 0.0), dst);
    assert_eq!(over(dst, src, 1.0), src);
    assert_eq!(over(dst, [0, 0, 0, 0], 1.0), dst);
}

#[test]
fn over_half_opacity_blends() {
    let out = over([0, 0, 0, 255], [255, 255, 255, 255], 0.5);
    assert_eq!(out[3], 255);
    assert!((127..=129).contains(&out[0]));
}

#[test]
fn tile_is_clipped_to_destination() {
    let mut dst = vec![0u8; 4 * 4 * 4];
    let tile_px = [255u8, 255, 255, 255].repeat(4);
    let tile = Tile {
        data: &tile_px,
        width: 2,
        height: 2,
        x: -1,
        y: 3,
    };
    over_tile_in_place(&mut dst, 4, 4, &tile, 1.0).unwrap();

    let painted: Vec<usize> = dst
        .chunks_exact(4)
        .enumerate()
        .filter(|(_, px)| px[3] == 255)
        .map(|(i, _)| i)
        .collect();
    // Only the tile's top-right pixel lands inside, at (0, 3).
    assert_eq!(painted, vec![12]);
}

#[test]
fn fill_solid_writes_every_pixel() {
    let mut dst = vec![0u8; 3 * 4];
    fill_solid(&mut dst, [1, 2, 3, 4]);
    assert_eq!(dst, [1, 2, 3, 4].repeat(3));
}
