use super::*;

#[test]
fn base_name_joins_lowercased_words() {
    assert_eq!(base_name_for("HELLO\nWORLD"), "hello_world");
    assert_eq!(base_name_for("  Big -- Bold, Type!  "), "big_bold_type");
    assert_eq!(base_name_for("v2 launch"), "v2_launch");
}

#[test]
fn base_name_falls_back_when_nothing_survives() {
    assert_eq!(base_name_for(""), FALLBACK_BASE_NAME);
    assert_eq!(base_name_for("!!! ??"), FALLBACK_BASE_NAME);
    assert_eq!(base_name_for("日本語"), FALLBACK_BASE_NAME);
}

#[test]
fn base_name_is_bounded() {
    let long = "word ".repeat(40);
    let name = base_name_for(&long);
    assert!(name.len() <= MAX_BASE_NAME_LEN);
    assert!(name.starts_with("word_word"));
    assert!(!name.ends_with('_'));

    let giant = "X".repeat(100);
    assert_eq!(base_name_for(&giant), "x".repeat(MAX_BASE_NAME_LEN));
}

#[test]
fn frame_names_are_zero_padded() {
    assert_eq!(frame_file_name(0), "frame_0000.png");
    assert_eq!(frame_file_name(60), "frame_0060.png");
    assert_eq!(frame_file_name(12345), "frame_12345.png");
}

#[test]
fn png_round_trips_straight_alpha() {
    let frame = FrameRGBA {
        width: 2,
        height: 1,
        data: vec![255, 0, 0, 255, 64, 0, 0, 128],
        premultiplied: true,
    };
    let bytes = encode_png(&frame).unwrap();
    let img = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (2, 1));
    assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0, 255]);
    assert_eq!(img.get_pixel(1, 0).0, [128, 0, 0, 128]);
}

#[test]
fn png_rejects_short_buffers() {
    let frame = FrameRGBA {
        width: 4,
        height: 4,
        data: vec![0; 8],
        premultiplied: true,
    };
    assert!(matches!(
        encode_png(&frame),
        Err(KinetypeError::Export(_))
    ));
}

#[test]
fn validated_base_names_are_single_components() {
    for ok in ["hello_world", "intro.v2", "typography_sequence"] {
        assert!(validate_base_name(ok).is_ok(), "{ok}");
    }
    for bad in ["", ".", "..", "../up", "/abs", "a\\b", "c:name"] {
        assert!(
            matches!(validate_base_name(bad), Err(KinetypeError::Validation(_))),
            "{bad}"
        );
    }
    assert!(validate_base_name(&base_name_for("../../etc/passwd")).is_ok());
}
