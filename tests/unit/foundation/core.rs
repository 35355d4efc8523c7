use super::*;

#[test]
fn parse_hex_accepts_short_long_and_alpha_forms() {
    assert_eq!(Rgba8::parse_hex("#fff").unwrap(), Rgba8::WHITE);
    assert_eq!(
        Rgba8::parse_hex("#09090b").unwrap(),
        Rgba8::opaque(9, 9, 11)
    );
    assert_eq!(
        Rgba8::parse_hex(" #ff003c80 ").unwrap(),
        Rgba8 {
            r: 255,
            g: 0,
            b: 60,
            a: 128
        }
    );
}

#[test]
fn parse_hex_rejects_malformed_input() {
    assert!(Rgba8::parse_hex("ffffff").is_err());
    assert!(Rgba8::parse_hex("#ffff").is_err());
    assert!(Rgba8::parse_hex("#gg0000").is_err());
    assert!(Rgba8::parse_hex("#ééé").is_err());
}

#[test]
fn hex_serde_uses_css_strings() {
    let c: Rgba8 = serde_json::from_str("\"#00f0ff\"").unwrap();
    assert_eq!(c, Rgba8::opaque(0, 0xf0, 0xff));
    assert_eq!(serde_json::to_string(&c).unwrap(), "\"#00f0ff\"");
}

#[test]
fn premultiply_rounds_like_canvas() {
    let p = Rgba8 {
        r: 255,
        g: 128,
        b: 0,
        a: 128,
    }
    .premultiplied();
    assert_eq!(p.to_array(), [128, 64, 0, 128]);
    assert_eq!(Rgba8::WHITE.premultiplied().to_array(), [255; 4]);
}

#[test]
fn align_parses_common_spellings() {
    assert_eq!("Left".parse::<HorizontalAlign>().unwrap(), HorizontalAlign::Left);
    assert_eq!("centre".parse::<HorizontalAlign>().unwrap(), HorizontalAlign::Center);
    assert_eq!("end".parse::<HorizontalAlign>().unwrap(), HorizontalAlign::Right);
    assert!("justify".parse::<HorizontalAlign>().is_err());
}

#[test]
fn canvas_center_is_half_extent() {
    assert_eq!(Canvas::new(640, 360).center(), Point::new(320.0, 180.0));
}
