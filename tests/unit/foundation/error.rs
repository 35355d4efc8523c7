use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        KinetypeError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        KinetypeError::render("x")
            .to_string()
            .contains("render error:")
    );
    assert!(
        KinetypeError::export("x")
            .to_string()
            .contains("export error:")
    );
    assert!(
        KinetypeError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn cancelled_reports_frame_count() {
    let err = KinetypeError::Cancelled { frames_written: 7 };
    assert_eq!(err.to_string(), "export cancelled after 7 frame(s)");
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = KinetypeError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
