use super::*;

#[test]
fn catalog_order_is_stable() {
    let ids: Vec<&str> = catalog().map(|d| d.id).collect();
    assert_eq!(
        ids,
        vec![
            "typewriter",
            "fade",
            "slideUp",
            "popIn",
            "blur",
            "glitch",
            "elasticDrop",
            "trackingIn",
            "focusBlur",
            "wave",
            "shatterIn",
            "neonFlicker",
            "stretchSnap",
            "increaseTracking",
        ]
    );
    assert_eq!(catalog().nth(12).unwrap().display_name, "Stretch & Snap");
}

#[test]
fn ids_round_trip_through_lookup() {
    for kind in EffectKind::ALL {
        assert_eq!(EffectKind::from_id(kind.id()), Some(kind));
        assert_eq!(kind.to_string(), kind.id());
    }
}

#[test]
fn lookup_ignores_case_and_separators() {
    assert_eq!(EffectKind::from_id("slide-up"), Some(EffectKind::SlideUp));
    assert_eq!(EffectKind::from_id("SLIDE_UP"), Some(EffectKind::SlideUp));
    assert_eq!(
        EffectKind::from_id(" neon flicker "),
        Some(EffectKind::NeonFlicker)
    );
    assert_eq!(EffectKind::from_id(""), None);
    assert_eq!(EffectKind::from_id("--"), None);
}

#[test]
fn unknown_ids_resolve_to_fade() {
    assert_eq!(EffectKind::resolve("sparkle"), EffectKind::Fade);
    assert_eq!(EffectKind::resolve(""), EffectKind::DEFAULT);
}

#[test]
fn only_glitch_draws_hidden_characters() {
    let hidden: Vec<EffectKind> = EffectKind::ALL
        .into_iter()
        .filter(|k| k.draws_when_hidden())
        .collect();
    assert_eq!(hidden, vec![EffectKind::Glitch]);
}

#[test]
fn random_effects_are_flagged() {
    let random: Vec<&str> = EffectKind::ALL
        .into_iter()
        .filter(|k| k.is_random())
        .map(EffectKind::id)
        .collect();
    assert_eq!(random, vec!["glitch", "neonFlicker"]);
}
