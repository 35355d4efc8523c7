use crate::effects::transforms::{self, CharFrame};
use crate::foundation::math::Rng64;
use crate::surface::Surface;

/// Every built-in per-character effect, in registration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EffectKind {
    Typewriter,
    Fade,
    SlideUp,
    PopIn,
    Blur,
    Glitch,
    ElasticDrop,
    TrackingIn,
    FocusBlur,
    Wave,
    ShatterIn,
    NeonFlicker,
    StretchSnap,
    IncreaseTracking,
}

/// Catalog entry as shown in an effect picker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EffectDescriptor {
    pub kind: EffectKind,
    pub id: &'static str,
    pub display_name: &'static str,
}

impl EffectKind {
    pub const ALL: [EffectKind; 14] = [
        EffectKind::Typewriter,
        EffectKind::Fade,
        EffectKind::SlideUp,
        EffectKind::PopIn,
        EffectKind::Blur,
        EffectKind::Glitch,
        EffectKind::ElasticDrop,
        EffectKind::TrackingIn,
        EffectKind::FocusBlur,
        EffectKind::Wave,
        EffectKind::ShatterIn,
        EffectKind::NeonFlicker,
        EffectKind::StretchSnap,
        EffectKind::IncreaseTracking,
    ];

    /// Effect used for unknown ids.
    pub const DEFAULT: EffectKind = EffectKind::Fade;

    pub fn id(self) -> &'static str {
        match self {
            Self::Typewriter => "typewriter",
            Self::Fade => "fade",
            Self::SlideUp => "slideUp",
            Self::PopIn => "popIn",
            Self::Blur => "blur",
            Self::Glitch => "glitch",
            Self::ElasticDrop => "elasticDrop",
            Self::TrackingIn => "trackingIn",
            Self::FocusBlur => "focusBlur",
            Self::Wave => "wave",
            Self::ShatterIn => "shatterIn",
            Self::NeonFlicker => "neonFlicker",
            Self::StretchSnap => "stretchSnap",
            Self::IncreaseTracking => "increaseTracking",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Typewriter => "Typewriter",
            Self::Fade => "Fade In",
            Self::SlideUp => "Slide Up",
            Self::PopIn => "Pop In",
            Self::Blur => "Blur Reveal",
            Self::Glitch => "Cyber Glitch",
            Self::ElasticDrop => "Elastic Drop",
            Self::TrackingIn => "Cinematic Tracking",
            Self::FocusBlur => "Focus Pull",
            Self::Wave => "Sine Wave",
            Self::ShatterIn => "Shatter In",
            Self::NeonFlicker => "Neon Flicker",
            Self::StretchSnap => "Stretch & Snap",
            Self::IncreaseTracking => "Increase Tracking",
        }
    }

    pub fn descriptor(self) -> EffectDescriptor {
        EffectDescriptor {
            kind: self,
            id: self.id(),
            display_name: self.display_name(),
        }
    }

    /// Look up an effect by id. Case and `-`/`_`/space separators are ignored, so `slide-up`,
    /// `slide_up` and `SLIDEUP` all name [`EffectKind::SlideUp`].
    pub fn from_id(id: &str) -> Option<Self> {
        let key = normalize_id(id);
        if key.is_empty() {
            return None;
        }
        Self::ALL
            .into_iter()
            .find(|k| k.id().eq_ignore_ascii_case(&key))
    }

    /// Look up an effect by id, falling back to [`EffectKind::DEFAULT`].
    pub fn resolve(id: &str) -> Self {
        Self::from_id(id).unwrap_or(Self::DEFAULT)
    }

    /// Whether the effect is drawn even while its character's local progress is still zero.
    pub fn draws_when_hidden(self) -> bool {
        matches!(self, Self::Glitch)
    }

    /// Whether the effect consumes randomness and may differ between two renders of one frame.
    pub fn is_random(self) -> bool {
        matches!(self, Self::Glitch | Self::NeonFlicker)
    }

    /// Draw one character. The caller scopes surface state around the call.
    pub fn render(self, surface: &mut dyn Surface, frame: &CharFrame<'_>, rng: &mut Rng64) {
        match self {
            Self::Typewriter => transforms::typewriter(surface, frame),
            Self::Fade => transforms::fade(surface, frame),
            Self::SlideUp => transforms::slide_up(surface, frame),
            Self::PopIn => transforms::pop_in(surface, frame),
            Self::Blur => transforms::blur(surface, frame),
            Self::Glitch => transforms::glitch(surface, frame, rng),
            Self::ElasticDrop => transforms::elastic_drop(surface, frame),
            Self::TrackingIn => transforms::tracking_in(surface, frame),
            Self::FocusBlur => transforms::focus_blur(surface, frame),
            Self::Wave => transforms::wave(surface, frame),
            Self::ShatterIn => transforms::shatter_in(surface, frame),
            Self::NeonFlicker => transforms::neon_flicker(surface, frame, rng),
            Self::StretchSnap => transforms::stretch_snap(surface, frame),
            Self::IncreaseTracking => transforms::increase_tracking(surface, frame),
        }
    }
}

impl std::fmt::Display for EffectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

fn normalize_id(id: &str) -> String {
    id.trim()
        .chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .collect()
}

/// All effects as picker entries, in registration order.
pub fn catalog() -> impl Iterator<Item = EffectDescriptor> {
    EffectKind::ALL.into_iter().map(EffectKind::descriptor)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/catalog.rs"]
mod tests;
