use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::effects::catalog::EffectKind;
use crate::export::exporter::{ExportJob, ExportSettings};
use crate::foundation::core::{Canvas, HorizontalAlign, Rgba8, StyleParams};
use crate::foundation::error::{KinetypeError, KinetypeResult};
use crate::surface::font::FontSource;

/// Everything that defines one typographic animation, as stored in a JSON config file.
///
/// Every field is optional in JSON; missing fields take the defaults below.
///
/// ```json
/// { "text": "HELLO\nWORLD", "effect": "slideUp", "duration_secs": 2.0, "fps": 30 }
/// ```
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnimationConfig {
    /// Text to animate; `\n` starts a new line.
    pub text: String,
    /// Effect id; unknown ids render as `fade`.
    pub effect: String,
    pub duration_secs: f64,
    pub fps: u32,
    pub font_size_px: f64,
    pub text_color: Rgba8,
    pub background_color: Rgba8,
    pub transparent_background: bool,
    pub align: HorizontalAlign,
    pub width: u32,
    pub height: u32,
    /// System font family; any sans-serif face is used when it is not installed.
    pub font_family: String,
    /// Explicit font file, taking precedence over `font_family`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_path: Option<PathBuf>,
    /// Seed for glitch/flicker randomness.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        let style = StyleParams::default();
        Self {
            text: "HELLO\nWORLD".to_string(),
            effect: EffectKind::DEFAULT.id().to_string(),
            duration_secs: 2.0,
            fps: 30,
            font_size_px: style.font_size_px,
            text_color: style.text_color,
            background_color: style.background_color,
            transparent_background: style.transparent_background,
            align: style.align,
            width: 1920,
            height: 1080,
            font_family: "Inter".to_string(),
            font_path: None,
            seed: None,
        }
    }
}

impl AnimationConfig {
    /// Parse a config from JSON.
    pub fn from_reader<R: std::io::Read>(r: R) -> KinetypeResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| KinetypeError::serde(format!("parse animation config JSON: {e}")))
    }

    /// Parse a config from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> KinetypeResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            KinetypeError::validation(format!("open config JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn to_json_pretty(&self) -> KinetypeResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| KinetypeError::serde(format!("serialize animation config: {e}")))
    }

    /// Check the preconditions the renderer and exporter rely on.
    pub fn validate(&self) -> KinetypeResult<()> {
        if !self.duration_secs.is_finite() || self.duration_secs <= 0.0 {
            return Err(KinetypeError::validation(format!(
                "duration_secs must be > 0, got {}",
                self.duration_secs
            )));
        }
        if self.fps == 0 {
            return Err(KinetypeError::validation("fps must be > 0"));
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(KinetypeError::validation(format!(
                "font_size_px must be > 0, got {}",
                self.font_size_px
            )));
        }
        let max = u32::from(u16::MAX);
        if !(1..=max).contains(&self.width) || !(1..=max).contains(&self.height) {
            return Err(KinetypeError::validation(format!(
                "canvas must be between 1x1 and {max}x{max}, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    pub fn canvas(&self) -> Canvas {
        Canvas::new(self.width, self.height)
    }

    pub fn style(&self) -> StyleParams {
        StyleParams {
            font_size_px: self.font_size_px,
            text_color: self.text_color,
            background_color: self.background_color,
            transparent_background: self.transparent_background,
            align: self.align,
        }
    }

    /// Resolved effect, or `None` when the id is unknown (rendering then falls back to `fade`).
    pub fn effect_kind(&self) -> Option<EffectKind> {
        EffectKind::from_id(&self.effect)
    }

    pub fn font_source(&self) -> FontSource {
        match &self.font_path {
            Some(path) => FontSource::File(path.clone()),
            None => FontSource::system(self.font_family.clone()),
        }
    }

    pub fn export_settings(&self) -> ExportSettings {
        ExportSettings {
            duration_secs: self.duration_secs,
            fps: self.fps,
            seed: self.seed,
            ..ExportSettings::default()
        }
    }

    /// Export job for this animation, with an unknown effect already resolved to `fade`.
    pub fn export_job(&self) -> ExportJob {
        ExportJob {
            text: self.text.clone(),
            effect: EffectKind::resolve(&self.effect),
            style: self.style(),
            settings: self.export_settings(),
            base_name: None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/animation.rs"]
mod tests;
