use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;

use crate::foundation::error::{KinetypeError, KinetypeResult};

/// Where the surface font comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FontSource {
    /// A font file on disk (`.ttf`, `.otf`, `.ttc`; face 0 is used).
    File(PathBuf),
    /// A system family name; bold faces are preferred and any sans-serif is the fallback.
    System { family: String },
}

impl FontSource {
    pub fn system(family: impl Into<String>) -> Self {
        Self::System {
            family: family.into(),
        }
    }

    pub fn load(&self) -> KinetypeResult<LoadedFont> {
        match self {
            Self::File(path) => load_font_file(path),
            Self::System { family } => load_system_font(family),
        }
    }
}

/// Raw font bytes ready for shaping and glyph rasterization.
#[derive(Clone)]
pub struct LoadedFont {
    pub bytes: Arc<Vec<u8>>,
    /// Face index within a collection file.
    pub index: u32,
    /// Family name reported by the font database, when known.
    pub family: Option<String>,
}

impl std::fmt::Debug for LoadedFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedFont")
            .field("bytes_len", &self.bytes.len())
            .field("index", &self.index)
            .field("family", &self.family)
            .finish()
    }
}

fn load_font_file(path: &Path) -> KinetypeResult<LoadedFont> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("read font bytes from '{}'", path.display()))
        .map_err(KinetypeError::from)?;
    if bytes.is_empty() {
        return Err(KinetypeError::validation(format!(
            "font file '{}' is empty",
            path.display()
        )));
    }
    Ok(LoadedFont {
        bytes: Arc::new(bytes),
        index: 0,
        family: None,
    })
}

fn load_system_font(family: &str) -> KinetypeResult<LoadedFont> {
    use usvg::fontdb;

    let mut db = fontdb::Database::new();
    db.load_system_fonts();

    let mut families = Vec::<fontdb::Family<'_>>::new();
    let family = family.trim();
    if !family.is_empty() {
        families.push(fontdb::Family::Name(family));
    }
    families.push(fontdb::Family::SansSerif);

    let query = fontdb::Query {
        families: &families,
        weight: fontdb::Weight::BOLD,
        ..fontdb::Query::default()
    };

    let id = db
        .query(&query)
        .or_else(|| db.faces().next().map(|f| f.id))
        .ok_or_else(|| KinetypeError::render("no system fonts available"))?;

    let resolved_family = db
        .face(id)
        .and_then(|f| f.families.first().map(|(name, _)| name.clone()));
    let (bytes, index) = db
        .with_face_data(id, |data, index| (data.to_vec(), index))
        .ok_or_else(|| KinetypeError::render("failed to read system font data"))?;

    tracing::debug!(
        requested = family,
        resolved = resolved_family.as_deref().unwrap_or("unknown"),
        "resolved system font"
    );

    Ok(LoadedFont {
        bytes: Arc::new(bytes),
        index,
        family: resolved_family,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/surface/font.rs"]
mod tests;
