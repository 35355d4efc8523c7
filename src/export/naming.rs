use crate::foundation::error::{KinetypeError, KinetypeResult};
use crate::surface::FrameRGBA;

/// Archive base name used when the text yields no usable characters.
pub const FALLBACK_BASE_NAME: &str = "typography_sequence";

/// Longest base name produced by [`base_name_for`].
pub const MAX_BASE_NAME_LEN: usize = 48;

/// Derive an archive base name from the animated text.
///
/// ASCII alphanumeric runs are lowercased and joined with `_`; whole words that would push the
/// name past [`MAX_BASE_NAME_LEN`] are dropped. `"HELLO\nWORLD"` becomes `hello_world`.
pub fn base_name_for(text: &str) -> String {
    let mut out = String::new();
    for word in text
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
    {
        let sep = usize::from(!out.is_empty());
        if out.len() + sep + word.len() > MAX_BASE_NAME_LEN {
            if out.is_empty() {
                out.push_str(&word[..MAX_BASE_NAME_LEN]);
            }
            break;
        }
        if sep == 1 {
            out.push('_');
        }
        out.push_str(&word.to_ascii_lowercase());
    }

    if out.is_empty() {
        FALLBACK_BASE_NAME.to_string()
    } else {
        out.make_ascii_lowercase();
        out
    }
}

/// Check that `name` is a single plain path component, so `<dir>/<name>.zip` stays inside `dir`.
pub fn validate_base_name(name: &str) -> KinetypeResult<()> {
    let plain = !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', ':', '\0']);
    if plain {
        Ok(())
    } else {
        Err(KinetypeError::validation(format!(
            "base name '{}' must be a plain file name",
            name.escape_debug()
        )))
    }
}

/// File name of frame `idx` inside an export: `frame_0000.png`, `frame_0001.png`, ...
pub fn frame_file_name(idx: u64) -> String {
    format!("frame_{idx:04}.png")
}

/// Encode a frame as a straight-alpha RGBA PNG.
pub fn encode_png(frame: &FrameRGBA) -> KinetypeResult<Vec<u8>> {
    use image::ImageEncoder as _;

    let expected = frame.width as usize * frame.height as usize * 4;
    if frame.data.len() != expected {
        return Err(KinetypeError::export(format!(
            "frame buffer is {} bytes, expected {expected} for {}x{}",
            frame.data.len(),
            frame.width,
            frame.height
        )));
    }

    let rgba = frame.to_straight_rgba8();
    let mut out = Vec::new();
    image::codecs::png::PngEncoder::new(&mut out)
        .write_image(
            &rgba,
            frame.width,
            frame.height,
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|e| KinetypeError::export(format!("png encode failed: {e}")))?;
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/export/naming.rs"]
mod tests;
