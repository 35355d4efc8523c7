use crate::foundation::error::{KinetypeError, KinetypeResult};

pub use kurbo::{Affine, Point, Rect, Vec2};

/// Raster surface dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn center(self) -> Point {
        Point::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }
}

/// Straight (non-premultiplied) RGBA8 color.
///
/// Serialized as a CSS-style hex string (`#rgb`, `#rrggbb` or `#rrggbbaa`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const WHITE: Self = Self::opaque(255, 255, 255);
    pub const BLACK: Self = Self::opaque(0, 0, 0);
    pub const TRANSPARENT: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn parse_hex(s: &str) -> KinetypeResult<Self> {
        let raw = s.trim();
        let hex = raw
            .strip_prefix('#')
            .ok_or_else(|| KinetypeError::validation(format!("color '{raw}' must start with '#'")))?;
        if !hex.is_ascii() {
            return Err(KinetypeError::validation(format!(
                "color '{raw}' contains non-hex characters"
            )));
        }

        let digit = |c: u8| -> KinetypeResult<u8> {
            (c as char)
                .to_digit(16)
                .map(|d| d as u8)
                .ok_or_else(|| {
                    KinetypeError::validation(format!("color '{raw}' contains non-hex characters"))
                })
        };
        let pair = |i: usize| -> KinetypeResult<u8> {
            let b = hex.as_bytes();
            Ok(digit(b[i])? * 16 + digit(b[i + 1])?)
        };

        match hex.len() {
            3 => {
                let b = hex.as_bytes();
                let (r, g, bl) = (digit(b[0])?, digit(b[1])?, digit(b[2])?);
                Ok(Self::opaque(r * 17, g * 17, bl * 17))
            }
            6 => Ok(Self::opaque(pair(0)?, pair(2)?, pair(4)?)),
            8 => Ok(Self {
                r: pair(0)?,
                g: pair(2)?,
                b: pair(4)?,
                a: pair(6)?,
            }),
            _ => Err(KinetypeError::validation(format!(
                "color '{raw}' must be #rgb, #rrggbb or #rrggbbaa"
            ))),
        }
    }

    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    pub fn premultiplied(self) -> Rgba8Premul {
        Rgba8Premul::from_straight_rgba(self.r, self.g, self.b, self.a)
    }
}

impl std::str::FromStr for Rgba8 {
    type Err = KinetypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s)
    }
}

impl TryFrom<String> for Rgba8 {
    type Error = KinetypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_hex(&value)
    }
}

impl From<Rgba8> for String {
    fn from(c: Rgba8) -> Self {
        c.to_hex()
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba8Premul {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8Premul {
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Horizontal placement of each text line on the surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalAlign {
    Left,
    #[default]
    Center,
    Right,
}

impl std::str::FromStr for HorizontalAlign {
    type Err = KinetypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" | "start" => Ok(Self::Left),
            "center" | "centre" | "middle" => Ok(Self::Center),
            "right" | "end" => Ok(Self::Right),
            other => Err(KinetypeError::validation(format!(
                "unknown alignment '{other}' (expected left, center or right)"
            ))),
        }
    }
}

/// Style parameters for one render call. Immutable for the duration of the call.
#[derive(Clone, Debug, PartialEq)]
pub struct StyleParams {
    /// Font size in pixels; must be > 0.
    pub font_size_px: f64,
    pub text_color: Rgba8,
    pub background_color: Rgba8,
    /// When set, the surface is cleared to transparent instead of filled.
    pub transparent_background: bool,
    pub align: HorizontalAlign,
}

impl Default for StyleParams {
    fn default() -> Self {
        Self {
            font_size_px: 160.0,
            text_color: Rgba8::WHITE,
            background_color: Rgba8::opaque(0x09, 0x09, 0x0b),
            transparent_background: false,
            align: HorizontalAlign::Center,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
