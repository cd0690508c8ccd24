use glam::Vec3;
use serde::Deserialize;
use std::fmt;

/// Position of a tile inside its scene graph. Stable for the graph's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(pub usize);

/// Linear-ish RGB color with components in [0, 1].
///
/// Config files spell colors as `"#rrggbb"` or `"0xrrggbb"`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

/// Errors from parsing a hex color string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorParseError {
    #[error("color must be 6 hex digits prefixed by '#' or '0x', got {0:?}")]
    Format(String),
    #[error("invalid hex digits in color {0:?}")]
    Digits(String),
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
        }
    }

    /// Parse `"#rrggbb"` or `"0xrrggbb"` (case-insensitive).
    pub fn parse(text: &str) -> Result<Self, ColorParseError> {
        let trimmed = text.trim();
        let digits = trimmed
            .strip_prefix('#')
            .or_else(|| trimmed.strip_prefix("0x"))
            .or_else(|| trimmed.strip_prefix("0X"))
            .ok_or_else(|| ColorParseError::Format(text.to_string()))?;
        if digits.len() != 6 {
            return Err(ColorParseError::Format(text.to_string()));
        }
        let hex = u32::from_str_radix(digits, 16)
            .map_err(|_| ColorParseError::Digits(text.to_string()))?;
        Ok(Self::from_hex(hex))
    }

    pub fn to_hex(self) -> u32 {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }

    /// Color scaled by a light intensity, as a vector.
    pub fn scaled(self, intensity: f32) -> Vec3 {
        Vec3::new(self.r, self.g, self.b) * intensity
    }

    pub fn to_rgba(self) -> [f32; 4] {
        [self.r, self.g, self.b, 1.0]
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.to_hex())
    }
}
