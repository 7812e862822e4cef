//! RGBA colors
//!
//! Colors are stored as linear `f32` components in `0.0..=1.0`. Configuration
//! files spell them as CSS-style hex strings, so `Color` (de)serializes through
//! its hex form.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// RGBA color
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Build an opaque color from `0xRRGGBB`
    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let b = (hex & 0xFF) as f32 / 255.0;
        Self::rgb(r, g, b)
    }

    /// Build a color from `0xRRGGBBAA`
    pub fn from_hex_rgba(hex: u32) -> Self {
        Self::from_hex(hex >> 8).with_alpha((hex & 0xFF) as f32 / 255.0)
    }

    /// Parse `#RGB`, `#RRGGBB`, `#RRGGBBAA`, or `transparent`
    pub fn parse_hex(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.eq_ignore_ascii_case("transparent") {
            return Ok(Self::TRANSPARENT);
        }

        let invalid = |reason| CoreError::InvalidColor {
            input: input.to_string(),
            reason,
        };

        let digits = trimmed
            .strip_prefix('#')
            .ok_or_else(|| invalid("expected a leading '#'"))?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid("contains non-hex characters"));
        }
        let value = u32::from_str_radix(digits, 16).map_err(|_| invalid("not a hex number"))?;

        match digits.len() {
            3 => {
                // Expand each nibble: #abc -> #aabbcc
                let r = (value >> 8) & 0xF;
                let g = (value >> 4) & 0xF;
                let b = value & 0xF;
                Ok(Self::from_hex((r * 0x11) << 16 | (g * 0x11) << 8 | (b * 0x11)))
            }
            6 => Ok(Self::from_hex(value)),
            8 => Ok(Self::from_hex_rgba(value)),
            _ => Err(invalid("expected 3, 6, or 8 hex digits")),
        }
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = alpha;
        self
    }

    /// Format as `#RRGGBBAA`
    pub fn to_hex_string(&self) -> String {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02X}{:02X}{:02X}{:02X}",
            channel(self.r),
            channel(self.g),
            channel(self.b),
            channel(self.a)
        )
    }

    /// Linear interpolation between two colors
    pub fn lerp(a: &Color, b: &Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        Color {
            r: a.r + (b.r - a.r) * t,
            g: a.g + (b.g - a.g) * t,
            b: a.b + (b.b - a.b) * t,
            a: a.a + (b.a - a.a) * t,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl TryFrom<String> for Color {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 0.005
    }

    #[test]
    fn test_parse_rrggbbaa() {
        let c = Color::parse_hex("#25252599").unwrap();
        assert!(approx(c.r, 37.0 / 255.0));
        assert!(approx(c.g, 37.0 / 255.0));
        assert!(approx(c.b, 37.0 / 255.0));
        assert!(approx(c.a, 0.6));
    }

    #[test]
    fn test_parse_short_and_long_forms_agree() {
        let short = Color::parse_hex("#abc").unwrap();
        let long = Color::parse_hex("#AABBCC").unwrap();
        assert_eq!(short, long);
        assert_eq!(long.a, 1.0);
    }

    #[test]
    fn test_parse_transparent_keyword() {
        assert_eq!(
            Color::parse_hex("Transparent").unwrap(),
            Color::TRANSPARENT
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Color::parse_hex("A3A3A3").is_err());
        assert!(Color::parse_hex("#A3A3").is_err());
        assert!(Color::parse_hex("#GGGGGG").is_err());
        assert!(Color::parse_hex("#+12345").is_err());
    }

    #[test]
    fn test_hex_string_output() {
        assert_eq!(Color::from_hex(0xA3A3A3).to_hex_string(), "#A3A3A3FF");
        assert_eq!(Color::TRANSPARENT.to_hex_string(), "#00000000");
    }

    #[test]
    fn test_serde_through_hex() {
        #[derive(Deserialize)]
        struct Wrapper {
            tint: Color,
        }

        let parsed: Wrapper = toml::from_str("tint = \"#A3A3A3\"").unwrap();
        assert_eq!(parsed.tint, Color::from_hex(0xA3A3A3));

        let bad: std::result::Result<Wrapper, _> = toml::from_str("tint = \"grey\"");
        assert!(bad.is_err());
    }

    #[test]
    fn test_lerp_clamps() {
        let mid = Color::lerp(&Color::BLACK, &Color::WHITE, 0.5);
        assert!(approx(mid.r, 0.5));
        let past = Color::lerp(&Color::BLACK, &Color::WHITE, 2.0);
        assert_eq!(past, Color::WHITE);
    }
}
