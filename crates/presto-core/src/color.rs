use serde::{Deserialize, Serialize};
use std::fmt;

/// Straight-alpha RGBA color with f32 components in [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color (alpha = 1.0).
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let hex = hex.trim().trim_start_matches('#');
        if !hex.is_ascii() || (hex.len() != 6 && hex.len() != 8) {
            return Err(ColorError::InvalidHex);
        }
        let channel = |i: usize| -> Result<u8, ColorError> {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| ColorError::InvalidHex)
        };
        let alpha = if hex.len() == 8 { channel(6)? } else { 255 };
        Ok(Self::from_rgba8([channel(0)?, channel(2)?, channel(4)?, alpha]))
    }

    pub fn from_rgba8(rgba: [u8; 4]) -> Self {
        Self::rgba(
            rgba[0] as f32 / 255.0,
            rgba[1] as f32 / 255.0,
            rgba[2] as f32 / 255.0,
            rgba[3] as f32 / 255.0,
        )
    }

    /// Convert to RGBA bytes.
    pub fn to_rgba8(&self) -> [u8; 4] {
        let q = |c: f32| (c * 255.0).round().clamp(0.0, 255.0) as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    /// Same color with a different alpha.
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.to_rgba8();
        if a == 255 {
            write!(f, "#{:02X}{:02X}{:02X}", r, g, b)
        } else {
            write!(f, "#{:02X}{:02X}{:02X}{:02X}", r, g, b, a)
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ColorError {
    #[error("invalid hex color string")]
    InvalidHex,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_with_and_without_alpha() {
        assert_eq!(Color::from_hex("#FF8800").unwrap().to_rgba8(), [255, 136, 0, 255]);
        assert_eq!(Color::from_hex("ff880080").unwrap().to_rgba8(), [255, 136, 0, 128]);
    }

    #[test]
    fn test_malformed_hex_is_rejected() {
        assert!(Color::from_hex("invalid").is_err());
        assert!(Color::from_hex("#GG0000").is_err());
        assert!(Color::from_hex("#12345").is_err());
    }

    #[test]
    fn test_rgba8_roundtrip_is_exact() {
        for v in [0u8, 1, 127, 128, 254, 255] {
            assert_eq!(Color::from_rgba8([v, v, v, v]).to_rgba8(), [v, v, v, v]);
        }
    }

    #[test]
    fn test_display_omits_opaque_alpha() {
        assert_eq!(Color::RED.to_string(), "#FF0000");
        assert_eq!(Color::RED.with_alpha(0.5).to_string(), "#FF000080");
    }
}
