//! RGB color parsing, formatting, and wire encoding.
//!
//! The fixture's `update_leds` payload is built from individual pixels:
//! each pixel's raw 3-byte RGB value is base64-encoded on its own (4 ASCII
//! chars) and the encodings are concatenated with no separator.

use crate::{Error, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::fmt;
use std::str::FromStr;

/// A 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Default state of every pixel on an untouched module.
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };

    /// Creates a color from its components.
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Encodes the color for the wire: base64 of the raw 3-byte RGB value.
    pub fn wire_encode(&self) -> String {
        STANDARD.encode([self.r, self.g, self.b])
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let hex = s.trim_start_matches('#');
        if hex.len() != 6 {
            return Err(Error::InvalidColor(s.to_string()));
        }
        let parse = |slice: &str| {
            u8::from_str_radix(slice, 16).map_err(|_| Error::InvalidColor(s.to_string()))
        };
        Ok(Color {
            r: parse(&hex[0..2])?,
            g: parse(&hex[2..4])?,
            b: parse(&hex[4..6])?,
        })
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!("#ff0000".parse::<Color>().unwrap(), Color::new(255, 0, 0));
        assert_eq!("00FF00".parse::<Color>().unwrap(), Color::new(0, 255, 0));
        assert_eq!("#000000".parse::<Color>().unwrap(), Color::BLACK);
        assert!("invalid".parse::<Color>().is_err());
        assert!("#12345".parse::<Color>().is_err());
    }

    #[test]
    fn test_display_lowercase() {
        assert_eq!(Color::new(255, 0, 0).to_string(), "#ff0000");
        assert_eq!(Color::new(0xAB, 0xCD, 0xEF).to_string(), "#abcdef");
        assert_eq!(
            "#ABCDEF".parse::<Color>().unwrap().to_string(),
            "#abcdef"
        );
    }

    #[test]
    fn test_wire_encode() {
        // 3 raw bytes always expand to exactly 4 base64 chars, no padding.
        assert_eq!(Color::BLACK.wire_encode(), "AAAA");
        assert_eq!(Color::new(255, 0, 0).wire_encode(), "/wAA");
        assert_eq!(Color::new(255, 255, 255).wire_encode(), "////");
        assert_eq!(Color::new(0, 0, 255).wire_encode().len(), 4);
    }
}
