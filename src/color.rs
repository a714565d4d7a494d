//! ARGB color values used by the display settings.
//!
//! Colors travel over the wire as 8-hex-digit uppercase ARGB strings
//! (e.g. `FFADD8E6`), so the type carries explicit parse/format support
//! rather than a serde implementation of its own.

use std::fmt;

/// A 32-bit ARGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Argb {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Default reading color (light blue).
pub const LIGHT_BLUE: Argb = Argb::from_u32(0xFFAD_D8E6);
/// Warning color.
pub const RED: Argb = Argb::from_u32(0xFFFF_0000);
/// Default UI text color.
pub const DARK_BLUE: Argb = Argb::from_u32(0xFF00_008B);
/// Fully transparent.
pub const TRANSPARENT: Argb = Argb::from_u32(0x00FF_FFFF);

impl Argb {
    pub const fn new(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    /// Unpack from a `0xAARRGGBB` value.
    pub const fn from_u32(argb: u32) -> Self {
        Self {
            a: (argb >> 24) as u8,
            r: (argb >> 16) as u8,
            g: (argb >> 8) as u8,
            b: argb as u8,
        }
    }

    /// Pack into a `0xAARRGGBB` value.
    pub const fn to_u32(self) -> u32 {
        (self.a as u32) << 24 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    /// Format as the 8-hex-digit uppercase wire form, e.g. `FFADD8E6`.
    pub fn to_hex(self) -> String {
        format!("{:08X}", self.to_u32())
    }

    /// Parse the wire form. The input must be exactly 8 hex digits.
    pub fn from_hex(s: &str) -> Result<Self, ColorParseError> {
        let s = s.trim();
        if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorParseError(s.to_string()));
        }
        let value = u32::from_str_radix(s, 16).map_err(|_| ColorParseError(s.to_string()))?;
        Ok(Self::from_u32(value))
    }
}

/// Error for a color string that is not 8 hex digits.
#[derive(Debug)]
pub struct ColorParseError(pub String);

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid ARGB color string: {:?}", self.0)
    }
}

impl std::error::Error for ColorParseError {}
