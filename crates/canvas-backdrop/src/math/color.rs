//! RGBA color parsed from and written as CSS hex strings

use serde::{Deserialize, Serialize};

use crate::error::BackdropError;

/// 8-bit RGBA color
///
/// Serialized as `#rrggbb` (opaque) or `#rrggbbaa`, which is what theme
/// registries hand over.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Default for Rgba {
    fn default() -> Self {
        // Slate-400
        Self::rgb(0x94, 0xa3, 0xb8)
    }
}

impl Rgba {
    /// Opaque color
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Color with explicit alpha
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` (leading `#` optional)
    pub fn from_hex(hex: &str) -> Result<Self, BackdropError> {
        let digits = hex.trim().trim_start_matches('#');
        let bad = || BackdropError::ColorParse(hex.to_string());
        if !digits.is_ascii() {
            return Err(bad());
        }
        let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| bad());

        match digits.len() {
            3 => {
                let nibble = |i: usize| {
                    u8::from_str_radix(&digits[i..i + 1], 16)
                        .map(|v| v * 17)
                        .map_err(|_| bad())
                };
                Ok(Self::rgb(nibble(0)?, nibble(1)?, nibble(2)?))
            }
            6 => Ok(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Self::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => Err(bad()),
        }
    }

    /// Hex form, alpha omitted when opaque
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// CSS `rgba()` string for canvas style properties
    pub fn to_css(&self) -> String {
        let a = self.alpha();
        format!("rgba({},{},{},{a:.3})", self.r, self.g, self.b)
    }

    /// Alpha as a 0..1 float
    #[inline]
    pub fn alpha(&self) -> f32 {
        self.a as f32 / 255.0
    }
}

impl TryFrom<String> for Rgba {
    type Error = BackdropError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Rgba::from_hex(&value)
    }
}

impl From<Rgba> for String {
    fn from(color: Rgba) -> Self {
        color.to_hex()
    }
}
