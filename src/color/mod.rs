//! Color values and WCAG colorimetry.
//!
//! # Modules
//!
//! - [`hsl`]: RGB <-> HSL conversion and hue rotation
//! - [`wcag`]: relative luminance, contrast ratio, conformance levels
//! - [`parse`]: color strings (`#rgb`, `#rrggbb`, named colors)

mod hsl;
mod parse;
mod wcag;

pub use hsl::{Hsl, hsl_to_rgb, rgb_to_hsl, shift_hue, wrap_hue};
pub use parse::{ColorError, parse_color};
pub use wcag::{WcagLevel, contrast_ratio, relative_luminance, srgb_to_linear};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An 8-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Lowercase `#rrggbb` form.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_color(s)
    }
}

impl TryFrom<String> for Rgb {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        parse_color(&value)
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_hex()
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(color: Rgb) -> Self {
        [color.r, color.g, color.b]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_hex_pads_channels() {
        assert_eq!(Rgb::new(0, 10, 255).to_hex(), "#000aff");
        assert_eq!(Rgb::WHITE.to_string(), "#ffffff");
    }

    #[test]
    fn test_from_str_delegates_to_parser() {
        let color: Rgb = "#88c0d0".parse().unwrap();
        assert_eq!(color, Rgb::new(0x88, 0xc0, 0xd0));
        assert!("nope".parse::<Rgb>().is_err());
    }

    #[test]
    fn test_array_conversions() {
        let color = Rgb::from([1, 2, 3]);
        assert_eq!(<[u8; 3]>::from(color), [1, 2, 3]);
    }
}
