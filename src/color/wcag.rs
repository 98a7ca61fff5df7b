//! WCAG 2.x relative luminance and contrast ratio.
//!
//! - Relative luminance: `L = 0.2126 * R_lin + 0.7152 * G_lin + 0.0722 * B_lin`
//! - Contrast ratio: `(L_lighter + 0.05) / (L_darker + 0.05)`, in `[1, 21]`

use super::Rgb;
use std::fmt;

/// Linearize an 8-bit sRGB channel.
#[inline]
pub fn srgb_to_linear(channel: u8) -> f64 {
    let v = f64::from(channel) / 255.0;
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

/// Relative luminance in `[0, 1]`: 0 for black, 1 for white.
pub fn relative_luminance(color: Rgb) -> f64 {
    0.2126 * srgb_to_linear(color.r)
        + 0.7152 * srgb_to_linear(color.g)
        + 0.0722 * srgb_to_linear(color.b)
}

/// WCAG contrast ratio between two colors. Independent of argument order.
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// WCAG conformance level reached by a contrast ratio (normal text).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WcagLevel {
    Fail,
    /// 3:1, large text only.
    AaLarge,
    /// 4.5:1
    Aa,
    /// 7:1
    Aaa,
}

impl WcagLevel {
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio >= Self::Aaa.min_ratio() {
            Self::Aaa
        } else if ratio >= Self::Aa.min_ratio() {
            Self::Aa
        } else if ratio >= Self::AaLarge.min_ratio() {
            Self::AaLarge
        } else {
            Self::Fail
        }
    }

    /// Lowest contrast ratio that reaches this level.
    pub const fn min_ratio(self) -> f64 {
        match self {
            Self::Fail => 1.0,
            Self::AaLarge => 3.0,
            Self::Aa => 4.5,
            Self::Aaa => 7.0,
        }
    }

    /// Whether this level satisfies `required`.
    pub fn passes(self, required: Self) -> bool {
        self >= required
    }
}

impl fmt::Display for WcagLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Fail => "fails WCAG",
            Self::AaLarge => "AA (large text)",
            Self::Aa => "AA",
            Self::Aaa => "AAA",
        })
    }
}
