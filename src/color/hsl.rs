//! RGB <-> HSL conversion.
//!
//! Hue is in degrees `[0, 360)`, saturation and lightness in percent
//! `[0, 100]`. HSL values are kept unquantized so a round trip through
//! [`rgb_to_hsl`] and [`hsl_to_rgb`] reproduces the input channels.

use super::Rgb;

/// A color in HSL space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    /// Same saturation and lightness at another hue (wrapped into `[0, 360)`).
    #[inline]
    pub fn with_hue(self, h: f64) -> Self {
        Self {
            h: wrap_hue(h),
            ..self
        }
    }
}

/// Reduce an angle in degrees into `[0, 360)`.
#[inline]
pub fn wrap_hue(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // -1e-17 wraps to 360.0 after rounding
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Convert an sRGB color to HSL.
///
/// Achromatic colors (all channels equal) have hue 0 and saturation 0.
pub fn rgb_to_hsl(color: Rgb) -> Hsl {
    let r = f64::from(color.r) / 255.0;
    let g = f64::from(color.g) / 255.0;
    let b = f64::from(color.b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return Hsl::new(0.0, 0.0, l * 100.0);
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };

    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    Hsl::new(h * 60.0, s * 100.0, l * 100.0)
}

/// Convert an HSL color back to sRGB, rounding each channel to the nearest integer.
pub fn hsl_to_rgb(hsl: Hsl) -> Rgb {
    let h = hsl.h / 360.0;
    let s = hsl.s / 100.0;
    let l = hsl.l / 100.0;

    if s == 0.0 {
        let v = to_channel(l);
        return Rgb::new(v, v, v);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    Rgb::new(
        to_channel(hue_to_channel(p, q, h + 1.0 / 3.0)),
        to_channel(hue_to_channel(p, q, h)),
        to_channel(hue_to_channel(p, q, h - 1.0 / 3.0)),
    )
}

/// Rotate the hue of `color` by `degrees`, keeping saturation and lightness.
pub fn shift_hue(color: Rgb, degrees: f64) -> Rgb {
    let hsl = rgb_to_hsl(color);
    hsl_to_rgb(hsl.with_hue(hsl.h + degrees))
}

#[inline]
fn hue_to_channel(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 1.0 / 2.0 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
    }
    p
}

#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // clamped to 0..=255
fn to_channel(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    fn channel_delta(a: Rgb, b: Rgb) -> u8 {
        a.r.abs_diff(b.r).max(a.g.abs_diff(b.g)).max(a.b.abs_diff(b.b))
    }

    #[test]
    fn test_primary_hues() {
        assert_close(rgb_to_hsl(Rgb::new(255, 0, 0)).h, 0.0);
        assert_close(rgb_to_hsl(Rgb::new(255, 255, 0)).h, 60.0);
        assert_close(rgb_to_hsl(Rgb::new(0, 255, 0)).h, 120.0);
        assert_close(rgb_to_hsl(Rgb::new(0, 0, 255)).h, 240.0);
        assert_close(rgb_to_hsl(Rgb::new(255, 0, 255)).h, 300.0);
    }

    #[test]
    fn test_achromatic_has_no_hue_or_saturation() {
        let gray = rgb_to_hsl(Rgb::new(128, 128, 128));
        assert_eq!(gray.h, 0.0);
        assert_eq!(gray.s, 0.0);
        assert_close(gray.l, 128.0 / 255.0 * 100.0);
    }

    #[test]
    fn test_saturation_branches_on_lightness() {
        // l < 0.5: d / (max + min)
        let dark = rgb_to_hsl(Rgb::new(100, 50, 50));
        assert_close(dark.s, (50.0 / 255.0) / (150.0 / 255.0) * 100.0);

        // l > 0.5: d / (2 - max - min)
        let light = rgb_to_hsl(Rgb::new(250, 200, 200));
        let (max, min) = (250.0 / 255.0, 200.0 / 255.0);
        assert_close(light.s, (max - min) / (2.0 - max - min) * 100.0);
    }

    #[test]
    fn test_hsl_to_rgb_known_values() {
        assert_eq!(hsl_to_rgb(Hsl::new(0.0, 100.0, 50.0)), Rgb::new(255, 0, 0));
        assert_eq!(hsl_to_rgb(Hsl::new(180.0, 100.0, 50.0)), Rgb::new(0, 255, 255));
        assert_eq!(hsl_to_rgb(Hsl::new(240.0, 100.0, 50.0)), Rgb::new(0, 0, 255));
        assert_eq!(hsl_to_rgb(Hsl::new(0.0, 0.0, 100.0)), Rgb::WHITE);
        assert_eq!(hsl_to_rgb(Hsl::new(0.0, 0.0, 0.0)), Rgb::BLACK);
    }

    #[test]
    fn test_round_trip_within_one() {
        for r in (0..=255u8).step_by(15) {
            for g in (0..=255u8).step_by(15) {
                for b in (0..=255u8).step_by(15) {
                    let color = Rgb::new(r, g, b);
                    let back = hsl_to_rgb(rgb_to_hsl(color));
                    assert!(channel_delta(color, back) <= 1, "{color} -> {back}");
                }
            }
        }
    }

    #[test]
    fn test_wrap_hue() {
        assert_close(wrap_hue(370.0), 10.0);
        assert_close(wrap_hue(-30.0), 330.0);
        assert_close(wrap_hue(360.0), 0.0);
        assert_eq!(wrap_hue(-1e-17), 0.0);
    }

    #[test]
    fn test_shift_hue_rotates_primaries() {
        assert_eq!(shift_hue(Rgb::new(255, 0, 0), 120.0), Rgb::new(0, 255, 0));
        assert_eq!(shift_hue(Rgb::new(255, 0, 0), -120.0), Rgb::new(0, 0, 255));
        assert_eq!(shift_hue(Rgb::new(0, 0, 255), 480.0), Rgb::new(255, 0, 0));
    }

    #[test]
    fn test_shift_hue_leaves_grays_alone() {
        let gray = Rgb::new(200, 200, 200);
        assert_eq!(shift_hue(gray, 90.0), gray);
    }
}
