//! Hue-shift search.
//!
//! Hill-climbs around the hue circle with saturation and lightness held
//! fixed, halving the step whenever neither neighbor improves contrast.
//! The result is a local optimum; contrast against hue is not unimodal.

use crate::color::{
    Rgb, WcagLevel, contrast_ratio, hsl_to_rgb, relative_luminance, rgb_to_hsl, wrap_hue,
};

/// Backgrounds brighter than this start the search at the complementary hue.
const LIGHT_BACKGROUND_LUMINANCE: f64 = 0.5;

/// Tunables for [`search_hue`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchParams {
    /// Contrast at which the search stops (and the policy skips the image).
    pub target_contrast: f64,
    /// Minimum `best / original` contrast gain worth recoloring for.
    pub min_gain: f64,
    /// First step in whole degrees.
    pub initial_step: u32,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            target_contrast: WcagLevel::Aaa.min_ratio(),
            min_gain: 1.2,
            initial_step: 30,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Candidate {
    hue: f64,
    contrast: f64,
}

/// Outcome of a hue search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HueSearch {
    pub original_hue: f64,
    pub original_contrast: f64,
    pub best_hue: f64,
    pub best_contrast: f64,
    pub iterations: u32,
    /// Shift in `(-180, 180]`, or 0 when the gain is below `min_gain`.
    pub shift: f64,
}

/// Search for the hue rotation of `dominant` that best contrasts with `background`.
pub fn search_hue(dominant: Rgb, background: Rgb, params: &SearchParams) -> HueSearch {
    let origin = rgb_to_hsl(dominant);
    let original_contrast = contrast_ratio(dominant, background);
    let contrast_at = |hue: f64| Candidate {
        hue,
        contrast: contrast_ratio(hsl_to_rgb(origin.with_hue(hue)), background),
    };

    // Against a light background the complement tends to be darker.
    let start = if relative_luminance(background) > LIGHT_BACKGROUND_LUMINANCE {
        wrap_hue(origin.h + 180.0)
    } else {
        origin.h
    };

    let mut best = contrast_at(start);
    let mut step = params.initial_step;
    let mut iterations = 0;

    while step >= 1 {
        iterations += 1;

        let offset = f64::from(step);
        let clockwise = contrast_at(wrap_hue(best.hue + offset));
        let counter_clockwise = contrast_at(wrap_hue(best.hue - offset));

        if clockwise.contrast > best.contrast && clockwise.contrast >= counter_clockwise.contrast {
            best = clockwise;
        } else if counter_clockwise.contrast > best.contrast {
            best = counter_clockwise;
        } else {
            step /= 2;
        }

        if best.contrast >= params.target_contrast {
            break;
        }
    }

    let shift = if best.contrast < original_contrast * params.min_gain {
        0.0
    } else {
        normalize_shift(best.hue - origin.h)
    };

    HueSearch {
        original_hue: origin.h,
        original_contrast,
        best_hue: best.hue,
        best_contrast: best.contrast,
        iterations,
        shift,
    }
}

/// Hue shift in degrees that improves contrast of `dominant` against `background`.
///
/// Returns 0 when no rotation gains at least `params.min_gain`.
pub fn find_optimal_hue_shift(dominant: Rgb, background: Rgb, params: &SearchParams) -> f64 {
    search_hue(dominant, background, params).shift
}

/// Map a hue difference into `(-180, 180]`.
#[inline]
fn normalize_shift(delta: f64) -> f64 {
    if delta > 180.0 {
        delta - 360.0
    } else if delta <= -180.0 {
        delta + 360.0
    } else {
        delta
    }
}
