use image::RgbaImage;

use crate::color::{Rgb, contrast_ratio};
use crate::image::palette::DominantColor;
use crate::image::recolor::RecolorError;
use crate::image::recolor::apply::apply_hue_shift;
use crate::image::recolor::search::{SearchParams, search_hue};

/// What the recolor policy decided for one image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RecolorOutcome {
    /// Contrast already meets the target; the search never ran.
    Compliant { contrast: f64 },
    /// No rotation gained enough contrast to be worth the distortion.
    Unchanged { contrast: f64, best: f64 },
    /// Rotate hue by `shift` degrees, raising contrast from `before` to `after`.
    Shifted { shift: f64, before: f64, after: f64 },
}

impl RecolorOutcome {
    /// Hue shift to apply (0 unless shifted).
    pub const fn shift(&self) -> f64 {
        match self {
            Self::Shifted { shift, .. } => *shift,
            Self::Compliant { .. } | Self::Unchanged { .. } => 0.0,
        }
    }

    pub const fn is_shifted(&self) -> bool {
        matches!(self, Self::Shifted { .. })
    }
}

/// Decide whether and how far to rotate an image whose dominant color is `dominant`.
pub fn plan_recolor(dominant: Rgb, background: Rgb, params: &SearchParams) -> RecolorOutcome {
    let contrast = contrast_ratio(dominant, background);
    if contrast >= params.target_contrast {
        return RecolorOutcome::Compliant { contrast };
    }

    let search = search_hue(dominant, background, params);
    if search.shift == 0.0 {
        RecolorOutcome::Unchanged {
            contrast,
            best: search.best_contrast,
        }
    } else {
        RecolorOutcome::Shifted {
            shift: search.shift,
            before: contrast,
            after: search.best_contrast,
        }
    }
}

/// A recolor decision together with its result image.
#[derive(Debug, Clone)]
pub struct Recolored {
    pub dominant: Rgb,
    pub outcome: RecolorOutcome,
    /// Present only when the outcome is [`RecolorOutcome::Shifted`].
    pub image: Option<RgbaImage>,
}

/// Extract the dominant color of `img`, plan, and apply the shift if any.
pub fn recolor_image(
    img: &RgbaImage,
    background: Rgb,
    palette: &impl DominantColor,
    params: &SearchParams,
) -> Result<Recolored, RecolorError> {
    let dominant = palette
        .dominant_color(img)
        .ok_or(RecolorError::NoDominantColor)?;

    let outcome = plan_recolor(dominant, background, params);
    let image = outcome
        .is_shifted()
        .then(|| apply_hue_shift(img, outcome.shift()));

    Ok(Recolored {
        dominant,
        outcome,
        image,
    })
}
