//! Contrast-aware image recoloring.
//!
//! Given the dominant color of an image and the page background, decide
//! whether contrast is good enough (WCAG) and, if not, rotate the image's
//! hue toward a better-contrasting one.
//!
//! - [`search`]: hill-climbing search for the hue shift
//! - [`apply`]: per-pixel hue rotation of a bitmap
//! - [`policy`]: compliant / unchanged / shifted decision per image
//! - [`process`]: file-to-file entrypoint

mod apply;
mod policy;
mod process;
mod search;

pub use apply::apply_hue_shift;
pub use policy::{RecolorOutcome, Recolored, plan_recolor, recolor_image};
pub use process::{plan_file, recolor_file};
pub use search::{HueSearch, SearchParams, find_optimal_hue_shift, search_hue};

use std::path::PathBuf;
use thiserror::Error;

/// Recoloring errors.
#[derive(Debug, Error)]
pub enum RecolorError {
    #[error("image has no opaque pixels to sample a dominant color from")]
    NoDominantColor,

    #[error("failed to decode image `{0}`")]
    Decode(PathBuf, #[source] image::ImageError),

    #[error("failed to encode image `{0}`")]
    Encode(PathBuf, #[source] image::ImageError),

    #[error("refusing to overwrite source image `{0}`")]
    SameFile(PathBuf),

    #[error("IO error when creating `{0}`")]
    Io(PathBuf, #[source] std::io::Error),
}
