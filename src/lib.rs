//! Hueshift - contrast-aware hue shifting for site images.
//!
//! Decides, per WCAG contrast, whether an image's dominant color reads
//! well against a page background, and rotates the image's hue when a
//! rotation gives a worthwhile gain.
//!
//! ```ignore
//! use hueshift::color::Rgb;
//! use hueshift::image::recolor::{SearchParams, find_optimal_hue_shift, apply_hue_shift};
//!
//! let shift = find_optimal_hue_shift(Rgb::new(0, 0, 255), Rgb::BLACK, &SearchParams::default());
//! let recolored = apply_hue_shift(&bitmap, shift);
//! ```

pub mod color;
pub mod config;
pub mod image;
pub mod logger;
