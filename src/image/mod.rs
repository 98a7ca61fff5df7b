//! Image processing utilities.
//!
//! # Modules
//!
//! - [`recolor`]: contrast-aware hue shifting
//! - [`palette`]: dominant color extraction

pub mod palette;
pub mod recolor;
