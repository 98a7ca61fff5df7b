//! Configuration sections of `hueshift.toml`.
//!
//! # Example
//!
//! ```toml
//! [recolor]
//! background = "#1e1e2e"
//! target_contrast = 7.0
//! min_gain = 1.2
//! initial_step = 30
//!
//! [palette]
//! sample_stride = 10
//! min_alpha = 125
//! cluster_threshold = 8.0
//!
//! [output]
//! suffix = ".recolored"
//! dir = "public/images"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::error::{ConfigDiagnostics, FieldPath};
use crate::color::{Rgb, WcagLevel};
use crate::image::palette::LabClusterPalette;
use crate::image::recolor::SearchParams;

/// `[recolor]` section: background and search policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecolorSection {
    /// Page background color (hex or named).
    pub background: Rgb,
    /// Contrast at which images are left alone and the search stops.
    pub target_contrast: f64,
    /// Minimum contrast gain factor worth recoloring for.
    pub min_gain: f64,
    /// First search step in degrees.
    pub initial_step: u32,
}

impl Default for RecolorSection {
    fn default() -> Self {
        let params = SearchParams::default();
        Self {
            background: Rgb::WHITE,
            target_contrast: params.target_contrast,
            min_gain: params.min_gain,
            initial_step: params.initial_step,
        }
    }
}

impl RecolorSection {
    pub const fn search_params(&self) -> SearchParams {
        SearchParams {
            target_contrast: self.target_contrast,
            min_gain: self.min_gain,
            initial_step: self.initial_step,
        }
    }

    pub(super) fn validate(&self, diag: &mut ConfigDiagnostics) {
        let max = 21.0;
        if !(WcagLevel::Fail.min_ratio()..=max).contains(&self.target_contrast) {
            diag.error_with_hint(
                FieldPath::new("recolor.target_contrast"),
                format!("must be between 1 and {max}, got {}", self.target_contrast),
                "WCAG AA is 4.5, AAA is 7.0",
            );
        }
        if self.min_gain.is_nan() || self.min_gain < 1.0 {
            diag.error(
                FieldPath::new("recolor.min_gain"),
                format!("must be at least 1.0, got {}", self.min_gain),
            );
        }
        if self.initial_step == 0 {
            diag.error(FieldPath::new("recolor.initial_step"), "must be at least 1");
        }
    }
}

/// `[palette]` section: dominant color sampling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteSection {
    pub sample_stride: u32,
    pub min_alpha: u8,
    pub cluster_threshold: f32,
}

impl Default for PaletteSection {
    fn default() -> Self {
        let palette = LabClusterPalette::default();
        Self {
            sample_stride: palette.sample_stride,
            min_alpha: palette.min_alpha,
            cluster_threshold: palette.cluster_threshold,
        }
    }
}

impl PaletteSection {
    pub const fn palette(&self) -> LabClusterPalette {
        LabClusterPalette {
            sample_stride: self.sample_stride,
            min_alpha: self.min_alpha,
            cluster_threshold: self.cluster_threshold,
        }
    }

    pub(super) fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.sample_stride == 0 {
            diag.error(FieldPath::new("palette.sample_stride"), "must be at least 1");
        }
        if self.cluster_threshold.is_nan() || self.cluster_threshold <= 0.0 {
            diag.error(
                FieldPath::new("palette.cluster_threshold"),
                format!("must be positive, got {}", self.cluster_threshold),
            );
        }
    }
}

/// `[output]` section: where recolored images go.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    /// Appended to the file stem when writing next to the source.
    pub suffix: String,
    /// Write into this directory instead of next to the source.
    pub dir: Option<PathBuf>,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            suffix: ".recolored".to_string(),
            dir: None,
        }
    }
}

impl OutputSection {
    pub(super) fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.dir.is_none() && self.suffix.is_empty() {
            diag.error_with_hint(
                FieldPath::new("output.suffix"),
                "must not be empty when `output.dir` is unset",
                "an empty suffix would overwrite the source images",
            );
        }
    }
}
