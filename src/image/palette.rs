//! Dominant color extraction.
//!
//! The recolor policy only needs a single representative color per image.
//! [`LabClusterPalette`] samples pixels on a stride, groups them into
//! clusters in CIE LAB (so "close" means perceptually close), and returns
//! the mean color of the heaviest cluster.

use image::RgbaImage;
use lab::Lab;

use crate::color::Rgb;

/// Source of an image's dominant color.
pub trait DominantColor {
    /// `None` when the image has no sampleable pixels.
    fn dominant_color(&self, img: &RgbaImage) -> Option<Rgb>;
}

/// Channels above this on all of R, G and B count as near-white.
const NEAR_WHITE: u8 = 250;

/// Greedy LAB clustering over sampled pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabClusterPalette {
    /// Sample every n-th pixel (row-major).
    pub sample_stride: u32,
    /// Pixels below this alpha are ignored.
    pub min_alpha: u8,
    /// Maximum ΔE between a sample and a cluster centroid.
    pub cluster_threshold: f32,
}

impl Default for LabClusterPalette {
    fn default() -> Self {
        Self {
            sample_stride: 10,
            min_alpha: 125,
            cluster_threshold: 8.0,
        }
    }
}

impl DominantColor for LabClusterPalette {
    fn dominant_color(&self, img: &RgbaImage) -> Option<Rgb> {
        let stride = self.sample_stride.max(1) as usize;
        let threshold_sq = self.cluster_threshold * self.cluster_threshold;

        // Near-white samples only win when nothing else is visible.
        let mut colored: Vec<Cluster> = Vec::with_capacity(16);
        let mut near_white: Vec<Cluster> = Vec::new();

        for pixel in img.pixels().step_by(stride) {
            let [r, g, b, a] = pixel.0;
            if a < self.min_alpha {
                continue;
            }

            let rgb = [r, g, b];
            let weight = (f32::from(a) / 255.0).max(0.1);
            let clusters = if r > NEAR_WHITE && g > NEAR_WHITE && b > NEAR_WHITE {
                &mut near_white
            } else {
                &mut colored
            };
            add_to_cluster(clusters, rgb, weight, threshold_sq);
        }

        heaviest(colored)
            .or_else(|| heaviest(near_white))
            .map(|cluster| cluster.mean_rgb())
    }
}

#[derive(Clone, Copy)]
struct Cluster {
    sum_l: f32,
    sum_a: f32,
    sum_b: f32,
    sum_rgb: [f32; 3],
    weight: f32,
}

impl Cluster {
    #[inline]
    fn new(rgb: [u8; 3], lab: Lab, weight: f32) -> Self {
        let mut cluster = Self {
            sum_l: 0.0,
            sum_a: 0.0,
            sum_b: 0.0,
            sum_rgb: [0.0; 3],
            weight: 0.0,
        };
        cluster.add(rgb, lab, weight);
        cluster
    }

    #[inline]
    fn add(&mut self, rgb: [u8; 3], lab: Lab, weight: f32) {
        self.sum_l += lab.l * weight;
        self.sum_a += lab.a * weight;
        self.sum_b += lab.b * weight;
        for (sum, channel) in self.sum_rgb.iter_mut().zip(rgb) {
            *sum += f32::from(channel) * weight;
        }
        self.weight += weight;
    }

    #[inline]
    fn centroid(&self) -> Lab {
        let n = self.weight.max(f32::EPSILON);
        Lab {
            l: self.sum_l / n,
            a: self.sum_a / n,
            b: self.sum_b / n,
        }
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // clamped to 0..=255
    fn mean_rgb(&self) -> Rgb {
        let n = self.weight.max(f32::EPSILON);
        let [r, g, b] = self
            .sum_rgb
            .map(|sum| (sum / n).round().clamp(0.0, 255.0) as u8);
        Rgb::new(r, g, b)
    }
}

#[inline]
fn add_to_cluster(clusters: &mut Vec<Cluster>, rgb: [u8; 3], weight: f32, threshold_sq: f32) {
    let lab = Lab::from_rgb(&rgb);

    let nearest = clusters
        .iter_mut()
        .map(|cluster| (color_distance_sq(&cluster.centroid(), &lab), cluster))
        .min_by(|(a, _), (b, _)| a.total_cmp(b));

    match nearest {
        Some((dist_sq, cluster)) if dist_sq <= threshold_sq => cluster.add(rgb, lab, weight),
        _ => clusters.push(Cluster::new(rgb, lab, weight)),
    }
}

fn heaviest(clusters: Vec<Cluster>) -> Option<Cluster> {
    clusters
        .into_iter()
        .max_by(|a, b| a.weight.total_cmp(&b.weight))
}

/// Squared color distance in LAB space (ΔE^2).
#[inline]
fn color_distance_sq(c1: &Lab, c2: &Lab) -> f32 {
    let dl = c1.l - c2.l;
    let da = c1.a - c2.a;
    let db = c1.b - c2.b;
    dl * dl + da * da + db * db
}
