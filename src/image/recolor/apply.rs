use image::RgbaImage;
use rayon::prelude::*;

use crate::color::{Rgb, shift_hue};

const PARALLEL_PIXEL_THRESHOLD: usize = 32 * 1024;

/// Rotate the hue of every visible pixel by `degrees`, returning a new image.
///
/// Pixels with alpha 0 are copied untouched; alpha is never modified.
/// The transform is lossy: applying it twice compounds rounding error,
/// so keep the original around if it may need to be recomputed.
pub fn apply_hue_shift(img: &RgbaImage, degrees: f64) -> RgbaImage {
    let mut output = img.clone();
    if degrees == 0.0 {
        return output;
    }

    let len = output.width() as usize * output.height() as usize;
    let raw: &mut [u8] = &mut output;

    if len >= PARALLEL_PIXEL_THRESHOLD {
        raw.par_chunks_exact_mut(4)
            .for_each(|pixel| shift_pixel(pixel, degrees));
    } else {
        raw.chunks_exact_mut(4)
            .for_each(|pixel| shift_pixel(pixel, degrees));
    }

    output
}

#[inline]
fn shift_pixel(pixel: &mut [u8], degrees: f64) {
    if pixel[3] == 0 {
        return;
    }
    let shifted = shift_hue(Rgb::new(pixel[0], pixel[1], pixel[2]), degrees);
    pixel[..3].copy_from_slice(&<[u8; 3]>::from(shifted));
}

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};

    use super::*;

    fn sample_image() -> RgbaImage {
        let mut img = RgbaImage::new(3, 2);
        img.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        img.put_pixel(1, 0, Rgba([0, 255, 0, 128]));
        img.put_pixel(2, 0, Rgba([12, 34, 56, 0]));
        img.put_pixel(0, 1, Rgba([200, 200, 200, 255]));
        img.put_pixel(1, 1, Rgba([0, 0, 255, 1]));
        img.put_pixel(2, 1, Rgba([99, 0, 7, 0]));
        img
    }

    #[test]
    fn test_zero_shift_is_identity() {
        let img = sample_image();
        assert_eq!(apply_hue_shift(&img, 0.0), img);
    }

    #[test]
    fn test_shifts_visible_pixels_and_keeps_alpha() {
        let out = apply_hue_shift(&sample_image(), 120.0);

        assert_eq!(out.get_pixel(0, 0), &Rgba([0, 255, 0, 255]));
        assert_eq!(out.get_pixel(1, 0), &Rgba([0, 0, 255, 128]));
        assert_eq!(out.get_pixel(1, 1), &Rgba([255, 0, 0, 1]));
        // Grays have no hue to rotate.
        assert_eq!(out.get_pixel(0, 1), &Rgba([200, 200, 200, 255]));
    }

    #[test]
    fn test_transparent_pixels_are_byte_identical() {
        let img = sample_image();
        let out = apply_hue_shift(&img, -75.0);

        assert_eq!(out.get_pixel(2, 0), img.get_pixel(2, 0));
        assert_eq!(out.get_pixel(2, 1), img.get_pixel(2, 1));
    }

    #[test]
    fn test_preserves_dimensions_and_input() {
        let img = sample_image();
        let before = img.clone();
        let out = apply_hue_shift(&img, 45.0);

        assert_eq!(out.dimensions(), img.dimensions());
        assert_eq!(img, before);
    }

    #[test]
    fn test_large_images_match_per_pixel_shift() {
        let (width, height) = (256_u32, 160_u32);
        let img = RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x % 256) as u8, (y * 3 % 256) as u8, ((x + y) % 256) as u8, (x % 3) as u8 * 120])
        });
        assert!((width * height) as usize >= PARALLEL_PIXEL_THRESHOLD);

        let out = apply_hue_shift(&img, 200.0);
        for (x, y, pixel) in img.enumerate_pixels() {
            let [r, g, b, a] = pixel.0;
            let expected = if a == 0 {
                pixel.0
            } else {
                let s = shift_hue(Rgb::new(r, g, b), 200.0);
                [s.r, s.g, s.b, a]
            };
            assert_eq!(out.get_pixel(x, y).0, expected, "pixel ({x}, {y})");
        }
    }
}
