use std::fs;
use std::path::Path;

use image::{ImageFormat, RgbaImage};

use crate::color::Rgb;
use crate::image::palette::DominantColor;
use crate::image::recolor::RecolorError;
use crate::image::recolor::policy::{Recolored, plan_recolor, recolor_image};
use crate::image::recolor::search::SearchParams;

/// Decide what [`recolor_file`] would do, without rendering or writing anything.
pub fn plan_file(
    input: &Path,
    background: Rgb,
    palette: &impl DominantColor,
    params: &SearchParams,
) -> Result<Recolored, RecolorError> {
    let img = open_rgba(input)?;
    let dominant = palette
        .dominant_color(&img)
        .ok_or(RecolorError::NoDominantColor)?;

    Ok(Recolored {
        dominant,
        outcome: plan_recolor(dominant, background, params),
        image: None,
    })
}

/// Recolor an image file and write the result as PNG.
///
/// `output` is only written when the image is actually shifted. An `output`
/// naming the input file is rejected before anything is read.
pub fn recolor_file(
    input: &Path,
    output: &Path,
    background: Rgb,
    palette: &impl DominantColor,
    params: &SearchParams,
) -> Result<Recolored, RecolorError> {
    if is_same_file(input, output) {
        return Err(RecolorError::SameFile(input.to_path_buf()));
    }
    let img = open_rgba(input)?;

    let recolored = recolor_image(&img, background, palette, params)?;

    if let Some(shifted) = &recolored.image {
        if let Some(parent) = output.parent() {
            fs::create_dir_all(parent).map_err(|err| RecolorError::Io(parent.to_path_buf(), err))?;
        }
        shifted
            .save_with_format(output, ImageFormat::Png)
            .map_err(|err| RecolorError::Encode(output.to_path_buf(), err))?;
    }

    Ok(recolored)
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

fn open_rgba(input: &Path) -> Result<RgbaImage, RecolorError> {
    image::open(input)
        .map(|img| img.to_rgba8())
        .map_err(|err| RecolorError::Decode(input.to_path_buf(), err))
}

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};
    use tempfile::TempDir;

    use super::*;
    use crate::image::palette::LabClusterPalette;
    use crate::image::recolor::RecolorOutcome;

    #[test]
    fn test_writes_shifted_png() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("logo.png");
        let output = dir.path().join("out/logo.png");
        RgbaImage::from_pixel(8, 8, Rgba([0, 0, 255, 255]))
            .save(&input)
            .unwrap();

        let result = recolor_file(
            &input,
            &output,
            Rgb::BLACK,
            &LabClusterPalette::default(),
            &SearchParams::default(),
        )
        .unwrap();

        assert!(result.outcome.is_shifted());
        let written = image::open(&output).unwrap().to_rgba8();
        assert_eq!(written.dimensions(), (8, 8));
        assert_eq!(written.get_pixel(0, 0), &Rgba([0, 255, 255, 255]));

        // Source untouched.
        let source = image::open(&input).unwrap().to_rgba8();
        assert_eq!(source.get_pixel(0, 0), &Rgba([0, 0, 255, 255]));
    }

    #[test]
    fn test_compliant_image_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("text.png");
        let output = dir.path().join("text.recolored.png");
        RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255]))
            .save(&input)
            .unwrap();

        let result = recolor_file(
            &input,
            &output,
            Rgb::WHITE,
            &LabClusterPalette::default(),
            &SearchParams::default(),
        )
        .unwrap();

        assert!(matches!(result.outcome, RecolorOutcome::Compliant { .. }));
        assert!(!output.exists());
    }

    #[test]
    fn test_plan_file_only_reads() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("logo.png");
        RgbaImage::from_pixel(8, 8, Rgba([0, 0, 255, 255]))
            .save(&input)
            .unwrap();

        let plan = plan_file(
            &input,
            Rgb::BLACK,
            &LabClusterPalette::default(),
            &SearchParams::default(),
        )
        .unwrap();

        assert_eq!(plan.dominant, Rgb::new(0, 0, 255));
        assert_eq!(plan.outcome.shift(), -60.0);
        assert!(plan.image.is_none());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_refuses_to_overwrite_input() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("logo.png");
        RgbaImage::from_pixel(4, 4, Rgba([0, 0, 255, 255]))
            .save(&input)
            .unwrap();

        let same = dir.path().join(".").join("logo.png");
        let err = recolor_file(
            &input,
            &same,
            Rgb::BLACK,
            &LabClusterPalette::default(),
            &SearchParams::default(),
        )
        .unwrap_err();

        assert!(matches!(err, RecolorError::SameFile(_)));
        let source = image::open(&input).unwrap().to_rgba8();
        assert_eq!(source.get_pixel(0, 0), &Rgba([0, 0, 255, 255]));
    }

    #[test]
    fn test_missing_input_is_decode_error() {
        let dir = TempDir::new().unwrap();
        let err = recolor_file(
            &dir.path().join("missing.png"),
            &dir.path().join("out.png"),
            Rgb::WHITE,
            &LabClusterPalette::default(),
            &SearchParams::default(),
        )
        .unwrap_err();

        assert!(matches!(err, RecolorError::Decode(..)));
        assert!(err.to_string().contains("missing.png"));
    }
}
