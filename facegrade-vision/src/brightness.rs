//! Luminance variance inside the face box, used as a skin-evenness proxy.

use image::{DynamicImage, GenericImageView, RgbImage};
use log::debug;

use crate::error::{AnalysisError, Result};
use crate::geometry::FaceBox;

/// Rec. 709 luma of an 8-bit RGB pixel, in [0, 255].
pub fn luminance(r: u8, g: u8, b: u8) -> f64 {
    0.2126 * f64::from(r) + 0.7152 * f64::from(g) + 0.0722 * f64::from(b)
}

/// The `floor(width) x floor(height)` pixels (at least 1x1) starting at the box's top-left pixel.
///
/// The box must lie fully inside the image.
pub fn sample_region(img: &DynamicImage, face_box: &FaceBox) -> Result<RgbImage> {
    face_box.validate()?;
    let (img_w, img_h) = img.dimensions();
    if img_w == 0 || img_h == 0 {
        return Err(AnalysisError::ImageRead("image has no pixels".to_string()));
    }

    let right = face_box.x + face_box.width;
    let bottom = face_box.y + face_box.height;
    if face_box.x < 0.0 || face_box.y < 0.0 || right > img_w as f64 || bottom > img_h as f64 {
        return Err(AnalysisError::ImageRead(format!(
            "box ({:.1}, {:.1}, {:.1}x{:.1}) outside {}x{} image",
            face_box.x, face_box.y, face_box.width, face_box.height, img_w, img_h
        )));
    }

    let out_w = (face_box.width.floor() as u32).max(1);
    let out_h = (face_box.height.floor() as u32).max(1);

    // Whole pixels starting at the box's top-left pixel; fractional edges are not stretched in.
    let x0 = face_box.x.floor() as u32;
    let y0 = face_box.y.floor() as u32;
    Ok(img.crop_imm(x0, y0, out_w, out_h).to_rgb8())
}

/// `mean(Y^2) - mean(Y)^2` over the sampled region, normalized by `255^2`.
pub fn luminance_variance(img: &DynamicImage, face_box: &FaceBox) -> Result<f64> {
    let sample = sample_region(img, face_box)?;

    let mut sum = 0.0;
    let mut sum2 = 0.0;
    for px in sample.pixels() {
        let y = luminance(px[0], px[1], px[2]);
        sum += y;
        sum2 += y * y;
    }
    let n = f64::from(sample.width() * sample.height());
    let mean = sum / n;
    let variance = sum2 / n - mean * mean;

    debug!(
        "luminance over {}x{} sample: mean {:.2}, variance {:.6}",
        sample.width(),
        sample.height(),
        mean,
        variance / (255.0 * 255.0)
    );
    Ok(variance / (255.0 * 255.0))
}
