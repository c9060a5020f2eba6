use image::DynamicImage;
use log::debug;
use serde::Serialize;

use crate::brightness;
use crate::error::Result;
use crate::geometry::{FaceBox, Point};
use crate::landmarks::LandmarkSet;
use crate::metrics::{RatioSet, RawMeasurements};
use crate::score::{self, SubScores};
use crate::tips::{self, Tip};

/// Complete result of one analysis pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub sub_scores: SubScores,
    pub overall: u8,
    pub tips: Vec<Tip>,
    pub ratios: RatioSet,
    pub measurements: RawMeasurements,
    /// Unrounded symmetry, 0-100.
    pub symmetry_percent: f64,
    /// Luminance variance in the face box, normalized to [0, 1].
    pub luminance_variance: f64,
    /// Midline anchor, for drawing the vertical centerline.
    pub midline: Point,
}

/// Score one face: landmarks and box in `image` pixel space.
///
/// Either every field is computed or an error is returned; nothing is partially filled.
pub fn analyze(
    landmarks: &LandmarkSet,
    face_box: &FaceBox,
    image: &DynamicImage,
) -> Result<Analysis> {
    face_box.validate()?;

    let measurements = RawMeasurements::extract(landmarks)?;
    let ratios = measurements.ratios()?;

    let variance = brightness::luminance_variance(image, face_box)?;
    let sub_scores = SubScores::compute(&measurements, &ratios, score::skin_score(variance));
    let overall = sub_scores.overall();
    let tips = tips::select_tips(&sub_scores, &ratios);

    debug!(
        "scores: {:?}, overall {}, {} tip(s)",
        sub_scores,
        overall,
        tips.len()
    );

    Ok(Analysis {
        sub_scores,
        overall,
        tips,
        ratios,
        symmetry_percent: score::symmetry_norm(&measurements) * 100.0,
        luminance_variance: variance,
        midline: landmarks.midline(),
        measurements,
    })
}
