use log::debug;
use serde::Serialize;

use crate::error::{AnalysisError, Result};
use crate::geometry::{average, distance, Point};
use crate::landmarks::{self, EyeIndices, LandmarkSet};

/// Geometric measurements taken directly from the landmarks, in pixels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawMeasurements {
    pub face_width: f64,
    pub face_height: f64,
    pub left_eye_center: Point,
    pub right_eye_center: Point,
    pub interocular: f64,
    pub eye_width_l: f64,
    pub eye_width_r: f64,
    pub eye_height_l: f64,
    pub eye_height_r: f64,
    pub nose_width: f64,
    pub mouth_width: f64,
    /// Sum over the bilateral pairs of |d(left, midline) - d(right, midline)|.
    pub sym_error_sum: f64,
}

/// Dimensionless ratios, used for scoring and unchanged as tip input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatioSet {
    pub face_ratio: f64,
    pub eye_spacing: f64,
    pub nose_ratio: f64,
    pub mouth_ratio: f64,
    pub eye_openness_l: f64,
    pub eye_openness_r: f64,
}

impl RawMeasurements {
    pub fn extract(lm: &LandmarkSet) -> Result<Self> {
        let d = |a: usize, b: usize| distance(lm.point(a), lm.point(b));

        let left_eye_center = average(&lm.select(&landmarks::LEFT_EYE_CENTER))?;
        let right_eye_center = average(&lm.select(&landmarks::RIGHT_EYE_CENTER))?;

        let eye_width = |eye: &EyeIndices| d(eye.corners.0, eye.corners.1);
        let eye_height = |eye: &EyeIndices| {
            let [(u0, l0), (u1, l1)] = eye.lids;
            (d(u0, l0) + d(u1, l1)) / 2.0
        };

        let measurements = Self {
            face_width: d(landmarks::JAW_LEFT, landmarks::JAW_RIGHT),
            face_height: d(landmarks::CHIN, landmarks::NOSE_BRIDGE),
            left_eye_center,
            right_eye_center,
            interocular: distance(left_eye_center, right_eye_center),
            eye_width_l: eye_width(&landmarks::LEFT_EYE),
            eye_width_r: eye_width(&landmarks::RIGHT_EYE),
            eye_height_l: eye_height(&landmarks::LEFT_EYE),
            eye_height_r: eye_height(&landmarks::RIGHT_EYE),
            nose_width: d(landmarks::NOSE_LEFT, landmarks::NOSE_RIGHT),
            mouth_width: d(landmarks::MOUTH_LEFT, landmarks::MOUTH_RIGHT),
            sym_error_sum: symmetry_error_sum(lm),
        };
        debug!("measurements: {:?}", measurements);
        Ok(measurements)
    }

    /// Ratios relative to face width and eye width.
    pub fn ratios(&self) -> Result<RatioSet> {
        nonzero("face width", self.face_width)?;
        nonzero("left eye width", self.eye_width_l)?;
        nonzero("right eye width", self.eye_width_r)?;

        Ok(RatioSet {
            face_ratio: self.face_height / self.face_width,
            eye_spacing: self.interocular / self.face_width,
            nose_ratio: self.nose_width / self.face_width,
            mouth_ratio: self.mouth_width / self.face_width,
            eye_openness_l: self.eye_height_l / self.eye_width_l,
            eye_openness_r: self.eye_height_r / self.eye_width_r,
        })
    }
}

fn nonzero(measurement: &'static str, value: f64) -> Result<()> {
    if value == 0.0 {
        return Err(AnalysisError::DegenerateGeometry { measurement });
    }
    Ok(())
}

fn symmetry_error_sum(lm: &LandmarkSet) -> f64 {
    let mid = lm.midline();
    landmarks::SYMMETRY_PAIRS
        .iter()
        .map(|&(l, r)| (distance(lm.point(l), mid) - distance(lm.point(r), mid)).abs())
        .sum()
}
