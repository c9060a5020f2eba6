//! Raw measurements to 0-100 sub-scores, and the weighted overall score.
//!
//! All targets and tolerances are fixed heuristics; changing them changes every score.

use serde::Serialize;

use crate::metrics::{RatioSet, RawMeasurements};

/// Target ratio and tolerance (fraction of the target) for one ratio-based term.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatioTarget {
    pub target: f64,
    pub tolerance: f64,
}

impl RatioTarget {
    pub const fn new(target: f64, tolerance: f64) -> Self {
        Self { target, tolerance }
    }

    pub fn score(&self, value: f64) -> f64 {
        target_ratio_score(value, self.target, self.tolerance)
    }
}

pub const FACE_RATIO: RatioTarget = RatioTarget::new(1.0, 0.25);
pub const EYE_SPACING: RatioTarget = RatioTarget::new(0.46, 0.26);
pub const NOSE_RATIO: RatioTarget = RatioTarget::new(0.22, 0.4);
pub const MOUTH_RATIO: RatioTarget = RatioTarget::new(0.34, 0.35);
pub const EYE_OPENNESS: RatioTarget = RatioTarget::new(0.3, 0.7);

/// Symmetry pairs the error sum is averaged over.
const SYMMETRY_PAIR_COUNT: f64 = 6.0;

pub const SYMMETRY_WEIGHT: f64 = 0.30;
pub const PROPORTION_WEIGHT: f64 = 0.30;
pub const FEATURE_WEIGHT: f64 = 0.20;
pub const SKIN_WEIGHT: f64 = 0.20;

/// Closeness of `value` to `target` in [0, 1].
///
/// Linear and symmetric around the target; reaches 0 once `|value - target| >= tolerance * target`.
pub fn target_ratio_score(value: f64, target: f64, tolerance: f64) -> f64 {
    let deviation = (value - target).abs();
    let band = tolerance * target;
    (1.0 - deviation / band).max(0.0)
}

/// Round to an integer score clamped to [0, 100].
pub(crate) fn to_score(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}

/// Mean per-pair asymmetry against half the face width, inverted into [0, 1].
pub fn symmetry_norm(m: &RawMeasurements) -> f64 {
    let mean_error = m.sym_error_sum / SYMMETRY_PAIR_COUNT;
    1.0 - (mean_error / (m.face_width * 0.5)).min(1.0)
}

pub fn symmetry_score(m: &RawMeasurements) -> u8 {
    to_score(symmetry_norm(m) * 100.0)
}

pub fn proportion_score(r: &RatioSet) -> u8 {
    let face = FACE_RATIO.score(r.face_ratio);
    let eyes = EYE_SPACING.score(r.eye_spacing);
    to_score((face + eyes) / 2.0 * 100.0)
}

pub fn feature_score(r: &RatioSet) -> u8 {
    let nose = NOSE_RATIO.score(r.nose_ratio);
    let mouth = MOUTH_RATIO.score(r.mouth_ratio);
    let eye_l = EYE_OPENNESS.score(r.eye_openness_l);
    let eye_r = EYE_OPENNESS.score(r.eye_openness_r);
    let eyes = (eye_l + eye_r) / 2.0;
    to_score((nose + mouth + eyes) / 3.0 * 100.0)
}

/// Skin evenness from normalized luminance variance (see [`crate::brightness`]).
pub fn skin_score(variance: f64) -> u8 {
    to_score(100.0 - 500.0 * variance)
}

/// The four component scores, each in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SubScores {
    pub symmetry: u8,
    pub proportion: u8,
    pub feature: u8,
    pub skin: u8,
}

impl SubScores {
    pub fn new(symmetry: u8, proportion: u8, feature: u8, skin: u8) -> Self {
        Self {
            symmetry: symmetry.min(100),
            proportion: proportion.min(100),
            feature: feature.min(100),
            skin: skin.min(100),
        }
    }

    /// Score the geometry; `skin` comes from sampling the image.
    pub fn compute(m: &RawMeasurements, r: &RatioSet, skin: u8) -> Self {
        Self::new(symmetry_score(m), proportion_score(r), feature_score(r), skin)
    }

    /// Fixed-weight overall score.
    pub fn overall(&self) -> u8 {
        let total = f64::from(self.symmetry) * SYMMETRY_WEIGHT
            + f64::from(self.proportion) * PROPORTION_WEIGHT
            + f64::from(self.feature) * FEATURE_WEIGHT
            + f64::from(self.skin) * SKIN_WEIGHT;
        to_score(total)
    }
}
