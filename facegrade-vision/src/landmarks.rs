//! 68-point facial landmark set (iBUG / dlib indexing).
//!
//! # Layout
//!
//! - 0-16: Jaw outline
//! - 17-26: Eyebrows
//! - 27-35: Nose (27 is the bridge, used as the midline anchor)
//! - 36-41: Left eye (image left)
//! - 42-47: Right eye
//! - 48-59: Outer lip
//! - 60-67: Inner lip

use serde::Serialize;

use crate::error::{AnalysisError, Result};
use crate::geometry::Point;

pub const NUM_LANDMARKS: usize = 68;

pub const JAW_LEFT: usize = 0;
pub const JAW_RIGHT: usize = 16;
pub const CHIN: usize = 8;
pub const NOSE_BRIDGE: usize = 27;
pub const MIDLINE_ANCHOR: usize = NOSE_BRIDGE;

pub const NOSE_LEFT: usize = 31;
pub const NOSE_RIGHT: usize = 35;
pub const MOUTH_LEFT: usize = 48;
pub const MOUTH_RIGHT: usize = 54;

/// Upper-lid points whose mean is the eye center.
pub const LEFT_EYE_CENTER: [usize; 4] = [36, 37, 38, 39];
pub const RIGHT_EYE_CENTER: [usize; 4] = [42, 43, 44, 45];

/// Eye contour indices for one eye.
#[derive(Debug, Clone, Copy)]
pub struct EyeIndices {
    /// Eye corners, measured for eye width.
    pub corners: (usize, usize),
    /// (upper lid, lower lid) pairs measured for eye height.
    pub lids: [(usize, usize); 2],
}

pub const LEFT_EYE: EyeIndices = EyeIndices {
    corners: (36, 39),
    lids: [(37, 41), (38, 40)],
};

pub const RIGHT_EYE: EyeIndices = EyeIndices {
    corners: (42, 45),
    lids: [(43, 47), (44, 46)],
};

/// Bilateral pairs compared against the midline anchor for symmetry:
/// outer eye corners, inner eye corners, nostrils, mouth corners, two jaw levels.
pub const SYMMETRY_PAIRS: [(usize, usize); 6] =
    [(36, 45), (39, 42), (31, 35), (48, 54), (3, 13), (5, 11)];

/// Exactly 68 finite landmarks for one face.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LandmarkSet {
    points: Vec<Point>,
}

impl LandmarkSet {
    pub fn new(points: Vec<Point>) -> Result<Self> {
        if points.len() != NUM_LANDMARKS {
            return Err(AnalysisError::LandmarkCount {
                expected: NUM_LANDMARKS,
                actual: points.len(),
            });
        }
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(AnalysisError::NonFiniteLandmark { index });
        }
        Ok(Self { points })
    }

    /// Build from flat `(x, y)` tuples.
    pub fn from_xy(points: &[(f64, f64)]) -> Result<Self> {
        Self::new(points.iter().map(|&(x, y)| Point::new(x, y)).collect())
    }

    /// Landmark at `index`.
    ///
    /// Panics if `index >= 68`; every index the engine uses is a constant from this module.
    pub fn point(&self, index: usize) -> Point {
        self.points[index]
    }

    pub fn select(&self, indices: &[usize]) -> Vec<Point> {
        indices.iter().map(|&i| self.points[i]).collect()
    }

    pub fn midline(&self) -> Point {
        self.point(MIDLINE_ANCHOR)
    }

    pub fn scaled(&self, sx: f64, sy: f64) -> Self {
        Self {
            points: self.points.iter().map(|p| p.scaled(sx, sy)).collect(),
        }
    }
}
