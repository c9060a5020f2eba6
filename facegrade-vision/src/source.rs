//! Landmark detections read from a JSON file.
//!
//! The detector itself runs elsewhere (e.g. a browser face-api run or an offline script) and
//! stores its output as:
//!
//! ```json
//! {
//!   "image_size": { "width": 640, "height": 480 },
//!   "detections": [
//!     { "score": 0.97,
//!       "box": { "x": 210.0, "y": 120.0, "width": 220.0, "height": 240.0 },
//!       "landmarks": [ { "x": 221.3, "y": 190.8 }, ... 68 points ... ] }
//!   ]
//! }
//! ```
//!
//! `image_size` is the size of the image the detector saw. When it differs from the image being
//! analysed, detections are rescaled into that image's pixel space.

use std::path::Path;

use anyhow::{Context, Result};
use image::{DynamicImage, GenericImageView};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::geometry::{FaceBox, Point};
use crate::landmarks::LandmarkSet;
use crate::pipeline::{Detection, LandmarkSource};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionRecord {
    #[serde(default = "default_score")]
    pub score: f32,
    #[serde(rename = "box")]
    pub face_box: FaceBox,
    pub landmarks: Vec<Point>,
}

fn default_score() -> f32 {
    1.0
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetectionFile {
    #[serde(default)]
    pub image_size: Option<ImageSize>,
    #[serde(default)]
    pub detections: Vec<DetectionRecord>,
}

/// [`LandmarkSource`] backed by stored detector output.
#[derive(Debug, Clone)]
pub struct JsonLandmarkSource {
    file: DetectionFile,
}

impl JsonLandmarkSource {
    pub fn new(file: DetectionFile) -> Self {
        Self { file }
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let file = serde_json::from_str(raw).context("parsing detection JSON")?;
        Ok(Self::new(file))
    }

    pub fn open(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading detections at {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("parsing detections {}", path.display()))
    }

    /// Scale factors from detector space to an image of `width x height`.
    fn scale_to(&self, width: u32, height: u32) -> (f64, f64) {
        match self.file.image_size {
            Some(size) if size.width > 0.0 && size.height > 0.0 => {
                (f64::from(width) / size.width, f64::from(height) / size.height)
            }
            _ => (1.0, 1.0),
        }
    }
}

impl LandmarkSource for JsonLandmarkSource {
    fn detect(&mut self, img: &DynamicImage) -> Result<Vec<Detection>> {
        let (width, height) = img.dimensions();
        let (sx, sy) = self.scale_to(width, height);
        if (sx, sy) != (1.0, 1.0) {
            debug!("rescaling detections by {:.4} x {:.4}", sx, sy);
        }

        // Only the face the pipeline will analyse has to be well formed; a malformed
        // lower-scoring record is skipped.
        let best = self
            .file
            .detections
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.score.total_cmp(&b.score))
            .map(|(i, _)| i);

        let mut detections = Vec::with_capacity(self.file.detections.len());
        for (i, record) in self.file.detections.iter().enumerate() {
            match record.to_detection(sx, sy) {
                Ok(detection) => detections.push(detection),
                Err(e) if Some(i) == best => return Err(e.into()),
                Err(e) => warn!("Skipping detection {} (score {:.3}): {}", i, record.score, e),
            }
        }
        Ok(detections)
    }
}

impl DetectionRecord {
    /// Validate and move into the pixel space of the analysed image.
    pub fn to_detection(&self, sx: f64, sy: f64) -> crate::Result<Detection> {
        let landmarks = LandmarkSet::new(self.landmarks.clone())?;
        self.face_box.validate()?;
        Ok(Detection {
            score: self.score,
            face_box: self.face_box.scaled(sx, sy),
            landmarks: landmarks.scaled(sx, sy),
        })
    }
}
