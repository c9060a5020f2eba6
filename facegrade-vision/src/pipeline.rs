use image::DynamicImage;
use log::{info, warn};

use crate::analysis::{self, Analysis};
use crate::error::{AnalysisError, Result};
use crate::geometry::FaceBox;
use crate::landmarks::LandmarkSet;
use crate::session::Submission;

/// One face found by a landmark detector.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub score: f32,
    pub face_box: FaceBox,
    pub landmarks: LandmarkSet,
}

/// External detector producing 68-point landmarks.
///
/// Coordinates must be in the pixel space of the image passed to `detect`.
pub trait LandmarkSource {
    fn detect(&mut self, img: &DynamicImage) -> anyhow::Result<Vec<Detection>>;
}

impl<S: LandmarkSource + ?Sized> LandmarkSource for Box<S> {
    fn detect(&mut self, img: &DynamicImage) -> anyhow::Result<Vec<Detection>> {
        (**self).detect(img)
    }
}

/// Full pipeline: detect landmarks → keep the best face → score
pub struct Pipeline<S> {
    pub source: S,
}

impl<S: LandmarkSource> Pipeline<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Highest-scoring detection, or `NoFaceDetected`.
    pub fn detect_best(&mut self, img: &DynamicImage) -> Result<Detection> {
        let detections = self.source.detect(img).map_err(|e| {
            // Keep input-contract errors typed; anything else is a detector failure.
            match e.downcast::<AnalysisError>() {
                Ok(typed) => typed,
                Err(e) => AnalysisError::Source(e.context("detecting landmarks")),
            }
        })?;
        if detections.len() > 1 {
            warn!(
                "{} faces detected, analysing only the highest-scoring one",
                detections.len()
            );
        }

        detections
            .into_iter()
            .max_by(|a, b| a.score.total_cmp(&b.score))
            .ok_or(AnalysisError::NoFaceDetected)
    }

    /// Process an image: detect the best face and analyse it
    pub fn process_image(&mut self, img: &DynamicImage) -> Result<(Detection, Analysis)> {
        let detection = self.detect_best(img)?;
        info!("Face detected with score {:.3}", detection.score);

        let analysis = analysis::analyze(&detection.landmarks, &detection.face_box, img)?;
        info!(
            "Overall score {} (symmetry {}, proportion {}, feature {}, skin {})",
            analysis.overall,
            analysis.sub_scores.symmetry,
            analysis.sub_scores.proportion,
            analysis.sub_scores.feature,
            analysis.sub_scores.skin
        );
        Ok((detection, analysis))
    }

    /// Like [`Pipeline::process_image`], but the result is discarded if a newer image was
    /// submitted to the same session before it completed.
    pub fn process_submission(
        &mut self,
        submission: &Submission,
        img: &DynamicImage,
    ) -> Result<(Detection, Analysis)> {
        submission.ensure_current()?;
        let result = self.process_image(img);
        if !submission.is_current() {
            warn!(
                "Dropping result for submission {}: superseded by {}",
                submission.id(),
                submission.latest()
            );
            return Err(AnalysisError::Superseded {
                id: submission.id(),
            });
        }
        result
    }
}
