mod common;

use anyhow::Result;
use common::{face_box, face_landmarks, face_points, flat_image, FaceShape};
use facegrade_vision::source::{DetectionFile, DetectionRecord, ImageSize};
use facegrade_vision::{
    AnalysisError, AnalysisSession, Detection, JsonLandmarkSource, LandmarkSource, Pipeline, Point,
};
use image::DynamicImage;

/// Returns a fixed set of detections for every image.
struct FixedSource(Vec<Detection>);

impl LandmarkSource for FixedSource {
    fn detect(&mut self, _img: &DynamicImage) -> Result<Vec<Detection>> {
        Ok(self.0.clone())
    }
}

/// Registers a newer submission while "detecting", like a user dropping a second image.
struct InterruptingSource {
    session: AnalysisSession,
    detection: Detection,
}

impl LandmarkSource for InterruptingSource {
    fn detect(&mut self, _img: &DynamicImage) -> Result<Vec<Detection>> {
        self.session.submit();
        Ok(vec![self.detection.clone()])
    }
}

struct FailingSource;

impl LandmarkSource for FailingSource {
    fn detect(&mut self, _img: &DynamicImage) -> Result<Vec<Detection>> {
        anyhow::bail!("model not loaded")
    }
}

fn detection(shape: &FaceShape, score: f32) -> Detection {
    Detection {
        score,
        face_box: face_box(shape),
        landmarks: face_landmarks(shape),
    }
}

#[test]
fn test_no_face_is_absence() {
    let mut pipeline = Pipeline::new(FixedSource(vec![]));
    let img = flat_image(64, 64, [0, 0, 0]);
    let err = pipeline.process_image(&img).unwrap_err();
    assert!(matches!(err, AnalysisError::NoFaceDetected));
    assert!(err.is_absence());
}

#[test]
fn test_best_detection_is_analysed() -> Result<()> {
    env_logger::try_init().ok();
    let ideal = FaceShape::ideal(128.0);
    let narrow = FaceShape {
        interocular: 30.0,
        ..ideal
    };
    let mut pipeline = Pipeline::new(FixedSource(vec![
        detection(&narrow, 0.7),
        detection(&ideal, 0.95),
        detection(&narrow, 0.9),
    ]));

    let img = flat_image(256, 256, [150, 150, 150]);
    let (best, analysis) = pipeline.process_image(&img)?;
    assert_eq!(best.score, 0.95);
    assert_eq!(analysis.overall, 100);
    Ok(())
}

#[test]
fn test_source_error_propagates() {
    let mut pipeline = Pipeline::new(FailingSource);
    let img = flat_image(8, 8, [0, 0, 0]);
    let err = pipeline.process_image(&img).unwrap_err();
    assert!(matches!(err, AnalysisError::Source(_)));
    assert!(format!("{:#}", err).contains("model not loaded"));
}

#[test]
fn test_current_submission_completes() -> Result<()> {
    let session = AnalysisSession::new();
    let shape = FaceShape::ideal(128.0);
    let mut pipeline = Pipeline::new(FixedSource(vec![detection(&shape, 0.9)]));
    let img = flat_image(256, 256, [150, 150, 150]);

    let submission = session.submit();
    let (_, analysis) = pipeline.process_submission(&submission, &img)?;
    assert_eq!(analysis.sub_scores.symmetry, 100);
    Ok(())
}

#[test]
fn test_stale_submission_is_dropped_before_detection() {
    let session = AnalysisSession::new();
    let shape = FaceShape::ideal(128.0);
    let mut pipeline = Pipeline::new(FixedSource(vec![detection(&shape, 0.9)]));
    let img = flat_image(256, 256, [150, 150, 150]);

    let old = session.submit();
    let _new = session.submit();
    assert!(matches!(
        pipeline.process_submission(&old, &img),
        Err(AnalysisError::Superseded { id: 1 })
    ));
}

#[test]
fn test_submission_superseded_during_detection() {
    let session = AnalysisSession::new();
    let shape = FaceShape::ideal(128.0);
    let mut pipeline = Pipeline::new(InterruptingSource {
        session: session.clone(),
        detection: detection(&shape, 0.9),
    });
    let img = flat_image(256, 256, [150, 150, 150]);

    let submission = session.submit();
    let err = pipeline.process_submission(&submission, &img).unwrap_err();
    assert!(matches!(err, AnalysisError::Superseded { id: 1 }));
    assert_eq!(session.latest(), 2);
}

#[test]
fn test_json_source_end_to_end() -> Result<()> {
    // Detector ran on a half-size copy of the image.
    let shape = FaceShape::ideal(64.0);
    let small_box = face_box(&shape);
    let file = DetectionFile {
        image_size: Some(ImageSize {
            width: 128.0,
            height: 128.0,
        }),
        detections: vec![DetectionRecord {
            score: 0.99,
            face_box: facegrade_vision::FaceBox::new(
                small_box.x / 2.0,
                small_box.y / 2.0,
                small_box.width / 2.0,
                small_box.height / 2.0,
            )?,
            landmarks: face_points(&shape)
                .into_iter()
                .map(|(x, y)| Point::new(x / 2.0, y / 2.0))
                .collect(),
        }],
    };
    let raw = serde_json::to_string(&file)?;
    let mut pipeline = Pipeline::new(JsonLandmarkSource::from_json(&raw)?);

    let img = flat_image(256, 256, [150, 150, 150]);
    let (best, analysis) = pipeline.process_image(&img)?;
    assert_eq!(best.face_box, small_box);
    assert!((analysis.measurements.face_width - 100.0).abs() < 1e-9);
    assert_eq!(analysis.overall, 100);
    Ok(())
}

#[test]
fn test_malformed_best_detection_keeps_landmark_count_error() -> Result<()> {
    let shape = FaceShape::ideal(128.0);
    let mut points: Vec<Point> = face_points(&shape)
        .into_iter()
        .map(|(x, y)| Point::new(x, y))
        .collect();
    points.pop();
    let file = DetectionFile {
        image_size: None,
        detections: vec![DetectionRecord {
            score: 0.9,
            face_box: face_box(&shape),
            landmarks: points,
        }],
    };
    let source = JsonLandmarkSource::from_json(&serde_json::to_string(&file)?)?;
    let mut pipeline = Pipeline::new(source);

    let img = flat_image(256, 256, [150, 150, 150]);
    let err = pipeline.process_image(&img).unwrap_err();
    assert!(
        matches!(
            err,
            AnalysisError::LandmarkCount {
                expected: 68,
                actual: 67
            }
        ),
        "unexpected error: {:?}",
        err
    );
    Ok(())
}

#[test]
fn test_malformed_weaker_detection_does_not_block_best_face() -> Result<()> {
    let shape = FaceShape::ideal(128.0);
    let good = DetectionRecord {
        score: 0.99,
        face_box: face_box(&shape),
        landmarks: face_points(&shape)
            .into_iter()
            .map(|(x, y)| Point::new(x, y))
            .collect(),
    };
    let broken = DetectionRecord {
        score: 0.1,
        face_box: face_box(&shape),
        landmarks: vec![Point::new(1.0, 1.0); 10],
    };
    let file = DetectionFile {
        image_size: None,
        detections: vec![broken, good],
    };
    let source = JsonLandmarkSource::from_json(&serde_json::to_string(&file)?)?;
    let mut pipeline = Pipeline::new(source);

    let img = flat_image(256, 256, [150, 150, 150]);
    let (best, analysis) = pipeline.process_image(&img)?;
    assert_eq!(best.score, 0.99);
    assert_eq!(analysis.overall, 100);
    Ok(())
}
