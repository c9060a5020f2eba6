pub mod config;
pub mod report;

// Re-export vision types for convenience
pub use facegrade_vision::{
    analyze, Analysis, AnalysisError, AnalysisSession, FaceBox, JsonLandmarkSource, LandmarkSet,
    Pipeline, Point, SubScores,
};
