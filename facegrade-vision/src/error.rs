use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Why a single analysis pass was abandoned.
///
/// Every variant is local to the pass that produced it: the caller either gets a complete
/// [`crate::Analysis`] or one of these, never a partial result.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("no face detected in image")]
    NoFaceDetected,

    #[error("degenerate geometry: {measurement} is zero")]
    DegenerateGeometry { measurement: &'static str },

    #[error("cannot sample image region: {0}")]
    ImageRead(String),

    #[error("cannot average an empty point list")]
    EmptyInput,

    #[error("expected {expected} landmarks, got {actual}")]
    LandmarkCount { expected: usize, actual: usize },

    #[error("landmark {index} has a non-finite coordinate")]
    NonFiniteLandmark { index: usize },

    #[error("face box must have positive size, got {width}x{height}")]
    InvalidFaceBox { width: f64, height: f64 },

    #[error("submission {id} was superseded by a newer image")]
    Superseded { id: u64 },

    #[error(transparent)]
    Source(#[from] anyhow::Error),
}

impl AnalysisError {
    /// No face is a normal outcome: callers reset their display instead of reporting a failure.
    pub fn is_absence(&self) -> bool {
        matches!(self, AnalysisError::NoFaceDetected)
    }
}
