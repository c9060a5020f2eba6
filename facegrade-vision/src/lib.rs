pub mod analysis;
pub mod brightness;
pub mod error;
pub mod geometry;
pub mod landmarks;
pub mod metrics;
pub mod pipeline;
pub mod score;
pub mod session;
pub mod source;
pub mod tips;

// Re-export commonly used types
pub use analysis::{analyze, Analysis};
pub use error::{AnalysisError, Result};
pub use geometry::{FaceBox, Point};
pub use landmarks::LandmarkSet;
pub use metrics::{RatioSet, RawMeasurements};
pub use pipeline::{Detection, LandmarkSource, Pipeline};
pub use score::SubScores;
pub use session::{AnalysisSession, Submission};
pub use source::JsonLandmarkSource;
pub use tips::Tip;
