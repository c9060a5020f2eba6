use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

/// 2D point in image pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn scaled(&self, sx: f64, sy: f64) -> Self {
        Self::new(self.x * sx, self.y * sy)
    }
}

/// Axis-aligned face bounding box, same coordinate space as the landmarks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FaceBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl FaceBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Result<Self> {
        let face_box = Self {
            x,
            y,
            width,
            height,
        };
        face_box.validate()?;
        Ok(face_box)
    }

    /// Boxes deserialized straight from detector output skip `new`, so the engine re-checks.
    pub fn validate(&self) -> Result<()> {
        let finite = self.x.is_finite() && self.y.is_finite();
        if !finite || !(self.width > 0.0) || !(self.height > 0.0) {
            return Err(AnalysisError::InvalidFaceBox {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    pub fn scaled(&self, sx: f64, sy: f64) -> Self {
        Self {
            x: self.x * sx,
            y: self.y * sy,
            width: self.width * sx,
            height: self.height * sy,
        }
    }
}

/// Euclidean distance.
pub fn distance(a: Point, b: Point) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Arithmetic mean of a point list.
pub fn average(points: &[Point]) -> Result<Point> {
    if points.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }
    let n = points.len() as f64;
    let x = points.iter().map(|p| p.x).sum::<f64>() / n;
    let y = points.iter().map(|p| p.y).sum::<f64>() / n;
    Ok(Point::new(x, y))
}
