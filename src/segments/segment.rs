use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Validated line segment.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineSegment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    /// Width of the supporting rectangle.
    pub width: f64,
    /// Angular tolerance as a fraction of π, in `(0, 1)`.
    pub angle_precision: f64,
    /// `−log10(NFA)`; finite and positive for every emitted segment.
    pub confidence: f64,
}

impl LineSegment {
    pub fn length(&self) -> f64 {
        crate::numeric::dist(self.x1, self.y1, self.x2, self.y2)
    }

    pub fn midpoint(&self) -> [f64; 2] {
        [(self.x1 + self.x2) * 0.5, (self.y1 + self.y2) * 0.5]
    }

    /// Orientation of `(x1, y1) → (x2, y2)` in `(−π, π]`.
    pub fn angle(&self) -> f64 {
        (self.y2 - self.y1).atan2(self.x2 - self.x1)
    }

    /// Normalised line `ax + by + c = 0` through both endpoints, with
    /// `a² + b² = 1`. `None` for coincident endpoints.
    pub fn line(&self) -> Option<Vector3<f64>> {
        let a = self.y2 - self.y1;
        let b = self.x1 - self.x2;
        let c = self.x2 * self.y1 - self.x1 * self.y2;
        let norm = a.hypot(b);
        (norm > 0.0 && norm.is_finite()).then(|| Vector3::new(a / norm, b / norm, c / norm))
    }

    /// Unsigned distance from `(x, y)` to the segment's supporting line.
    pub fn distance_to_line(&self, x: f64, y: f64) -> Option<f64> {
        self.line().map(|l| (l[0] * x + l[1] * y + l[2]).abs())
    }
}
