//! Oriented-rectangle approximation of a region.
//!
//! Design
//! - Center: the region's gradient-magnitude-weighted centroid.
//! - Axis: the dominant eigenvector of the weighted second-moment matrix
//!   (`nalgebra::SymmetricEigen`). The eigenvector's sign is ambiguous. It is
//!   flipped when it points more than π/2 away from the region's mean
//!   level-line angle, so `theta` always follows the level-line orientation.
//!   A zero dominant eigenvalue falls back to the region angle.
//! - Length: extreme projections of the region's pixels on the axis.
//! - Width: twice the largest perpendicular distance, floored at 1 pixel.
//! - Tolerance: `p · π` radians, with `p` both the angle precision fraction
//!   and the prior probability that a random pixel is aligned.
//!
//! A `Rect` is mutated in place by the NFA improvement loop (narrowing,
//! shifting and tightening `p`); refinement always starts from a fresh fit.

mod footprint;

pub use footprint::RectIter;

use crate::region::Region;
use crate::types::Point;
use nalgebra::{Matrix2, SymmetricEigen};
use std::f64::consts::{FRAC_PI_2, PI};

/// Oriented rectangle around a candidate line segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    /// First endpoint of the long axis.
    pub p1: Point,
    /// Second endpoint of the long axis.
    pub p2: Point,
    pub width: f64,
    pub center: Point,
    /// Unit vector along the axis, `(cos θ, sin θ)`.
    pub dx: f64,
    pub dy: f64,
    /// Level-line orientation of the rectangle in `(−π, π]`.
    pub theta: f64,
    /// Angular tolerance in radians (`p · π`).
    pub prec: f64,
    /// Angle precision fraction and aligned-pixel prior, in `(0, 1)`.
    pub p: f64,
}

impl Rect {
    #[inline]
    pub fn length(&self) -> f64 {
        self.p1.dist(&self.p2)
    }

    /// Fraction of the rectangle's area covered by `n_pixels` region pixels.
    pub fn density(&self, n_pixels: usize) -> f64 {
        let area = self.length() * self.width;
        if area > 0.0 {
            n_pixels as f64 / area
        } else {
            0.0
        }
    }

    /// Set the precision fraction and the matching tolerance.
    pub fn set_precision(&mut self, p: f64) {
        self.p = p;
        self.prec = p * PI;
    }

    /// Translate the rectangle by `offset` along its normal `(−dy, dx)`.
    pub fn shift_sideways(&mut self, offset: f64) {
        let ox = -self.dy * offset;
        let oy = self.dx * offset;
        self.p1.x += ox;
        self.p1.y += oy;
        self.p2.x += ox;
        self.p2.y += oy;
        self.center.x += ox;
        self.center.y += oy;
    }

    /// Integer pixels covered by the rectangle, clipped to `width × height`.
    pub fn pixels(&self, width: usize, height: usize) -> RectIter {
        RectIter::new(self, width, height)
    }

    /// The four corners in boundary order.
    pub fn corners(&self) -> [Point; 4] {
        let hw = self.width / 2.0;
        let nx = -self.dy * hw;
        let ny = self.dx * hw;
        [
            Point::new(self.p1.x - nx, self.p1.y - ny),
            Point::new(self.p2.x - nx, self.p2.y - ny),
            Point::new(self.p2.x + nx, self.p2.y + ny),
            Point::new(self.p1.x + nx, self.p1.y + ny),
        ]
    }
}

/// Fit a rectangle to `region` with precision fraction `p`.
///
/// Returns `None` for a degenerate region: empty, non-finite center or zero
/// length along the principal axis.
pub fn approximate(region: &Region, p: f64) -> Option<Rect> {
    if region.is_empty() {
        return None;
    }
    let center = region.center();
    if !center.x.is_finite() || !center.y.is_finite() {
        return None;
    }

    let theta = principal_angle(region);
    let (dy, dx) = theta.sin_cos();

    let mut l_min = f64::INFINITY;
    let mut l_max = f64::NEG_INFINITY;
    let mut w_max = 0.0f64;
    for px in region.pixels() {
        let rx = px.x as f64 - center.x;
        let ry = px.y as f64 - center.y;
        let l = rx * dx + ry * dy;
        let w = -rx * dy + ry * dx;
        l_min = l_min.min(l);
        l_max = l_max.max(l);
        w_max = w_max.max(w.abs());
    }

    let length = l_max - l_min;
    if !length.is_finite() || length <= 0.0 {
        return None;
    }

    Some(Rect {
        p1: Point::new(center.x + l_min * dx, center.y + l_min * dy),
        p2: Point::new(center.x + l_max * dx, center.y + l_max * dy),
        width: (2.0 * w_max).max(1.0),
        center,
        dx,
        dy,
        theta,
        prec: p * PI,
        p,
    })
}

/// Orientation of the dominant eigenvector, disambiguated by the region angle.
fn principal_angle(region: &Region) -> f64 {
    let m = region.moments();
    let eig = SymmetricEigen::new(Matrix2::new(m.xx, m.xy, m.xy, m.yy));
    let dominant = if eig.eigenvalues[0] >= eig.eigenvalues[1] {
        0
    } else {
        1
    };
    let lambda = eig.eigenvalues[dominant];
    if !lambda.is_finite() || lambda <= 0.0 {
        return region.angle();
    }
    let v = eig.eigenvectors.column(dominant);
    let mut theta = v[1].atan2(v[0]);
    if crate::angle::abs_angle_diff(theta, region.angle()) > FRAC_PI_2 {
        theta = crate::angle::normalize_signed_pi(theta + PI);
    }
    theta
}
