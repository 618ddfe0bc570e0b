//! Scanline enumeration of the pixels inside an oriented rectangle.
//!
//! The rectangle is convex, so every horizontal line crosses it in a single
//! interval. For each integer row in the rectangle's vertical extent the
//! interval is found by intersecting the row with the four edges, then
//! rounded inwards to integer columns and clipped to the image. A pixel
//! centre lying exactly on the boundary counts as inside.
use super::Rect;
use crate::types::{Pixel, Point};

/// Slack on boundary tests so pixel centres on an edge are kept.
const EDGE_EPS: f64 = 1e-9;

#[derive(Clone, Debug)]
pub struct RectIter {
    corners: [Point; 4],
    width: isize,
    height: isize,
    y: isize,
    y_end: isize,
    x: isize,
    x_end: isize,
}

impl RectIter {
    pub(super) fn new(rect: &Rect, width: usize, height: usize) -> Self {
        let corners = rect.corners();
        let (y_lo, y_hi) = corners.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |acc, c| {
            (acc.0.min(c.y), acc.1.max(c.y))
        });
        let height = height as isize;
        let (y, y_end) = if y_lo.is_finite() && y_hi.is_finite() {
            (
                ((y_lo - EDGE_EPS).ceil() as isize).max(0),
                ((y_hi + EDGE_EPS).floor() as isize).min(height - 1),
            )
        } else {
            (0, -1)
        };
        let mut iter = Self {
            corners,
            width: width as isize,
            height,
            y,
            y_end,
            x: 0,
            x_end: -1,
        };
        iter.load_row();
        iter
    }

    /// Column interval covered at row `y`, unclipped.
    fn row_span(&self, y: f64) -> Option<(f64, f64)> {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for i in 0..4 {
            let a = self.corners[i];
            let b = self.corners[(i + 1) % 4];
            if y < a.y.min(b.y) - EDGE_EPS || y > a.y.max(b.y) + EDGE_EPS {
                continue;
            }
            let dy = b.y - a.y;
            if dy.abs() < EDGE_EPS {
                lo = lo.min(a.x.min(b.x));
                hi = hi.max(a.x.max(b.x));
            } else {
                let t = ((y - a.y) / dy).clamp(0.0, 1.0);
                let x = a.x + t * (b.x - a.x);
                lo = lo.min(x);
                hi = hi.max(x);
            }
        }
        (lo <= hi).then_some((lo, hi))
    }

    /// Advance `y` to the next row with a non-empty clipped interval.
    fn load_row(&mut self) {
        while self.y <= self.y_end {
            if let Some((lo, hi)) = self.row_span(self.y as f64) {
                let x = ((lo - EDGE_EPS).ceil() as isize).max(0);
                let x_end = ((hi + EDGE_EPS).floor() as isize).min(self.width - 1);
                if x <= x_end {
                    self.x = x;
                    self.x_end = x_end;
                    return;
                }
            }
            self.y += 1;
        }
    }
}

impl Iterator for RectIter {
    type Item = Pixel;

    fn next(&mut self) -> Option<Pixel> {
        if self.y > self.y_end || self.y >= self.height {
            return None;
        }
        let p = Pixel::new(self.x as usize, self.y as usize);
        self.x += 1;
        if self.x > self.x_end {
            self.y += 1;
            self.load_row();
        }
        Some(p)
    }
}
