//! Angle-coherent region growing from a seed pixel.
//!
//! The grower owns the run's "used" marker grid. A pixel joins the region
//! under construction iff it is:
//! - an 8-neighbour of a pixel already in the region;
//! - not yet used by this or any earlier region;
//! - carrying a defined level-line angle;
//! - within `tolerance` of the region's *running* mean angle, comparing
//!   signed differences wrapped into `(−π, π]`.
//!
//! Expansion is breadth-first over the region's own pixel list. Every pixel
//! is marked used the moment it joins, so membership is at-most-once. Pixels
//! of discarded regions stay marked. Later seeds never revisit them, which
//! bounds the whole traversal by the image size.
//!
//! Complexity: each pixel is inspected a constant number of times per
//! growth, O(region size) per call.

mod region;

pub use region::{Moments, Region};

use crate::angle::abs_angle_diff;
use crate::gradient::GradientField;
use crate::image::Grid;
use crate::types::Pixel;

const NEIGH_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

pub struct RegionGrower<'a> {
    field: &'a GradientField,
    used: Grid<bool>,
}

impl<'a> RegionGrower<'a> {
    pub fn new(field: &'a GradientField) -> Self {
        Self {
            field,
            used: Grid::new(field.width(), field.height()),
        }
    }

    pub fn field(&self) -> &'a GradientField {
        self.field
    }

    #[inline]
    pub fn is_used(&self, p: Pixel) -> bool {
        self.used.get(p.x, p.y)
    }

    /// A pixel may seed a region when it is unused and has a defined angle.
    #[inline]
    pub fn can_seed(&self, p: Pixel) -> bool {
        !self.is_used(p) && self.field.angle(p).is_some()
    }

    /// Grow a region from `seed`. Returns `None` when the seed cannot start
    /// a region (already used or without a defined angle).
    pub fn grow(&mut self, seed: Pixel, tolerance: f64) -> Option<Region> {
        if self.is_used(seed) {
            return None;
        }
        let angle = self.field.angle(seed)?;
        self.used.set(seed.x, seed.y, true);
        let mut region = Region::start(seed, angle, self.field.magnitude(seed));

        let mut i = 0;
        while i < region.len() {
            let p = region.pixels()[i];
            i += 1;
            for (dx, dy) in NEIGH_OFFSETS {
                let xn = p.x as isize + dx;
                let yn = p.y as isize + dy;
                if !self.used.contains(xn, yn) {
                    continue;
                }
                let q = Pixel::new(xn as usize, yn as usize);
                if self.used.get(q.x, q.y) {
                    continue;
                }
                let Some(q_angle) = self.field.angle(q) else {
                    continue;
                };
                if abs_angle_diff(q_angle, region.angle()) <= tolerance {
                    self.used.set(q.x, q.y, true);
                    region.push(q, q_angle, self.field.magnitude(q));
                }
            }
        }
        Some(region)
    }

    /// Clear the used marker of `pixels`, e.g. before re-growing them.
    pub fn release(&mut self, pixels: &[Pixel]) {
        for p in pixels {
            self.used.set(p.x, p.y, false);
        }
    }

    pub fn mark(&mut self, pixels: &[Pixel]) {
        for p in pixels {
            self.used.set(p.x, p.y, true);
        }
    }

    pub fn used(&self) -> &Grid<bool> {
        &self.used
    }
}
