//! Gradient field with level-line angles.
//!
//! - Uses a 2×2 forward-difference stencil anchored at the top-left pixel:
//!   with `A=I(x,y)`, `B=I(x+1,y)`, `C=I(x,y+1)`, `D=I(x+1,y+1)`,
//!   `gx = (D−A) + (B−C)` and `gy = (D−A) − (B−C)`.
//! - Magnitude is `sqrt((gx² + gy²) / 4)`.
//! - The level-line angle is the gradient rotated by 90°: `atan2(gx, −gy)`.
//! - The last row and column have no complete stencil; they get zero
//!   magnitude and an undefined angle.
//! - Cells whose magnitude is below the threshold keep their magnitude but
//!   carry no angle; they can neither seed nor join a region. A zero
//!   gradient never has an angle, whatever the threshold.
//!
//! Complexity: O(W·H), one pass.
use crate::image::{Grid, ImageView, ImageViewMut};
use crate::types::Pixel;

/// Per-pixel gradient magnitude and level-line angle.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GradientCell {
    pub magnitude: f64,
    /// `None` when the magnitude is below the threshold.
    pub angle: Option<f64>,
}

/// Gradient cells for a whole image plus the largest magnitude observed.
#[derive(Clone, Debug)]
pub struct GradientField {
    pub cells: Grid<GradientCell>,
    pub max_magnitude: f64,
    pub threshold: f64,
}

impl GradientField {
    /// Compute the field for `image`. `threshold` must be non-negative.
    pub fn compute(image: &Grid<f64>, threshold: f64) -> Self {
        let w = image.w;
        let h = image.h;
        let mut cells: Grid<GradientCell> = Grid::new(w, h);
        let mut max_magnitude = 0.0f64;

        if w >= 2 && h >= 2 {
            for y in 0..h - 1 {
                let top = image.row(y);
                let bottom = image.row(y + 1);
                let out = cells.row_mut(y);
                for x in 0..w - 1 {
                    let com1 = bottom[x + 1] - top[x];
                    let com2 = top[x + 1] - bottom[x];
                    let gx = com1 + com2;
                    let gy = com1 - com2;
                    let magnitude = ((gx * gx + gy * gy) / 4.0).sqrt();
                    let defined = magnitude > 0.0 && magnitude >= threshold;
                    let angle = defined.then(|| gx.atan2(-gy));
                    out[x] = GradientCell { magnitude, angle };
                    max_magnitude = max_magnitude.max(magnitude);
                }
            }
        }

        Self {
            cells,
            max_magnitude,
            threshold,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.cells.w
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.cells.h
    }

    #[inline]
    pub fn cell(&self, p: Pixel) -> GradientCell {
        self.cells.get(p.x, p.y)
    }

    #[inline]
    pub fn angle(&self, p: Pixel) -> Option<f64> {
        self.cells.get(p.x, p.y).angle
    }

    #[inline]
    pub fn magnitude(&self, p: Pixel) -> f64 {
        self.cells.get(p.x, p.y).magnitude
    }

    /// Test fixture: unit magnitude wherever `f` yields an angle.
    #[cfg(test)]
    pub(crate) fn from_angles(
        w: usize,
        h: usize,
        f: impl Fn(usize, usize) -> Option<f64>,
    ) -> Self {
        let mut cells: Grid<GradientCell> = Grid::new(w, h);
        for y in 0..h {
            for x in 0..w {
                let angle = f(x, y);
                let magnitude = if angle.is_some() { 1.0 } else { 0.0 };
                cells.set(x, y, GradientCell { magnitude, angle });
            }
        }
        Self {
            cells,
            max_magnitude: 1.0,
            threshold: 0.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn grid_from_fn(w: usize, h: usize, f: impl Fn(usize, usize) -> f64) -> Grid<f64> {
        let mut g = Grid::new(w, h);
        for y in 0..h {
            for x in 0..w {
                g.set(x, y, f(x, y));
            }
        }
        g
    }

    #[test]
    fn flat_image_has_no_gradient() {
        let img = Grid::filled(8, 6, 17.0);
        let field = GradientField::compute(&img, 1.0);
        assert_eq!(field.max_magnitude, 0.0);
        assert!(field.cells.data.iter().all(|c| c.angle.is_none()));
    }

    #[test]
    fn vertical_ramp_gives_horizontal_level_lines() {
        // Intensity grows with y: gradient points down, level lines run along x.
        let img = grid_from_fn(6, 6, |_, y| 10.0 * y as f64);
        let field = GradientField::compute(&img, 1.0);
        let cell = field.cell(Pixel::new(2, 2));
        assert!((cell.magnitude - 10.0).abs() < 1e-12);
        let angle = cell.angle.expect("defined angle");
        assert!((angle.abs() - PI).abs() < 1e-12, "angle={angle}");
        assert_eq!(field.max_magnitude, 10.0);
    }

    #[test]
    fn horizontal_ramp_gives_vertical_level_lines() {
        let img = grid_from_fn(6, 6, |x, _| 4.0 * x as f64);
        let field = GradientField::compute(&img, 1.0);
        let angle = field.angle(Pixel::new(1, 3)).expect("defined angle");
        assert!((angle - FRAC_PI_2).abs() < 1e-12, "angle={angle}");
    }

    #[test]
    fn last_row_and_column_are_undefined() {
        let img = grid_from_fn(5, 4, |x, y| (x * 7 + y * 3) as f64);
        let field = GradientField::compute(&img, 0.0);
        for y in 0..4 {
            assert!(field.angle(Pixel::new(4, y)).is_none());
            assert_eq!(field.magnitude(Pixel::new(4, y)), 0.0);
        }
        for x in 0..5 {
            assert!(field.angle(Pixel::new(x, 3)).is_none());
        }
    }

    #[test]
    fn weak_gradients_keep_magnitude_but_lose_angle() {
        let img = grid_from_fn(4, 4, |x, _| x as f64);
        let field = GradientField::compute(&img, 2.0);
        let cell = field.cell(Pixel::new(0, 0));
        assert!((cell.magnitude - 1.0).abs() < 1e-12);
        assert!(cell.angle.is_none());
    }
}
