use crate::gradient::GradientField;
use crate::types::{Pixel, Point};

/// Connected set of pixels with coherent level-line angles.
///
/// Aggregates are maintained incrementally while the region grows:
/// - the running mean angle `atan2(Σ sin θ, Σ cos θ)`;
/// - magnitude-weighted raw moments, from which the center and the
///   central second moments are derived on demand.
#[derive(Clone, Debug)]
pub struct Region {
    seed: Pixel,
    pixels: Vec<Pixel>,
    sum_cos: f64,
    sum_sin: f64,
    angle: f64,
    sum_w: f64,
    sum_wx: f64,
    sum_wy: f64,
    sum_wxx: f64,
    sum_wyy: f64,
    sum_wxy: f64,
}

/// Weighted central second moments `(Σw·dx², Σw·dx·dy, Σw·dy²) / Σw`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Moments {
    pub xx: f64,
    pub xy: f64,
    pub yy: f64,
}

impl Region {
    /// Start a region at `seed`, whose level-line angle is `angle`.
    pub(crate) fn start(seed: Pixel, angle: f64, magnitude: f64) -> Self {
        let mut region = Self {
            seed,
            pixels: Vec::with_capacity(64),
            sum_cos: 0.0,
            sum_sin: 0.0,
            angle,
            sum_w: 0.0,
            sum_wx: 0.0,
            sum_wy: 0.0,
            sum_wxx: 0.0,
            sum_wyy: 0.0,
            sum_wxy: 0.0,
        };
        region.push(seed, angle, magnitude);
        region
    }

    /// Rebuild a region from an explicit pixel set. Pixels without a defined
    /// angle are skipped. Returns `None` when nothing remains.
    pub fn from_pixels(seed: Pixel, pixels: &[Pixel], field: &GradientField) -> Option<Self> {
        let mut iter = pixels
            .iter()
            .filter_map(|&p| field.angle(p).map(|a| (p, a, field.magnitude(p))));
        let (first, angle, magnitude) = iter.next()?;
        let mut region = Self::start(first, angle, magnitude);
        region.seed = seed;
        for (p, a, m) in iter {
            region.push(p, a, m);
        }
        Some(region)
    }

    pub(crate) fn push(&mut self, p: Pixel, angle: f64, magnitude: f64) {
        self.pixels.push(p);
        self.sum_cos += angle.cos();
        self.sum_sin += angle.sin();
        self.angle = self.sum_sin.atan2(self.sum_cos);

        let x = p.x as f64;
        let y = p.y as f64;
        let w = magnitude;
        self.sum_w += w;
        self.sum_wx += w * x;
        self.sum_wy += w * y;
        self.sum_wxx += w * x * x;
        self.sum_wyy += w * y * y;
        self.sum_wxy += w * x * y;
    }

    pub fn seed(&self) -> Pixel {
        self.seed
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Running mean level-line angle in `(−π, π]`.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Gradient-magnitude-weighted center.
    pub fn center(&self) -> Point {
        if self.sum_w > 0.0 {
            Point::new(self.sum_wx / self.sum_w, self.sum_wy / self.sum_w)
        } else {
            Point::new(f64::NAN, f64::NAN)
        }
    }

    /// Normalised weighted central second moments about [`Region::center`].
    pub fn moments(&self) -> Moments {
        let c = self.center();
        let w = self.sum_w;
        Moments {
            xx: (self.sum_wxx / w - c.x * c.x).max(0.0),
            xy: self.sum_wxy / w - c.x * c.y,
            yy: (self.sum_wyy / w - c.y * c.y).max(0.0),
        }
    }
}
