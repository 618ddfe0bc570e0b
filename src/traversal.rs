//! Approximate descending-magnitude pixel order via binning.
//!
//! Magnitudes are bucketed into `n_bins` equal-width bins over
//! `[0, max_magnitude]`. Pixels are then emitted bin by bin, from the highest
//! to the lowest. Within a bin they come out in row-major scan order, so the
//! sequence is deterministic. This takes linear time instead of a full sort.
//! More bins get closer to the exact order but use more memory.
//!
//! Zero-magnitude pixels are dropped up front. They can neither seed nor
//! join a region.
use crate::gradient::GradientField;
use crate::image::ImageView;
use crate::types::Pixel;

/// Lazy, single-pass pixel sequence. All bins are filled before the first
/// pixel is yielded.
#[derive(Clone, Debug)]
pub struct MagnitudeOrder {
    bins: Vec<Vec<Pixel>>,
    bin: usize,
    pos: usize,
    remaining: usize,
}

impl MagnitudeOrder {
    /// Bin every non-zero pixel of `field`. `n_bins` must be at least 1.
    pub fn new(field: &GradientField, n_bins: usize) -> Self {
        let n_bins = n_bins.max(1);
        let mut bins: Vec<Vec<Pixel>> = vec![Vec::new(); n_bins];
        let max = field.max_magnitude;
        let mut remaining = 0;

        if max > 0.0 {
            let scale = n_bins as f64 / max;
            for (y, row) in field.cells.rows().enumerate() {
                for (x, cell) in row.iter().enumerate() {
                    if cell.magnitude <= 0.0 {
                        continue;
                    }
                    let bin = ((cell.magnitude * scale) as usize).min(n_bins - 1);
                    bins[bin].push(Pixel::new(x, y));
                    remaining += 1;
                }
            }
        }

        Self {
            bins,
            bin: n_bins,
            pos: 0,
            remaining,
        }
    }
}

impl Iterator for MagnitudeOrder {
    type Item = Pixel;

    fn next(&mut self) -> Option<Pixel> {
        loop {
            if self.bin < self.bins.len() {
                if let Some(&p) = self.bins[self.bin].get(self.pos) {
                    self.pos += 1;
                    self.remaining -= 1;
                    return Some(p);
                }
            }
            if self.bin == 0 {
                return None;
            }
            self.bin -= 1;
            self.pos = 0;
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for MagnitudeOrder {}
