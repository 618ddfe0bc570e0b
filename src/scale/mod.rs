//! Gaussian scale-space pre-filter: separable blur plus resampling.
//!
//! Design
//! - `scale == 1.0` returns the input untouched. The a contrario model
//!   assumes the noise of the original image, so no blur is applied then.
//! - Otherwise each output sample `o` reads the input around `o / scale`
//!   through a Gaussian kernel re-centred on the fractional source position.
//!   The x-pass writes an intermediate `out_w × in_h` grid and the y-pass
//!   produces the final `out_w × out_h` grid.
//! - `sigma = sigma_scale / scale` when downsampling, `sigma_scale` otherwise.
//! - The kernel half-length is chosen so the truncated tail is below
//!   `10^-3` of the peak.
//! - Borders are mirrored, not clamped: an index is reduced into `[0, 2N)`
//!   and the upper half folded back with `j ↦ 2N − 1 − j`.
//!
//! Complexity
//! - O(out_w·in_h + out_w·out_h) multiply-adds per kernel tap.

mod kernel;

pub use kernel::gaussian_kernel;

use crate::error::LsdError;
use crate::image::{Grid, ImageView};
use kernel::fill_gaussian;
use std::borrow::Cow;

/// The truncated Gaussian tail is below `10^-TAIL_PRECISION` of the peak.
const TAIL_PRECISION: f64 = 3.0;

/// Blur and resample `input` to `scale`, or borrow it unchanged at `scale == 1`.
pub fn scale_space(
    input: &Grid<f64>,
    scale: f64,
    sigma_scale: f64,
) -> Result<Cow<'_, Grid<f64>>, LsdError> {
    validate(scale, sigma_scale)?;
    if scale == 1.0 {
        return Ok(Cow::Borrowed(input));
    }
    gaussian_sampler(input, scale, sigma_scale).map(Cow::Owned)
}

/// Output dimensions for a given input size and scale.
pub fn scaled_size(width: usize, height: usize, scale: f64) -> (usize, usize) {
    (
        (width as f64 * scale).ceil() as usize,
        (height as f64 * scale).ceil() as usize,
    )
}

/// Always blurs and resamples, even at `scale == 1`.
pub fn gaussian_sampler(
    input: &Grid<f64>,
    scale: f64,
    sigma_scale: f64,
) -> Result<Grid<f64>, LsdError> {
    validate(scale, sigma_scale)?;
    if input.is_empty() {
        return Err(LsdError::ImageTooSmall {
            width: input.w,
            height: input.h,
        });
    }

    let sigma = if scale < 1.0 {
        sigma_scale / scale
    } else {
        sigma_scale
    };
    let half = (sigma * (2.0 * TAIL_PRECISION * std::f64::consts::LN_10).sqrt()).ceil() as usize;
    let mut kernel = vec![0.0; 1 + 2 * half];
    let (out_w, out_h) = scaled_size(input.w, input.h, scale);

    // x-pass
    let mut aux = Grid::new(out_w, input.h);
    for x in 0..out_w {
        let (xc, offset) = source_position(x, scale);
        fill_gaussian(&mut kernel, sigma, half as f64 + offset);
        let start = xc - half as isize;
        for y in 0..input.h {
            let row = input.row(y);
            let sum: f64 = kernel
                .iter()
                .enumerate()
                .map(|(i, k)| row[mirror_index(start + i as isize, input.w)] * k)
                .sum();
            aux.set(x, y, sum);
        }
    }

    // y-pass
    let mut out = Grid::new(out_w, out_h);
    for y in 0..out_h {
        let (yc, offset) = source_position(y, scale);
        fill_gaussian(&mut kernel, sigma, half as f64 + offset);
        let start = yc - half as isize;
        let taps: Vec<(usize, f64)> = kernel
            .iter()
            .enumerate()
            .map(|(i, &k)| (mirror_index(start + i as isize, input.h), k))
            .collect();
        for x in 0..out_w {
            let sum: f64 = taps.iter().map(|&(sy, k)| aux.get(x, sy) * k).sum();
            out.set(x, y, sum);
        }
    }

    Ok(out)
}

/// Nearest source index and the fractional offset of `o / scale` from it.
#[inline]
fn source_position(o: usize, scale: f64) -> (isize, f64) {
    let src = o as f64 / scale;
    let center = (src + 0.5).floor();
    (center as isize, src - center)
}

/// Symmetric boundary: reflect through `[0, 2n)` then fold the upper half.
#[inline]
pub(crate) fn mirror_index(j: isize, n: usize) -> usize {
    let double = 2 * n as isize;
    let mut j = j.rem_euclid(double);
    if j >= n as isize {
        j = double - 1 - j;
    }
    j as usize
}

fn validate(scale: f64, sigma_scale: f64) -> Result<(), LsdError> {
    if !(scale.is_finite() && scale > 0.0) {
        return Err(LsdError::InvalidParameter {
            name: "scale",
            value: scale,
            reason: "must be positive and finite",
        });
    }
    if !(sigma_scale.is_finite() && sigma_scale > 0.0) {
        return Err(LsdError::InvalidParameter {
            name: "sigma_scale",
            value: sigma_scale,
            reason: "must be positive and finite",
        });
    }
    Ok(())
}
