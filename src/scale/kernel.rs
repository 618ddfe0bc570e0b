//! Sampled Gaussian kernels for the scale-space pre-filter.
use crate::error::LsdError;

/// Computes a normalised Gaussian kernel of length `len` and standard
/// deviation `sigma`, centred at `mean`.
///
/// `mean` is expressed in tap units: `0.5` centres the Gaussian halfway
/// between taps 0 and 1. A zero length yields an empty kernel.
pub fn gaussian_kernel(len: usize, sigma: f64, mean: f64) -> Result<Vec<f64>, LsdError> {
    if !(sigma.is_finite() && sigma > 0.0) {
        return Err(LsdError::InvalidParameter {
            name: "sigma",
            value: sigma,
            reason: "must be positive and finite",
        });
    }
    let mut kernel = vec![0.0; len];
    fill_gaussian(&mut kernel, sigma, mean);
    Ok(kernel)
}

/// In-place variant used by the sampler to avoid per-column allocations.
/// `sigma` must already be validated.
pub(crate) fn fill_gaussian(kernel: &mut [f64], sigma: f64, mean: f64) {
    let mut sum = 0.0;
    for (i, k) in kernel.iter_mut().enumerate() {
        let val = (i as f64 - mean) / sigma;
        *k = (-0.5 * val * val).exp();
        sum += *k;
    }
    if sum > 0.0 {
        for k in kernel.iter_mut() {
            *k /= sum;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn kernel_sums_to_one() {
        for &(len, sigma, mean) in &[(1, 0.3, 0.0), (7, 1.2, 3.0), (11, 0.6, 4.7), (25, 4.0, 12.0)] {
            let k = gaussian_kernel(len, sigma, mean).expect("valid kernel");
            assert_eq!(k.len(), len);
            assert_relative_eq!(k.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn kernel_is_symmetric_around_midpoint() {
        let len = 9;
        let k = gaussian_kernel(len, 1.5, 4.0).expect("valid kernel");
        for i in 0..len / 2 {
            assert_relative_eq!(k[i], k[len - 1 - i], epsilon = 1e-15);
        }
        let peak = k.iter().cloned().fold(f64::MIN, f64::max);
        assert_eq!(k[4], peak);
    }

    #[test]
    fn non_positive_sigma_is_reported() {
        assert!(gaussian_kernel(5, 0.0, 2.0).is_err());
        assert!(gaussian_kernel(5, -1.0, 2.0).is_err());
        assert!(gaussian_kernel(5, f64::NAN, 2.0).is_err());
    }

    #[test]
    fn zero_length_is_empty() {
        assert!(gaussian_kernel(0, 1.0, 0.0).expect("valid").is_empty());
    }
}
