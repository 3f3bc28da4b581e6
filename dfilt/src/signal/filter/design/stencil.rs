//! Polynomial stencils for differentiation and integration of equidistant samples.
//!
//! A stencil of `degree + 1` taps fits a polynomial of that degree through the samples at
//! offsets `start - k` (k = 0..=degree, in units of the sampling) from the current epoch.
//! Tap `k` is meant as `bn[k]` with `bn_start_index = start`.

use dfilt_core::{Error, Result};
use nalgebra::{DMatrix, DVector};

/// Index of the current epoch inside a stencil of `degree + 1` taps.
pub const fn stencil_start(degree: usize) -> usize {
    degree / 2
}

/// Solve `Σ_k w_k τ_k^j = rhs_j` for `j = 0..=degree` with `τ_k = start - k`.
fn solve_moments(degree: usize, rhs: DVector<f64>) -> Result<Vec<f64>> {
    let start = stencil_start(degree) as f64;
    let n = degree + 1;
    let vandermonde = DMatrix::<f64>::from_fn(n, n, |j, k| (start - k as f64).powi(j as i32));
    vandermonde
        .lu()
        .solve(&rhs)
        .map(|w| w.iter().copied().collect())
        .ok_or_else(|| Error::invalid_arg("polynomialDegree", "singular stencil system"))
}

/// Weights of the `derivative`-th derivative at the current epoch.
///
/// Exact for polynomials up to `degree`.
pub fn derivative_weights(degree: usize, derivative: usize, sampling: f64) -> Result<Vec<f64>> {
    if derivative > degree {
        return Err(Error::invalid_arg(
            "derivative",
            "derivative order exceeds the polynomial degree",
        ));
    }
    let factorial: f64 = (1..=derivative).map(|v| v as f64).product();
    let mut rhs = DVector::<f64>::zeros(degree + 1);
    rhs[derivative] = factorial;
    let scale = sampling.powi(derivative as i32);
    Ok(solve_moments(degree, rhs)?
        .into_iter()
        .map(|w| w / scale)
        .collect())
}

/// Weights integrating the local polynomial over the last sampling interval.
///
/// Summing these increments (`an = [1, -1]`) gives a running integral.
pub fn integral_weights(degree: usize, sampling: f64) -> Result<Vec<f64>> {
    // ∫_{-1}^{0} τ^j dτ
    let rhs = DVector::<f64>::from_fn(degree + 1, |j, _| {
        if j % 2 == 0 {
            1.0 / (j + 1) as f64
        } else {
            -1.0 / (j + 1) as f64
        }
    });
    Ok(solve_moments(degree, rhs)?
        .into_iter()
        .map(|w| w * sampling)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn central_difference() {
        let w = derivative_weights(2, 1, 1.0).unwrap();
        // taps at offsets +1, 0, -1
        assert_relative_eq!(w[0], 0.5, epsilon = 1e-12);
        assert_relative_eq!(w[1], 0.0, epsilon = 1e-12);
        assert_relative_eq!(w[2], -0.5, epsilon = 1e-12);

        let w = derivative_weights(2, 2, 0.5).unwrap();
        assert_relative_eq!(w[0], 4.0, epsilon = 1e-12);
        assert_relative_eq!(w[1], -8.0, epsilon = 1e-12);
        assert_relative_eq!(w[2], 4.0, epsilon = 1e-12);
    }

    #[test]
    fn trapezoid_and_simpson_like_rules() {
        let w = integral_weights(1, 2.0).unwrap();
        assert_relative_eq!(w[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(w[1], 1.0, epsilon = 1e-12);

        // weights integrate a constant over one interval
        for degree in 0..6 {
            let w = integral_weights(degree, 0.1).unwrap();
            assert_relative_eq!(w.iter().sum::<f64>(), 0.1, epsilon = 1e-12);
        }
    }

    #[test]
    fn derivative_order_is_bounded_by_degree() {
        assert!(derivative_weights(1, 2, 1.0).is_err());
    }
}
