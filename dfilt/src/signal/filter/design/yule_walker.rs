use dfilt_core::{Error, Result};
use nalgebra::{DMatrix, DVector};

/// Autoregressive model fitted to an autocovariance sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct ArModel {
    /// Coefficients `φ_1..φ_p` of `x[n] = Σ φ_k x[n-k] + e[n]`.
    pub coefficients: Vec<f64>,
    /// Variance of the innovation `e[n]`.
    pub innovation_variance: f64,
}

/// Solve the Yule-Walker equations for `covariance = [c_0, c_1, .., c_p]`.
///
/// The Toeplitz system is factored with a Cholesky decomposition, so the covariance must be
/// positive definite.
pub fn yule_walker(covariance: &[f64]) -> Result<ArModel> {
    if covariance.is_empty() {
        return Err(Error::invalid_arg("covariance", "must not be empty"));
    }
    if covariance[0] <= 0.0 {
        return Err(Error::invalid_arg("covariance", "variance must be positive"));
    }
    let order = covariance.len() - 1;
    if order == 0 {
        return Ok(ArModel {
            coefficients: Vec::new(),
            innovation_variance: covariance[0],
        });
    }

    let toeplitz = DMatrix::<f64>::from_fn(order, order, |i, j| covariance[i.abs_diff(j)]);
    let rhs = DVector::<f64>::from_column_slice(&covariance[1..]);
    let cholesky = toeplitz.cholesky().ok_or_else(|| {
        Error::invalid_arg("covariance", "autocovariance is not positive definite")
    })?;
    let phi = cholesky.solve(&rhs);
    let innovation_variance = covariance[0] - phi.dot(&rhs);
    if innovation_variance <= 0.0 {
        return Err(Error::invalid_arg(
            "covariance",
            "autocovariance leaves no innovation variance",
        ));
    }
    Ok(ArModel {
        coefficients: phi.iter().copied().collect(),
        innovation_variance,
    })
}
