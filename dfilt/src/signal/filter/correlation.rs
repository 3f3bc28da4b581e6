use serde::{Deserialize, Serialize};

use super::{delegate_to_arma, ArmaConfig, ArmaFilter, ArmaOptions};
use crate::kernel::{ConfigError, KernelLifecycle};

/// Constructor config for [`Correlation`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationConfig {
    /// Lag-one correlation `ρ` of the output, `|ρ| < 1`.
    pub correlation: f64,
    /// Direction, domain and padding.
    #[serde(flatten)]
    pub options: ArmaOptions,
}

/// First order Gauss-Markov colouring that keeps unit variance:
/// `y[n] = ρ y[n-1] + sqrt(1 - ρ²) x[n]`.
#[derive(Debug, Clone)]
pub struct Correlation {
    arma: ArmaFilter,
}

impl KernelLifecycle for Correlation {
    type Config = CorrelationConfig;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        let rho = config.correlation;
        if !(rho.abs() < 1.0) {
            return Err(ConfigError::InvalidArgument {
                arg: "correlation",
                reason: "correlation must lie in (-1, 1)",
            });
        }
        let arma = ArmaFilter::try_new(ArmaConfig {
            bn: vec![(1.0 - rho * rho).sqrt()],
            an: vec![1.0, -rho],
            bn_start_index: 0,
            options: config.options,
        })?;
        Ok(Self { arma })
    }
}

delegate_to_arma!(Correlation);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::traits::DigitalFilter;
    use approx::assert_abs_diff_eq;
    use ndarray::Array2;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn white_noise_gets_the_requested_correlation() {
        let rho = 0.6;
        let filter = Correlation::try_new(CorrelationConfig {
            correlation: rho,
            options: ArmaOptions::default(),
        })
        .unwrap();

        // unit variance uniform noise
        let mut rng = StdRng::seed_from_u64(42);
        let n = 40_000;
        let x = Array2::from_shape_fn((n, 1), |_| rng.random_range(-1.0..1.0) * 3f64.sqrt());
        let y = filter.filter(x.view()).unwrap();

        let y = y.column(0);
        let skip = 100;
        let count = (n - skip) as f64;
        let variance = y.iter().skip(skip).map(|v| v * v).sum::<f64>() / count;
        let lag1 = (skip..n).map(|i| y[i] * y[i - 1]).sum::<f64>() / count;
        assert_abs_diff_eq!(variance, 1.0, epsilon = 0.05);
        assert_abs_diff_eq!(lag1 / variance, rho, epsilon = 0.03);
    }

    #[test]
    fn unit_correlation_is_rejected() {
        for rho in [1.0, -1.5, f64::NAN] {
            assert!(Correlation::try_new(CorrelationConfig {
                correlation: rho,
                options: ArmaOptions::default(),
            })
            .is_err());
        }
    }
}
