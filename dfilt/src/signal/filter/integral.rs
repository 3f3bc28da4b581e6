use serde::{Deserialize, Serialize};

use super::design::{integral_weights, stencil_start};
use super::{delegate_to_arma, ArmaConfig, ArmaFilter, ArmaOptions};
use crate::kernel::{ConfigError, KernelLifecycle};

fn unit_sampling() -> f64 {
    1.0
}

/// Constructor config for [`Integral`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegralConfig {
    /// Degree of the local polynomial integrated over each interval.
    pub polynomial_degree: usize,
    /// Sampling interval of the input.
    #[serde(default = "unit_sampling")]
    pub sampling: f64,
    /// Direction, domain and padding.
    #[serde(flatten)]
    pub options: ArmaOptions,
}

/// Running integral: per-interval polynomial quadrature accumulated by `an = [1, -1]`.
#[derive(Debug, Clone)]
pub struct Integral {
    arma: ArmaFilter,
}

impl KernelLifecycle for Integral {
    type Config = IntegralConfig;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        if !(config.sampling > 0.0) {
            return Err(ConfigError::InvalidArgument {
                arg: "sampling",
                reason: "sampling must be positive",
            });
        }
        let bn = integral_weights(config.polynomial_degree, config.sampling).map_err(|_| {
            ConfigError::InvalidArgument {
                arg: "polynomialDegree",
                reason: "polynomial degree too high for a stable stencil",
            }
        })?;
        let arma = ArmaFilter::try_new(ArmaConfig {
            bn,
            an: vec![1.0, -1.0],
            bn_start_index: stencil_start(config.polynomial_degree),
            options: config.options,
        })?;
        Ok(Self { arma })
    }
}

delegate_to_arma!(Integral);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::traits::DigitalFilter;
    use approx::assert_abs_diff_eq;
    use ndarray::Array2;

    fn integral(degree: usize, sampling: f64) -> Integral {
        Integral::try_new(IntegralConfig {
            polynomial_degree: degree,
            sampling,
            options: ArmaOptions::default(),
        })
        .unwrap()
    }

    #[test]
    fn integral_of_constant_is_linear() {
        let x = Array2::from_elem((30, 2), 2.0);
        for degree in 1..=3 {
            let y = integral(degree, 0.5).filter(x.view()).unwrap();
            // increments away from the ends integrate 2.0 over 0.5
            for n in degree + 1..30 - degree {
                assert_abs_diff_eq!(y[[n, 0]] - y[[n - 1, 0]], 1.0, epsilon = 1e-12);
                assert_abs_diff_eq!(y[[n, 1]] - y[[n - 1, 1]], 1.0, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn trapezoid_of_a_ramp_is_exact() {
        let dt = 0.1;
        let x = Array2::from_shape_fn((15, 1), |(n, _)| n as f64 * dt);
        let y = integral(1, dt).filter(x.view()).unwrap();
        // y[n] = ∫_0^{t_n} t dt + the half interval before t_0, which is zero here
        for n in 0..15 {
            let t = n as f64 * dt;
            assert_abs_diff_eq!(y[[n, 0]], 0.5 * t * t, epsilon = 1e-12);
        }
    }

    #[test]
    fn recursion_needs_the_accumulator() {
        let f = integral(2, 1.0);
        assert_eq!(f.arma().an(), &[1.0, -1.0]);
        assert_eq!(f.arma().warmup(), 6);
    }
}
