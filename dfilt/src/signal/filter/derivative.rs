use serde::{Deserialize, Serialize};

use super::design::{derivative_weights, stencil_start};
use super::{delegate_to_arma, ArmaConfig, ArmaFilter, ArmaOptions};
use crate::kernel::{ConfigError, KernelLifecycle};

fn first_derivative() -> usize {
    1
}

fn unit_sampling() -> f64 {
    1.0
}

/// Constructor config for [`Derivative`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivativeConfig {
    /// Degree of the local polynomial, the stencil has one more tap.
    pub polynomial_degree: usize,
    /// Order of the derivative.
    #[serde(default = "first_derivative")]
    pub derivative: usize,
    /// Sampling interval of the input.
    #[serde(default = "unit_sampling")]
    pub sampling: f64,
    /// Direction, domain and padding.
    #[serde(flatten)]
    pub options: ArmaOptions,
}

/// Derivative of a local polynomial fitted through `polynomialDegree + 1` epochs.
#[derive(Debug, Clone)]
pub struct Derivative {
    arma: ArmaFilter,
}

impl KernelLifecycle for Derivative {
    type Config = DerivativeConfig;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        if config.derivative > config.polynomial_degree {
            return Err(ConfigError::InvalidArgument {
                arg: "derivative",
                reason: "derivative order exceeds the polynomial degree",
            });
        }
        if !(config.sampling > 0.0) {
            return Err(ConfigError::InvalidArgument {
                arg: "sampling",
                reason: "sampling must be positive",
            });
        }
        let bn = derivative_weights(config.polynomial_degree, config.derivative, config.sampling)
            .map_err(|_| ConfigError::InvalidArgument {
                arg: "polynomialDegree",
                reason: "polynomial degree too high for a stable stencil",
            })?;
        let arma = ArmaFilter::try_new(ArmaConfig {
            bn,
            an: vec![1.0],
            bn_start_index: stencil_start(config.polynomial_degree),
            options: config.options,
        })?;
        Ok(Self { arma })
    }
}

delegate_to_arma!(Derivative);
