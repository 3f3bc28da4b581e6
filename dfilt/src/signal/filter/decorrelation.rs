use std::path::PathBuf;

use dfilt_core::{Error, Result};
use serde::{Deserialize, Serialize};

use super::design::yule_walker;
use super::{delegate_to_arma, ArmaConfig, ArmaFilter, ArmaOptions};
use crate::io::read_values;
use crate::kernel::{ConfigError, KernelLifecycle};

/// Constructor config for [`Decorrelation`].
///
/// The autocovariance comes either inline or from a file, never both.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecorrelationConfig {
    /// Autocovariance `c_0, c_1, .., c_p` of the coloured input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub covariance: Option<Vec<f64>>,
    /// Text file holding the autocovariance.
    #[serde(default, rename = "inputfile", skip_serializing_if = "Option::is_none")]
    pub input_file: Option<PathBuf>,
    /// Direction, domain and padding.
    #[serde(flatten)]
    pub options: ArmaOptions,
}

impl DecorrelationConfig {
    /// Load the autocovariance file, if any, into `covariance`.
    pub fn resolve(mut self) -> Result<Self> {
        let Some(path) = self.input_file.take() else {
            return Ok(self);
        };
        if self.covariance.is_some() {
            return Err(Error::Configuration {
                reason: "decorrelation takes either `covariance` or `inputfile`, not both".into(),
            });
        }
        self.covariance = Some(read_values(&path)?);
        Ok(self)
    }
}

/// Whitening filter of an autoregressive process fitted to an autocovariance.
///
/// With `x[n] = Σ φ_k x[n-k] + e[n]` the output is `e[n] / σ`.
#[derive(Debug, Clone)]
pub struct Decorrelation {
    arma: ArmaFilter,
}

impl KernelLifecycle for Decorrelation {
    type Config = DecorrelationConfig;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        if config.input_file.is_some() {
            return Err(ConfigError::InvalidArgument {
                arg: "inputfile",
                reason: "resolve the covariance file before construction",
            });
        }
        let covariance = config
            .covariance
            .filter(|c| !c.is_empty())
            .ok_or(ConfigError::EmptyInput { arg: "covariance" })?;
        let model = yule_walker(&covariance).map_err(|_| ConfigError::InvalidArgument {
            arg: "covariance",
            reason: "autocovariance is not positive definite",
        })?;

        let sigma = model.innovation_variance.sqrt();
        let bn = core::iter::once(1.0)
            .chain(model.coefficients.iter().map(|phi| -phi))
            .map(|c| c / sigma)
            .collect();
        let arma = ArmaFilter::try_new(ArmaConfig {
            bn,
            an: vec![1.0],
            bn_start_index: 0,
            options: config.options,
        })?;
        Ok(Self { arma })
    }
}

delegate_to_arma!(Decorrelation);
