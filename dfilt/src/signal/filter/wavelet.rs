use std::path::PathBuf;

use dfilt_core::{Error, Result};
use serde::{Deserialize, Serialize};

use super::design::{a_trous_filter, a_trous_len, WaveletType};
use super::{delegate_to_arma, ArmaConfig, ArmaFilter, ArmaOptions, MAX_TAPS};
use crate::io::read_values;
use crate::kernel::{ConfigError, KernelLifecycle};

fn first_level() -> usize {
    1
}

/// Constructor config for [`Wavelet`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaveletConfig {
    /// Scaling (lowpass) coefficients of the wavelet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coefficients: Option<Vec<f64>>,
    /// Text file holding the scaling coefficients.
    #[serde(default, rename = "inputfile", skip_serializing_if = "Option::is_none")]
    pub input_file: Option<PathBuf>,
    /// Decomposition level, starting at one.
    #[serde(default = "first_level")]
    pub level: usize,
    /// Approximation or detail branch.
    #[serde(default)]
    pub wavelet_type: WaveletType,
    /// Direction, domain and padding.
    #[serde(flatten)]
    pub options: ArmaOptions,
}

impl WaveletConfig {
    /// Load the coefficient file, if any, into `coefficients`.
    pub fn resolve(mut self) -> Result<Self> {
        let Some(path) = self.input_file.take() else {
            return Ok(self);
        };
        if self.coefficients.is_some() {
            return Err(Error::Configuration {
                reason: "wavelet takes either `coefficients` or `inputfile`, not both".into(),
            });
        }
        self.coefficients = Some(read_values(&path)?);
        Ok(self)
    }
}

/// Equivalent filter of the undecimated wavelet cascade at one level, centered.
#[derive(Debug, Clone)]
pub struct Wavelet {
    arma: ArmaFilter,
}

impl KernelLifecycle for Wavelet {
    type Config = WaveletConfig;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        if config.input_file.is_some() {
            return Err(ConfigError::InvalidArgument {
                arg: "inputfile",
                reason: "resolve the coefficient file before construction",
            });
        }
        let scaling = config
            .coefficients
            .filter(|c| !c.is_empty())
            .ok_or(ConfigError::EmptyInput {
                arg: "coefficients",
            })?;
        if config.level == 0 {
            return Err(ConfigError::InvalidArgument {
                arg: "level",
                reason: "level must be at least one",
            });
        }
        if a_trous_len(scaling.len(), config.level).map_or(true, |len| len > MAX_TAPS) {
            return Err(ConfigError::InvalidArgument {
                arg: "level",
                reason: "equivalent filter of this level is too long",
            });
        }
        let sum: f64 = scaling.iter().sum();
        if sum == 0.0 || !sum.is_finite() {
            return Err(ConfigError::InvalidArgument {
                arg: "coefficients",
                reason: "scaling coefficients must have a finite non-zero sum",
            });
        }

        let bn = a_trous_filter(&scaling, config.level, config.wavelet_type).map_err(|_| {
            ConfigError::InvalidArgument {
                arg: "coefficients",
                reason: "wavelet cascade could not be built",
            }
        })?;
        let arma = ArmaFilter::try_new(ArmaConfig {
            bn_start_index: (bn.len() - 1) / 2,
            bn,
            an: vec![1.0],
            options: config.options,
        })?;
        Ok(Self { arma })
    }
}

delegate_to_arma!(Wavelet);
