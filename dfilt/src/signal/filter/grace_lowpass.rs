use serde::{Deserialize, Serialize};

use super::design::crn_taps;
use super::{delegate_to_arma, ArmaConfig, ArmaFilter, ArmaOptions};
use crate::kernel::{ConfigError, KernelLifecycle};

fn default_sampling() -> f64 {
    0.2
}

fn default_bandwidth() -> f64 {
    0.1
}

fn default_convolution_number() -> u32 {
    7
}

fn default_fit_interval() -> f64 {
    70.7
}

/// Constructor config for [`GraceLowpass`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraceLowpassConfig {
    /// Sampling interval of the raw ranging data in seconds.
    #[serde(default = "default_sampling")]
    pub sampling: f64,
    /// Lowpass bandwidth in Hz.
    #[serde(default = "default_bandwidth")]
    pub bandwidth: f64,
    /// Number of self convolutions of the rectangular spectrum.
    #[serde(default = "default_convolution_number")]
    pub convolution_number: u32,
    /// Length of the kernel in seconds.
    #[serde(default = "default_fit_interval")]
    pub fit_interval: f64,
    /// Direction, domain and padding.
    #[serde(flatten)]
    pub options: ArmaOptions,
}

impl Default for GraceLowpassConfig {
    fn default() -> Self {
        Self {
            sampling: default_sampling(),
            bandwidth: default_bandwidth(),
            convolution_number: default_convolution_number(),
            fit_interval: default_fit_interval(),
            options: ArmaOptions::default(),
        }
    }
}

/// Self-convolving (CRN) lowpass used on GRACE K-band ranging data.
#[derive(Debug, Clone)]
pub struct GraceLowpass {
    arma: ArmaFilter,
}

impl KernelLifecycle for GraceLowpass {
    type Config = GraceLowpassConfig;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        if !(config.sampling > 0.0) {
            return Err(ConfigError::InvalidArgument {
                arg: "sampling",
                reason: "sampling must be positive",
            });
        }
        if !(config.bandwidth > 0.0 && config.bandwidth < 0.5 / config.sampling) {
            return Err(ConfigError::InvalidArgument {
                arg: "bandwidth",
                reason: "bandwidth must lie between zero and the Nyquist frequency",
            });
        }
        if config.convolution_number == 0 {
            return Err(ConfigError::InvalidArgument {
                arg: "convolutionNumber",
                reason: "convolution number must be positive",
            });
        }
        if !(config.fit_interval >= config.sampling) {
            return Err(ConfigError::InvalidArgument {
                arg: "fitInterval",
                reason: "fit interval must span at least one sampling interval",
            });
        }

        let bn = crn_taps(
            config.sampling,
            config.bandwidth,
            config.convolution_number,
            config.fit_interval,
        );
        let arma = ArmaFilter::try_new(ArmaConfig {
            bn_start_index: bn.len() / 2,
            bn,
            an: vec![1.0],
            options: config.options,
        })?;
        Ok(Self { arma })
    }
}

delegate_to_arma!(GraceLowpass);
