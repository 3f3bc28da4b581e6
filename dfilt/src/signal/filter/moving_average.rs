use serde::{Deserialize, Serialize};

use super::{delegate_to_arma, ArmaConfig, ArmaFilter, ArmaOptions};
use crate::kernel::{ConfigError, KernelLifecycle};

/// Constructor config for [`MovingAverage`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovingAverageConfig {
    /// Number of epochs averaged.
    pub length: usize,
    /// Direction, domain and padding.
    #[serde(flatten)]
    pub options: ArmaOptions,
}

/// Centered boxcar average over `length` epochs.
#[derive(Debug, Clone)]
pub struct MovingAverage {
    arma: ArmaFilter,
}

impl KernelLifecycle for MovingAverage {
    type Config = MovingAverageConfig;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        if config.length == 0 {
            return Err(ConfigError::InvalidArgument {
                arg: "length",
                reason: "window length must be positive",
            });
        }
        let arma = ArmaFilter::try_new(ArmaConfig {
            bn: vec![1.0 / config.length as f64; config.length],
            an: vec![1.0],
            bn_start_index: config.length / 2,
            options: config.options,
        })?;
        Ok(Self { arma })
    }
}

delegate_to_arma!(MovingAverage);
