use serde::{Deserialize, Serialize};

use super::{delegate_to_arma, ArmaConfig, ArmaFilter, ArmaOptions, MAX_TAPS};
use crate::kernel::{ConfigError, KernelLifecycle};

/// Constructor config for [`Lag`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LagConfig {
    /// Epochs of delay, negative values lead.
    pub lag: i64,
    /// Direction, domain and padding.
    #[serde(flatten)]
    pub options: ArmaOptions,
}

/// Integer delay or lead: `y[n] = x[n - lag]`.
#[derive(Debug, Clone)]
pub struct Lag {
    arma: ArmaFilter,
}

impl KernelLifecycle for Lag {
    type Config = LagConfig;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        let shift = usize::try_from(config.lag.unsigned_abs())
            .ok()
            .filter(|&shift| shift < MAX_TAPS)
            .ok_or(ConfigError::InvalidArgument {
                arg: "lag",
                reason: "lag exceeds the longest filter that can be built",
            })?;
        let mut bn = vec![0.0; shift + 1];
        let bn_start_index = if config.lag >= 0 {
            bn[shift] = 1.0;
            0
        } else {
            bn[0] = 1.0;
            shift
        };
        let arma = ArmaFilter::try_new(ArmaConfig {
            bn,
            an: vec![1.0],
            bn_start_index,
            options: config.options,
        })?;
        Ok(Self { arma })
    }
}

delegate_to_arma!(Lag);
