use core::f64::consts::PI;

use serde::{Deserialize, Serialize};

use super::{delegate_to_arma, ArmaConfig, ArmaFilter, ArmaOptions};
use crate::kernel::{ConfigError, KernelLifecycle};

/// Constructor config for [`Notch`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotchConfig {
    /// Rejected frequency, normalized to Nyquist.
    pub frequency: f64,
    /// -3 dB width of the notch, normalized to Nyquist.
    pub bandwidth: f64,
    /// Direction, domain and padding.
    #[serde(flatten)]
    pub options: ArmaOptions,
}

/// Second order IIR notch with unit gain away from the rejected frequency.
#[derive(Debug, Clone)]
pub struct Notch {
    arma: ArmaFilter,
}

impl KernelLifecycle for Notch {
    type Config = NotchConfig;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        if !(config.frequency > 0.0 && config.frequency < 1.0) {
            return Err(ConfigError::InvalidArgument {
                arg: "frequency",
                reason: "notch frequency must lie in (0, 1)",
            });
        }
        if !(config.bandwidth > 0.0 && config.bandwidth < 1.0) {
            return Err(ConfigError::InvalidArgument {
                arg: "bandwidth",
                reason: "notch bandwidth must lie in (0, 1)",
            });
        }
        let w0 = PI * config.frequency;
        let beta = (PI * config.bandwidth / 2.0).tan();
        let gain = 1.0 / (1.0 + beta);
        let cos_w0 = w0.cos();

        let arma = ArmaFilter::try_new(ArmaConfig {
            bn: vec![gain, -2.0 * gain * cos_w0, gain],
            an: vec![1.0, -2.0 * gain * cos_w0, 2.0 * gain - 1.0],
            bn_start_index: 0,
            options: config.options,
        })?;
        Ok(Self { arma })
    }
}

delegate_to_arma!(Notch);
