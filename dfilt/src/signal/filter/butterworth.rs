use serde::{Deserialize, Serialize};

use super::design::{butter_coefficients, FilterBandType};
use super::{delegate_to_arma, ArmaConfig, ArmaFilter, ArmaOptions};
use crate::kernel::{ConfigError, KernelLifecycle};

/// A single cutoff or a list of cutoffs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cutoff {
    /// Low/highpass edge.
    Single(f64),
    /// Band edges.
    Many(Vec<f64>),
}

impl Cutoff {
    fn as_slice(&self) -> &[f64] {
        match self {
            Cutoff::Single(w) => core::slice::from_ref(w),
            Cutoff::Many(w) => w,
        }
    }
}

/// Constructor config for [`Butterworth`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButterworthConfig {
    /// Order of the analog prototype.
    pub order: usize,
    /// Band selection.
    #[serde(default)]
    pub filter_type: FilterBandType,
    /// Cutoff frequencies normalized to the Nyquist frequency.
    pub cutoff: Cutoff,
    /// Direction, domain and padding.
    #[serde(flatten)]
    pub options: ArmaOptions,
}

/// Digital Butterworth filter.
#[derive(Debug, Clone)]
pub struct Butterworth {
    arma: ArmaFilter,
}

impl KernelLifecycle for Butterworth {
    type Config = ButterworthConfig;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        if config.order == 0 {
            return Err(ConfigError::InvalidArgument {
                arg: "order",
                reason: "order must be positive",
            });
        }
        let cutoff = config.cutoff.as_slice();
        let expected = config.filter_type.cutoff_count();
        if cutoff.len() != expected {
            return Err(ConfigError::LengthMismatch {
                arg: "cutoff",
                expected,
                got: cutoff.len(),
            });
        }
        if cutoff.iter().any(|&w| !(w > 0.0 && w < 1.0)) {
            return Err(ConfigError::InvalidArgument {
                arg: "cutoff",
                reason: "cutoff frequencies must lie in (0, 1)",
            });
        }
        if cutoff.windows(2).any(|w| w[0] >= w[1]) {
            return Err(ConfigError::InvalidArgument {
                arg: "cutoff",
                reason: "band edges must be ascending",
            });
        }

        let (bn, an) = butter_coefficients(config.order, config.filter_type, cutoff).map_err(
            |_| ConfigError::InvalidArgument {
                arg: "order",
                reason: "design failed for this order",
            },
        )?;
        let arma = ArmaFilter::try_new(ArmaConfig {
            bn,
            an,
            bn_start_index: 0,
            options: config.options,
        })?;
        Ok(Self { arma })
    }
}

delegate_to_arma!(Butterworth);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::traits::DigitalFilter;
    use approx::assert_abs_diff_eq;
    use ndarray::Array2;

    fn lowpass(order: usize, cutoff: f64) -> Butterworth {
        Butterworth::try_new(ButterworthConfig {
            order,
            filter_type: FilterBandType::Lowpass,
            cutoff: Cutoff::Single(cutoff),
            options: ArmaOptions::default(),
        })
        .unwrap()
    }

    #[test]
    fn lowpass_response_on_the_bin_grid() {
        let h = lowpass(4, 0.25).frequency_response(64).unwrap();
        assert_abs_diff_eq!(h[0].norm(), 1.0, epsilon = 1e-10);
        // bin 8 of 64 sits at a quarter of Nyquist
        assert_abs_diff_eq!(h[8].norm(), core::f64::consts::FRAC_1_SQRT_2, epsilon = 1e-10);
        assert!(h[32].norm() < 1e-10);
    }

    #[test]
    fn constant_input_settles_to_itself() {
        let x = Array2::from_elem((200, 1), 3.0);
        let y = lowpass(2, 0.1).filter(x.view()).unwrap();
        assert_abs_diff_eq!(y[[199, 0]], 3.0, epsilon = 1e-9);
    }

    #[test]
    fn cutoff_accepts_scalar_or_list() {
        let config: ButterworthConfig =
            serde_json::from_str(r#"{"order": 2, "cutoff": 0.3}"#).unwrap();
        assert_eq!(config.cutoff, Cutoff::Single(0.3));
        assert_eq!(config.filter_type, FilterBandType::Lowpass);

        let config: ButterworthConfig = serde_json::from_str(
            r#"{"order": 2, "filterType": "bandpass", "cutoff": [0.1, 0.3], "backward": true}"#,
        )
        .unwrap();
        assert!(config.options.backward);
        assert!(Butterworth::try_new(config).is_ok());
    }

    #[test]
    fn invalid_cutoffs_are_rejected() {
        let build = |filter_type, cutoff| {
            Butterworth::try_new(ButterworthConfig {
                order: 3,
                filter_type,
                cutoff,
                options: ArmaOptions::default(),
            })
        };
        assert_eq!(
            build(FilterBandType::Bandstop, Cutoff::Single(0.2)).unwrap_err(),
            ConfigError::LengthMismatch {
                arg: "cutoff",
                expected: 2,
                got: 1
            }
        );
        assert!(build(FilterBandType::Lowpass, Cutoff::Single(1.0)).is_err());
        assert!(build(FilterBandType::Bandpass, Cutoff::Many(vec![0.4, 0.2])).is_err());
    }
}
