use dfilt_core::{Complex, Result};
use log::{debug, warn};
use ndarray::{Array2, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

use super::PadType;
use crate::kernel::{ConfigError, KernelLifecycle};
use crate::signal::spectral::unit_response;
use crate::signal::traits::DigitalFilter;
use crate::stats::median;

/// Constructor config for [`MovingMedian`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovingMedianConfig {
    /// Number of epochs in the window.
    pub length: usize,
    /// Extension used for windows reaching past the ends.
    #[serde(default)]
    pub pad_type: PadType,
}

/// Centered moving median.
///
/// Windows reaching past the ends see the padded samples; without padding they are cut short.
/// The filter is nonlinear, so the chain treats its frequency response as pass-through.
#[derive(Debug, Clone)]
pub struct MovingMedian {
    length: usize,
    pad_type: PadType,
}

impl KernelLifecycle for MovingMedian {
    type Config = MovingMedianConfig;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        if config.length == 0 {
            return Err(ConfigError::InvalidArgument {
                arg: "length",
                reason: "window length must be positive",
            });
        }
        Ok(Self {
            length: config.length,
            pad_type: config.pad_type,
        })
    }
}

impl DigitalFilter for MovingMedian {
    fn filter(&self, input: ArrayView2<f64>) -> Result<Array2<f64>> {
        debug!(
            "moving median: window {} over {} rows, {} padding",
            self.length,
            input.nrows(),
            self.pad_type
        );
        let rows = input.nrows();
        let padded = self.pad_type.pad(input, self.length, 0)?;
        let offset = if self.pad_type == PadType::None {
            0
        } else {
            self.length
        };
        let half = self.length / 2;

        let mut output = Array2::<f64>::zeros(input.raw_dim());
        let mut window = Vec::with_capacity(self.length);
        for (column, mut out) in padded.axis_iter(Axis(1)).zip(output.axis_iter_mut(Axis(1))) {
            for n in 0..rows {
                let center = offset + n;
                let lo = center.saturating_sub(half);
                let hi = (center + self.length - half).min(padded.nrows());
                window.clear();
                window.extend(column.slice(ndarray::s![lo..hi]).iter().copied());
                out[n] = median(&window).0;
            }
        }
        Ok(output)
    }

    fn frequency_response(&self, length: usize) -> Result<Vec<Complex<f64>>> {
        warn!("moving median has no transfer function, using unit response");
        Ok(unit_response(length))
    }
}
