use dfilt_core::{Complex, Error, Result};
use log::debug;
use ndarray::{Array2, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

use super::{arma_filter_blocked, PadType};
use crate::kernel::{ConfigError, KernelLifecycle};
use crate::signal::spectral::{apply_response, arma_response};
use crate::signal::traits::DigitalFilter;

/// Upper bound on the length of `bn` and `an` a filter kind may build.
pub const MAX_TAPS: usize = 1 << 20;

/// Options shared by every ARMA-based filter kind.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArmaOptions {
    /// Run the recursion from the last epoch towards the first.
    pub backward: bool,
    /// Filter by spectral multiplication instead of the time-domain recursion.
    pub in_frequency_domain: bool,
    /// Boundary extension of the input, sized by [ArmaFilter::warmup].
    pub pad_type: PadType,
}

/// Constructor config for [`ArmaFilter`].
#[derive(Debug, Clone, PartialEq)]
pub struct ArmaConfig {
    /// Moving-average coefficients.
    pub bn: Vec<f64>,
    /// Autoregressive coefficients, `an[0]` normalizes the recursion.
    pub an: Vec<f64>,
    /// Tap of `bn` applied to the current epoch; earlier taps see future epochs.
    pub bn_start_index: usize,
    /// Direction, domain and padding.
    pub options: ArmaOptions,
}

/// Generic ARMA filter
///
/// `an[0] y[n] = Σ_k bn[k] x[n - k + s] - Σ_{k≥1} an[k] y[n-k]` with `s = bn_start_index`.
#[derive(Debug, Clone, PartialEq)]
pub struct ArmaFilter {
    bn: Vec<f64>,
    an: Vec<f64>,
    bn_start_index: usize,
    options: ArmaOptions,
}

impl KernelLifecycle for ArmaFilter {
    type Config = ArmaConfig;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        if config.bn.is_empty() {
            return Err(ConfigError::EmptyInput { arg: "bn" });
        }
        if config.an.is_empty() {
            return Err(ConfigError::EmptyInput { arg: "an" });
        }
        if config.bn.len() > MAX_TAPS || config.an.len() > MAX_TAPS {
            return Err(ConfigError::InvalidArgument {
                arg: "bn/an",
                reason: "more coefficients than a filter may hold",
            });
        }
        if config.an[0] == 0.0 {
            return Err(ConfigError::InvalidArgument {
                arg: "an",
                reason: "leading coefficient must be non-zero",
            });
        }
        if config.bn.iter().chain(&config.an).any(|c| !c.is_finite()) {
            return Err(ConfigError::InvalidArgument {
                arg: "bn/an",
                reason: "coefficients must be finite",
            });
        }
        if config.bn_start_index >= config.bn.len() {
            return Err(ConfigError::InvalidArgument {
                arg: "bnStartIndex",
                reason: "start index must address a tap of bn",
            });
        }
        Ok(Self {
            bn: config.bn,
            an: config.an,
            bn_start_index: config.bn_start_index,
            options: config.options,
        })
    }
}

impl ArmaFilter {
    /// Moving-average coefficients.
    pub fn bn(&self) -> &[f64] {
        &self.bn
    }

    /// Autoregressive coefficients.
    pub fn an(&self) -> &[f64] {
        &self.an
    }

    /// Tap of `bn` applied to the current epoch.
    pub fn bn_start_index(&self) -> usize {
        self.bn_start_index
    }

    /// Direction, domain and padding.
    pub fn options(&self) -> ArmaOptions {
        self.options
    }

    /// Number of epochs needed before the output settles.
    ///
    /// Inputs with fewer rows are rejected and padding extends the input by this many rows.
    pub fn warmup(&self) -> usize {
        let s = self.bn_start_index;
        (self.bn.len() - s - 1).max(s).max(3 * self.an.len())
    }

    fn filter_frequency_domain(&self, input: ArrayView2<f64>) -> Result<Array2<f64>> {
        let warmup = self.warmup();
        let pad = self.options.pad_type;
        let padded = pad.pad(input, warmup, 0)?;
        let response = self.frequency_response(padded.nrows())?;
        let filtered = apply_response(padded.view(), &response)?;
        pad.trim(filtered.view(), warmup, 0)
    }

    fn filter_time_domain(&self, input: ArrayView2<f64>) -> Result<Array2<f64>> {
        let warmup = self.warmup();
        let shift = self.bn_start_index;
        let pad = self.options.pad_type;

        let padded = if self.options.backward {
            let mut reversed = input.to_owned();
            reversed.invert_axis(Axis(0));
            pad.pad(reversed.view(), warmup, shift)?
        } else {
            pad.pad(input, warmup, shift)?
        };
        let filtered = arma_filter_blocked(&self.bn, &self.an, padded.view())?;
        let mut output = pad.trim(filtered.view(), warmup, shift)?;
        if self.options.backward {
            output.invert_axis(Axis(0));
        }
        Ok(output)
    }
}

impl DigitalFilter for ArmaFilter {
    fn filter(&self, input: ArrayView2<f64>) -> Result<Array2<f64>> {
        let warmup = self.warmup();
        if input.nrows() < warmup {
            return Err(Error::insufficient_length(
                warmup,
                input.nrows(),
                "ARMA filter warmup",
            ));
        }
        debug!(
            "ARMA filter: {} x {} input, {} bn / {} an taps, {} domain, {} padding{}",
            input.nrows(),
            input.ncols(),
            self.bn.len(),
            self.an.len(),
            if self.options.in_frequency_domain {
                "frequency"
            } else {
                "time"
            },
            self.options.pad_type,
            if self.options.backward { ", backward" } else { "" },
        );
        if self.options.in_frequency_domain {
            self.filter_frequency_domain(input)
        } else {
            self.filter_time_domain(input)
        }
    }

    fn frequency_response(&self, length: usize) -> Result<Vec<Complex<f64>>> {
        arma_response(
            &self.bn,
            &self.an,
            self.bn_start_index,
            self.options.backward,
            length,
        )
    }
}

/// Implement [DigitalFilter] for a filter kind that wraps an [ArmaFilter] in its `arma` field.
macro_rules! delegate_to_arma {
    ($kind:ty) => {
        impl $kind {
            /// The ARMA representation of this filter.
            pub fn arma(&self) -> &$crate::signal::filter::ArmaFilter {
                &self.arma
            }
        }

        impl $crate::signal::traits::DigitalFilter for $kind {
            fn filter(
                &self,
                input: ::ndarray::ArrayView2<f64>,
            ) -> ::dfilt_core::Result<::ndarray::Array2<f64>> {
                $crate::signal::traits::DigitalFilter::filter(&self.arma, input)
            }

            fn frequency_response(
                &self,
                length: usize,
            ) -> ::dfilt_core::Result<::std::vec::Vec<::dfilt_core::Complex<f64>>> {
                $crate::signal::traits::DigitalFilter::frequency_response(&self.arma, length)
            }
        }
    };
}
pub(crate) use delegate_to_arma;
