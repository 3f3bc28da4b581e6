use dfilt_core::{Complex, Result};
use log::debug;
use ndarray::{Array2, ArrayView2};

use super::DigitalFilterChain;
use crate::kernel::{ConfigError, KernelLifecycle};
use crate::signal::traits::DigitalFilter;

/// Residual of a filter chain: `y = x - chain(x)`, response `1 - H`.
#[derive(Debug, Default)]
pub struct ReduceFilterOutput {
    inner: DigitalFilterChain,
}

impl ReduceFilterOutput {
    /// The chain whose output is removed.
    pub fn inner(&self) -> &DigitalFilterChain {
        &self.inner
    }
}

impl KernelLifecycle for ReduceFilterOutput {
    type Config = DigitalFilterChain;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        Ok(Self { inner: config })
    }
}

impl DigitalFilter for ReduceFilterOutput {
    fn filter(&self, input: ArrayView2<f64>) -> Result<Array2<f64>> {
        debug!("reducing input by a chain of {} filters", self.inner.len());
        let filtered = self.inner.filter(input)?;
        Ok(&input - &filtered)
    }

    fn frequency_response(&self, length: usize) -> Result<Vec<Complex<f64>>> {
        Ok(self
            .inner
            .frequency_response(length)?
            .into_iter()
            .map(|h| Complex::new(1.0, 0.0) - h)
            .collect())
    }
}
