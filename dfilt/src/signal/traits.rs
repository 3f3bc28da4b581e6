//! Trait interfaces for digital filters.
//!
//! A filter chain only ever sees filters through [DigitalFilter], so new kinds plug in by
//! implementing these two methods.

use core::fmt::Debug;

use dfilt_core::{Complex, Result};
use ndarray::{Array2, ArrayView2};

/// Linear time-invariant (or pass-through nonlinear) filter over signal matrices.
///
/// Rows of the matrix are equidistant epochs, columns are independent channels. Filters are
/// immutable after construction so one instance may serve several arcs concurrently.
pub trait DigitalFilter: Send + Sync + Debug {
    /// Filter every column of `input`. The output has the shape of the input.
    fn filter(&self, input: ArrayView2<f64>) -> Result<Array2<f64>>;

    /// Complex gain at the `length / 2 + 1` non-negative frequencies of a `length` point DFT.
    fn frequency_response(&self, length: usize) -> Result<Vec<Complex<f64>>>;
}

impl<T: DigitalFilter + ?Sized> DigitalFilter for Box<T> {
    fn filter(&self, input: ArrayView2<f64>) -> Result<Array2<f64>> {
        (**self).filter(input)
    }

    fn frequency_response(&self, length: usize) -> Result<Vec<Complex<f64>>> {
        (**self).frequency_response(length)
    }
}
