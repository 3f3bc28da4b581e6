mod ndarray_conv_binds;

use crate::{Error, Result};
use ndarray::{Array1, ArrayView1};
use ndarray_conv::{ConvExt, PaddingMode};
use num_traits::NumAssign;

/// Convolution mode determines behavior near edges and output size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvolveMode {
    /// Full convolution, output size is `in1.len() + in2.len() - 1`
    Full,
    /// Valid convolution, output size is `max(in1.len(), in2.len()) - min(in1.len(), in2.len()) + 1`
    Valid,
    /// Same convolution, output size is `in1.len()`
    Same,
}

/// Best effort parallel behaviour with numpy's convolve method. We take `v` as the convolution
/// kernel.
///
/// Returns the discrete, linear convolution of two one-dimensional sequences.
///
/// # Parameters
/// * `a` : (N,) [[array_like]]([ndarray::Array1])
///   Signal to be (linearly) convolved.
/// * `v` : (M,) [[array_like]]([ndarray::Array1])
///   Second one-dimensional input array.
/// * `mode` : [ConvolveMode]
///   [ConvolveMode::Full]: output of shape (N+M-1,).
///   [ConvolveMode::Same]: output of length ``max(M, N)``, centered like numpy.
///   [ConvolveMode::Valid]: output of length ``max(M, N) - min(M, N) + 1``.
///
/// # Errors
/// Either input is empty.
///
/// # Examples
/// ```
/// use ndarray::array;
/// use dfilt_core::num_rs::{ConvolveMode, convolve};
///
/// let a = array![1., 2., 3.];
/// let v = array![0., 1., 0.5];
///
/// let expected = array![0., 1., 2.5, 4., 1.5];
/// let result = convolve(a.view(), v.view(), ConvolveMode::Full).unwrap();
/// assert_eq!(result, expected);
/// ```
pub fn convolve<T>(a: ArrayView1<T>, v: ArrayView1<T>, mode: ConvolveMode) -> Result<Array1<T>>
where
    T: NumAssign + Copy,
{
    if a.is_empty() || v.is_empty() {
        return Err(Error::invalid_arg("a/v", "cannot convolve an empty sequence"));
    }

    a.conv(&v, mode.into(), PaddingMode::Zeros)
        .map_err(|e| Error::Conv {
            reason: e.to_string(),
        })
}
