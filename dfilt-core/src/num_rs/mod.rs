//! Numeric primitives named after their numpy counterparts.

mod convolve;
mod fft;

pub use convolve::*;
pub use fft::*;
