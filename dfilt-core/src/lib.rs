//! Shared error type and numeric building blocks for the `dfilt` crates.

mod error;

/// numpy-like numeric routines used by filter design and frequency-domain filtering.
pub mod num_rs;

pub use error::{Error, Result};

/// Complex sample type of frequency responses and spectra.
pub use rustfft::num_complex::Complex;
