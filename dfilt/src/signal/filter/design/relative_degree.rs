use dfilt_core::{Complex, Error, Result};

/// Excess of poles over zeros of a transfer function in zpk form.
pub(crate) fn relative_degree(zeros: &[Complex<f64>], poles: &[Complex<f64>]) -> Result<usize> {
    poles.len().checked_sub(zeros.len()).ok_or_else(|| {
        Error::invalid_arg("zpk", "improper transfer function; poles must be >= zeros")
    })
}
