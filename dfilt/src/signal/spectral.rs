//! Frequency responses and spectral-domain filtering of signal matrices.

use dfilt_core::num_rs::{irfft, rfft};
use dfilt_core::{Complex, Error, Result};
use ndarray::{Array2, ArrayView2, Axis};

/// Frequency response of the ARMA filter `B(z)/A(z)` at the `length / 2 + 1` bins of a
/// `length` point DFT.
///
/// `bn_start_index` is the tap of `bn` that multiplies the current sample, so taps before it
/// act on future samples. `backward` reflects both coefficient sequences in time, which yields
/// the conjugate response. Bins where `A` vanishes get unit gain.
///
/// # Errors
/// `length` is smaller than either coefficient sequence.
pub fn arma_response(
    bn: &[f64],
    an: &[f64],
    bn_start_index: usize,
    backward: bool,
    length: usize,
) -> Result<Vec<Complex<f64>>> {
    let required = bn.len().max(an.len());
    if length < required {
        return Err(Error::insufficient_length(
            required,
            length,
            "frequency response",
        ));
    }

    let mut b = vec![0.0; length];
    for (k, &coeff) in bn.iter().enumerate() {
        b[(k + length - bn_start_index) % length] = coeff;
    }
    let mut a = vec![0.0; length];
    a[..an.len()].copy_from_slice(an);

    if backward {
        b[1..].reverse();
        a[1..].reverse();
    }

    let b = rfft(&b);
    let a = rfft(&a);
    Ok(b
        .into_iter()
        .zip(a)
        .map(|(b, a)| {
            if a.norm() == 0.0 {
                Complex::new(1.0, 0.0)
            } else {
                b / a
            }
        })
        .collect())
}

/// Evaluate `B(z)/A(z)` at the single normalized angular frequency `omega` (radians/sample).
pub fn freqz_at(b: &[f64], a: &[f64], omega: f64) -> Complex<f64> {
    let z = Complex::from_polar(1.0, -omega);
    let horner = |coeffs: &[f64]| {
        coeffs
            .iter()
            .rev()
            .fold(Complex::new(0.0, 0.0), |acc, &c| acc * z + c)
    };
    horner(b) / horner(a)
}

/// All-pass response of `length / 2 + 1` bins.
pub fn unit_response(length: usize) -> Vec<Complex<f64>> {
    vec![Complex::new(1.0, 0.0); length / 2 + 1]
}

/// Filter each column of `input` by multiplying its spectrum with `response`.
///
/// The filtering is circular over the rows of `input`; callers pad beforehand when they need a
/// linear filter. `response` must hold `input.nrows() / 2 + 1` bins.
pub fn apply_response(input: ArrayView2<f64>, response: &[Complex<f64>]) -> Result<Array2<f64>> {
    let rows = input.nrows();
    if response.len() != rows / 2 + 1 {
        return Err(Error::invalid_arg(
            "response",
            format!(
                "{} bins do not match a signal of {} rows",
                response.len(),
                rows
            ),
        ));
    }

    let mut output = Array2::<f64>::zeros(input.raw_dim());
    for (column, mut out) in input.axis_iter(Axis(1)).zip(output.axis_iter_mut(Axis(1))) {
        let samples = column.to_vec();
        let spectrum: Vec<Complex<f64>> = rfft(&samples)
            .into_iter()
            .zip(response)
            .map(|(x, h)| x * h)
            .collect();
        let filtered = irfft(&spectrum, rows % 2 == 0);
        out.iter_mut()
            .zip(filtered)
            .for_each(|(o, v)| *o = v);
    }
    Ok(output)
}
