use dfilt_core::num_rs::{convolve, ConvolveMode};
use dfilt_core::{Error, Result};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::signal::filter::MAX_TAPS;

/// Which branch of the wavelet decomposition to extract.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaveletType {
    /// Approximation (scaling function) branch.
    #[default]
    Lowpass,
    /// Detail (wavelet) branch.
    Highpass,
}

/// Quadrature mirror of the scaling filter `h`: `g[k] = (-1)^k h[L-1-k]`.
pub fn quadrature_mirror(h: &[f64]) -> Vec<f64> {
    h.iter()
        .rev()
        .enumerate()
        .map(|(k, &v)| if k % 2 == 0 { v } else { -v })
        .collect()
}

/// Insert `factor - 1` zeros between consecutive taps.
fn upsample(h: &[f64], factor: usize) -> Array1<f64> {
    let mut out = Array1::<f64>::zeros((h.len() - 1) * factor + 1);
    for (k, &v) in h.iter().enumerate() {
        out[k * factor] = v;
    }
    out
}

/// Tap count of the `level` cascade of a `taps` long filter, `(taps - 1)(2^level - 1) + 1`.
///
/// `None` when `taps` is zero or the count overflows `usize`.
pub fn a_trous_len(taps: usize, level: usize) -> Option<usize> {
    let spread = 1usize
        .checked_shl(u32::try_from(level).ok()?)?
        .checked_sub(1)?;
    taps.checked_sub(1)?.checked_mul(spread)?.checked_add(1)
}

/// Single filter equivalent to `level` stages of the undecimated (à trous) decomposition.
///
/// `scaling` is normalized to unit sum first. Stage `j` uses the filter upsampled by `2^j`;
/// the highpass branch applies the quadrature mirror at the last stage.
///
/// The product `H(z) H(z^2) ... F(z^(2^(level-1)))` is built from the coarsest stage inward,
/// `E_j(z) = H(z) E_(j-1)(z^2)`, so every step convolves with the short scaling filter.
pub fn a_trous_filter(scaling: &[f64], level: usize, kind: WaveletType) -> Result<Vec<f64>> {
    if a_trous_len(scaling.len(), level).map_or(true, |len| len > MAX_TAPS) {
        return Err(Error::invalid_arg(
            "level",
            format!("level {level} cascade of {} taps is too long", scaling.len()),
        ));
    }
    if level == 0 {
        return Ok(vec![1.0]);
    }
    let sum: f64 = scaling.iter().sum();
    let h: Vec<f64> = scaling.iter().map(|v| v / sum).collect();

    let mut equivalent = match kind {
        WaveletType::Lowpass => Array1::from(h.clone()),
        WaveletType::Highpass => Array1::from(quadrature_mirror(&h)),
    };
    let h = Array1::from(h);
    for _ in 1..level {
        let spread = upsample(&equivalent.to_vec(), 2);
        equivalent = convolve(spread.view(), h.view(), ConvolveMode::Full)?;
    }
    Ok(equivalent.to_vec())
}
