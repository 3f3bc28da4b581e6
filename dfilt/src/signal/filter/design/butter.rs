//! Digital Butterworth design through the zeros/poles/gain representation.
//!
//! Cutoffs are normalized to the Nyquist frequency. The analog prototype is transformed to
//! the requested band, mapped to the z-plane with the bilinear transform and expanded into
//! transfer-function coefficients, following the `scipy.signal.butter` pipeline.

use core::f64::consts::PI;

use dfilt_core::{Complex, Result};
use serde::{Deserialize, Serialize};

use super::relative_degree;

/// Band selection of an IIR design.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterBandType {
    /// Pass below the cutoff.
    #[default]
    Lowpass,
    /// Pass above the cutoff.
    Highpass,
    /// Pass between two cutoffs.
    Bandpass,
    /// Reject between two cutoffs.
    Bandstop,
}

impl FilterBandType {
    /// Number of cutoff frequencies the band needs.
    pub const fn cutoff_count(&self) -> usize {
        match self {
            FilterBandType::Lowpass | FilterBandType::Highpass => 1,
            FilterBandType::Bandpass | FilterBandType::Bandstop => 2,
        }
    }
}

/// Zeros, poles and gain of a transfer function.
#[derive(Debug, Clone, PartialEq)]
pub struct Zpk {
    /// Zeros.
    pub z: Vec<Complex<f64>>,
    /// Poles.
    pub p: Vec<Complex<f64>>,
    /// Gain.
    pub k: f64,
}

/// Analog Butterworth prototype of order `n` with unit cutoff.
pub fn buttap(n: usize) -> Zpk {
    let p = (0..n)
        .map(|k| {
            let theta = PI * (2 * k + n + 1) as f64 / (2 * n) as f64;
            Complex::from_polar(1.0, theta)
        })
        .collect();
    Zpk {
        z: Vec::new(),
        p,
        k: 1.0,
    }
}

fn neg_prod(values: &[Complex<f64>]) -> Complex<f64> {
    values
        .iter()
        .fold(Complex::new(1.0, 0.0), |acc, &v| acc * (-v))
}

/// Lowpass prototype to lowpass with cutoff `wo`.
pub fn lp2lp_zpk(zpk: Zpk, wo: f64) -> Result<Zpk> {
    let degree = relative_degree(&zpk.z, &zpk.p)?;
    Ok(Zpk {
        z: zpk.z.iter().map(|&z| z * wo).collect(),
        p: zpk.p.iter().map(|&p| p * wo).collect(),
        k: zpk.k * wo.powi(degree as i32),
    })
}

/// Lowpass prototype to highpass with cutoff `wo`.
pub fn lp2hp_zpk(zpk: Zpk, wo: f64) -> Result<Zpk> {
    let degree = relative_degree(&zpk.z, &zpk.p)?;
    let mut z: Vec<_> = zpk.z.iter().map(|&z| wo / z).collect();
    z.extend(std::iter::repeat(Complex::new(0.0, 0.0)).take(degree));
    Ok(Zpk {
        z,
        p: zpk.p.iter().map(|&p| wo / p).collect(),
        k: zpk.k * (neg_prod(&zpk.z) / neg_prod(&zpk.p)).re,
    })
}

fn split_band(roots: impl Iterator<Item = Complex<f64>>, wo: f64) -> Vec<Complex<f64>> {
    let roots: Vec<_> = roots.collect();
    let spread = |r: Complex<f64>| (r * r - wo * wo).sqrt();
    roots
        .iter()
        .map(|&r| r + spread(r))
        .chain(roots.iter().map(|&r| r - spread(r)))
        .collect()
}

/// Lowpass prototype to bandpass with center `wo` and width `bw`.
pub fn lp2bp_zpk(zpk: Zpk, wo: f64, bw: f64) -> Result<Zpk> {
    let degree = relative_degree(&zpk.z, &zpk.p)?;
    let mut z = split_band(zpk.z.iter().map(|&z| z * bw / 2.0), wo);
    z.extend(std::iter::repeat(Complex::new(0.0, 0.0)).take(degree));
    Ok(Zpk {
        z,
        p: split_band(zpk.p.iter().map(|&p| p * bw / 2.0), wo),
        k: zpk.k * bw.powi(degree as i32),
    })
}

/// Lowpass prototype to bandstop with center `wo` and width `bw`.
pub fn lp2bs_zpk(zpk: Zpk, wo: f64, bw: f64) -> Result<Zpk> {
    let degree = relative_degree(&zpk.z, &zpk.p)?;
    let mut z = split_band(zpk.z.iter().map(|&z| (bw / 2.0) / z), wo);
    z.extend(std::iter::repeat(Complex::new(0.0, wo)).take(degree));
    z.extend(std::iter::repeat(Complex::new(0.0, -wo)).take(degree));
    Ok(Zpk {
        z,
        p: split_band(zpk.p.iter().map(|&p| (bw / 2.0) / p), wo),
        k: zpk.k * (neg_prod(&zpk.z) / neg_prod(&zpk.p)).re,
    })
}

/// Map an analog filter to the z-plane with the bilinear transform at sampling rate `fs`.
pub fn bilinear_zpk(zpk: Zpk, fs: f64) -> Result<Zpk> {
    let degree = relative_degree(&zpk.z, &zpk.p)?;
    let fs2 = 2.0 * fs;
    let map = |&s: &Complex<f64>| (fs2 + s) / (fs2 - s);
    let gain = zpk
        .z
        .iter()
        .fold(Complex::new(1.0, 0.0), |acc, &z| acc * (fs2 - z))
        / zpk
            .p
            .iter()
            .fold(Complex::new(1.0, 0.0), |acc, &p| acc * (fs2 - p));
    let mut z: Vec<_> = zpk.z.iter().map(map).collect();
    z.extend(std::iter::repeat(Complex::new(-1.0, 0.0)).take(degree));
    Ok(Zpk {
        z,
        p: zpk.p.iter().map(map).collect(),
        k: zpk.k * gain.re,
    })
}

/// Monic polynomial with the given roots, highest power first.
pub fn poly(roots: &[Complex<f64>]) -> Vec<f64> {
    let mut coeffs = vec![Complex::new(1.0, 0.0)];
    for &root in roots {
        let mut next = vec![Complex::new(0.0, 0.0); coeffs.len() + 1];
        for (i, &c) in coeffs.iter().enumerate() {
            next[i] += c;
            next[i + 1] -= c * root;
        }
        coeffs = next;
    }
    coeffs.into_iter().map(|c| c.re).collect()
}

/// Transfer-function coefficients `(b, a)` of a digital zpk filter.
pub fn zpk2tf(zpk: &Zpk) -> (Vec<f64>, Vec<f64>) {
    let b = poly(&zpk.z).into_iter().map(|c| c * zpk.k).collect();
    (b, poly(&zpk.p))
}

/// Digital Butterworth filter of order `order` in transfer-function form.
///
/// `cutoff` holds one (low/highpass) or two (band) frequencies in `(0, 1)`, relative to the
/// Nyquist frequency. The caller validates the arguments.
pub fn butter_coefficients(
    order: usize,
    band: FilterBandType,
    cutoff: &[f64],
) -> Result<(Vec<f64>, Vec<f64>)> {
    // pre-warp for the bilinear transform at fs = 2
    let fs = 2.0;
    let warped: Vec<f64> = cutoff
        .iter()
        .map(|w| 2.0 * fs * (PI * w / fs).tan())
        .collect();

    let prototype = buttap(order);
    let analog = match band {
        FilterBandType::Lowpass => lp2lp_zpk(prototype, warped[0])?,
        FilterBandType::Highpass => lp2hp_zpk(prototype, warped[0])?,
        FilterBandType::Bandpass | FilterBandType::Bandstop => {
            let bw = warped[1] - warped[0];
            let wo = (warped[0] * warped[1]).sqrt();
            if band == FilterBandType::Bandpass {
                lp2bp_zpk(prototype, wo, bw)?
            } else {
                lp2bs_zpk(prototype, wo, bw)?
            }
        }
    };
    Ok(zpk2tf(&bilinear_zpk(analog, fs)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::spectral::freqz_at;
    use approx::assert_abs_diff_eq;

    #[test]
    fn second_order_lowpass_matches_reference() {
        // scipy.signal.butter(2, 0.5)
        let (b, a) = butter_coefficients(2, FilterBandType::Lowpass, &[0.5]).unwrap();
        let expected_b = [0.29289322, 0.58578644, 0.29289322];
        let expected_a = [1.0, 0.0, 0.17157288];
        for (r, e) in b.iter().zip(expected_b) {
            assert_abs_diff_eq!(*r, e, epsilon = 1e-8);
        }
        for (r, e) in a.iter().zip(expected_a) {
            assert_abs_diff_eq!(*r, e, epsilon = 1e-8);
        }
    }

    #[test]
    fn lowpass_has_unit_dc_gain_and_half_power_cutoff() {
        for order in 1..=6 {
            let (b, a) = butter_coefficients(order, FilterBandType::Lowpass, &[0.3]).unwrap();
            assert_eq!(b.len(), order + 1);
            assert_eq!(a.len(), order + 1);
            assert_abs_diff_eq!(freqz_at(&b, &a, 0.0).norm(), 1.0, epsilon = 1e-10);
            assert_abs_diff_eq!(
                freqz_at(&b, &a, 0.3 * PI).norm(),
                core::f64::consts::FRAC_1_SQRT_2,
                epsilon = 1e-10
            );
        }
    }

    #[test]
    fn highpass_passes_nyquist() {
        let (b, a) = butter_coefficients(4, FilterBandType::Highpass, &[0.2]).unwrap();
        assert_abs_diff_eq!(freqz_at(&b, &a, PI).norm(), 1.0, epsilon = 1e-10);
        assert_abs_diff_eq!(freqz_at(&b, &a, 0.0).norm(), 0.0, epsilon = 1e-10);
        assert_abs_diff_eq!(
            freqz_at(&b, &a, 0.2 * PI).norm(),
            core::f64::consts::FRAC_1_SQRT_2,
            epsilon = 1e-10
        );
    }

    #[test]
    fn band_designs_double_the_order() {
        let (b, a) = butter_coefficients(3, FilterBandType::Bandpass, &[0.2, 0.4]).unwrap();
        assert_eq!((b.len(), a.len()), (7, 7));
        assert_abs_diff_eq!(freqz_at(&b, &a, 0.0).norm(), 0.0, epsilon = 1e-10);
        assert_abs_diff_eq!(freqz_at(&b, &a, PI).norm(), 0.0, epsilon = 1e-10);
        for edge in [0.2, 0.4] {
            assert_abs_diff_eq!(
                freqz_at(&b, &a, edge * PI).norm(),
                core::f64::consts::FRAC_1_SQRT_2,
                epsilon = 1e-9
            );
        }

        let (b, a) = butter_coefficients(2, FilterBandType::Bandstop, &[0.2, 0.4]).unwrap();
        assert_abs_diff_eq!(freqz_at(&b, &a, 0.0).norm(), 1.0, epsilon = 1e-10);
        assert_abs_diff_eq!(freqz_at(&b, &a, PI).norm(), 1.0, epsilon = 1e-10);
    }
}
