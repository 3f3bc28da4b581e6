use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

/// One-sided discrete Fourier transform of a real sequence.
///
/// Returns the `x.len() / 2 + 1` non-negative frequency bins; the remaining bins of a real
/// signal are the complex conjugates of these. The transform is unnormalized, [irfft] applies
/// the `1/n` factor.
pub fn rfft(x: &[f64]) -> Vec<Complex<f64>> {
    let n = x.len();
    if n == 0 {
        return Vec::new();
    }
    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(n);
    let mut buf: Vec<Complex<f64>> = x.iter().map(|&v| Complex::new(v, 0.0)).collect();
    fft.process(&mut buf);
    buf.truncate(n / 2 + 1);
    buf
}

/// Length of the real signal synthesized from `bins` one-sided bins.
///
/// A one-sided spectrum of `m` bins stems from either `2(m-1)` (even) or `2m-1` (odd) samples;
/// `even` resolves that ambiguity at the Nyquist bin.
pub const fn synthesis_len(bins: usize, even: bool) -> usize {
    if bins == 0 {
        0
    } else if even {
        2 * (bins - 1)
    } else {
        2 * bins - 1
    }
}

/// Synthesize a real signal from its one-sided spectrum.
///
/// Inverse of [rfft]: `irfft(&rfft(x), x.len() % 2 == 0)` reproduces `x` up to rounding.
/// For an even length the imaginary part of the Nyquist bin is dropped.
pub fn irfft(spec: &[Complex<f64>], even: bool) -> Vec<f64> {
    let n = synthesis_len(spec.len(), even);
    if n == 0 {
        return Vec::new();
    }
    let mut planner = FftPlanner::<f64>::new();
    let ifft = planner.plan_fft_inverse(n);
    let mut buf = vec![Complex::new(0.0, 0.0); n];

    let n_freq = n / 2 + 1;
    buf[..n_freq].copy_from_slice(&spec[..n_freq]);
    buf[0].im = 0.0;
    if even {
        buf[n / 2].im = 0.0;
    }
    let max_k = if even { n / 2 - 1 } else { n / 2 };
    for k in 1..=max_k {
        buf[n - k] = buf[k].conj();
    }

    ifft.process(&mut buf);
    let scale = 1.0 / n as f64;
    buf.into_iter().map(|c| c.re * scale).collect()
}
