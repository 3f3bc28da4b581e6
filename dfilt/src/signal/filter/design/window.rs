use core::f64::consts::PI;

fn sinc(x: f64) -> f64 {
    if x == 0.0 {
        1.0
    } else {
        (PI * x).sin() / (PI * x)
    }
}

/// Taps of a self-convolving rectangular (CRN) lowpass kernel.
///
/// The spectrum is the `convolution_number`-fold self convolution of a rectangle, which in time
/// domain is `sinc(2 B t / Nc)^Nc`. The kernel is sampled every `sampling` seconds over
/// `fit_interval` seconds (an odd number of taps, centered), then normalized to unit DC gain.
pub fn crn_taps(sampling: f64, bandwidth: f64, convolution_number: u32, fit_interval: f64) -> Vec<f64> {
    let mut count = (fit_interval / sampling).floor() as usize;
    if count % 2 == 0 {
        count += 1;
    }
    let half = (count / 2) as f64;
    let nc = convolution_number as f64;
    let mut taps: Vec<f64> = (0..count)
        .map(|k| {
            let t = (k as f64 - half) * sampling;
            sinc(2.0 * bandwidth * t / nc).powi(convolution_number as i32)
        })
        .collect();
    let sum: f64 = taps.iter().sum();
    taps.iter_mut().for_each(|v| *v /= sum);
    taps
}
