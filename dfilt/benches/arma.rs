use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dfilt::kernel::KernelLifecycle;
use dfilt::signal::filter::design::FilterBandType;
use dfilt::signal::filter::{
    arma_filter_blocked, ArmaOptions, Butterworth, ButterworthConfig, Cutoff, GraceLowpass,
    GraceLowpassConfig, PadType,
};
use dfilt::signal::traits::DigitalFilter;
use ndarray::Array2;
use rand::rngs::ThreadRng;
use rand::Rng;

/// Noisy multi-channel ranging-like signal.
fn randomized_signal(mut rng: ThreadRng, rows: usize, cols: usize) -> Array2<f64> {
    Array2::from_shape_fn((rows, cols), |(n, c)| {
        let t = n as f64 * 0.2;
        (0.01 * t + c as f64).sin() + 0.1 * rng.random_range(-1.0..1.0)
    })
}

/// Raw block engine against the recursion order.
fn block_engine(c: &mut Criterion) {
    let signal = randomized_signal(rand::rng(), 1 << 14, 3);
    let mut group = c.benchmark_group("arma_filter_blocked");
    for order in [1usize, 4, 16] {
        let bn = vec![1.0 / (order + 1) as f64; order + 1];
        let mut an = vec![0.0; order + 1];
        an[0] = 1.0;
        an[order] = -0.5;
        group.bench_with_input(BenchmarkId::from_parameter(order), &signal, |bench, sig| {
            bench.iter(|| arma_filter_blocked(black_box(&bn), black_box(&an), black_box(sig.view())))
        });
    }
    group.finish();
}

/// Time against frequency domain for a long FIR and a short IIR.
fn domains(c: &mut Criterion) {
    let signal = randomized_signal(rand::rng(), 1 << 14, 3);
    let mut group = c.benchmark_group("domain");
    for in_frequency_domain in [false, true] {
        let options = ArmaOptions {
            in_frequency_domain,
            pad_type: PadType::Symmetric,
            ..Default::default()
        };
        let lowpass = GraceLowpass::try_new(GraceLowpassConfig {
            options,
            ..Default::default()
        })
        .unwrap();
        let butter = Butterworth::try_new(ButterworthConfig {
            order: 6,
            filter_type: FilterBandType::Lowpass,
            cutoff: Cutoff::Single(0.1),
            options,
        })
        .unwrap();
        let label = if in_frequency_domain { "frequency" } else { "time" };
        group.bench_with_input(BenchmarkId::new("grace_lowpass", label), &signal, |bench, sig| {
            bench.iter(|| lowpass.filter(black_box(sig.view())))
        });
        group.bench_with_input(BenchmarkId::new("butterworth", label), &signal, |bench, sig| {
            bench.iter(|| butter.filter(black_box(sig.view())))
        });
    }
    group.finish();
}

criterion_group!(benches, block_engine, domains);
criterion_main!(benches);
