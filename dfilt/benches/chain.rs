use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dfilt::signal::filter::chain_from_json;
use dfilt::signal::traits::DigitalFilter;
use ndarray::Array2;
use rand::Rng;

const CHAIN: &str = r#"[
    {"type": "movingMedian", "length": 5, "padType": "symmetric"},
    {"type": "derivative", "polynomialDegree": 4, "sampling": 5, "padType": "constant"},
    {"type": "butterworth", "order": 4, "cutoff": 0.2, "backward": true, "padType": "zero"},
    {"type": "reduceFilterOutput", "filter": [
        {"type": "movingAverage", "length": 25, "padType": "constant", "inFrequencyDomain": true}
    ]}
]"#;

/// Typical preprocessing chain over arcs of increasing length.
fn chain_filter(c: &mut Criterion) {
    let chain = chain_from_json(CHAIN).unwrap();
    let mut rng = rand::rng();
    let mut group = c.benchmark_group("chain");
    for rows in [1usize << 10, 1 << 12, 1 << 14] {
        let arc = Array2::from_shape_fn((rows, 2), |_| rng.random_range(-1.0..1.0));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &arc, |bench, arc| {
            bench.iter(|| chain.filter(black_box(arc.view())))
        });
    }
    group.finish();
}

criterion_group!(benches, chain_filter);
criterion_main!(benches);
