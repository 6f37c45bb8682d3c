use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn ramp_histograms(n_bins: usize) -> (Vec<f64>, Vec<f64>) {
    let signal: Vec<f64> = (0..n_bins).map(|i| i as f64 + 0.5).collect();
    let background: Vec<f64> = (0..n_bins).map(|i| (n_bins - i) as f64).collect();
    (signal, background)
}

fn bench_roc_artifact(c: &mut Criterion) {
    let (signal, background) = ramp_histograms(10_000);

    c.bench_function("roc_10k_bins", |b| {
        b.iter(|| {
            let art = te_viz::roc_artifact(&signal, &background, false).unwrap();
            black_box(art.eff_signal.len())
        })
    });

    let (signal, background) = ramp_histograms(1_000);
    c.bench_function("roc_with_error_bands_1k_bins", |b| {
        b.iter(|| {
            let art = te_viz::roc_artifact(&signal, &background, true).unwrap();
            black_box(art.eff_signal.len())
        })
    });
}

criterion_group!(benches, bench_roc_artifact);
criterion_main!(benches);
