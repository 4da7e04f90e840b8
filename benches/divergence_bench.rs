//! Benchmarks for the spherical divergence kernel.
//!
//! Run with: `cargo bench --bench divergence_bench`
//!
//! Times one element evaluation at several orders, and the kernel against the
//! node-by-node reference oracle at the production order (NP = 4).

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use spectral_div::{
    DerivativeOperator, DirectOracle, ElementMetrics, RREARTH, ReferenceOracle, ScalarField,
    VectorField, divergence_sphere,
};

/// A sheared element with a smooth velocity field.
fn setup_element<const NP: usize>() -> (VectorField<f64, NP>, DerivativeOperator<f64, NP>, ElementMetrics<f64, NP>) {
    let v = VectorField::from_fn(|row, col| {
        let (r, c) = (row as f64, col as f64);
        [20.0 + 1.5 * r - 0.7 * c, -3.0 + 0.4 * r * c]
    });
    let metdet = ScalarField::from_fn(|row, col| 1.0e12 * (0.9 + 0.02 * row as f64 + 0.01 * col as f64));
    let mut dinv = ElementMetrics::<f64, NP>::identity().dinv;
    for r in dinv.iter_mut() {
        for m in r.iter_mut() {
            *m = [[1.1e-6, 0.2e-6], [-0.1e-6, 0.9e-6]];
        }
    }
    (
        v,
        DerivativeOperator::gauss_lobatto(),
        ElementMetrics::with_derived_rmetdet(metdet, dinv),
    )
}

fn bench_order<const NP: usize>(group: &mut criterion::BenchmarkGroup<'_, criterion::measurement::WallTime>) {
    let (v, deriv, elem) = setup_element::<NP>();
    let mut div = ScalarField::zeros();
    group.bench_with_input(BenchmarkId::from_parameter(NP), &NP, |b, _| {
        b.iter(|| {
            divergence_sphere(
                black_box(&v),
                black_box(&deriv),
                black_box(&elem),
                black_box(RREARTH),
                black_box(&mut div),
            )
        });
    });
}

/// Benchmark the kernel at different nodes-per-edge counts.
fn bench_divergence_orders(c: &mut Criterion) {
    let mut group = c.benchmark_group("divergence_sphere");
    bench_order::<2>(&mut group);
    bench_order::<4>(&mut group);
    bench_order::<6>(&mut group);
    bench_order::<8>(&mut group);
    group.finish();
}

/// Benchmark the kernel against the direct reference at NP = 4.
fn bench_kernel_vs_reference(c: &mut Criterion) {
    let mut group = c.benchmark_group("kernel_vs_reference");
    let (v, deriv, elem) = setup_element::<4>();
    let oracle = DirectOracle::<f64>::new();

    group.bench_function("kernel", |b| {
        let mut div = ScalarField::zeros();
        b.iter(|| {
            divergence_sphere(
                black_box(&v),
                black_box(&deriv),
                black_box(&elem),
                black_box(RREARTH),
                black_box(&mut div),
            )
        });
    });

    group.bench_function("direct", |b| {
        let mut div = ScalarField::zeros();
        b.iter(|| {
            oracle.divergence(black_box(&v), black_box(&deriv), black_box(&elem), black_box(&mut div))
        });
    });

    group.finish();
}

criterion_group!(benches, bench_divergence_orders, bench_kernel_vs_reference);
criterion_main!(benches);
