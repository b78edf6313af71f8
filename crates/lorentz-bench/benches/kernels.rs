use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lorentz::{AzimuthalKind, LongitudinalKind, System, TemporalKind};
use lorentz_bench::*;

const N: usize = 4096;

fn cartesian() -> System {
    System::Lorentz(AzimuthalKind::XY, LongitudinalKind::Z, TemporalKind::T)
}

fn collider() -> System {
    System::Lorentz(AzimuthalKind::RhoPhi, LongitudinalKind::Eta, TemporalKind::Tau)
}

fn bench_tau(c: &mut Criterion) {
    let mut group = c.benchmark_group("tau");
    for system in [cartesian(), collider()] {
        let vs = random_jets_in(system, N);
        let arr = random_jet_array(system, N);

        group.bench_function(BenchmarkId::new("scalar", system), |b| {
            b.iter(|| {
                let mut sum = 0.0;
                for v in &vs {
                    sum += black_box(v).tau().unwrap_or(0.0);
                }
                sum
            })
        });
        group.bench_function(BenchmarkId::new("array", system), |b| {
            b.iter(|| black_box(&arr).tau())
        });
    }
    group.finish();
}

fn bench_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("add");
    let lhs = random_jets_in(collider(), N);
    let rhs = random_jets_in(cartesian(), N);
    let a = random_jet_array(collider(), N);
    let b_arr = random_jet_array(cartesian(), N);

    group.bench_function("scalar/mixed", |b| {
        b.iter(|| {
            lhs.iter()
                .zip(&rhs)
                .map(|(v, w)| black_box(v).add(black_box(w)))
                .count()
        })
    });
    group.bench_function("array/mixed", |b| {
        b.iter(|| black_box(&a).add(black_box(&b_arr)))
    });
    group.finish();
}

fn bench_boost(c: &mut Criterion) {
    let mut group = c.benchmark_group("boost");
    let vs = random_jets_in(cartesian(), N);
    let arr = random_jet_array(cartesian(), N);
    let frame = lorentz::Vector::xyzt(1.0, 2.0, 3.0, 10.0);
    let frames = lorentz_array::VectorArray::repeat(&frame, N);

    group.bench_function("scalar/cm_of_p4", |b| {
        b.iter(|| {
            vs.iter()
                .map(|v| black_box(v).boost_cm_of_p4(black_box(&frame)))
                .count()
        })
    });
    group.bench_function("array/cm_of_p4", |b| {
        b.iter(|| black_box(&arr).boost_cm_of_p4(black_box(&frames)))
    });
    group.finish();
}

fn bench_convert(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert");
    let vs = random_jets_in(collider(), N);
    let arr = random_jet_array(collider(), N);

    group.bench_function("scalar/to_canonical", |b| {
        b.iter(|| vs.iter().map(|v| black_box(v).to_canonical()).count())
    });
    group.bench_function("array/to_canonical", |b| {
        b.iter(|| black_box(&arr).to_canonical())
    });
    group.finish();
}

criterion_group!(benches, bench_tau, bench_add, bench_boost, bench_convert);
criterion_main!(benches);
