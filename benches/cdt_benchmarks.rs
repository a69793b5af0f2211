//! Benchmarks for initial-geometry generation.
//!
//! This benchmark suite measures the performance of the generation stages:
//! - Tetrahedron construction across genus and time extent
//! - Neighbour resolution through the incidence index
//! - Manifold validation and simplex census
//! - Serialization of the finished geometry

#![allow(missing_docs)] // Allow missing docs for criterion-generated functions

use cdt_initial_geometry::{
    CdtTriangulation, NeighborOrdering, SimplexCensus, Topology, TriangulationQuery, build,
    resolve, serialize, validate,
};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

const GENERA: [u32; 4] = [0, 1, 4, 16];

fn topology(genus: u32, time_slices: u32) -> Topology {
    Topology::new(i64::from(genus), i64::from(time_slices)).expect("benchmark topology is valid")
}

/// Benchmark tetrahedron construction for growing genus
fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    for genus in GENERA {
        let topology = topology(genus, 16);
        let tetrahedra = build(topology).expect("build succeeds").len();
        group.throughput(Throughput::Elements(tetrahedra as u64));
        group.bench_with_input(BenchmarkId::new("genus", genus), &topology, |b, &topology| {
            b.iter(|| black_box(build(black_box(topology))));
        });
    }
    group.finish();
}

/// Benchmark neighbour resolution
fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");

    for genus in GENERA {
        let tetrahedra = build(topology(genus, 16)).expect("build succeeds");
        group.throughput(Throughput::Elements(tetrahedra.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("genus", genus),
            &tetrahedra,
            |b, tetrahedra| {
                b.iter(|| black_box(resolve(black_box(tetrahedra))));
            },
        );
    }
    group.finish();
}

/// Benchmark validation and census on a finished geometry
fn bench_checks(c: &mut Criterion) {
    let triangulation =
        CdtTriangulation::generate(topology(4, 32)).expect("generation succeeds");
    let mut group = c.benchmark_group("checks");
    group.throughput(Throughput::Elements(triangulation.tetrahedron_count() as u64));

    group.bench_function("validate", |b| {
        b.iter(|| {
            black_box(validate(
                black_box(triangulation.tetrahedra()),
                black_box(triangulation.adjacency()),
            ))
        });
    });
    group.bench_function("census", |b| {
        b.iter(|| {
            black_box(SimplexCensus::compute(
                black_box(triangulation.labels()),
                black_box(triangulation.tetrahedra()),
                triangulation.time_slices(),
            ))
        });
    });
    group.finish();
}

/// Benchmark the full pipeline without touching the disk
fn bench_generate_and_serialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");

    for time_slices in [8, 32, 128] {
        let topology = topology(2, time_slices);
        group.bench_with_input(
            BenchmarkId::new("timeslices", time_slices),
            &topology,
            |b, &topology| {
                b.iter(|| {
                    let triangulation =
                        CdtTriangulation::generate(black_box(topology)).expect("generation succeeds");
                    black_box(serialize(
                        triangulation.labels(),
                        triangulation.tetrahedra(),
                        triangulation.adjacency(),
                        NeighborOrdering::Canonical,
                    ))
                });
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_build,
    bench_resolve,
    bench_checks,
    bench_generate_and_serialize
);
criterion_main!(benches);
