//! Performance benchmarks for crash-corridor-lib
//!
//! Run with: cargo bench --package crash-corridor-lib

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use crash_corridor_lib::{BoundingBox, CorridorFilter, Position};

/// Generate a realistic wiggly route with the specified number of waypoints.
fn generate_route(num_points: usize, base_lat: f64, base_lng: f64) -> Vec<Position> {
    (0..num_points)
        .map(|i| {
            let t = i as f64 / num_points as f64;
            Position::new(
                base_lat + t * 0.1 + (t * 50.0).sin() * 0.001,
                base_lng + t * 0.1 + (t * 30.0).cos() * 0.001,
            )
        })
        .collect()
}

/// Scatter candidate crashes across the route's bounding box.
fn generate_candidates(num_points: usize, base_lat: f64, base_lng: f64) -> Vec<Position> {
    (0..num_points)
        .map(|i| {
            let t = i as f64 / num_points as f64;
            Position::new(
                base_lat + (t * 97.0).sin().abs() * 0.1,
                base_lng + (t * 61.0).cos().abs() * 0.1,
            )
        })
        .collect()
}

fn bench_corridor_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("corridor_build");

    for num_points in [100usize, 1_000] {
        let route = generate_route(num_points, -43.5, 172.5);
        group.throughput(Throughput::Elements(num_points as u64));
        group.bench_function(format!("set_route_{num_points}"), |b| {
            let mut filter = CorridorFilter::new();
            b.iter(|| filter.set_route(&route, 0.05).unwrap());
        });
    }

    group.finish();
}

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter");

    // A 1k-point route against a bounding-box-sized candidate batch.
    let route = generate_route(1_000, -43.5, 172.5);
    let candidates = generate_candidates(1_000, -43.5, 172.5);
    let mut filter = CorridorFilter::new();
    filter.set_route(&route, 0.05).unwrap();

    group.throughput(Throughput::Elements(candidates.len() as u64));
    group.bench_function("1k_candidates_1k_route", |b| {
        b.iter(|| filter.filter_within(&candidates).unwrap());
    });

    group.finish();
}

fn bench_bounds(c: &mut Criterion) {
    let mut group = c.benchmark_group("bounds");

    let route = generate_route(10_000, -43.5, 172.5);
    group.throughput(Throughput::Elements(route.len() as u64));
    group.bench_function("from_positions_10k", |b| {
        b.iter(|| BoundingBox::from_positions(&route).unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_corridor_build, bench_filter, bench_bounds);

criterion_main!(benches);
