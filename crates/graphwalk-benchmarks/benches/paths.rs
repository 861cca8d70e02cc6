//! Shortest-path performance benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use graphwalk_benchmarks::{criterion_config, grid, random_network};
use graphwalk_paths::{max_propagation_time, ShortestPathEngine};

/// Benchmark Dijkstra on sparse random networks
fn bench_shortest_paths_random(c: &mut Criterion) {
    let mut group = c.benchmark_group("shortest_paths_random");

    for node_count in [100, 1_000, 10_000, 100_000].iter() {
        let edges = random_network(*node_count, node_count * 5, 100, 42);
        let engine = ShortestPathEngine::new(*node_count, &edges).unwrap();
        group.throughput(Throughput::Elements(edges.len() as u64));

        group.bench_with_input(BenchmarkId::new("nodes", node_count), &engine, |b, engine| {
            b.iter(|| black_box(engine.shortest_paths(0)))
        });
    }

    group.finish();
}

/// Grids produce many stale frontier entries
fn bench_shortest_paths_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("shortest_paths_grid");

    for side in [32, 128, 512].iter() {
        let node_count = side * side;
        let edges = grid(*side, 9);
        group.throughput(Throughput::Elements(node_count as u64));

        group.bench_with_input(BenchmarkId::new("side", side), &edges, |b, edges| {
            b.iter(|| black_box(max_propagation_time(node_count, black_box(edges), 0)))
        });
    }

    group.finish();
}

/// Engine construction versus query cost
fn bench_engine_construction(c: &mut Criterion) {
    let node_count = 10_000;
    let edges = random_network(node_count, node_count * 5, 100, 3);

    c.bench_function("engine_construction", |b| {
        b.iter(|| black_box(ShortestPathEngine::new(node_count, black_box(&edges))))
    });
}

criterion_group! {
    name = benches;
    config = criterion_config();
    targets = bench_shortest_paths_random, bench_shortest_paths_grid, bench_engine_construction
}
criterion_main!(benches);
