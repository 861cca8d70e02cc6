//! Common utilities for benchmarks

use criterion::Criterion;
use graphwalk_core::{Edge, NodeId, Weight, WeightedEdge};
use pprof::criterion::{Output, PProfProfiler};

/// Configure criterion with flamegraph profiling support
pub fn criterion_config() -> Criterion {
    Criterion::default()
        .warm_up_time(std::time::Duration::from_secs(3))
        .measurement_time(std::time::Duration::from_secs(10))
        .sample_size(100)
        .with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)))
}

/// Deterministic xorshift generator so runs are comparable
pub struct GraphRng(u64);

impl GraphRng {
    pub fn new(seed: u64) -> Self {
        Self(seed.max(1))
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    pub fn below(&mut self, bound: usize) -> usize {
        (self.next_u64() % bound as u64) as usize
    }
}

/// Path 0 -> 1 -> ... -> n-1
pub fn chain(node_count: usize) -> Vec<Edge> {
    (1..node_count).map(|node| Edge::new(node - 1, node)).collect()
}

/// Random DAG: every edge points from a lower to a higher id
pub fn random_dag(node_count: usize, edge_count: usize, seed: u64) -> Vec<Edge> {
    let mut rng = GraphRng::new(seed);
    let mut edges = Vec::with_capacity(edge_count);
    if node_count < 2 {
        return edges;
    }

    while edges.len() < edge_count {
        let a = rng.below(node_count);
        let b = rng.below(node_count);
        if a != b {
            edges.push(Edge::new(a.min(b), a.max(b)));
        }
    }
    edges
}

/// Random DAG plus one edge closing a cycle at the end of the id range
pub fn dag_with_back_edge(node_count: usize, edge_count: usize, seed: u64) -> Vec<Edge> {
    let mut edges = chain(node_count);
    edges.extend(random_dag(node_count, edge_count, seed));
    if node_count > 1 {
        edges.push(Edge::new(node_count - 1, node_count / 2));
    }
    edges
}

/// Random weighted digraph with weights in [1, max_weight]
pub fn random_network(
    node_count: usize,
    edge_count: usize,
    max_weight: Weight,
    seed: u64,
) -> Vec<WeightedEdge> {
    let mut rng = GraphRng::new(seed);
    (0..edge_count)
        .map(|_| {
            let from: NodeId = rng.below(node_count);
            let to: NodeId = rng.below(node_count);
            WeightedEdge::new(from, to, 1 + rng.next_u64() % max_weight)
        })
        .collect()
}

/// Square grid with right and down edges, a dense shortest-path workload
pub fn grid(side: usize, seed: u64) -> Vec<WeightedEdge> {
    let mut rng = GraphRng::new(seed);
    let mut edges = Vec::with_capacity(2 * side * side);
    for row in 0..side {
        for col in 0..side {
            let node = row * side + col;
            if col + 1 < side {
                edges.push(WeightedEdge::new(node, node + 1, 1 + rng.next_u64() % 9));
            }
            if row + 1 < side {
                edges.push(WeightedEdge::new(node, node + side, 1 + rng.next_u64() % 9));
            }
        }
    }
    edges
}
