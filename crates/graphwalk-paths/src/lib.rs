//! Shortest-path engine for graphwalk
//!
//! Computes minimum cumulative edge weight from one source to every node of a
//! weighted directed graph with Dijkstra's algorithm. Unreachable nodes are a
//! regular outcome encoded per node; only the "every node reached" query
//! reports them as an error.

pub mod dijkstra;
pub mod distance;

// Re-export main types
pub use dijkstra::{max_propagation_time, shortest_paths, ShortestPathEngine};
pub use distance::DistanceMap;
