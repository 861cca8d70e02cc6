//! Core data types for graphwalk.
//!
//! Nodes are plain integer ids in `[0, n)`. Edges come in two flavours:
//! unweighted dependency edges and weighted propagation edges.

pub mod edge;

// Re-export all public types
pub use edge::{Edge, WeightedEdge};

/// Node identifier, always in `[0, node_count)` for a given graph
pub type NodeId = usize;

/// Edge weight. Unsigned, so negative weights cannot be expressed.
pub type Weight = u64;
