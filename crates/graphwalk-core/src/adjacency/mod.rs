//! Adjacency list representation shared by both engines.
//!
//! Each node owns an ordered list of its outgoing entries, kept in the order
//! the edges were supplied. Construction validates every endpoint and runs in
//! O(V + E). The structure is immutable once built.

use std::ops::Range;

use crate::error::{GraphError, GraphResult};
use crate::types::{Edge, NodeId, Weight, WeightedEdge};

/// Per-node outgoing edge lists, indexed by node id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adjacency<T> {
    /// Outgoing entries for every node in `[0, node_count)`
    lists: Vec<Vec<T>>,
    /// Total number of edges across all lists
    edge_count: usize,
}

impl<T> Adjacency<T> {
    /// Build from raw `(from, to)` endpoints and a per-edge entry constructor
    fn build<I>(node_count: usize, edges: I) -> GraphResult<Self>
    where
        I: IntoIterator<Item = (NodeId, NodeId, T)>,
    {
        let mut lists: Vec<Vec<T>> = (0..node_count).map(|_| Vec::new()).collect();
        let mut edge_count = 0;

        for (edge_index, (from, to, entry)) in edges.into_iter().enumerate() {
            for node in [from, to] {
                if node >= node_count {
                    return Err(GraphError::InvalidInput {
                        edge_index,
                        node,
                        node_count,
                    });
                }
            }
            lists[from].push(entry);
            edge_count += 1;
        }

        Ok(Self { lists, edge_count })
    }

    /// Get number of nodes in the graph
    pub fn node_count(&self) -> usize {
        self.lists.len()
    }

    /// Get number of edges in the graph
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Check if a node id belongs to this graph
    pub fn contains(&self, node: NodeId) -> bool {
        node < self.lists.len()
    }

    /// All node ids, ascending
    pub fn nodes(&self) -> Range<NodeId> {
        0..self.lists.len()
    }

    /// Outgoing entries of `node`, in supplied order.
    ///
    /// Returns an empty slice for ids outside the graph.
    pub fn neighbors(&self, node: NodeId) -> &[T] {
        self.lists.get(node).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl Adjacency<NodeId> {
    /// Build a dependency adjacency list from unweighted edges
    pub fn from_edges(node_count: usize, edges: &[Edge]) -> GraphResult<Self> {
        Self::build(
            node_count,
            edges.iter().map(|edge| (edge.from, edge.to, edge.to)),
        )
    }

    /// Number of incoming edges for every node, duplicates counted
    pub fn in_degrees(&self) -> Vec<usize> {
        let mut degrees = vec![0; self.node_count()];
        for targets in &self.lists {
            for &target in targets {
                degrees[target] += 1;
            }
        }
        degrees
    }
}

impl Adjacency<(NodeId, Weight)> {
    /// Build a weighted adjacency list
    pub fn from_weighted_edges(node_count: usize, edges: &[WeightedEdge]) -> GraphResult<Self> {
        Self::build(
            node_count,
            edges
                .iter()
                .map(|edge| (edge.from, edge.to, (edge.to, edge.weight))),
        )
    }
}
