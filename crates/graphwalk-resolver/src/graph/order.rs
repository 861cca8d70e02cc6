//! Topological order result type

use serde::{Deserialize, Serialize};
use std::fmt;

use graphwalk_core::{Edge, NodeId};

/// Linear order of every node where each prerequisite precedes its dependents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopologicalOrder(Vec<NodeId>);

impl TopologicalOrder {
    pub(crate) fn new(nodes: Vec<NodeId>) -> Self {
        Self(nodes)
    }

    pub fn as_slice(&self) -> &[NodeId] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<NodeId> {
        self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NodeId> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Position of `node` in the order, if present
    pub fn position(&self, node: NodeId) -> Option<usize> {
        self.0.iter().position(|&n| n == node)
    }

    /// Check that every edge points from an earlier to a later node
    pub fn respects(&self, edges: &[Edge]) -> bool {
        let mut rank = vec![usize::MAX; self.0.iter().max().map_or(0, |&max| max + 1)];
        for (index, &node) in self.0.iter().enumerate() {
            rank[node] = index;
        }

        edges.iter().all(|edge| {
            let from = rank.get(edge.from).copied().unwrap_or(usize::MAX);
            let to = rank.get(edge.to).copied().unwrap_or(usize::MAX);
            from != usize::MAX && to != usize::MAX && from < to
        })
    }
}

impl IntoIterator for TopologicalOrder {
    type Item = NodeId;
    type IntoIter = std::vec::IntoIter<NodeId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a TopologicalOrder {
    type Item = &'a NodeId;
    type IntoIter = std::slice::Iter<'a, NodeId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for TopologicalOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nodes: Vec<String> = self.0.iter().map(|node| node.to_string()).collect();
        write!(f, "[{}]", nodes.join(", "))
    }
}
