//! Edge types.
//!
//! Defines directed edges between integer-labeled nodes, with and without weights.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{NodeId, Weight};

/// Directed dependency edge: `from` must come before `to`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// Prerequisite node
    pub from: NodeId,
    /// Dependent node
    pub to: NodeId,
}

/// Directed edge carrying a non-negative traversal cost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WeightedEdge {
    /// Source node
    pub from: NodeId,
    /// Target node
    pub to: NodeId,
    /// Cost of traversing the edge
    pub weight: Weight,
}

impl Edge {
    /// Create a new dependency edge
    pub fn new(from: NodeId, to: NodeId) -> Self {
        Self { from, to }
    }

    /// Check if this edge points back at its own source
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

impl WeightedEdge {
    /// Create a new weighted edge
    pub fn new(from: NodeId, to: NodeId, weight: Weight) -> Self {
        Self { from, to, weight }
    }

    /// Drop the weight, keeping only the direction
    pub fn unweighted(&self) -> Edge {
        Edge::new(self.from, self.to)
    }
}

impl From<(NodeId, NodeId)> for Edge {
    fn from((from, to): (NodeId, NodeId)) -> Self {
        Self::new(from, to)
    }
}

impl From<(NodeId, NodeId, Weight)> for WeightedEdge {
    fn from((from, to, weight): (NodeId, NodeId, Weight)) -> Self {
        Self::new(from, to, weight)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

impl fmt::Display for WeightedEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} ({})", self.from, self.to, self.weight)
    }
}
