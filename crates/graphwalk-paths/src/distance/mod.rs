//! Distance table produced by a single-source shortest-path query

use serde::Serialize;

use graphwalk_core::{NodeId, Weight};

/// Minimum distance from one source to every node of the graph.
///
/// `None` marks a node with no path from the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistanceMap {
    /// Node the distances are measured from
    source: NodeId,
    /// Final distance per node
    distances: Vec<Option<Weight>>,
    /// Previous hop on one shortest path, per node
    predecessors: Vec<Option<NodeId>>,
    /// Nodes in the order they were finalized
    settle_order: Vec<NodeId>,
}

impl DistanceMap {
    pub(crate) fn new(
        source: NodeId,
        distances: Vec<Option<Weight>>,
        predecessors: Vec<Option<NodeId>>,
        settle_order: Vec<NodeId>,
    ) -> Self {
        Self {
            source,
            distances,
            predecessors,
            settle_order,
        }
    }

    pub fn source(&self) -> NodeId {
        self.source
    }

    /// Number of nodes covered, reachable or not
    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    /// Distance to `node`, `None` when unreachable or out of range
    pub fn distance(&self, node: NodeId) -> Option<Weight> {
        self.distances.get(node).copied().flatten()
    }

    pub fn is_reachable(&self, node: NodeId) -> bool {
        self.distance(node).is_some()
    }

    /// Every node with its distance, ascending by id
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, Option<Weight>)> + '_ {
        self.distances.iter().copied().enumerate()
    }

    /// Reachable nodes with their distances, ascending by id
    pub fn reachable(&self) -> impl Iterator<Item = (NodeId, Weight)> + '_ {
        self.iter()
            .filter_map(|(node, distance)| distance.map(|d| (node, d)))
    }

    /// Nodes with no path from the source, ascending
    pub fn unreachable(&self) -> Vec<NodeId> {
        self.iter()
            .filter(|(_, distance)| distance.is_none())
            .map(|(node, _)| node)
            .collect()
    }

    /// Time for a signal from the source to reach every node.
    ///
    /// `None` when at least one node is unreachable.
    pub fn max_propagation_time(&self) -> Option<Weight> {
        self.distances
            .iter()
            .try_fold(0, |max, distance| distance.map(|d| max.max(d)))
    }

    /// Nodes in the order their distances became final.
    ///
    /// Distances along this sequence never decrease.
    pub fn settle_order(&self) -> &[NodeId] {
        &self.settle_order
    }

    /// One shortest path from the source to `target`, both ends included.
    ///
    /// `None` when the target is unreachable or the predecessor chain does
    /// not lead back to the source.
    pub fn path_to(&self, target: NodeId) -> Option<Vec<NodeId>> {
        self.distance(target)?;

        let mut path = vec![target];
        let mut current = target;
        // A simple path has at most len() nodes
        while current != self.source && path.len() <= self.len() {
            current = self.predecessors.get(current).copied().flatten()?;
            path.push(current);
        }
        if current != self.source {
            return None;
        }
        path.reverse();
        Some(path)
    }
}
