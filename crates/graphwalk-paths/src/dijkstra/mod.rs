//! Dijkstra's algorithm over non-negative edge weights
//!
//! The frontier is a plain binary heap that may hold several entries per node.
//! Stale entries are discarded when popped by checking the finalized set, so
//! no decrease-key operation is needed.

use tracing::{debug, trace};

use graphwalk_core::error::{GraphError, GraphResult};
use graphwalk_core::{Adjacency, NodeId, Weight, WeightedEdge};

use crate::distance::DistanceMap;

mod frontier;

use frontier::Frontier;

/// Shortest-path engine over a validated weighted graph
#[derive(Debug, Clone)]
pub struct ShortestPathEngine {
    adjacency: Adjacency<(NodeId, Weight)>,
}

impl ShortestPathEngine {
    /// Build the adjacency list, rejecting endpoints outside `[0, node_count)`
    pub fn new(node_count: usize, edges: &[WeightedEdge]) -> GraphResult<Self> {
        let adjacency = Adjacency::from_weighted_edges(node_count, edges)?;
        Ok(Self { adjacency })
    }

    /// Get number of nodes in the graph
    pub fn node_count(&self) -> usize {
        self.adjacency.node_count()
    }

    /// Minimum distance from `source` to every node
    pub fn shortest_paths(&self, source: NodeId) -> GraphResult<DistanceMap> {
        let node_count = self.adjacency.node_count();
        if !self.adjacency.contains(source) {
            return Err(GraphError::UnknownNode {
                node: source,
                node_count,
            });
        }

        debug!(
            source,
            nodes = node_count,
            edges = self.adjacency.edge_count(),
            "computing shortest paths"
        );

        let mut tentative: Vec<Option<Weight>> = vec![None; node_count];
        let mut predecessors: Vec<Option<NodeId>> = vec![None; node_count];
        let mut finalized = vec![false; node_count];
        let mut settle_order = Vec::with_capacity(node_count);
        let mut frontier = Frontier::with_capacity(node_count);
        let mut stale_pops = 0usize;

        tentative[source] = Some(0);
        frontier.push(0, source);

        while let Some((distance, node)) = frontier.pop() {
            if finalized[node] {
                stale_pops += 1;
                continue;
            }
            finalized[node] = true;
            settle_order.push(node);
            trace!(node, distance, "finalized");

            for &(neighbor, weight) in self.adjacency.neighbors(node) {
                if finalized[neighbor] {
                    continue;
                }
                // A path whose cost overflows can never be the shortest one
                let Some(candidate) = distance.checked_add(weight) else {
                    continue;
                };
                if tentative[neighbor].map_or(true, |current| candidate < current) {
                    tentative[neighbor] = Some(candidate);
                    predecessors[neighbor] = Some(node);
                    frontier.push(candidate, neighbor);
                }
            }
        }

        debug!(
            settled = settle_order.len(),
            stale_pops,
            "shortest paths computed"
        );

        Ok(DistanceMap::new(
            source,
            tentative,
            predecessors,
            settle_order,
        ))
    }

    /// Time for a signal from `source` to reach every node.
    ///
    /// Fails with `NotAllReachable` listing the nodes that are never reached.
    pub fn max_propagation_time(&self, source: NodeId) -> GraphResult<Weight> {
        let distances = self.shortest_paths(source)?;
        distances
            .max_propagation_time()
            .ok_or_else(|| GraphError::NotAllReachable {
                unreachable: distances.unreachable(),
            })
    }

    /// Cost and node sequence of one shortest path, `None` if unreachable
    pub fn shortest_path(
        &self,
        source: NodeId,
        target: NodeId,
    ) -> GraphResult<Option<(Weight, Vec<NodeId>)>> {
        if !self.adjacency.contains(target) {
            return Err(GraphError::UnknownNode {
                node: target,
                node_count: self.adjacency.node_count(),
            });
        }
        let distances = self.shortest_paths(source)?;
        Ok(distances
            .distance(target)
            .zip(distances.path_to(target)))
    }
}

/// Minimum distance from `source` to every node of the graph
pub fn shortest_paths(
    node_count: usize,
    edges: &[WeightedEdge],
    source: NodeId,
) -> GraphResult<DistanceMap> {
    ShortestPathEngine::new(node_count, edges)?.shortest_paths(source)
}

/// Largest shortest distance from `source`, or `NotAllReachable`
pub fn max_propagation_time(
    node_count: usize,
    edges: &[WeightedEdge],
    source: NodeId,
) -> GraphResult<Weight> {
    ShortestPathEngine::new(node_count, edges)?.max_propagation_time(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edges(triples: &[(NodeId, NodeId, Weight)]) -> Vec<WeightedEdge> {
        triples.iter().copied().map(WeightedEdge::from).collect()
    }

    #[test]
    fn test_network_delay_example() {
        // Nodes are 1-based here; node 0 stays isolated
        let map = shortest_paths(5, &edges(&[(2, 1, 1), (2, 3, 1), (3, 4, 1)]), 2).unwrap();

        assert_eq!(map.distance(2), Some(0));
        assert_eq!(map.distance(1), Some(1));
        assert_eq!(map.distance(3), Some(1));
        assert_eq!(map.distance(4), Some(2));
        assert_eq!(map.distance(0), None);
    }

    #[test]
    fn test_not_all_reachable() {
        let result = max_propagation_time(3, &edges(&[(1, 2, 1)]), 2);
        match result {
            Err(GraphError::NotAllReachable { unreachable }) => assert_eq!(unreachable, vec![0, 1]),
            other => panic!("expected NotAllReachable, got {:?}", other),
        }
    }

    #[test]
    fn test_single_isolated_node() {
        let map = shortest_paths(1, &[], 0).unwrap();
        assert_eq!(map.iter().collect::<Vec<_>>(), vec![(0, Some(0))]);
        assert_eq!(max_propagation_time(1, &[], 0).unwrap(), 0);
    }

    #[test]
    fn test_max_propagation_time() {
        let input = edges(&[(0, 1, 4), (0, 2, 1), (2, 1, 2), (1, 3, 1)]);
        assert_eq!(max_propagation_time(4, &input, 0).unwrap(), 4);
    }

    #[test]
    fn test_longer_path_with_lower_cost_wins() {
        let input = edges(&[(0, 3, 10), (0, 1, 1), (1, 2, 1), (2, 3, 1)]);
        let map = shortest_paths(4, &input, 0).unwrap();

        assert_eq!(map.distance(3), Some(3));
        assert_eq!(map.path_to(3), Some(vec![0, 1, 2, 3]));
    }

    #[test]
    fn test_zero_weight_edges() {
        let input = edges(&[(0, 1, 0), (1, 2, 0), (2, 0, 0)]);
        let map = shortest_paths(3, &input, 1).unwrap();
        assert_eq!(map.reachable().map(|(_, d)| d).collect::<Vec<_>>(), vec![0, 0, 0]);
    }

    #[test]
    fn test_parallel_edges_pick_cheapest() {
        let map = shortest_paths(2, &edges(&[(0, 1, 9), (0, 1, 2), (0, 1, 5)]), 0).unwrap();
        assert_eq!(map.distance(1), Some(2));
    }

    #[test]
    fn test_self_loop_ignored() {
        let map = shortest_paths(2, &edges(&[(0, 0, 1), (0, 1, 3)]), 0).unwrap();
        assert_eq!(map.distance(0), Some(0));
        assert_eq!(map.distance(1), Some(3));
    }

    #[test]
    fn test_overflowing_path_is_ignored() {
        let input = edges(&[(0, 1, u64::MAX), (1, 2, 1), (0, 2, 7)]);
        let map = shortest_paths(3, &input, 0).unwrap();
        assert_eq!(map.distance(1), Some(u64::MAX));
        assert_eq!(map.distance(2), Some(7));
    }

    #[test]
    fn test_invalid_source() {
        let result = shortest_paths(2, &[], 2);
        assert!(matches!(
            result,
            Err(GraphError::UnknownNode { node: 2, node_count: 2 })
        ));
        assert!(matches!(shortest_paths(0, &[], 0), Err(GraphError::UnknownNode { .. })));
    }

    #[test]
    fn test_invalid_edge() {
        let result = shortest_paths(2, &edges(&[(0, 5, 1)]), 0);
        assert!(matches!(result, Err(GraphError::InvalidInput { node: 5, .. })));
    }

    #[test]
    fn test_settle_order_is_monotonic() {
        let input = edges(&[(0, 1, 7), (0, 2, 9), (0, 5, 14), (1, 2, 10), (1, 3, 15),
            (2, 3, 11), (2, 5, 2), (3, 4, 6), (4, 5, 9)]);
        let map = shortest_paths(6, &input, 0).unwrap();

        assert_eq!(map.settle_order(), &[0, 1, 2, 5, 3, 4]);
        assert_eq!(map.distance(4), Some(26));
        assert_eq!(map.distance(5), Some(11));
    }

    #[test]
    fn test_shortest_path_query() {
        let engine = ShortestPathEngine::new(3, &edges(&[(0, 1, 2), (1, 2, 2)])).unwrap();

        assert_eq!(engine.shortest_path(0, 2).unwrap(), Some((4, vec![0, 1, 2])));
        assert_eq!(engine.shortest_path(2, 0).unwrap(), None);
        assert!(engine.shortest_path(0, 3).is_err());
        assert_eq!(engine.node_count(), 3);
    }
}
