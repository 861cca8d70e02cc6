//! Dependency graph ordering with three-color depth-first search
//!
//! The search keeps one `VisitState` per node in a flat array indexed by node
//! id and drives the traversal from an explicit stack of frames, so deep
//! dependency chains never touch the call stack.

use std::iter;

use tracing::{debug, trace};

use graphwalk_core::error::{format_cycle, GraphError, GraphResult};
use graphwalk_core::{Adjacency, Edge, NodeId};

mod order;

pub use order::TopologicalOrder;

/// Visitation tag of a node during the search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum VisitState {
    /// Not reached yet
    Unvisited,
    /// On the current exploration path
    InProgress,
    /// Fully explored; never leaves this state
    Done,
}

/// One level of the explicit DFS stack
#[derive(Debug, Clone, Copy)]
struct Frame {
    node: NodeId,
    /// Index of the next outgoing edge of `node` to explore
    next_edge: usize,
}

/// The dependency graph contains a cycle, so no ordering exists
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Circular dependency detected: {}", format_cycle(.cycle))]
pub struct CycleError {
    /// One offending cycle, closed: first and last entries are the same node
    pub cycle: Vec<NodeId>,
}

impl CycleError {
    /// Node where the cycle was closed
    pub fn node(&self) -> Option<NodeId> {
        self.cycle.first().copied()
    }
}

impl From<CycleError> for GraphError {
    fn from(err: CycleError) -> Self {
        GraphError::CycleDetected { cycle: err.cycle }
    }
}

/// Resolver over a validated dependency graph.
///
/// Edges run from prerequisite to dependent.
#[derive(Debug, Clone)]
pub struct DependencyResolver {
    adjacency: Adjacency<NodeId>,
}

impl DependencyResolver {
    /// Build the adjacency list, rejecting endpoints outside `[0, node_count)`
    pub fn new(node_count: usize, edges: &[Edge]) -> GraphResult<Self> {
        let adjacency = Adjacency::from_edges(node_count, edges)?;
        Ok(Self { adjacency })
    }

    /// Get number of nodes in the graph
    pub fn node_count(&self) -> usize {
        self.adjacency.node_count()
    }

    /// Get number of dependency edges in the graph
    pub fn edge_count(&self) -> usize {
        self.adjacency.edge_count()
    }

    pub(crate) fn adjacency(&self) -> &Adjacency<NodeId> {
        &self.adjacency
    }

    /// Produce an ordering where every prerequisite precedes its dependents.
    ///
    /// Roots are tried in ascending id and each node's edges in supplied
    /// order, so the result is deterministic for a fixed edge list.
    pub fn resolve(&self) -> Result<TopologicalOrder, CycleError> {
        let node_count = self.adjacency.node_count();
        debug!(
            nodes = node_count,
            edges = self.adjacency.edge_count(),
            "resolving dependency order"
        );

        let mut state = vec![VisitState::Unvisited; node_count];
        let mut finished = Vec::with_capacity(node_count);
        let mut stack: Vec<Frame> = Vec::new();

        for root in self.adjacency.nodes() {
            if state[root] != VisitState::Unvisited {
                continue;
            }

            state[root] = VisitState::InProgress;
            stack.push(Frame {
                node: root,
                next_edge: 0,
            });

            while let Some(frame) = stack.last_mut() {
                let node = frame.node;
                let Some(&target) = self.adjacency.neighbors(node).get(frame.next_edge) else {
                    state[node] = VisitState::Done;
                    finished.push(node);
                    stack.pop();
                    trace!(node, "finished");
                    continue;
                };
                frame.next_edge += 1;

                match state[target] {
                    VisitState::InProgress => {
                        let cycle = cycle_path(&stack, target);
                        debug!(cycle = %format_cycle(&cycle), "dependency cycle found");
                        return Err(CycleError { cycle });
                    },
                    VisitState::Unvisited => {
                        state[target] = VisitState::InProgress;
                        stack.push(Frame {
                            node: target,
                            next_edge: 0,
                        });
                    },
                    VisitState::Done => {},
                }
            }
        }

        // Post-order finish sequence reversed is a topological order
        finished.reverse();
        Ok(TopologicalOrder::new(finished))
    }

    /// Check whether the graph contains any cycle
    pub fn has_cycle(&self) -> bool {
        self.resolve().is_err()
    }
}

/// Cycle closed by an edge back to `target`, read off the current DFS path
fn cycle_path(stack: &[Frame], target: NodeId) -> Vec<NodeId> {
    stack
        .iter()
        .map(|frame| frame.node)
        .skip_while(|&node| node != target)
        .chain(iter::once(target))
        .collect()
}

/// Resolve a dependency ordering for `node_count` nodes.
///
/// Fails with `InvalidInput` on out-of-range endpoints and `CycleDetected`
/// when no ordering exists.
pub fn resolve(node_count: usize, edges: &[Edge]) -> GraphResult<TopologicalOrder> {
    let resolver = DependencyResolver::new(node_count, edges)?;
    Ok(resolver.resolve()?)
}

/// Check whether the dependencies can all be satisfied
pub fn has_cycle(node_count: usize, edges: &[Edge]) -> GraphResult<bool> {
    Ok(DependencyResolver::new(node_count, edges)?.has_cycle())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edges(pairs: &[(NodeId, NodeId)]) -> Vec<Edge> {
        pairs.iter().copied().map(Edge::from).collect()
    }

    #[test]
    fn test_single_edge() {
        let order = resolve(2, &edges(&[(0, 1)])).unwrap();
        assert_eq!(order.as_slice(), &[0, 1]);
    }

    #[test]
    fn test_two_node_cycle() {
        let result = resolve(2, &edges(&[(0, 1), (1, 0)]));
        match result {
            Err(GraphError::CycleDetected { cycle }) => assert_eq!(cycle, vec![0, 1, 0]),
            other => panic!("expected cycle, got {:?}", other),
        }
    }

    #[test]
    fn test_diamond() {
        let input = edges(&[(0, 1), (0, 2), (1, 3), (2, 3)]);
        let order = resolve(4, &input).unwrap();

        assert_eq!(order.len(), 4);
        assert_eq!(order.as_slice().first(), Some(&0));
        assert_eq!(order.as_slice().last(), Some(&3));
        assert!(order.respects(&input));
    }

    #[test]
    fn test_self_loop_is_cycle() {
        let resolver = DependencyResolver::new(3, &edges(&[(0, 1), (2, 2)])).unwrap();
        let err = resolver.resolve().unwrap_err();

        assert_eq!(err.cycle, vec![2, 2]);
        assert_eq!(err.node(), Some(2));
        assert_eq!(err.to_string(), "Circular dependency detected: 2 -> 2");
    }

    #[test]
    fn test_cycle_path_excludes_lead_in() {
        // 0 -> 1 -> 2 -> 3 -> 1
        let err = DependencyResolver::new(4, &edges(&[(0, 1), (1, 2), (2, 3), (3, 1)]))
            .unwrap()
            .resolve()
            .unwrap_err();
        assert_eq!(err.cycle, vec![1, 2, 3, 1]);
    }

    #[test]
    fn test_empty_graph() {
        let order = resolve(0, &[]).unwrap();
        assert!(order.is_empty());
    }

    #[test]
    fn test_disconnected_nodes_all_present() {
        let order = resolve(5, &edges(&[(3, 1)])).unwrap();
        assert_eq!(order.len(), 5);
        assert!(order.position(3) < order.position(1));
    }

    #[test]
    fn test_duplicate_edges() {
        let input = edges(&[(0, 1), (0, 1), (1, 2), (0, 1)]);
        let order = resolve(3, &input).unwrap();
        assert_eq!(order.as_slice(), &[0, 1, 2]);
    }

    #[test]
    fn test_deterministic_output() {
        let input = edges(&[(4, 0), (2, 0), (1, 3), (2, 3)]);
        let first = resolve(5, &input).unwrap();
        let second = resolve(5, &input).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_endpoint() {
        let result = resolve(2, &edges(&[(0, 2)]));
        assert!(matches!(result, Err(GraphError::InvalidInput { node: 2, .. })));
    }

    #[test]
    fn test_deep_chain_does_not_overflow() {
        let node_count = 200_000;
        let chain: Vec<Edge> = (0..node_count - 1).map(|n| Edge::new(n, n + 1)).collect();
        let order = resolve(node_count, &chain).unwrap();

        assert_eq!(order.len(), node_count);
        assert!(order.iter().copied().eq(0..node_count));
    }

    #[test]
    fn test_has_cycle() {
        assert!(!has_cycle(3, &edges(&[(0, 1), (1, 2)])).unwrap());
        assert!(has_cycle(3, &edges(&[(0, 1), (1, 2), (2, 0)])).unwrap());
        assert!(has_cycle(1, &edges(&[(0, 0)])).unwrap());
    }

    #[test]
    fn test_counts() {
        let resolver = DependencyResolver::new(3, &edges(&[(0, 1), (1, 2)])).unwrap();
        assert_eq!(resolver.node_count(), 3);
        assert_eq!(resolver.edge_count(), 2);
        assert!(!resolver.has_cycle());
    }
}
