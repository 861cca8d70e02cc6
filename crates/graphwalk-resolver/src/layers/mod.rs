//! Layered scheduling of a dependency graph
//!
//! Groups nodes into waves using Kahn's algorithm: every node lands in the
//! first layer after all of its prerequisites. Nodes in one layer have no
//! dependencies on each other and can be processed together.

use tracing::debug;

use graphwalk_core::NodeId;

use crate::graph::{CycleError, DependencyResolver};

impl DependencyResolver {
    /// Split the graph into dependency layers.
    ///
    /// Layer 0 holds nodes without prerequisites; each later layer holds nodes
    /// whose prerequisites all sit in earlier layers. Nodes inside a layer are
    /// ascending. A cyclic graph yields the same error as [`Self::resolve`].
    pub fn layers(&self) -> Result<Vec<Vec<NodeId>>, CycleError> {
        let adjacency = self.adjacency();
        let mut in_degree = adjacency.in_degrees();

        let mut current: Vec<NodeId> = adjacency
            .nodes()
            .filter(|&node| in_degree[node] == 0)
            .collect();
        let mut layers = Vec::new();
        let mut placed = 0;

        while !current.is_empty() {
            let mut next = Vec::new();
            for &node in &current {
                for &target in adjacency.neighbors(node) {
                    in_degree[target] -= 1;
                    if in_degree[target] == 0 {
                        next.push(target);
                    }
                }
            }
            next.sort_unstable();

            placed += current.len();
            layers.push(current);
            current = next;
        }

        if placed < adjacency.node_count() {
            // Leftover nodes sit on or behind a cycle; let the DFS name one
            return match self.resolve() {
                Err(err) => Err(err),
                Ok(_) => unreachable!("Kahn layering and DFS disagree on acyclicity"),
            };
        }

        debug!(layers = layers.len(), nodes = placed, "dependency layers built");
        Ok(layers)
    }
}
