//! Label resolution
//!
//! Turns a parsed [`GraphFile`] into numeric edges the engines accept.
//! Labels map to ids in declaration order.

use indexmap::IndexMap;
use tracing::debug;

use graphwalk_core::error::GraphError;
use graphwalk_core::{Edge, NodeId, WeightedEdge};

use crate::toml::{validate_graph, GraphFile, NodeRef};
use crate::ConfigResult;

/// Graph file with every node reference resolved to an id
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedGraph {
    name: Option<String>,
    labels: IndexMap<String, NodeId>,
    node_count: usize,
    edges: Vec<WeightedEdge>,
    source: Option<NodeId>,
}

impl ResolvedGraph {
    /// Graph name from the file, if any
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Weighted edges in file order
    pub fn edges(&self) -> &[WeightedEdge] {
        &self.edges
    }

    /// Edges with weights dropped, for dependency queries
    pub fn dependency_edges(&self) -> Vec<Edge> {
        self.edges.iter().map(WeightedEdge::unweighted).collect()
    }

    /// Default source declared in the file
    pub fn source(&self) -> Option<NodeId> {
        self.source
    }

    /// Display name of a node: its label, or the id when unlabelled
    pub fn label(&self, node: NodeId) -> String {
        self.labels
            .get_index(node)
            .map(|(label, _)| label.clone())
            .unwrap_or_else(|| node.to_string())
    }

    /// Resolve a node reference given on the command line
    pub fn lookup(&self, node: &NodeRef) -> ConfigResult<NodeId> {
        resolve_ref(node, &self.labels, self.node_count, "source")
    }
}

impl GraphFile {
    /// Resolve labels and infer the node count
    pub fn resolve(&self) -> ConfigResult<ResolvedGraph> {
        // Files built in code skip the parse-time checks
        validate_graph(self)?;

        let mut labels = IndexMap::with_capacity(self.graph.labels.len());
        for (index, label) in self.graph.labels.iter().enumerate() {
            if labels.insert(label.clone(), index).is_some() {
                return Err(GraphError::config(
                    format!("graph.labels[{}]", index),
                    format!("Label '{}' is declared more than once", label),
                ));
            }
        }

        let node_count = self.inferred_node_count();

        let mut edges = Vec::with_capacity(self.edges.len());
        for (index, spec) in self.edges.iter().enumerate() {
            let from = resolve_ref(&spec.from, &labels, node_count, &format!("edges[{}].from", index))?;
            let to = resolve_ref(&spec.to, &labels, node_count, &format!("edges[{}].to", index))?;

            for node in [from, to] {
                if node >= node_count {
                    return Err(GraphError::InvalidInput {
                        edge_index: index,
                        node,
                        node_count,
                    });
                }
            }

            edges.push(WeightedEdge::new(from, to, spec.weight_or_default()));
        }

        let source = match &self.graph.source {
            Some(node) => {
                let id = resolve_ref(node, &labels, node_count, "graph.source")?;
                if id >= node_count {
                    return Err(GraphError::UnknownNode { node: id, node_count });
                }
                Some(id)
            },
            None => None,
        };

        debug!(
            "Resolved graph {:?}: {} nodes, {} edges",
            self.graph.name,
            node_count,
            edges.len()
        );

        Ok(ResolvedGraph {
            name: self.graph.name.clone(),
            labels,
            node_count,
            edges,
            source,
        })
    }

    /// Explicit count, else label count, else highest referenced index + 1
    fn inferred_node_count(&self) -> usize {
        if let Some(nodes) = self.graph.nodes {
            return nodes;
        }
        if !self.graph.labels.is_empty() {
            return self.graph.labels.len();
        }

        self.edges
            .iter()
            .flat_map(|edge| [&edge.from, &edge.to])
            .chain(self.graph.source.iter())
            .filter_map(|node| match node {
                NodeRef::Index(index) => Some(index.saturating_add(1)),
                NodeRef::Label(_) => None,
            })
            .max()
            .unwrap_or(0)
    }
}

fn resolve_ref(
    node: &NodeRef,
    labels: &IndexMap<String, NodeId>,
    node_count: usize,
    field: &str,
) -> ConfigResult<NodeId> {
    match node {
        NodeRef::Index(index) => Ok(*index),
        NodeRef::Label(label) => labels.get(label).copied().ok_or_else(|| {
            let mut reason = format!("Unknown node label '{}'", label);
            if labels.is_empty() {
                reason.push_str(&format!(
                    "; declare labels in [graph] or use ids in [0, {})",
                    node_count
                ));
            } else if let Some(suggestion) = suggest_label(label, labels.keys().map(String::as_str)) {
                reason.push_str(&format!(". Did you mean '{}'?", suggestion));
            }
            GraphError::config(field, reason)
        }),
    }
}

/// Suggest the closest known label based on edit distance
pub fn suggest_label<'a>(input: &str, labels: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    let mut best_match = None;
    let mut best_distance = usize::MAX;

    for label in labels {
        let distance = edit_distance(input, label);
        if distance < best_distance && distance <= 2 {
            best_distance = distance;
            best_match = Some(label);
        }
    }

    best_match
}

/// Levenshtein distance over chars
fn edit_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    // Single rolling row
    let mut row: Vec<usize> = (0..=b_chars.len()).collect();
    for (i, a_char) in a_chars.iter().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, b_char) in b_chars.iter().enumerate() {
            let cost = usize::from(a_char != b_char);
            let substitution = diagonal + cost;
            diagonal = row[j + 1];
            row[j + 1] = (row[j + 1] + 1).min(row[j] + 1).min(substitution);
        }
    }

    row[b_chars.len()]
}
