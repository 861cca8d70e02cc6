//! Graph file schema and TOML parsing

use camino::Utf8Path;
use serde::{Deserialize, Serialize};
use std::fmt;

use graphwalk_core::error::GraphError;
use graphwalk_core::{NodeId, Weight};

use crate::ConfigResult;

/// Weight given to edges that do not specify one
pub const DEFAULT_WEIGHT: Weight = 1;

/// Largest node count a graph file may declare or imply
pub const MAX_NODES: usize = 10_000_000;

/// Complete graph description file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphFile {
    /// Graph metadata section
    #[serde(default)]
    pub graph: GraphSection,

    /// Directed edges
    #[serde(default)]
    pub edges: Vec<EdgeSpec>,
}

/// Graph metadata section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSection {
    /// Human readable graph name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Node count; inferred from labels or edges when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nodes: Option<usize>,

    /// Node labels, label `i` names node `i`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,

    /// Default source for shortest-path queries
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<NodeRef>,
}

/// Node reference (numeric id or label)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeRef {
    /// Numeric node id
    Index(NodeId),
    /// Label from `[graph].labels`
    Label(String),
}

/// Edge entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeSpec {
    /// Prerequisite / source endpoint
    pub from: NodeRef,

    /// Dependent / target endpoint
    pub to: NodeRef,

    /// Traversal cost, defaults to [`DEFAULT_WEIGHT`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<Weight>,
}

impl EdgeSpec {
    /// Create an edge entry
    pub fn new(from: NodeRef, to: NodeRef, weight: Option<Weight>) -> Self {
        Self { from, to, weight }
    }

    /// Weight with the default applied
    pub fn weight_or_default(&self) -> Weight {
        self.weight.unwrap_or(DEFAULT_WEIGHT)
    }
}

impl From<NodeId> for NodeRef {
    fn from(index: NodeId) -> Self {
        NodeRef::Index(index)
    }
}

impl From<&str> for NodeRef {
    fn from(label: &str) -> Self {
        NodeRef::Label(label.to_string())
    }
}

impl std::str::FromStr for NodeRef {
    type Err = std::convert::Infallible;

    /// Digits parse as an index, anything else as a label
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.parse::<NodeId>() {
            Ok(index) => NodeRef::Index(index),
            Err(_) => NodeRef::Label(s.to_string()),
        })
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeRef::Index(index) => write!(f, "{}", index),
            NodeRef::Label(label) => write!(f, "'{}'", label),
        }
    }
}

/// Parse TOML string to a graph file
pub fn parse_graph_toml(content: &str) -> ConfigResult<GraphFile> {
    let graph: GraphFile = ::toml::from_str(content).map_err(|e| {
        let (line, column) = e
            .span()
            .map(|span| line_column(content, span.start))
            .unwrap_or((0, 0));
        GraphError::TomlParse {
            message: e.message().to_string(),
            line,
            column,
        }
    })?;

    validate_graph(&graph)?;

    Ok(graph)
}

/// Serialize a graph file to a TOML string
pub fn serialize_graph_toml(graph: &GraphFile) -> ConfigResult<String> {
    ::toml::to_string_pretty(graph).map_err(|e| GraphError::serialization("graph TOML", e))
}

/// Structural checks that do not need label resolution
pub fn validate_graph(graph: &GraphFile) -> ConfigResult<()> {
    if let Some(name) = &graph.graph.name {
        if name.trim().is_empty() {
            return Err(GraphError::config("graph.name", "Graph name must not be blank"));
        }
    }

    if let Some(nodes) = graph.graph.nodes {
        if nodes > MAX_NODES {
            return Err(GraphError::config(
                "graph.nodes",
                format!("{} nodes requested; at most {} are supported", nodes, MAX_NODES),
            ));
        }
        if !graph.graph.labels.is_empty() && graph.graph.labels.len() != nodes {
            return Err(GraphError::config(
                "graph.labels",
                format!(
                    "{} labels given for {} nodes; give one label per node",
                    graph.graph.labels.len(),
                    nodes
                ),
            ));
        }
    }

    if graph.graph.labels.len() > MAX_NODES {
        return Err(GraphError::config(
            "graph.labels",
            format!(
                "{} labels given; at most {} nodes are supported",
                graph.graph.labels.len(),
                MAX_NODES
            ),
        ));
    }

    for (index, label) in graph.graph.labels.iter().enumerate() {
        if label.is_empty() {
            return Err(GraphError::config(
                format!("graph.labels[{}]", index),
                "Labels must not be empty",
            ));
        }
        if label.parse::<NodeId>().is_ok() {
            return Err(GraphError::config(
                format!("graph.labels[{}]", index),
                format!("Label '{}' is numeric and would be read as a node id", label),
            ));
        }
    }

    // Implied node counts are bounded too, so index + 1 cannot overflow
    if let Some(source) = &graph.graph.source {
        check_index(source, "graph.source")?;
    }
    for (index, edge) in graph.edges.iter().enumerate() {
        check_index(&edge.from, &format!("edges[{}].from", index))?;
        check_index(&edge.to, &format!("edges[{}].to", index))?;
    }

    Ok(())
}

fn check_index(node: &NodeRef, field: &str) -> ConfigResult<()> {
    match node {
        NodeRef::Index(index) if *index >= MAX_NODES => Err(GraphError::config(
            field,
            format!("Node id {} is out of range; ids must be below {}", index, MAX_NODES),
        )),
        _ => Ok(()),
    }
}

/// Load and parse a TOML graph file
pub async fn load_from_file(path: &Utf8Path) -> ConfigResult<GraphFile> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| GraphError::io(format!("Failed to read {}", path), e))?;

    parse_graph_toml(&content).map_err(|e| match e {
        GraphError::ConfigValidation { field, reason } => GraphError::ConfigValidation {
            field,
            reason: format!("In file {}: {}", path, reason),
        },
        GraphError::TomlParse {
            message,
            line,
            column,
        } => GraphError::TomlParse {
            message: format!("In file {}: {}", path, message),
            line,
            column,
        },
        other => other,
    })
}

/// 1-based line and column of a byte offset
fn line_column(content: &str, offset: usize) -> (usize, usize) {
    let before = &content[..offset.min(content.len())];
    let line = before.matches('\n').count() + 1;
    let column = before
        .rfind('\n')
        .map_or(before.chars().count(), |newline| before[newline + 1..].chars().count())
        + 1;
    (line, column)
}
