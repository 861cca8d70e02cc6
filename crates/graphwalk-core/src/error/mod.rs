//! Error types and result aliases for graphwalk operations.
//!
//! Provides a unified error type that covers every failure the engines and
//! their file loaders can report, with actionable error messages.

use thiserror::Error;

use crate::types::NodeId;

/// Unified error type for all graphwalk operations
#[derive(Error, Debug)]
pub enum GraphError {
    // Construction errors
    #[error(
        "Edge #{edge_index} references node {node}, but the graph only has {node_count} nodes"
    )]
    InvalidInput {
        edge_index: usize,
        node: NodeId,
        node_count: usize,
    },

    #[error("Node {node} is out of range for a graph with {node_count} nodes")]
    UnknownNode { node: NodeId, node_count: usize },

    // Resolution errors
    #[error("Circular dependency detected: {}", format_cycle(.cycle))]
    CycleDetected { cycle: Vec<NodeId> },

    #[error("Not all nodes are reachable from the source: {} unreachable ({})", .unreachable.len(), format_nodes(.unreachable))]
    NotAllReachable { unreachable: Vec<NodeId> },

    // Graph file errors
    #[error("Failed to parse graph TOML: {message} at line {line}, column {column}")]
    TomlParse {
        message: String,
        line: usize,
        column: usize,
    },

    #[error("Failed to parse graph JSON: {message}")]
    JsonParse { message: String },

    #[error("Failed to serialize {what}: {message}")]
    Serialization { what: &'static str, message: String },

    #[error("Configuration field '{field}' is invalid: {reason}")]
    ConfigValidation { field: String, reason: String },

    // IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for graphwalk operations
pub type GraphResult<T> = Result<T, GraphError>;

impl GraphError {
    /// Create an IO error from std::io::Error
    pub fn io(message: String, source: std::io::Error) -> Self {
        Self::Io { message, source }
    }

    /// Create a configuration validation error
    pub fn config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a serialization error for the named document
    pub fn serialization(what: &'static str, error: impl std::fmt::Display) -> Self {
        Self::Serialization {
            what,
            message: error.to_string(),
        }
    }

    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        matches!(self, GraphError::Io { .. })
    }

    /// Get a user-friendly suggestion for fixing this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            GraphError::InvalidInput { .. } => {
                Some("Node ids must lie in [0, nodes); raise the node count or fix the edge")
            },
            GraphError::UnknownNode { .. } => {
                Some("Pick a source or target node that exists in the graph")
            },
            GraphError::CycleDetected { .. } => {
                Some("Remove one edge of the reported cycle so the dependencies can be ordered")
            },
            GraphError::NotAllReachable { .. } => {
                Some("Add edges from the source to the unreachable nodes or choose another source")
            },
            GraphError::TomlParse { .. } | GraphError::JsonParse { .. } => {
                Some("Check the graph file syntax against the documented schema")
            },
            _ => None,
        }
    }
}

/// Format a closed cycle path as "a -> b -> a"
pub fn format_cycle(cycle: &[NodeId]) -> String {
    if cycle.is_empty() {
        return "no cycle".to_string();
    }

    cycle
        .iter()
        .map(|node| node.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

fn format_nodes(nodes: &[NodeId]) -> String {
    nodes
        .iter()
        .map(|node| node.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_message() {
        let err = GraphError::CycleDetected { cycle: vec![0, 1, 0] };
        assert_eq!(err.to_string(), "Circular dependency detected: 0 -> 1 -> 0");
        assert!(err.suggestion().is_some());
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_invalid_input_message() {
        let err = GraphError::InvalidInput {
            edge_index: 2,
            node: 9,
            node_count: 4,
        };
        assert!(err.to_string().contains("references node 9"));
        assert!(err.to_string().contains("4 nodes"));
    }

    #[test]
    fn test_not_all_reachable_message() {
        let err = GraphError::NotAllReachable {
            unreachable: vec![0, 1],
        };
        assert!(err.to_string().contains("2 unreachable (0, 1)"));
    }

    #[test]
    fn test_io_is_recoverable() {
        let err = GraphError::io(
            "Failed to read graph.toml".to_string(),
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert!(err.is_recoverable());
        assert!(err.suggestion().is_none());
    }

    #[test]
    fn test_serialization_message() {
        let err = GraphError::serialization("output", "key must be a string");
        assert_eq!(err.to_string(), "Failed to serialize output: key must be a string");
        assert!(!err.to_string().contains("parse"));
        assert!(err.suggestion().is_none());
    }

    #[test]
    fn test_format_cycle_empty() {
        assert_eq!(format_cycle(&[]), "no cycle");
        assert_eq!(format_cycle(&[3, 3]), "3 -> 3");
    }
}
