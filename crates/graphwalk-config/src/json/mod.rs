//! JSON graph files
//!
//! Same schema as the TOML form, for graphs produced by other tools.

use camino::Utf8Path;

use graphwalk_core::error::GraphError;

use crate::toml::{validate_graph, GraphFile};
use crate::ConfigResult;

/// Parse JSON string to a graph file
pub fn parse_graph_json(content: &str) -> ConfigResult<GraphFile> {
    let graph: GraphFile = serde_json::from_str(content).map_err(|e| GraphError::JsonParse {
        message: e.to_string(),
    })?;

    validate_graph(&graph)?;

    Ok(graph)
}

/// Serialize a graph file to pretty JSON
pub fn serialize_graph_json(graph: &GraphFile) -> ConfigResult<String> {
    serde_json::to_string_pretty(graph).map_err(|e| GraphError::serialization("graph JSON", e))
}

/// Load and parse a JSON graph file
pub async fn load_from_file(path: &Utf8Path) -> ConfigResult<GraphFile> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| GraphError::io(format!("Failed to read {}", path), e))?;

    parse_graph_json(&content).map_err(|e| match e {
        GraphError::JsonParse { message } => GraphError::JsonParse {
            message: format!("In file {}: {}", path, message),
        },
        GraphError::ConfigValidation { field, reason } => GraphError::ConfigValidation {
            field,
            reason: format!("In file {}: {}", path, reason),
        },
        other => other,
    })
}
