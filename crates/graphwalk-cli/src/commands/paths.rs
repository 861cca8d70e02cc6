//! `graphwalk paths` command implementation.
//!
//! Prints the shortest distance from the source to every node. Unreachable
//! nodes are part of a normal result.

use camino::Utf8PathBuf;
use graphwalk_config::{NodeRef, ResolvedGraph};
use graphwalk_core::error::GraphResult;
use graphwalk_core::Weight;
use graphwalk_paths::{DistanceMap, ShortestPathEngine};
use serde::Serialize;

use super::{node_names, pick_source, CommandContext, Status};

#[derive(Debug, Serialize)]
pub struct PathsReport {
    pub file: Utf8PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph: Option<String>,
    pub source: String,
    pub nodes: Vec<NodeDistance>,
}

#[derive(Debug, Serialize)]
pub struct NodeDistance {
    pub id: usize,
    pub node: String,
    /// `None` when unreachable
    pub distance: Option<Weight>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<String>>,
}

/// Execute the `graphwalk paths` command
pub async fn execute(
    file: Utf8PathBuf,
    source: Option<NodeRef>,
    with_paths: bool,
    ctx: &CommandContext,
) -> GraphResult<Status> {
    let (graph, _source) = ctx.loader.load_graph(&file).await?;
    let source = pick_source(&graph, source.as_ref())?;

    let engine = ShortestPathEngine::new(graph.node_count(), graph.edges())?;
    let distances = engine.shortest_paths(source)?;
    let report = build_report(file, &graph, &distances, with_paths);

    if ctx.output.is_json() {
        ctx.output.json(&report)?;
        return Ok(Status::Success);
    }

    let colors = ctx.output.colors();
    let header = match &report.graph {
        Some(name) => format!("Distances from {} in {}", report.source, name),
        None => format!("Distances from {}", report.source),
    };
    ctx.output.line(&colors.bold(&header));

    let width = label_width(&report);
    for entry in &report.nodes {
        let distance = match entry.distance {
            Some(distance) => distance.to_string(),
            None => colors.dim("unreachable"),
        };
        let mut line = format!("  {:<width$}  {}", entry.node, distance, width = width);
        if let Some(path) = &entry.path {
            line.push_str(&format!("  via {}", path.join(" -> ")));
        }
        ctx.output.line(&line);
    }

    Ok(Status::Success)
}

/// Widest node name in chars, which is what `{:<width$}` pads by
pub fn label_width(report: &PathsReport) -> usize {
    report
        .nodes
        .iter()
        .map(|entry| entry.node.chars().count())
        .max()
        .unwrap_or(0)
}

pub fn build_report(
    file: Utf8PathBuf,
    graph: &ResolvedGraph,
    distances: &DistanceMap,
    with_paths: bool,
) -> PathsReport {
    let nodes = distances
        .iter()
        .map(|(id, distance)| NodeDistance {
            id,
            node: graph.label(id),
            distance,
            path: if with_paths {
                distances.path_to(id).map(|path| node_names(graph, &path))
            } else {
                None
            },
        })
        .collect();

    PathsReport {
        file,
        graph: graph.name().map(str::to_string),
        source: graph.label(distances.source()),
        nodes,
    }
}
