//! `graphwalk delay` command implementation.
//!
//! Prints the time a signal sent from the source needs to reach every node,
//! or the nodes it never reaches.

use camino::Utf8PathBuf;
use graphwalk_config::NodeRef;
use graphwalk_core::error::{GraphError, GraphResult};
use graphwalk_core::Weight;
use graphwalk_paths::ShortestPathEngine;
use serde::Serialize;

use super::{node_names, pick_source, CommandContext, Status};

#[derive(Debug, Serialize)]
struct DelayReport {
    file: Utf8PathBuf,
    source: String,
    time: Option<Weight>,
    unreachable: Vec<String>,
}

/// Execute the `graphwalk delay` command
pub async fn execute(
    file: Utf8PathBuf,
    source: Option<NodeRef>,
    ctx: &CommandContext,
) -> GraphResult<Status> {
    let (graph, _source) = ctx.loader.load_graph(&file).await?;
    let source = pick_source(&graph, source.as_ref())?;

    let engine = ShortestPathEngine::new(graph.node_count(), graph.edges())?;
    let report = match engine.max_propagation_time(source) {
        Ok(time) => DelayReport {
            file,
            source: graph.label(source),
            time: Some(time),
            unreachable: Vec::new(),
        },
        Err(GraphError::NotAllReachable { unreachable }) => DelayReport {
            file,
            source: graph.label(source),
            time: None,
            unreachable: node_names(&graph, &unreachable),
        },
        Err(e) => return Err(e),
    };

    if ctx.output.is_json() {
        ctx.output.json(&report)?;
    } else if let Some(time) = report.time {
        ctx.output.success(&format!(
            "All {} node(s) reached from {} after {}",
            graph.node_count(),
            report.source,
            time
        ));
    } else {
        ctx.output.error(&format!(
            "{} node(s) never reached from {}: {}",
            report.unreachable.len(),
            report.source,
            report.unreachable.join(", ")
        ));
    }

    Ok(if report.time.is_some() {
        Status::Success
    } else {
        Status::Failed
    })
}
