//! `graphwalk layers` command implementation.

use camino::Utf8PathBuf;
use graphwalk_core::error::GraphResult;
use graphwalk_resolver::DependencyResolver;
use serde::Serialize;

use super::{node_names, CommandContext, Status};

#[derive(Debug, Serialize)]
struct LayersReport {
    file: Utf8PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    layers: Option<Vec<Vec<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cycle: Option<Vec<String>>,
}

/// Execute the `graphwalk layers` command
pub async fn execute(file: Utf8PathBuf, ctx: &CommandContext) -> GraphResult<Status> {
    let (graph, _source) = ctx.loader.load_graph(&file).await?;
    let resolver = DependencyResolver::new(graph.node_count(), &graph.dependency_edges())?;

    let report = match resolver.layers() {
        Ok(layers) => LayersReport {
            file,
            layers: Some(layers.iter().map(|layer| node_names(&graph, layer)).collect()),
            cycle: None,
        },
        Err(cycle) => LayersReport {
            file,
            layers: None,
            cycle: Some(node_names(&graph, &cycle.cycle)),
        },
    };

    if ctx.output.is_json() {
        ctx.output.json(&report)?;
    } else if let Some(layers) = &report.layers {
        for (index, layer) in layers.iter().enumerate() {
            ctx.output.line(&format!("Layer {}: {}", index, layer.join(", ")));
        }
    } else if let Some(cycle) = &report.cycle {
        ctx.output.error(&format!(
            "{}: circular dependency detected: {}",
            report.file,
            cycle.join(" -> ")
        ));
    }

    Ok(if report.layers.is_some() {
        Status::Success
    } else {
        Status::Failed
    })
}
