//! `graphwalk check` command implementation.
//!
//! Reports whether each graph file can be ordered. Exits non-zero when any
//! file has a cycle or cannot be loaded.

use camino::{Utf8Path, Utf8PathBuf};
use graphwalk_config::ResolvedGraph;
use graphwalk_core::error::GraphResult;
use graphwalk_resolver::DependencyResolver;
use rayon::prelude::*;
use serde::Serialize;

use super::{load_graphs, node_names, CommandContext, Status};

#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub file: Utf8PathBuf,
    pub acyclic: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cycle: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Execute the `graphwalk check` command
pub async fn execute(files: Vec<Utf8PathBuf>, ctx: &CommandContext) -> GraphResult<Status> {
    let loaded = load_graphs(&files, ctx).await;

    let reports: Vec<CheckReport> = loaded
        .par_iter()
        .map(|(file, graph)| check_graph(file, graph))
        .collect();

    if ctx.output.is_json() {
        ctx.output.json(&reports)?;
    } else {
        for report in &reports {
            if report.acyclic {
                ctx.output.success(&format!("{}: no cycles", report.file));
            } else if let Some(cycle) = &report.cycle {
                ctx.output.error(&format!("{}: cycle {}", report.file, cycle.join(" -> ")));
            } else if let Some(error) = &report.error {
                ctx.output.error(&format!("{}: {}", report.file, error));
            }
        }
    }

    let failed = reports.iter().filter(|report| !report.acyclic).count();
    if failed == 0 {
        Ok(Status::Success)
    } else {
        if !ctx.output.is_json() {
            ctx.output.warn(&format!("{} of {} file(s) failed the check", failed, reports.len()));
        }
        Ok(Status::Failed)
    }
}

pub fn check_graph(file: &Utf8Path, graph: &GraphResult<ResolvedGraph>) -> CheckReport {
    let mut report = CheckReport {
        file: file.to_path_buf(),
        acyclic: false,
        cycle: None,
        error: None,
    };

    let resolver = graph
        .as_ref()
        .map_err(|e| e.to_string())
        .and_then(|graph| {
            DependencyResolver::new(graph.node_count(), &graph.dependency_edges())
                .map(|resolver| (graph, resolver))
                .map_err(|e| e.to_string())
        });

    match resolver {
        Ok((graph, resolver)) => match resolver.resolve() {
            Ok(_) => report.acyclic = true,
            Err(cycle) => report.cycle = Some(node_names(graph, &cycle.cycle)),
        },
        Err(error) => report.error = Some(error),
    }

    report
}
