//! `graphwalk order` command implementation.
//!
//! Loads every graph file, resolves them in parallel and prints one
//! dependency order per file.

use camino::{Utf8Path, Utf8PathBuf};
use graphwalk_config::ResolvedGraph;
use graphwalk_core::error::GraphResult;
use graphwalk_resolver::DependencyResolver;
use rayon::prelude::*;
use serde::Serialize;

use super::{load_graphs, node_names, CommandContext, Status};

/// Result for a single graph file
#[derive(Debug, Serialize)]
pub struct OrderReport {
    pub file: Utf8PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cycle: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl OrderReport {
    pub fn status(&self) -> Status {
        if self.order.is_some() {
            Status::Success
        } else {
            Status::Failed
        }
    }
}

/// Execute the `graphwalk order` command
pub async fn execute(files: Vec<Utf8PathBuf>, ctx: &CommandContext) -> GraphResult<Status> {
    let loaded = load_graphs(&files, ctx).await;

    let reports: Vec<OrderReport> = loaded
        .par_iter()
        .map(|(file, graph)| order_graph(file, graph))
        .collect();

    if ctx.output.is_json() {
        ctx.output.json(&reports)?;
    } else {
        for report in &reports {
            print_report(report, ctx);
        }
    }

    Ok(Status::all(reports.iter().map(OrderReport::status)))
}

/// Resolve one loaded graph into a report
pub fn order_graph(file: &Utf8Path, graph: &GraphResult<ResolvedGraph>) -> OrderReport {
    let mut report = OrderReport {
        file: file.to_path_buf(),
        order: None,
        cycle: None,
        error: None,
    };

    let graph = match graph {
        Ok(graph) => graph,
        Err(e) => {
            report.error = Some(e.to_string());
            return report;
        },
    };

    match DependencyResolver::new(graph.node_count(), &graph.dependency_edges()) {
        Ok(resolver) => match resolver.resolve() {
            Ok(order) => report.order = Some(node_names(graph, order.as_slice())),
            Err(cycle) => report.cycle = Some(node_names(graph, &cycle.cycle)),
        },
        Err(e) => report.error = Some(e.to_string()),
    }

    report
}

fn print_report(report: &OrderReport, ctx: &CommandContext) {
    let output = &ctx.output;
    let colors = output.colors();

    if let Some(order) = &report.order {
        output.line(&colors.bold(report.file.as_str()));
        for (position, node) in order.iter().enumerate() {
            output.line(&format!("  {:>3}. {}", position + 1, node));
        }
    } else if let Some(cycle) = &report.cycle {
        output.error(&format!(
            "{}: circular dependency detected: {}",
            report.file,
            cycle.join(" -> ")
        ));
    } else if let Some(error) = &report.error {
        output.error(&format!("{}: {}", report.file, error));
    }
}
