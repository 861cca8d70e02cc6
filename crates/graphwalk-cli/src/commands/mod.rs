//! Command implementations and dispatch logic.
//!
//! This module contains all command handlers and the central dispatch system.
//! Each command is implemented as an async function that takes a CommandContext.

use camino::Utf8PathBuf;
use graphwalk_config::{ConfigLoader, NodeRef, ResolvedGraph, Settings};
use graphwalk_core::error::{GraphError, GraphResult};
use graphwalk_core::NodeId;
use std::process::ExitCode;
use tracing::info;

pub mod check;
pub mod delay;
pub mod layers;
pub mod order;
pub mod paths;
pub mod version;

#[cfg(test)]
mod tests;

use crate::{output::OutputHandler, Commands};

/// Shared context for all commands
pub struct CommandContext {
    pub loader: ConfigLoader,
    pub settings: Settings,
    pub output: OutputHandler,
}

/// Outcome of a command that ran to completion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    /// A cycle or unreachable node was reported
    Failed,
}

impl CommandContext {
    /// Create a new command context
    pub fn new(loader: ConfigLoader, settings: Settings) -> Self {
        let output = OutputHandler::new(&settings);
        Self {
            loader,
            settings,
            output,
        }
    }
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        match status {
            Status::Success => ExitCode::SUCCESS,
            Status::Failed => ExitCode::from(1),
        }
    }
}

impl Status {
    /// Failed if any part failed
    pub fn all(statuses: impl IntoIterator<Item = Status>) -> Status {
        if statuses.into_iter().any(|status| status == Status::Failed) {
            Status::Failed
        } else {
            Status::Success
        }
    }
}

/// Dispatch a command to its handler
pub async fn dispatch_command(command: Commands, ctx: &CommandContext) -> GraphResult<Status> {
    match command {
        Commands::Order { files } => {
            info!("Ordering {} graph file(s)", files.len());
            order::execute(files, ctx).await
        },
        Commands::Check { files } => {
            info!("Checking {} graph file(s) for cycles", files.len());
            check::execute(files, ctx).await
        },
        Commands::Layers { file } => {
            info!("Layering graph: {}", file);
            layers::execute(file, ctx).await
        },
        Commands::Paths {
            file,
            source,
            paths,
        } => {
            info!("Shortest paths for {} (source: {:?}, paths: {})", file, source, paths);
            paths::execute(file, source, paths, ctx).await
        },
        Commands::Delay { file, source } => {
            info!("Propagation delay for {} (source: {:?})", file, source);
            delay::execute(file, source, ctx).await
        },
        Commands::Version => {
            info!("Showing version information");
            version::execute(ctx).await
        },
    }
}

/// Load graph files in argument order, keeping per-file failures
pub async fn load_graphs(
    files: &[Utf8PathBuf],
    ctx: &CommandContext,
) -> Vec<(Utf8PathBuf, GraphResult<ResolvedGraph>)> {
    let mut loaded = Vec::with_capacity(files.len());
    for file in files {
        let graph = ctx.loader.load_graph(file).await.map(|(graph, _source)| graph);
        loaded.push((file.clone(), graph));
    }
    loaded
}

/// Display names for a list of nodes
pub fn node_names(graph: &ResolvedGraph, nodes: &[NodeId]) -> Vec<String> {
    nodes.iter().map(|&node| graph.label(node)).collect()
}

/// Source from the command line, else the one declared in the file
pub fn pick_source(graph: &ResolvedGraph, requested: Option<&NodeRef>) -> GraphResult<NodeId> {
    match (requested, graph.source()) {
        (Some(node), _) => graph.lookup(node),
        (None, Some(source)) => Ok(source),
        (None, None) => Err(GraphError::config(
            "source",
            "No source node given; pass --source or set graph.source in the file",
        )),
    }
}
