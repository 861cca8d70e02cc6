//! # graphwalk-cli
//!
//! Dependency ordering and shortest-path queries over graph files.
//!
//! This is the main entry point for the graphwalk CLI tool. It handles command parsing,
//! layers settings, sets up logging and error handling, and dispatches to the
//! appropriate command handlers.

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use graphwalk_config::{ConfigLoader, ConfigSource, NodeRef, Settings, SettingsLayering};
use graphwalk_core::error::{GraphError, GraphResult};
use std::process::ExitCode;
use tracing::{debug, error, info};

mod commands;
mod output;

use commands::{CommandContext, Status};
use output::{colors::ColorSupport, errors::ErrorFormatter};

/// Dependency ordering and shortest-path queries over graph files
#[derive(Parser)]
#[command(name = "graphwalk", version, about = "Order dependencies and measure propagation over directed graphs")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text or json)
    #[arg(long, global = true, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Colour output (auto, always or never)
    #[arg(long, global = true, value_name = "WHEN")]
    pub color: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print a dependency order for each graph file
    Order {
        #[arg(required = true, value_name = "FILE")]
        files: Vec<Utf8PathBuf>,
    },
    /// Report whether each graph file is free of cycles
    Check {
        #[arg(required = true, value_name = "FILE")]
        files: Vec<Utf8PathBuf>,
    },
    /// Group nodes into layers that can run together
    Layers {
        #[arg(value_name = "FILE")]
        file: Utf8PathBuf,
    },
    /// Shortest distances from a source node
    Paths {
        #[arg(value_name = "FILE")]
        file: Utf8PathBuf,
        /// Source node id or label (defaults to graph.source)
        #[arg(short, long, value_parser = parse_node_ref)]
        source: Option<NodeRef>,
        /// Also print the path to each node
        #[arg(long)]
        paths: bool,
    },
    /// Time for a signal from the source to reach every node
    Delay {
        #[arg(value_name = "FILE")]
        file: Utf8PathBuf,
        /// Source node id or label (defaults to graph.source)
        #[arg(short, long, value_parser = parse_node_ref)]
        source: Option<NodeRef>,
    },
    /// Show version information
    Version,
}

/// Digits name a node id, anything else a label
fn parse_node_ref(value: &str) -> Result<NodeRef, std::convert::Infallible> {
    value.parse()
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run_cli(cli) {
        Ok(status) => status.into(),
        Err(e) => {
            eprint!("{}", ErrorFormatter::new(ColorSupport::detect()).format_error(&e));
            ExitCode::FAILURE
        },
    }
}

fn run_cli(cli: Cli) -> GraphResult<Status> {
    // Create Tokio runtime for async operations
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| GraphError::io("Failed to create async runtime".to_string(), e))?;

    rt.block_on(async {
        let cwd = std::env::current_dir()
            .map_err(|e| GraphError::io("Failed to get current directory".to_string(), e))?;
        let cwd = Utf8PathBuf::try_from(cwd)
            .map_err(|e| GraphError::config("cwd", format!("Current directory is not UTF-8: {}", e)))?;
        let loader = ConfigLoader::new(cwd);

        let (settings, sources) = layer_settings(&cli, &loader).await?;

        setup_logging(&settings);
        setup_panic_handler();

        info!("Starting graphwalk v{}", env!("CARGO_PKG_VERSION"));
        for (field, source) in sources {
            debug!("Setting {} from {:?}", field, source);
        }

        let ctx = CommandContext::new(loader, settings);
        commands::dispatch_command(cli.command, &ctx).await
    })
}

async fn layer_settings(
    cli: &Cli,
    loader: &ConfigLoader,
) -> GraphResult<(Settings, Vec<(&'static str, ConfigSource)>)> {
    let mut layering = SettingsLayering::new()
        .with_global(loader.load_global_settings().await?)
        .with_env(SettingsLayering::env_from_process());

    if cli.verbose {
        layering = layering.with_cli("log_level", "debug");
    }
    if let Some(format) = &cli.format {
        layering = layering.with_cli("format", format.as_str());
    }
    if let Some(color) = &cli.color {
        layering = layering.with_cli("color", color.as_str());
    }

    layering.merge()
}

fn setup_logging(settings: &Settings) {
    let level = &settings.log_level;
    let filter = format!(
        "graphwalk={level},graphwalk_core={level},graphwalk_resolver={level},graphwalk_paths={level},graphwalk_config={level}"
    );

    // Logs go to stderr so stdout stays machine readable
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    match settings.format {
        graphwalk_config::OutputFormat::Json => builder.json().init(),
        graphwalk_config::OutputFormat::Text => builder.init(),
    }
}

fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        error!("graphwalk encountered an unexpected error: {}", panic_info);
        eprintln!("graphwalk crashed! This is a bug.");
        eprintln!("Error: {}", panic_info);
    }));
}
