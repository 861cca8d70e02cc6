//! Unit tests for CLI commands.

use super::*;
use camino::Utf8Path;
use graphwalk_config::toml::parse_graph_toml;
use graphwalk_config::{ColorChoice, OutputFormat};
use graphwalk_paths::ShortestPathEngine;
use std::fs;
use tempfile::TempDir;

const COURSES: &str = r#"
[graph]
name = "courses"
labels = ["intro", "ds", "algo", "systems"]
source = "intro"

[[edges]]
from = "intro"
to = "ds"
weight = 2

[[edges]]
from = "ds"
to = "algo"
weight = 3

[[edges]]
from = "intro"
to = "systems"
weight = 9
"#;

const CYCLIC: &str = r#"
[graph]
labels = ["a", "b", "c"]

[[edges]]
from = "a"
to = "b"

[[edges]]
from = "b"
to = "c"

[[edges]]
from = "c"
to = "b"
"#;

/// Create a temporary directory for testing
fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Create a test command context in a temporary directory
fn create_test_context(temp_dir: &TempDir, format: OutputFormat) -> CommandContext {
    let cwd = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    let settings = Settings {
        format,
        color: ColorChoice::Never,
        ..Settings::default()
    };
    CommandContext::new(ConfigLoader::new(cwd), settings)
}

fn write_graph(temp_dir: &TempDir, name: &str, content: &str) -> Utf8PathBuf {
    fs::write(temp_dir.path().join(name), content).unwrap();
    Utf8PathBuf::from(name)
}

fn resolved(content: &str) -> ResolvedGraph {
    parse_graph_toml(content).unwrap().resolve().unwrap()
}

#[test]
fn test_status_all() {
    assert_eq!(Status::all([]), Status::Success);
    assert_eq!(Status::all([Status::Success, Status::Success]), Status::Success);
    assert_eq!(Status::all([Status::Success, Status::Failed]), Status::Failed);
}

#[test]
fn test_pick_source() {
    let graph = resolved(COURSES);
    assert_eq!(pick_source(&graph, None).unwrap(), 0);
    assert_eq!(pick_source(&graph, Some(&NodeRef::from("algo"))).unwrap(), 2);
    assert_eq!(pick_source(&graph, Some(&NodeRef::Index(3))).unwrap(), 3);

    let graph = resolved(CYCLIC);
    assert!(matches!(
        pick_source(&graph, None),
        Err(GraphError::ConfigValidation { .. })
    ));
}

#[test]
fn test_order_graph_reports_labels() {
    let graph = Ok(resolved(COURSES));
    let report = order::order_graph(Utf8Path::new("courses.toml"), &graph);

    assert_eq!(report.status(), Status::Success);
    let order = report.order.unwrap();
    let position = |label: &str| order.iter().position(|node| node == label).unwrap();
    assert!(position("intro") < position("ds"));
    assert!(position("ds") < position("algo"));
    assert!(position("intro") < position("systems"));
}

#[test]
fn test_order_graph_reports_cycle() {
    let graph = Ok(resolved(CYCLIC));
    let report = order::order_graph(Utf8Path::new("cyclic.toml"), &graph);

    assert_eq!(report.status(), Status::Failed);
    assert!(report.order.is_none());
    assert_eq!(report.cycle.unwrap(), vec!["b", "c", "b"]);
}

#[test]
fn test_order_graph_keeps_load_error() {
    let graph = Err(GraphError::config("file", "bad extension"));
    let report = order::order_graph(Utf8Path::new("graph.yaml"), &graph);

    assert_eq!(report.status(), Status::Failed);
    assert!(report.error.unwrap().contains("bad extension"));
}

#[test]
fn test_check_graph() {
    let report = check::check_graph(Utf8Path::new("courses.toml"), &Ok(resolved(COURSES)));
    assert!(report.acyclic);
    assert!(report.cycle.is_none());

    let report = check::check_graph(Utf8Path::new("cyclic.toml"), &Ok(resolved(CYCLIC)));
    assert!(!report.acyclic);
    assert_eq!(report.cycle.unwrap(), vec!["b", "c", "b"]);
}

#[test]
fn test_paths_report() {
    let graph = resolved("[graph]\nnodes = 3\n[[edges]]\nfrom = 0\nto = 1\nweight = 4\n");
    let engine = ShortestPathEngine::new(graph.node_count(), graph.edges()).unwrap();
    let distances = engine.shortest_paths(0).unwrap();

    let report = paths::build_report(Utf8PathBuf::from("g.toml"), &graph, &distances, true);
    assert_eq!(report.source, "0");
    assert_eq!(report.nodes[1].distance, Some(4));
    assert_eq!(report.nodes[1].path, Some(vec!["0".to_string(), "1".to_string()]));
    assert_eq!(report.nodes[2].distance, None);
    assert_eq!(report.nodes[2].path, None);

    let report = paths::build_report(Utf8PathBuf::from("g.toml"), &graph, &distances, false);
    assert!(report.nodes.iter().all(|entry| entry.path.is_none()));
    assert_eq!(report.graph, None);
}

#[test]
fn test_paths_report_names_graph() {
    let graph = resolved(COURSES);
    let engine = ShortestPathEngine::new(graph.node_count(), graph.edges()).unwrap();
    let distances = engine.shortest_paths(0).unwrap();

    let report = paths::build_report(Utf8PathBuf::from("courses.toml"), &graph, &distances, false);
    assert_eq!(report.graph.as_deref(), Some("courses"));
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["graph"], "courses");
}

#[test]
fn test_label_width_counts_chars() {
    let graph = resolved(
        "[graph]\nlabels = [\"déjà\", \"ab\", \"日本語\"]\n[[edges]]\nfrom = \"déjà\"\nto = \"ab\"\n",
    );
    let engine = ShortestPathEngine::new(graph.node_count(), graph.edges()).unwrap();
    let distances = engine.shortest_paths(0).unwrap();

    let report = paths::build_report(Utf8PathBuf::from("g.toml"), &graph, &distances, false);
    // "déjà" is 6 bytes but 4 chars
    assert_eq!(paths::label_width(&report), 4);
}

#[tokio::test]
async fn test_order_command_multiple_files() {
    let temp_dir = create_temp_dir();
    let ctx = create_test_context(&temp_dir, OutputFormat::Text);
    let courses = write_graph(&temp_dir, "courses.toml", COURSES);
    let json = write_graph(
        &temp_dir,
        "chain.json",
        r#"{ "graph": { "nodes": 3 }, "edges": [{ "from": 2, "to": 1 }, { "from": 1, "to": 0 }] }"#,
    );

    let status = order::execute(vec![courses, json], &ctx).await.unwrap();
    assert_eq!(status, Status::Success);
}

#[tokio::test]
async fn test_order_command_fails_on_cycle() {
    let temp_dir = create_temp_dir();
    let ctx = create_test_context(&temp_dir, OutputFormat::Json);
    let courses = write_graph(&temp_dir, "courses.toml", COURSES);
    let cyclic = write_graph(&temp_dir, "cyclic.toml", CYCLIC);

    let status = order::execute(vec![courses, cyclic], &ctx).await.unwrap();
    assert_eq!(status, Status::Failed);
}

#[tokio::test]
async fn test_check_command() {
    let temp_dir = create_temp_dir();
    let ctx = create_test_context(&temp_dir, OutputFormat::Text);
    let courses = write_graph(&temp_dir, "courses.toml", COURSES);
    let cyclic = write_graph(&temp_dir, "cyclic.toml", CYCLIC);

    assert_eq!(
        check::execute(vec![courses.clone()], &ctx).await.unwrap(),
        Status::Success
    );
    assert_eq!(
        check::execute(vec![courses, cyclic], &ctx).await.unwrap(),
        Status::Failed
    );
}

#[tokio::test]
async fn test_check_command_missing_file() {
    let temp_dir = create_temp_dir();
    let ctx = create_test_context(&temp_dir, OutputFormat::Text);

    let status = check::execute(vec![Utf8PathBuf::from("missing.toml")], &ctx)
        .await
        .unwrap();
    assert_eq!(status, Status::Failed);
}

#[tokio::test]
async fn test_layers_command() {
    let temp_dir = create_temp_dir();
    let ctx = create_test_context(&temp_dir, OutputFormat::Text);
    let courses = write_graph(&temp_dir, "courses.toml", COURSES);
    let cyclic = write_graph(&temp_dir, "cyclic.toml", CYCLIC);

    assert_eq!(layers::execute(courses, &ctx).await.unwrap(), Status::Success);
    assert_eq!(layers::execute(cyclic, &ctx).await.unwrap(), Status::Failed);
}

#[tokio::test]
async fn test_layers_command_propagates_load_error() {
    let temp_dir = create_temp_dir();
    let ctx = create_test_context(&temp_dir, OutputFormat::Text);
    let broken = write_graph(&temp_dir, "broken.toml", "[graph\n");

    assert!(matches!(
        layers::execute(broken, &ctx).await,
        Err(GraphError::TomlParse { .. })
    ));
}

#[tokio::test]
async fn test_paths_command() {
    let temp_dir = create_temp_dir();
    let ctx = create_test_context(&temp_dir, OutputFormat::Text);
    let courses = write_graph(&temp_dir, "courses.toml", COURSES);

    let status = paths::execute(courses.clone(), None, true, &ctx).await.unwrap();
    assert_eq!(status, Status::Success);

    let status = paths::execute(courses.clone(), Some(NodeRef::from("algo")), false, &ctx)
        .await
        .unwrap();
    assert_eq!(status, Status::Success);

    let result = paths::execute(courses, Some(NodeRef::Index(9)), false, &ctx).await;
    assert!(matches!(result, Err(GraphError::UnknownNode { node: 9, .. })));
}

#[tokio::test]
async fn test_delay_command() {
    let temp_dir = create_temp_dir();
    let ctx = create_test_context(&temp_dir, OutputFormat::Json);
    let courses = write_graph(&temp_dir, "courses.toml", COURSES);

    assert_eq!(
        delay::execute(courses.clone(), None, &ctx).await.unwrap(),
        Status::Success
    );
    // Nothing leaves "algo"
    assert_eq!(
        delay::execute(courses, Some(NodeRef::from("algo")), &ctx)
            .await
            .unwrap(),
        Status::Failed
    );
}

#[tokio::test]
async fn test_delay_command_requires_source() {
    let temp_dir = create_temp_dir();
    let ctx = create_test_context(&temp_dir, OutputFormat::Text);
    let cyclic = write_graph(&temp_dir, "cyclic.toml", CYCLIC);

    assert!(matches!(
        delay::execute(cyclic, None, &ctx).await,
        Err(GraphError::ConfigValidation { .. })
    ));
}

#[tokio::test]
async fn test_show_version() {
    let temp_dir = create_temp_dir();
    let ctx = create_test_context(&temp_dir, OutputFormat::Text);

    let result = version::execute(&ctx).await;
    assert_eq!(result.unwrap(), Status::Success);
}
