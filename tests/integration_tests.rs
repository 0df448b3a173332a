mod common;

use common::{p, square, square_workspace, SQUARE_MAP};
use std::fs;
use std::sync::Arc;
use tempfile::{tempdir, NamedTempFile};
use visibility_planner::adapters::outbound::{
    init_noop_logger, FilesystemDataSource, GeoJsonFileExporter, MemoryLogger,
};
use visibility_planner::application::{path_sequence_lines, render_report, PathPlanningService};
use visibility_planner::common::{ApplicationError, DomainError, DomainResult};
use visibility_planner::config::{Config, PlannerConfig};
use visibility_planner::domains::logger::DomainLogger;
use visibility_planner::domains::path_planning::*;

fn service_with(logger: Arc<dyn DomainLogger>, base: &std::path::Path) -> PathPlanningService {
    PathPlanningService::new(
        Arc::new(FilesystemDataSource::new(Some(base.to_path_buf()))),
        logger,
        PlannerConfig::default(),
    )
}

#[test]
fn test_plan_square_workspace_end_to_end() {
    let memory = Arc::new(MemoryLogger::new());
    let service = service_with(memory.clone(), std::path::Path::new("."));
    let report = service.plan(&square_workspace()).unwrap();

    assert_eq!(report.graph.vertices, 6);
    assert_eq!(report.graph.edges, 10);
    assert_eq!(report.graph.components, 1);
    assert!(report.graph.start_goal_connected);
    assert_eq!(report.graph.top_degrees.len(), 6);

    assert!(report.validation.valid);
    assert!(report.validation.fully_connected);
    assert_eq!(report.tree.edges.len(), 5);

    let path = report.path.clone().found().unwrap();
    assert_eq!(path.points.first(), Some(&p(0.0, 0.0)));
    assert_eq!(path.points.last(), Some(&p(10.0, 10.0)));
    let stats = report.path_stats.clone().unwrap();
    assert!(stats.ratio.value() > 1.0);
    assert_eq!(report.quality, Some(PathQuality::Efficient));

    let records = memory.records();
    assert!(records.iter().any(|r| r.starts_with("INFO:Path found")));
    assert!(!records.iter().any(|r| r.starts_with("WARN:")));
}

#[test]
fn test_nearest_probes() {
    let service = service_with(init_noop_logger(), std::path::Path::new("."));
    let report = service.plan(&square_workspace()).unwrap();

    assert_eq!(report.probes.len(), 4);
    let queries: Vec<Point> = report.probes.iter().map(|probe| probe.query).collect();
    assert_eq!(queries, vec![p(5.0, 5.0), p(0.0, 0.0), p(10.0, 10.0), p(1.0, 1.0)]);

    assert_eq!(report.probes[1].kind, Some(VertexKind::Start));
    assert_eq!(report.probes[2].kind, Some(VertexKind::Goal));
    assert_eq!(report.probes[3].kind, Some(VertexKind::Start));
    assert_eq!(report.probes[0].kind, Some(VertexKind::ObstacleCorner));
    assert!(report.probes.iter().all(|probe| probe.error.is_none()));
}

#[test]
fn test_plan_map_from_directory() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("square.txt"), SQUARE_MAP).unwrap();
    let memory = Arc::new(MemoryLogger::new());
    let service = service_with(memory.clone(), dir.path());

    let report = service.plan_map("square.txt").unwrap();
    assert_eq!(report.workspace, square_workspace());
    assert!(report.path.is_found());
    assert!(memory.records().iter().any(|r| r.contains("Map 'square.txt' loaded")));
}

#[test]
fn test_plan_map_propagates_parse_errors() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("broken.txt"), "0 0\n10 10\n1\n3\n1 1\n").unwrap();
    let service = service_with(init_noop_logger(), dir.path());

    let result = service.plan_map("broken.txt");
    assert!(matches!(
        result,
        Err(ApplicationError::Domain(DomainError::MalformedMap { line: 4, .. }))
    ));
}

#[test]
fn test_goal_inside_obstacle_has_no_path() {
    let memory = Arc::new(MemoryLogger::new());
    let service = service_with(memory.clone(), std::path::Path::new("."));
    let ws = Workspace::new(p(0.0, 0.0), p(5.0, 5.0), vec![square()]);

    let report = service.plan(&ws).unwrap();
    assert_eq!(report.path, PathSearch::NotFound(NoPathReason::EndNotInTree));
    assert!(report.path_stats.is_none());
    assert!(report.quality.is_none());
    assert!(!report.graph.start_goal_connected);
    assert_eq!(report.graph.components, 2);
    assert_eq!(report.validation.disconnected_vertices, 1);

    let records = memory.records();
    assert!(records.iter().any(|r| r.starts_with("WARN:No path between start and goal")));
}

#[test]
fn test_non_finite_workspace_is_rejected() {
    let service = service_with(init_noop_logger(), std::path::Path::new("."));
    let ws = Workspace::new(p(f64::NAN, 0.0), p(5.0, 5.0), vec![]);
    assert!(matches!(
        service.plan(&ws),
        Err(ApplicationError::Domain(DomainError::MalformedInput { .. }))
    ));
}

struct FailingExporter;

impl PlanExporter for FailingExporter {
    fn export(&self, _report: &PlanReport) -> DomainResult<()> {
        Err(DomainError::InfrastructureError("disk full".to_string()))
    }
}

#[test]
fn test_plan_is_exported_when_configured() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("plan.geojson");
    let memory = Arc::new(MemoryLogger::new());
    let service = service_with(memory.clone(), dir.path())
        .with_exporter(Arc::new(GeoJsonFileExporter::new(&target)));

    service.plan(&square_workspace()).unwrap();
    assert!(target.exists());
    assert!(memory.records().contains(&"INFO:Plan exported".to_string()));
}

#[test]
fn test_export_failure_is_reported() {
    let service = service_with(init_noop_logger(), std::path::Path::new("."))
        .with_exporter(Arc::new(FailingExporter));
    match service.plan(&square_workspace()) {
        Err(ApplicationError::Export(msg)) => assert!(msg.contains("disk full")),
        other => panic!("expected an export error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_cutoff_from_config_is_applied() {
    let settings = PlannerConfig { max_edge_length: Some(6.0), top_degrees: 2 };
    let service = PathPlanningService::new(
        Arc::new(FilesystemDataSource::new(Some(".".into()))),
        init_noop_logger(),
        settings,
    );
    let report = service.plan(&square_workspace()).unwrap();
    assert_eq!(report.graph.edges, 6);
    assert_eq!(report.graph.build.skipped_by_cutoff, 7);
    assert_eq!(report.graph.top_degrees.len(), 2);
    assert!(report.tree.edges.iter().all(|e| e.weight <= 6.0));
}

#[test]
fn test_config_from_toml() {
    let config = Config::from_toml(
        r#"
        [map]
        data_dir = "maps"
        file = "square.txt"

        [planner]
        max_edge_length = 12.5

        [output]
        json = true

        [logging]
        level = "debug"
        buffer = 64
        "#,
    )
    .unwrap();

    assert_eq!(config.map.data_dir.as_deref(), Some("maps"));
    assert_eq!(config.map.file, "square.txt");
    assert_eq!(config.planner.max_edge_length, Some(12.5));
    assert_eq!(config.planner.top_degrees, 6);
    assert!(config.output.json);
    assert!(config.output.geojson.is_none());
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.buffer, 64);
}

#[test]
fn test_config_defaults_and_invalid_cutoff() {
    let config = Config::from_toml("").unwrap();
    assert_eq!(config.map.file, "map.txt");
    assert!(config.planner.max_edge_length.is_none());
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.buffer, 1024);

    assert!(Config::from_toml("[planner]\nmax_edge_length = -3.0\n").is_err());
    assert!(Config::from_toml("[planner]\ntop_degrees = \"many\"\n").is_err());
}

#[tokio::test]
async fn test_config_from_file() {
    let file = NamedTempFile::new().unwrap();
    fs::write(file.path(), "[map]\nfile = \"obstacles.txt\"\n").unwrap();

    let config = Config::from_file(file.path()).await.unwrap();
    assert_eq!(config.map.file, "obstacles.txt");

    assert!(Config::from_file("/nonexistent/planner.toml").await.is_err());
}

#[test]
fn test_render_report_sections() {
    let service = service_with(init_noop_logger(), std::path::Path::new("."));
    let text = render_report(&service.plan(&square_workspace()).unwrap());

    assert!(text.contains("Start: (0, 0)  Goal: (10, 10)"));
    assert!(text.contains("vertices: 6  edges: 10  components: 1"));
    assert!(text.contains("coverage: 6/6 (100.0%)"));
    assert!(text.contains("quality: efficient"));
    assert!(text.contains("1. (0, 0)"));
    assert!(text.contains("5. (10, 10)"));
    assert!(!text.contains("..."));
}

#[test]
fn test_render_report_without_path() {
    let service = service_with(init_noop_logger(), std::path::Path::new("."));
    let ws = Workspace::new(p(0.0, 0.0), p(5.0, 5.0), vec![square()]);
    let text = render_report(&service.plan(&ws).unwrap());
    assert!(text.contains("NOT connected"));
    assert!(text.contains("no path: EndNotInTree"));
}

#[test]
fn test_long_paths_are_elided() {
    let points: Vec<Point> = (0..8).map(|i| p(i as f64, 0.0)).collect();
    let lines = path_sequence_lines(&points);
    assert_eq!(lines.len(), 7);
    assert_eq!(lines[0], "1. (0, 0)");
    assert_eq!(lines[3], "...");
    assert_eq!(lines[6], "8. (7, 0)");

    let short = path_sequence_lines(&points[..6]);
    assert_eq!(short.len(), 6);
    assert!(path_sequence_lines(&[]).is_empty());
}
